//! Dice combat.
//!
//! One exchange rolls the attacker's and defender's dice, sorts each group
//! descending and compares them pairwise. The attacker wins a pair only with
//! a strictly higher die; ties go to the defender.

use rand::Rng;

/// Faces on a die.
pub const DIE_FACES: u32 = 6;

/// Dice thrown by each side of one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dice {
    pub attacker: u32,
    pub defender: u32,
}

impl Dice {
    /// Dice for an attack committing `committed` troops against a territory
    /// holding `defending` troops.
    pub fn for_exchange(
        committed: u32,
        defending: u32,
        max_attacker_dice: u32,
        max_defender_dice: u32,
    ) -> Self {
        Dice {
            attacker: committed.min(max_attacker_dice),
            defender: defending.min(max_defender_dice),
        }
    }

    /// Number of compared pairs, which is also the total casualties.
    pub fn pairs(self) -> u32 {
        self.attacker.min(self.defender)
    }

    /// Every possible (attacker losses, defender losses) outcome.
    pub fn outcomes(self) -> impl Iterator<Item = (u32, u32)> {
        let pairs = self.pairs();
        (0..=pairs).map(move |a| (a, pairs - a))
    }
}

/// Rolls one exchange and returns (attacker losses, defender losses).
pub fn resolve(dice: Dice, rng: &mut impl Rng) -> (u32, u32) {
    let attacker = roll(dice.attacker, rng);
    let defender = roll(dice.defender, rng);
    compare(&attacker, &defender)
}

/// Rolls `n` dice, sorted descending.
fn roll(n: u32, rng: &mut impl Rng) -> Vec<u32> {
    let mut dice: Vec<u32> = (0..n).map(|_| rng.gen_range(1..=DIE_FACES)).collect();
    dice.sort_unstable_by(|a, b| b.cmp(a));
    dice
}

/// Pairwise comparison of two descending rolls.
pub fn compare(attacker: &[u32], defender: &[u32]) -> (u32, u32) {
    attacker
        .iter()
        .zip(defender)
        .fold((0, 0), |(a, d), (x, y)| if x > y { (a, d + 1) } else { (a + 1, d) })
}

//! Attack-phase move generation: attacks, dice outcomes and occupation.

use rand::Rng;

use crate::board::{Action, BoardState};
use crate::combat;
use crate::resolve::validate::{attack_cap, max_occupy, pending_dice};

/// `endPhase` plus every attack from an owned territory with more than one
/// troop against an enemy neighbour, for every admissible troop count.
pub fn legal_attacks(state: &BoardState) -> Vec<Action> {
    let player = state.current;
    let mut actions = vec![Action::EndPhase];
    for from in state.owned(player) {
        let cap = attack_cap(state, from);
        if cap == 0 {
            continue;
        }
        for &to in state.graph().neighbors(from) {
            if state.owner(to).is_some_and(|o| o != player) {
                actions.extend((1..=cap).map(|troops| Action::Attack { from, to, troops }));
            }
        }
    }
    actions
}

/// Every casualty split the pending attack's dice allow.
pub fn legal_casualties(state: &BoardState) -> Vec<Action> {
    pending_dice(state)
        .map(|dice| {
            dice.outcomes()
                .map(|(attacker, defender)| Action::Casualties { attacker, defender })
                .collect()
        })
        .unwrap_or_default()
}

/// Rolls the dice of the pending attack.
pub fn roll_casualties(state: &BoardState, rng: &mut impl Rng) -> Option<Action> {
    let dice = pending_dice(state)?;
    let (attacker, defender) = combat::resolve(dice, rng);
    Some(Action::Casualties { attacker, defender })
}

pub fn legal_occupations(state: &BoardState) -> Vec<Action> {
    (1..=max_occupy(state)).map(Action::Occupy).collect()
}

//! Player views of a state.
//!
//! `redact` hides what a seat is not allowed to see; the result is an
//! ordinary `BoardState` on which legality and mission evaluation keep
//! working. The reshuffle seed is replaced too, so the order in which the
//! public discard pile returns to the deck stays hidden. `snapshot` is the read-only occupancy table used for rendering.

use rand::Rng;

use crate::board::{BoardState, Card, PlayerId, TerritoryId};
use crate::mission::Mission;

/// Occupancy of one territory in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerritoryView {
    pub territory: TerritoryId,
    pub occupant: Option<PlayerId>,
    pub troops: u32,
}

/// `state` as seen by `viewer`: other players' hands and the draw deck are
/// replaced by wildcard placeholders and other players' missions by the
/// wildcard mission. Card counts, the discard pile and the board stay as
/// they are; the reshuffle seed is redrawn from `rng`.
pub fn redact(state: &BoardState, viewer: PlayerId, rng: &mut impl Rng) -> BoardState {
    let mut view = state.clone();
    view.seed = rng.gen();
    for (seat, hand) in view.hands.iter_mut().enumerate() {
        if seat != viewer.index() {
            hand.iter_mut().for_each(|c| *c = Card::wildcard());
        }
    }
    view.deck.iter_mut().for_each(|c| *c = Card::wildcard());
    for (seat, mission) in view.missions.iter_mut().enumerate() {
        if seat != viewer.index() {
            *mission = Mission::Wildcard;
        }
    }
    view
}

/// Occupant and troop count of every territory, in id order.
pub fn snapshot(state: &BoardState) -> Vec<TerritoryView> {
    state
        .territories
        .iter()
        .enumerate()
        .map(|(i, t)| TerritoryView {
            territory: TerritoryId(i as u16),
            occupant: t.occupant,
            troops: t.troops,
        })
        .collect()
}

impl BoardState {
    /// See [`redact`].
    pub fn redact(&self, viewer: PlayerId, rng: &mut impl Rng) -> BoardState {
        redact(self, viewer, rng)
    }

    /// See [`snapshot`].
    pub fn snapshot(&self) -> Vec<TerritoryView> {
        snapshot(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Action, CardKind, Territory};
    use crate::config::GameConfig;
    use crate::mission::Logic;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(40)
    }

    fn dealt() -> BoardState {
        let mut state = BoardState::with_seed(GameConfig::default(), 3, 8).unwrap();
        for seat in 0..3 {
            let card = state.deck.pop().unwrap();
            state.hands[seat].push(card);
        }
        state
    }

    #[test]
    fn viewer_keeps_own_secrets() {
        let state = dealt();
        let view = redact(&state, PlayerId(1), &mut rng());
        assert_eq!(view.hands[1], state.hands[1]);
        assert_eq!(view.missions[1], state.missions[1]);
        assert_eq!(view.hands[0], vec![Card::wildcard()]);
        assert_eq!(view.missions[0], Mission::Wildcard);
        assert_eq!(view.missions[2], Mission::Wildcard);
        assert!(view.deck.iter().all(|c| c.kind == CardKind::Wildcard));
        assert_eq!(view.deck.len(), state.deck.len());
        assert_eq!(view.territories, state.territories);
        assert_ne!(view.seed, state.seed);
    }

    #[test]
    fn redaction_leaves_the_original_alone() {
        let state = dealt();
        let before = state.clone();
        let _ = redact(&state, PlayerId(0), &mut rng());
        assert_eq!(state, before);
    }

    #[test]
    fn redacted_state_keeps_playing() {
        let state = dealt();
        let view = redact(&state, PlayerId(2), &mut rng());
        assert_eq!(view.legal_actions(), state.legal_actions());
        let next = view.apply(Action::Select(TerritoryId(3))).unwrap();
        assert_eq!(next.owner(TerritoryId(3)), Some(PlayerId(0)));
    }

    #[test]
    fn hidden_missions_evaluate_over_the_pool() {
        let mut state = dealt();
        for (i, t) in state.territories.iter_mut().enumerate() {
            *t = Territory {
                occupant: Some(PlayerId((i % 2) as u8)),
                troops: 1,
            };
        }
        let view = redact(&state, PlayerId(2), &mut rng());
        // Seat 2 is gone, seats 0 and 1 are not: some liberate missions hold
        // and some do not.
        assert_eq!(view.mission_status(PlayerId(0)), Logic::Unknown);
    }

    #[test]
    fn snapshot_lists_every_territory() {
        let state = dealt();
        let state = state.apply(Action::Select(TerritoryId(5))).unwrap();
        let snap = snapshot(&state);
        assert_eq!(snap.len(), 42);
        assert_eq!(
            snap[5],
            TerritoryView {
                territory: TerritoryId(5),
                occupant: Some(PlayerId(0)),
                troops: 1
            }
        );
        assert_eq!(snap[6].occupant, None);
    }
}

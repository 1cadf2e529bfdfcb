//! Reinforcement move generation: placing troops and trading cards.

use crate::board::{Action, BoardState};
use crate::cards;

/// Every `reinforce(t, n)` for owned `t` and `1 <= n <= pool`.
pub fn legal_reinforcements(state: &BoardState) -> Vec<Action> {
    let pool = state.reinforcements(state.current);
    let mut actions = Vec::new();
    for territory in state.owned(state.current) {
        for troops in 1..=pool {
            actions.push(Action::Reinforce { territory, troops });
        }
    }
    actions
}

/// Every tradeable selection from the current player's hand.
pub fn legal_trades(state: &BoardState) -> Vec<Action> {
    let config = state.config();
    if !config.with_cards {
        return Vec::new();
    }
    cards::tradeable_sets(state.hand(state.current), config.card_types as usize)
        .into_iter()
        .map(Action::PlayCards)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Card, CardSelection, PlayerId, Territory, TerritoryId};
    use crate::config::GameConfig;

    fn reinforcing() -> BoardState {
        let mut state = BoardState::with_seed(GameConfig::default(), 2, 0).unwrap();
        for (i, t) in state.territories.iter_mut().enumerate() {
            *t = Territory {
                occupant: Some(PlayerId(if i < 3 { 0 } else { 1 })),
                troops: 1,
            };
        }
        state.initial_reinforce_open = false;
        state.pools = vec![4, 0];
        state
    }

    #[test]
    fn reinforcements_cover_every_count() {
        let state = reinforcing();
        let actions = legal_reinforcements(&state);
        assert_eq!(actions.len(), 3 * 4);
        assert!(actions.contains(&Action::reinforce(2, 4)));
        assert!(!actions.contains(&Action::reinforce(3, 1)));
    }

    #[test]
    fn trades_listed_for_tradeable_hands() {
        let mut state = reinforcing();
        assert!(legal_trades(&state).is_empty());
        state.hands[0] = vec![
            Card::territory(1, TerritoryId(0)),
            Card::territory(1, TerritoryId(5)),
            Card::joker(),
        ];
        assert_eq!(
            legal_trades(&state),
            vec![Action::PlayCards(CardSelection::from_slots([0, 1, 2]))]
        );
    }
}

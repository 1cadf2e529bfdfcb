//! Setup move generation: initial selection and initial reinforcement.

use crate::board::{Action, BoardState};

/// Selects: one per unowned territory.
pub fn legal_selections(state: &BoardState) -> Vec<Action> {
    state
        .graph()
        .territories()
        .filter(|&t| state.owner(t).is_none())
        .map(Action::Select)
        .collect()
}

/// Initial reinforcement places exactly one troop on an owned territory.
pub fn legal_initial_reinforcements(state: &BoardState) -> Vec<Action> {
    if state.reinforcements(state.current) == 0 {
        return Vec::new();
    }
    state
        .owned(state.current)
        .map(|territory| Action::Reinforce {
            territory,
            troops: 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PlayerId, TerritoryId};
    use crate::config::GameConfig;

    #[test]
    fn every_territory_selectable_at_start() {
        let state = BoardState::with_seed(GameConfig::default(), 3, 0).unwrap();
        let actions = legal_selections(&state);
        assert_eq!(actions.len(), 42);
        assert_eq!(actions[0], Action::Select(TerritoryId(0)));
    }

    #[test]
    fn selected_territories_drop_out() {
        let state = BoardState::with_seed(GameConfig::default(), 3, 0).unwrap();
        let state = state.apply(Action::Select(TerritoryId(7))).unwrap();
        let actions = legal_selections(&state);
        assert_eq!(actions.len(), 41);
        assert!(!actions.contains(&Action::Select(TerritoryId(7))));
    }

    #[test]
    fn initial_reinforcement_one_troop_per_owned_territory() {
        let config = GameConfig {
            choose_initial_territories: false,
            ..GameConfig::default()
        };
        let state = BoardState::with_seed(config, 3, 2).unwrap();
        let actions = legal_initial_reinforcements(&state);
        assert_eq!(actions.len(), state.territory_count(PlayerId(0)));
        assert!(actions
            .iter()
            .all(|a| matches!(a, Action::Reinforce { troops: 1, .. })));
    }
}

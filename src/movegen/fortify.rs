//! Fortify-phase move generation.

use crate::board::{Action, BoardState, TerritoryId};
use crate::config::FortifyReach;

/// `endPhase` plus every fortification between owned territories within
/// the configured reach, for every movable troop count.
pub fn legal_fortifications(state: &BoardState) -> Vec<Action> {
    let player = state.current;
    let mut actions = vec![Action::EndPhase];
    let owned: Vec<TerritoryId> = state.owned(player).collect();
    for &from in &owned {
        let movable = state.fortifiable_troops(from);
        if movable == 0 {
            continue;
        }
        for to in destinations(state, from, &owned) {
            actions.extend((1..=movable).map(|troops| Action::Fortify { from, to, troops }));
        }
    }
    actions
}

fn destinations(state: &BoardState, from: TerritoryId, owned: &[TerritoryId]) -> Vec<TerritoryId> {
    let player = state.current;
    match (state.config().fortify_reach, &state.connectivity) {
        (FortifyReach::Connected, Some(c)) => owned
            .iter()
            .copied()
            .filter(|&to| to != from && c.can_reach(&state.territories, player, from, to))
            .collect(),
        _ => state
            .graph()
            .neighbors(from)
            .iter()
            .copied()
            .filter(|&to| state.owner(to) == Some(player))
            .collect(),
    }
}

//! Legal move generation.
//!
//! Enumerates the legal actions for whoever is to move in a state. The
//! result is empty exactly when the game is over, and always agrees with
//! `resolve::is_legal`.

pub mod attack;
pub mod deploy;
pub mod fortify;
pub mod setup;

use rand::Rng;

use crate::board::{Action, BoardState, Step};

/// Every legal action in `state`.
pub fn legal_actions(state: &BoardState) -> Vec<Action> {
    match state.step() {
        Step::GameOver => Vec::new(),
        Step::InitialSelect => setup::legal_selections(state),
        Step::InitialReinforce => setup::legal_initial_reinforcements(state),
        Step::Reinforcement if state.must_trade() => deploy::legal_trades(state),
        Step::Reinforcement => {
            let mut actions = deploy::legal_reinforcements(state);
            actions.extend(deploy::legal_trades(state));
            actions
        }
        Step::Attack if state.must_trade() => deploy::legal_trades(state),
        Step::Attack => attack::legal_attacks(state),
        Step::Casualties => attack::legal_casualties(state),
        Step::Occupy => attack::legal_occupations(state),
        Step::Fortify => fortify::legal_fortifications(state),
    }
}

/// The dice outcome when the chance actor is to move, otherwise `None`.
pub fn chance_action(state: &BoardState, rng: &mut impl Rng) -> Option<Action> {
    if state.step() != Step::Casualties {
        return None;
    }
    attack::roll_casualties(state, rng)
}

/// A uniformly random legal action; the dice are rolled for the chance
/// actor. `None` once the game is over.
pub fn random_action(state: &BoardState, rng: &mut impl Rng) -> Option<Action> {
    if let Some(action) = chance_action(state, rng) {
        return Some(action);
    }
    let legal = legal_actions(state);
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..legal.len());
    Some(legal[idx])
}

impl BoardState {
    /// See [`legal_actions`].
    pub fn legal_actions(&self) -> Vec<Action> {
        legal_actions(self)
    }

    /// See [`chance_action`].
    pub fn chance_action(&self, rng: &mut impl Rng) -> Option<Action> {
        chance_action(self, rng)
    }
}

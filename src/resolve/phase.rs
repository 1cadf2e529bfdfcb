//! Turn and phase sequencing.
//!
//! Moves the turn between seats and the state between setup steps and the
//! phases of ordinary play:
//!
//! - Initial select: seats take turns, wrapping, until every territory has
//!   an owner.
//! - Initial reinforce: seats with troops left place one at a time.
//! - Ordinary turns: Reinforcement -> Attack -> Fortify, then the next
//!   living seat starts its turn with a fresh award.

use log::debug;

use crate::board::state::{BoardState, Phase};
use crate::board::territory::PlayerId;

/// Passes the turn after a selection, or closes selection once every
/// territory has an owner.
pub fn advance_selection(state: &mut BoardState) {
    if state.in_initial_select() {
        state.current = PlayerId(((state.current.index() + 1) % state.players()) as u8);
    } else {
        debug!("selection finished");
        start_initial_reinforce(state, 0);
    }
}

/// Hands initial reinforcement to the first seat from `from` (wrapping) that
/// still has troops to place. Starts ordinary play when nobody has.
pub fn start_initial_reinforce(state: &mut BoardState, from: usize) {
    let players = state.players();
    let next = (0..players)
        .map(|i| (from + i) % players)
        .find(|&seat| state.pools[seat] > 0);
    match next {
        Some(seat) => state.current = PlayerId(seat as u8),
        None => begin_play(state),
    }
}

/// Passes initial reinforcement on after a placement.
pub fn advance_initial_reinforce(state: &mut BoardState) {
    let from = state.current.index() + 1;
    start_initial_reinforce(state, from);
}

/// Closes the setup latch and starts the first ordinary turn.
fn begin_play(state: &mut BoardState) {
    state.initial_reinforce_open = false;
    state.current = next_living_seat(state, 0);
    debug!("setup finished, {} opens", state.current);
    start_turn(state);
}

/// Ends the current player's turn and starts the next living seat's.
pub fn end_turn(state: &mut BoardState) {
    let from = state.current.index() + 1;
    state.current = next_living_seat(state, from);
    debug!("turn passes to {}", state.current);
    start_turn(state);
}

fn start_turn(state: &mut BoardState) {
    state.phase = Phase::Reinforcement;
    state.pending = None;
    state.conquered = false;
    state.involved.iter_mut().for_each(|v| *v = 0);
    let award = reinforcement_award(state, state.current);
    state.pools[state.current.index()] += award;
    state.troops_granted += award as u64;
    debug!("{} receives {} reinforcements", state.current, award);
    settle(state);
}

/// Leaves Reinforcement for Attack once there is nothing left to place and
/// no trade is forced.
pub fn settle(state: &mut BoardState) {
    if state.phase == Phase::Reinforcement
        && state.reinforcements(state.current) == 0
        && !state.must_trade()
    {
        state.phase = Phase::Attack;
    }
}

/// Troops awarded at the start of a turn: one per `threshold` territories
/// (never below the configured minimum) plus the bonus of every continent
/// the player holds entirely.
pub fn reinforcement_award(state: &BoardState, player: PlayerId) -> u32 {
    let config = state.config();
    let territories = state.territory_count(player) as u32;
    let base = (territories / config.reinforcement_threshold).max(config.reinforcement_at_least);
    let bonus: u32 = state
        .graph()
        .continents()
        .iter()
        .filter(|c| state.continent_owner(c.id) == Some(player))
        .map(|c| c.bonus)
        .sum();
    base + bonus
}

/// First seat from `from` (wrapping) that still holds territory. Falls back
/// to the current seat when nobody else does.
pub fn next_living_seat(state: &BoardState, from: usize) -> PlayerId {
    let players = state.players();
    (0..players)
        .map(|i| PlayerId(((from + i) % players) as u8))
        .find(|&p| state.is_alive(p))
        .unwrap_or(state.current)
}

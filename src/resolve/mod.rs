//! Action resolution.
//!
//! Validates an action against a state and produces the successor state.
//! The input state is never modified; a rejected action leaves nothing
//! behind.

pub mod phase;
pub mod validate;

pub use validate::{check, is_legal, IllegalAction};

use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::action::Action;
use crate::board::card::CardSelection;
use crate::board::state::{BoardState, PendingAttack, Phase, Step};
use crate::board::territory::{Territory, TerritoryId};
use crate::cards;

/// Applies `action` to `state`, returning the next state.
pub fn apply(state: &BoardState, action: Action) -> Result<BoardState, IllegalAction> {
    check(state, action)?;
    let step = state.step();
    let mut next = state.clone();
    trace!("{} during {}: {:?}", state.current, step, action);

    match action {
        Action::Select(t) => select(&mut next, t),
        Action::Reinforce { territory, troops } => {
            next.territories[territory.index()].troops += troops;
            next.pools[next.current.index()] -= troops;
            if step == Step::InitialReinforce {
                phase::advance_initial_reinforce(&mut next);
            } else {
                phase::settle(&mut next);
            }
        }
        Action::Attack { from, to, troops } => {
            next.pending = Some(PendingAttack { from, to, troops });
        }
        Action::Casualties { attacker, defender } => casualties(&mut next, attacker, defender),
        Action::Occupy(troops) => occupy(&mut next, troops),
        Action::Fortify { from, to, troops } => {
            next.territories[from.index()].troops -= troops;
            next.territories[to.index()].troops += troops;
            if next.config().single_fortify {
                phase::end_turn(&mut next);
            }
        }
        Action::PlayCards(selection) => trade(&mut next, selection),
        Action::EndPhase => match next.phase {
            Phase::Attack => {
                next.pending = None;
                next.phase = Phase::Fortify;
            }
            _ => phase::end_turn(&mut next),
        },
    }
    Ok(next)
}

fn select(state: &mut BoardState, t: TerritoryId) {
    let player = state.current;
    state.territories[t.index()] = Territory {
        occupant: Some(player),
        troops: 1,
    };
    state.pools[player.index()] -= 1;
    if let Some(c) = state.connectivity.as_mut() {
        c.ownership_changed(&state.rules.graph, &state.territories, t, None);
    }
    phase::advance_selection(state);
}

fn casualties(state: &mut BoardState, attacker: u32, defender: u32) {
    let Some(mut pending) = state.pending else {
        return;
    };
    state.territories[pending.from.index()].troops -= attacker;
    state.territories[pending.to.index()].troops -= defender;
    state.troops_lost += (attacker + defender) as u64;
    pending.troops -= attacker;

    let from = pending.from.index();
    state.involved[from] = state.involved[from].max(pending.troops);

    if state.territories[pending.to.index()].troops > 0 {
        state.pending = None;
        return;
    }

    let old = state.territories[pending.to.index()].occupant;
    state.territories[pending.to.index()].occupant = Some(state.current);
    if let Some(c) = state.connectivity.as_mut() {
        c.ownership_changed(&state.rules.graph, &state.territories, pending.to, old);
    }
    debug!(
        "{} conquers territory {} from {:?}",
        state.current, pending.to, old
    );

    state.pending = Some(pending);
    // The last conquest of the game moves the surviving attackers in at once.
    if state.config().occupy_with_attacking_troops || state.winner().is_some() {
        occupy(state, pending.troops);
    } else {
        state.phase = Phase::Occupy;
    }
}

fn occupy(state: &mut BoardState, troops: u32) {
    let Some(pending) = state.pending.take() else {
        return;
    };
    let (from, to) = (pending.from.index(), pending.to.index());
    state.territories[from].troops -= troops;
    state.territories[to].troops += troops;
    state.involved[from] = state.involved[from].saturating_sub(troops);
    state.involved[to] += troops;

    if !state.conquered && state.config().with_cards {
        draw_card(state);
    }
    state.conquered = true;
    state.phase = Phase::Attack;
}

/// Moves the top card of the deck to the current player's hand, reshuffling
/// the discard pile into the deck first if the deck ran out.
fn draw_card(state: &mut BoardState) {
    if state.deck.is_empty() && !state.discard.is_empty() {
        let mut rng = SmallRng::seed_from_u64(state.seed.wrapping_add(state.reshuffles));
        state.reshuffles += 1;
        state.deck = std::mem::take(&mut state.discard);
        state.deck.shuffle(&mut rng);
        debug!("reshuffled {} cards into the deck", state.deck.len());
    }
    if let Some(card) = state.deck.pop() {
        state.hands[state.current.index()].push(card);
    }
}

fn trade(state: &mut BoardState, selection: CardSelection) {
    let player = state.current;
    let hand = std::mem::take(&mut state.hands[player.index()]);
    let (kept, traded) = cards::split_hand(&hand, selection);
    state.hands[player.index()] = kept;

    let config = state.config();
    let held = traded
        .iter()
        .filter_map(|c| c.territory)
        .filter(|&t| state.owner(t) == Some(player))
        .count() as u32;
    let bonus = config.trade_in_base(state.trade_ins) + held * config.territory_trade_bonus;

    state.trade_ins += 1;
    state.discard.extend(traded);
    state.pools[player.index()] += bonus;
    state.troops_granted += bonus as u64;
    debug!(
        "{} trades cards [{}] for {} troops (trade {})",
        player, selection, bonus, state.trade_ins
    );
    state.phase = Phase::Reinforcement;
    phase::settle(state);
}

impl BoardState {
    /// See [`apply`].
    pub fn apply(&self, action: Action) -> Result<BoardState, IllegalAction> {
        apply(self, action)
    }

    /// See [`is_legal`].
    pub fn is_legal(&self, action: Action) -> bool {
        is_legal(self, action)
    }
}

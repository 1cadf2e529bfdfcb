//! Action validation.
//!
//! `check` is a direct per-step predicate: it accepts exactly the actions
//! `movegen::legal_actions` enumerates, without enumerating them.

use thiserror::Error;

use crate::board::action::Action;
use crate::board::card::CardSelection;
use crate::board::state::{BoardState, Step};
use crate::board::territory::TerritoryId;
use crate::cards;
use crate::combat::Dice;
use crate::config::FortifyReach;

/// Reasons an action is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("the game is over")]
    GameOver,

    #[error("{action} is not permitted during {step}")]
    NotPermitted { action: &'static str, step: Step },

    #[error("unknown territory {0}")]
    UnknownTerritory(TerritoryId),

    #[error("territory {0} is not held by the player to move")]
    NotOwned(TerritoryId),

    #[error("territory {0} already has an owner")]
    AlreadyOwned(TerritoryId),

    #[error("territory {0} is not an enemy territory")]
    NotEnemy(TerritoryId),

    #[error("territories {from} and {to} do not border each other")]
    NotAdjacent { from: TerritoryId, to: TerritoryId },

    #[error("territory {to} cannot be reached from {from}")]
    Unreachable { from: TerritoryId, to: TerritoryId },

    #[error("{troops} troops, expected {min}..={max}")]
    TroopsOutOfRange { troops: u32, min: u32, max: u32 },

    #[error("casualties {attacker}/{defender} do not add up to {expected}")]
    InvalidCasualties {
        attacker: u32,
        defender: u32,
        expected: u32,
    },

    #[error("cards [{0}] are not a tradeable set")]
    InvalidCardSet(CardSelection),

    #[error("trading cards is not allowed now")]
    TradeNotAllowed,

    #[error("the hand is full, cards must be traded first")]
    TradeRequired,
}

/// Checks `action` against the current step of `state`.
pub fn check(state: &BoardState, action: Action) -> Result<(), IllegalAction> {
    let step = state.step();
    let not_permitted = || IllegalAction::NotPermitted {
        action: action.kind(),
        step,
    };

    match step {
        Step::GameOver => Err(IllegalAction::GameOver),

        Step::InitialSelect => match action {
            Action::Select(t) => {
                let territory = state.territory(t).ok_or(IllegalAction::UnknownTerritory(t))?;
                if territory.occupant.is_some() {
                    return Err(IllegalAction::AlreadyOwned(t));
                }
                Ok(())
            }
            _ => Err(not_permitted()),
        },

        Step::InitialReinforce => match action {
            Action::Reinforce { territory, troops } => {
                own(state, territory)?;
                in_range(troops, 1, state.reinforcements(state.current).min(1))
            }
            _ => Err(not_permitted()),
        },

        Step::Reinforcement => {
            if state.must_trade() {
                return forced_trade(state, action);
            }
            match action {
                Action::Reinforce { territory, troops } => {
                    own(state, territory)?;
                    in_range(troops, 1, state.reinforcements(state.current))
                }
                Action::PlayCards(selection) => {
                    if !state.config().with_cards {
                        return Err(IllegalAction::TradeNotAllowed);
                    }
                    tradeable(state, selection)
                }
                _ => Err(not_permitted()),
            }
        }

        Step::Attack => {
            if state.must_trade() {
                return forced_trade(state, action);
            }
            match action {
                Action::EndPhase => Ok(()),
                Action::Attack { from, to, troops } => {
                    own(state, from)?;
                    let target = state.territory(to).ok_or(IllegalAction::UnknownTerritory(to))?;
                    if target.occupant.is_none() || target.is_owned_by(state.current) {
                        return Err(IllegalAction::NotEnemy(to));
                    }
                    if !state.graph().are_adjacent(from, to) {
                        return Err(IllegalAction::NotAdjacent { from, to });
                    }
                    in_range(troops, 1, attack_cap(state, from))
                }
                Action::PlayCards(_) => Err(IllegalAction::TradeNotAllowed),
                _ => Err(not_permitted()),
            }
        }

        Step::Casualties => match action {
            Action::Casualties { attacker, defender } => {
                let expected = pending_dice(state).map_or(0, Dice::pairs);
                if attacker.checked_add(defender) != Some(expected) {
                    return Err(IllegalAction::InvalidCasualties {
                        attacker,
                        defender,
                        expected,
                    });
                }
                Ok(())
            }
            _ => Err(not_permitted()),
        },

        Step::Occupy => match action {
            Action::Occupy(troops) => in_range(troops, 1, max_occupy(state)),
            _ => Err(not_permitted()),
        },

        Step::Fortify => match action {
            Action::EndPhase => Ok(()),
            Action::Fortify { from, to, troops } => {
                own(state, from)?;
                own(state, to)?;
                if from == to {
                    return Err(IllegalAction::Unreachable { from, to });
                }
                if !can_fortify(state, from, to) {
                    return Err(match state.config().fortify_reach {
                        FortifyReach::Adjacent => IllegalAction::NotAdjacent { from, to },
                        FortifyReach::Connected => IllegalAction::Unreachable { from, to },
                    });
                }
                in_range(troops, 1, state.fortifiable_troops(from))
            }
            _ => Err(not_permitted()),
        },
    }
}

/// True iff `check` accepts `action`.
pub fn is_legal(state: &BoardState, action: Action) -> bool {
    check(state, action).is_ok()
}

/// Most troops that may attack from `from`: its mobile troops, capped by the
/// attacker dice unless conquering armies must move in with all of them.
pub fn attack_cap(state: &BoardState, from: TerritoryId) -> u32 {
    let mobile = state.territory(from).map_or(0, |t| t.mobile_troops());
    let config = state.config();
    if config.occupy_with_attacking_troops {
        mobile
    } else {
        mobile.min(config.max_attacker_dice)
    }
}

/// Dice of the pending attack, if any.
pub fn pending_dice(state: &BoardState) -> Option<Dice> {
    let pending = state.pending?;
    let config = state.config();
    Some(Dice::for_exchange(
        pending.troops,
        state.troops(pending.to),
        config.max_attacker_dice,
        config.max_defender_dice,
    ))
}

/// Most troops that may move into a conquered territory.
pub fn max_occupy(state: &BoardState) -> u32 {
    let Some(pending) = state.pending else {
        return 0;
    };
    if state.config().occupy_with_attacking_troops {
        pending.troops
    } else {
        state.territory(pending.from).map_or(0, |t| t.mobile_troops())
    }
}

/// True iff the current player may move troops from `from` to `to` under
/// the configured fortify reach. Both must be owned and distinct.
pub fn can_fortify(state: &BoardState, from: TerritoryId, to: TerritoryId) -> bool {
    let player = state.current;
    if from == to || state.owner(from) != Some(player) || state.owner(to) != Some(player) {
        return false;
    }
    match (state.config().fortify_reach, &state.connectivity) {
        (FortifyReach::Connected, Some(c)) => c.can_reach(&state.territories, player, from, to),
        _ => state.graph().are_adjacent(from, to),
    }
}

fn own(state: &BoardState, t: TerritoryId) -> Result<(), IllegalAction> {
    let territory = state.territory(t).ok_or(IllegalAction::UnknownTerritory(t))?;
    if !territory.is_owned_by(state.current) {
        return Err(IllegalAction::NotOwned(t));
    }
    Ok(())
}

fn in_range(troops: u32, min: u32, max: u32) -> Result<(), IllegalAction> {
    if troops < min || troops > max {
        return Err(IllegalAction::TroopsOutOfRange { troops, min, max });
    }
    Ok(())
}

fn forced_trade(state: &BoardState, action: Action) -> Result<(), IllegalAction> {
    match action {
        Action::PlayCards(selection) => tradeable(state, selection),
        _ => Err(IllegalAction::TradeRequired),
    }
}

fn tradeable(state: &BoardState, selection: CardSelection) -> Result<(), IllegalAction> {
    let hand = state.hand(state.current);
    let k = state.config().card_types as usize;
    if !cards::is_tradeable_selection(hand, selection, k) {
        return Err(IllegalAction::InvalidCardSet(selection));
    }
    Ok(())
}

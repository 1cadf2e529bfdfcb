//! Action notation.
//!
//! A compact, whitespace-separated text form for actions, used for action
//! logs and replays. The first token names the action, the rest are
//! unsigned integers:
//!
//! ```text
//! S 4         select territory 4
//! R 4 3       reinforce territory 4 with 3 troops
//! A 4 5 3     attack 5 from 4 with 3 troops
//! X 0 2       casualties: attacker loses 0, defender loses 2
//! O 2         occupy with 2 troops
//! F 4 7 2     fortify 7 from 4 with 2 troops
//! C 0 1 3     trade the cards in hand slots 0, 1 and 3
//! E           end phase
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Action, CardSelection, TerritoryId};

/// Errors that can occur when parsing action notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("card slot {0} out of range")]
    SlotOutOfRange(usize),

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

/// Parses a single action.
pub fn parse_action(s: &str) -> Result<Action, NotationError> {
    let mut tokens = s.split_whitespace();
    let head = tokens.next().ok_or(NotationError::EmptyInput)?;

    let action = match head {
        "S" => Action::Select(territory(&mut tokens)?),
        "R" => Action::Reinforce {
            territory: territory(&mut tokens)?,
            troops: number(&mut tokens, "troops")?,
        },
        "A" => Action::Attack {
            from: territory(&mut tokens)?,
            to: territory(&mut tokens)?,
            troops: number(&mut tokens, "troops")?,
        },
        "X" => Action::Casualties {
            attacker: number(&mut tokens, "attacker losses")?,
            defender: number(&mut tokens, "defender losses")?,
        },
        "O" => Action::Occupy(number(&mut tokens, "troops")?),
        "F" => Action::Fortify {
            from: territory(&mut tokens)?,
            to: territory(&mut tokens)?,
            troops: number(&mut tokens, "troops")?,
        },
        "C" => {
            let mut slots = Vec::new();
            for token in tokens.by_ref() {
                let slot: usize = token
                    .parse()
                    .map_err(|_| NotationError::InvalidNumber(token.to_string()))?;
                if slot >= 64 {
                    return Err(NotationError::SlotOutOfRange(slot));
                }
                slots.push(slot);
            }
            if slots.is_empty() {
                return Err(NotationError::UnexpectedEnd("card slot"));
            }
            Action::PlayCards(CardSelection::from_slots(slots))
        }
        "E" => Action::EndPhase,
        other => return Err(NotationError::UnknownAction(other.to_string())),
    };

    let rest: Vec<&str> = tokens.collect();
    if !rest.is_empty() {
        return Err(NotationError::TrailingInput(rest.join(" ")));
    }
    Ok(action)
}

/// Parses a log of actions, one per line. Blank lines and lines starting
/// with `#` are skipped.
pub fn parse_actions(s: &str) -> Result<Vec<Action>, NotationError> {
    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(parse_action)
        .collect()
}

/// Formats a single action.
pub fn format_action(action: &Action) -> String {
    match action {
        Action::Select(t) => format!("S {}", t),
        Action::Reinforce { territory, troops } => format!("R {} {}", territory, troops),
        Action::Attack { from, to, troops } => format!("A {} {} {}", from, to, troops),
        Action::Casualties { attacker, defender } => format!("X {} {}", attacker, defender),
        Action::Occupy(troops) => format!("O {}", troops),
        Action::Fortify { from, to, troops } => format!("F {} {} {}", from, to, troops),
        Action::PlayCards(selection) => format!("C {}", selection),
        Action::EndPhase => "E".to_string(),
    }
}

/// Formats a sequence of actions, one per line.
pub fn format_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(format_action)
        .collect::<Vec<_>>()
        .join("\n")
}

fn number<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<u32, NotationError> {
    let token = tokens.next().ok_or(NotationError::UnexpectedEnd(expected))?;
    token
        .parse()
        .map_err(|_| NotationError::InvalidNumber(token.to_string()))
}

fn territory<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<TerritoryId, NotationError> {
    let token = tokens
        .next()
        .ok_or(NotationError::UnexpectedEnd("territory"))?;
    token
        .parse()
        .map(TerritoryId)
        .map_err(|_| NotationError::InvalidNumber(token.to_string()))
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_action(self))
    }
}

impl FromStr for Action {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_action(s)
    }
}

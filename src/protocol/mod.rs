//! Text protocol.
//!
//! Parsing and formatting of the action notation used to record and replay
//! games.

pub mod notation;

pub use notation::{format_action, format_actions, parse_action, parse_actions, NotationError};

//! Hegemon rules engine library.
//!
//! A rules engine for a territorial-conquest board game. It holds the board
//! state, enumerates legal actions for whoever is to move, applies actions
//! to produce the next immutable state, resolves combat, and evaluates
//! secret missions in three-valued logic.
//!
//! ```no_run
//! use hegemon::{BoardState, GameConfig};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
//! let mut state = BoardState::new(GameConfig::default(), 3, &mut rng)?;
//! while let Some(action) = hegemon::movegen::random_action(&state, &mut rng) {
//!     state = state.apply(action)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod board;
pub mod cards;
pub mod combat;
pub mod config;
pub mod connectivity;
pub mod mission;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod view;

pub use board::{Action, Actor, BoardState, PlayerId, Step, TerritoryId};
pub use config::{ConfigurationError, FortifyReach, GameConfig};
pub use mission::{Logic, Mission};
pub use resolve::IllegalAction;

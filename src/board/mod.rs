//! Board representation and game-state types.
//!
//! Contains identifiers, territory occupancy, cards, the action vocabulary,
//! the territory graph, the classic map table, and the overall game state.

pub mod action;
pub mod card;
pub mod classic;
pub mod graph;
pub mod state;
pub mod territory;

pub use action::Action;
pub use card::{Card, CardKind, CardSelection};
pub use graph::{Continent, TerritoryGraph};
pub use state::{Actor, BoardState, PendingAttack, Phase, Rules, Step};
pub use territory::{ContinentId, PlayerId, Territory, TerritoryId};

//! Identifier types for seats, territories and continents.
//!
//! All three are thin newtypes over small integers so they can be used as
//! array indices while staying distinct at the type level.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A seat at the table. Seats are numbered from 0 in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Returns the seat as an array index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A territory on the map. Ids are contiguous from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerritoryId(pub u16);

impl TerritoryId {
    /// Returns the territory as an array index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A continent. Ids are arbitrary but unique within a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinentId(pub u8);

impl fmt::Display for ContinentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Occupancy of a single territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Territory {
    /// Current occupant, `None` only during initial selection.
    pub occupant: Option<PlayerId>,
    /// Troops stationed; zero only while unowned.
    pub troops: u32,
}

impl Territory {
    /// An unowned, empty territory.
    pub const fn unowned() -> Self {
        Territory {
            occupant: None,
            troops: 0,
        }
    }

    /// Returns true if the territory is held by `player`.
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.occupant == Some(player)
    }

    /// Troops that may leave the territory (one must always stay behind).
    pub fn mobile_troops(&self) -> u32 {
        self.troops.saturating_sub(1)
    }
}

//! Static territory graph.
//!
//! Adjacency lists and continent membership, built once from a validated
//! `GameConfig` and shared by every state of a game.

use super::territory::{ContinentId, TerritoryId};
use crate::config::GameConfig;

/// A continent's bonus and member territories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continent {
    pub id: ContinentId,
    pub bonus: u32,
    pub members: Vec<TerritoryId>,
}

/// Adjacency and continent membership keyed by territory id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritoryGraph {
    /// Sorted, symmetric neighbour lists indexed by territory id.
    neighbors: Vec<Vec<TerritoryId>>,
    /// Continent of each territory.
    continent: Vec<ContinentId>,
    continents: Vec<Continent>,
}

impl TerritoryGraph {
    /// Builds the graph from a configuration.
    ///
    /// Connections are symmetrised and deduplicated, so a map file only has
    /// to list each border once. The configuration is expected to have
    /// passed `GameConfig::validate`.
    pub fn from_config(config: &GameConfig) -> Self {
        let count = config.territories.len();
        let mut neighbors: Vec<Vec<TerritoryId>> = vec![Vec::new(); count];
        for t in &config.territories {
            for &n in &t.connects {
                if n.index() < count && n != t.id {
                    neighbors[t.id.index()].push(n);
                    neighbors[n.index()].push(t.id);
                }
            }
        }
        for list in &mut neighbors {
            list.sort();
            list.dedup();
        }

        let continents = config
            .continents
            .iter()
            .map(|c| Continent {
                id: c.id,
                bonus: c.bonus,
                members: config
                    .territories
                    .iter()
                    .filter(|t| t.continent == c.id)
                    .map(|t| t.id)
                    .collect(),
            })
            .collect();

        TerritoryGraph {
            neighbors,
            continent: config.territories.iter().map(|t| t.continent).collect(),
            continents,
        }
    }

    /// Number of territories.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn contains(&self, t: TerritoryId) -> bool {
        t.index() < self.neighbors.len()
    }

    /// All territory ids in ascending order.
    pub fn territories(&self) -> impl Iterator<Item = TerritoryId> {
        (0..self.neighbors.len() as u16).map(TerritoryId)
    }

    /// Neighbours of `t`; empty for an unknown id.
    pub fn neighbors(&self, t: TerritoryId) -> &[TerritoryId] {
        self.neighbors.get(t.index()).map_or(&[], |v| v.as_slice())
    }

    pub fn are_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    pub fn continent_of(&self, t: TerritoryId) -> Option<ContinentId> {
        self.continent.get(t.index()).copied()
    }

    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    pub fn continent(&self, id: ContinentId) -> Option<&Continent> {
        self.continents.iter().find(|c| c.id == id)
    }
}

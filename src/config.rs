//! Ruleset and map configuration.
//!
//! A `GameConfig` describes everything a game is built from: the map
//! (territories, continents, borders), the card and mission setup, and the
//! ruleset flags. It deserializes from JSON with every field optional;
//! missing fields fall back to the classic world-map rules.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::classic::{classic_continents, classic_missions, classic_territories};
use crate::board::territory::{ContinentId, TerritoryId};
use crate::mission::Mission;

/// Smallest supported table size.
pub const MIN_PLAYERS: usize = 2;

/// Seats a `PlayerId` can address.
pub const MAX_SEATS: usize = u8::MAX as usize + 1;

/// Largest hand a card selection can address.
pub const MAX_HAND: usize = 64;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{players} players requested, expected between {min} and {max}")]
    PlayerCount {
        players: usize,
        min: usize,
        max: usize,
    },

    #[error("max_players is {0}, at most {max} seats are supported", max = MAX_SEATS)]
    TooManySeats(usize),

    #[error("{jokers} jokers with sets of {card_types}: a set could consist of jokers only")]
    TooManyJokers { jokers: u32, card_types: u8 },

    #[error("set size {0} is unsupported")]
    SetSize(u8),

    #[error("dice caps must be at least one")]
    DiceCap,

    #[error("territory {territory} has card type {card_type}, expected 1..={card_types}")]
    CardType {
        territory: TerritoryId,
        card_type: u8,
        card_types: u8,
    },

    #[error("the map has no territories")]
    EmptyMap,

    #[error("{territories} territories cannot seat {players} players")]
    TooFewTerritories { territories: usize, players: usize },

    #[error("territory at position {position} has id {id}, ids must be contiguous from 0")]
    TerritoryOrder { position: usize, id: TerritoryId },

    #[error("territory {territory} connects to unknown territory {target}")]
    UnknownConnection {
        territory: TerritoryId,
        target: TerritoryId,
    },

    #[error("territory {0} connects to itself")]
    SelfConnection(TerritoryId),

    #[error("territory {territory} belongs to unknown continent {continent}")]
    UnknownContinent {
        territory: TerritoryId,
        continent: ContinentId,
    },

    #[error("continent {0} is defined twice")]
    DuplicateContinent(ContinentId),

    #[error("{0} must be at least one")]
    Reinforcement(&'static str),

    #[error("table {0} is empty")]
    EmptyTable(&'static str),

    #[error("{troops} initial troops per player cannot claim {needed} territories each")]
    InitialTroops { troops: u32, needed: u32 },

    #[error("invalid mission {index}: {reason}")]
    Mission { index: usize, reason: String },
}

/// How far a single fortification may move troops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FortifyReach {
    /// Only to a directly bordering owned territory.
    #[default]
    Adjacent,
    /// To any owned territory connected through owned territories.
    Connected,
}

/// A continent and its ownership bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinentConfig {
    pub id: ContinentId,
    #[serde(default)]
    pub name: String,
    pub bonus: u32,
}

/// A territory, its continent, card type and borders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryConfig {
    pub id: TerritoryId,
    #[serde(default)]
    pub name: String,
    pub continent: ContinentId,
    pub card_type: u8,
    #[serde(default)]
    pub connects: Vec<TerritoryId>,
}

/// Complete description of a game's map and rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_players: usize,
    pub max_attacker_dice: u32,
    pub max_defender_dice: u32,
    /// Starting troops per player, indexed by `players - 2` and clamped.
    pub initial_troops: Vec<u32>,
    /// Players pick their starting territories; otherwise they are dealt.
    pub choose_initial_territories: bool,
    pub reinforcement_at_least: u32,
    /// One reinforcement per this many owned territories.
    pub reinforcement_threshold: u32,

    pub with_cards: bool,
    /// Required set size `k`; ordinary card types are `1..=k`.
    pub card_types: u8,
    pub jokers: u32,
    pub trade_in_bonus: Vec<u32>,
    /// Per-trade increase once `trade_in_bonus` is exhausted.
    pub max_extra_bonus: u32,
    /// Bonus per traded card showing a territory the trader holds.
    pub territory_trade_bonus: u32,

    /// Conquering armies move in with exactly the committed troops.
    pub occupy_with_attacking_troops: bool,
    pub fortify_reach: FortifyReach,
    /// A fortification ends the turn.
    pub single_fortify: bool,
    /// Troops that fought this turn may not fortify.
    pub fortify_with_non_fighting_troops: bool,

    pub with_missions: bool,
    pub missions: Vec<Mission>,

    pub continents: Vec<ContinentConfig>,
    pub territories: Vec<TerritoryConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_players: 6,
            max_attacker_dice: 3,
            max_defender_dice: 2,
            initial_troops: vec![50, 35, 30, 25, 20],
            choose_initial_territories: true,
            reinforcement_at_least: 3,
            reinforcement_threshold: 3,
            with_cards: true,
            card_types: 3,
            jokers: 2,
            trade_in_bonus: vec![4, 6, 8, 10, 12, 15],
            max_extra_bonus: 5,
            territory_trade_bonus: 2,
            occupy_with_attacking_troops: false,
            fortify_reach: FortifyReach::Adjacent,
            single_fortify: true,
            fortify_with_non_fighting_troops: false,
            with_missions: true,
            missions: classic_missions(),
            continents: classic_continents(),
            territories: classic_territories(),
        }
    }
}

impl GameConfig {
    /// Parses a configuration from JSON. Missing fields take classic defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Starting troops for each of `players` players.
    pub fn initial_troops_for(&self, players: usize) -> u32 {
        if self.initial_troops.is_empty() {
            return 0;
        }
        let idx = players
            .saturating_sub(MIN_PLAYERS)
            .min(self.initial_troops.len() - 1);
        self.initial_troops[idx]
    }

    /// Hand size at which a trade becomes mandatory: `(k - 1)^2 + 1`.
    pub fn hand_ceiling(&self) -> usize {
        let k = self.card_types.saturating_sub(1) as usize;
        k * k + 1
    }

    /// Base bonus for the `n`-th trade of the game (0-based).
    pub fn trade_in_base(&self, n: u32) -> u32 {
        let table = &self.trade_in_bonus;
        match table.get(n as usize) {
            Some(&bonus) => bonus,
            None => {
                let last = table.last().copied().unwrap_or(0);
                let beyond = n as usize + 1 - table.len();
                last + beyond as u32 * self.max_extra_bonus
            }
        }
    }

    /// The mission pool for a table of `players`: liberate missions aimed at
    /// seats not in the game are dropped.
    pub fn missions_for(&self, players: usize) -> Vec<Mission> {
        self.missions
            .iter()
            .filter(|m| match m {
                Mission::Liberate { targets } => targets.iter().all(|p| p.index() < players),
                _ => true,
            })
            .cloned()
            .collect()
    }

    /// Checks the configuration for a game of `players` players.
    pub fn validate(&self, players: usize) -> Result<(), ConfigurationError> {
        if self.max_players > MAX_SEATS {
            return Err(ConfigurationError::TooManySeats(self.max_players));
        }
        if players < MIN_PLAYERS || players > self.max_players {
            return Err(ConfigurationError::PlayerCount {
                players,
                min: MIN_PLAYERS,
                max: self.max_players,
            });
        }
        if self.max_attacker_dice == 0 || self.max_defender_dice == 0 {
            return Err(ConfigurationError::DiceCap);
        }
        if self.reinforcement_at_least == 0 {
            return Err(ConfigurationError::Reinforcement("reinforcement_at_least"));
        }
        if self.reinforcement_threshold == 0 {
            return Err(ConfigurationError::Reinforcement("reinforcement_threshold"));
        }
        if self.initial_troops.is_empty() {
            return Err(ConfigurationError::EmptyTable("initial_troops"));
        }
        if self.with_cards {
            self.validate_cards()?;
        }
        self.validate_map()?;
        if self.territories.len() < players {
            return Err(ConfigurationError::TooFewTerritories {
                territories: self.territories.len(),
                players,
            });
        }

        let territories = self.territories.len() as u32;
        let needed = territories.div_ceil(players as u32);
        let troops = self.initial_troops_for(players);
        if troops < needed {
            return Err(ConfigurationError::InitialTroops { troops, needed });
        }

        if self.with_missions {
            self.validate_missions()?;
        }
        Ok(())
    }

    fn validate_cards(&self) -> Result<(), ConfigurationError> {
        if self.card_types == 0 || self.hand_ceiling() > MAX_HAND {
            return Err(ConfigurationError::SetSize(self.card_types));
        }
        if self.jokers >= self.card_types as u32 {
            return Err(ConfigurationError::TooManyJokers {
                jokers: self.jokers,
                card_types: self.card_types,
            });
        }
        if self.trade_in_bonus.is_empty() {
            return Err(ConfigurationError::EmptyTable("trade_in_bonus"));
        }
        for t in &self.territories {
            if t.card_type == 0 || t.card_type > self.card_types {
                return Err(ConfigurationError::CardType {
                    territory: t.id,
                    card_type: t.card_type,
                    card_types: self.card_types,
                });
            }
        }
        Ok(())
    }

    fn validate_map(&self) -> Result<(), ConfigurationError> {
        if self.territories.is_empty() {
            return Err(ConfigurationError::EmptyMap);
        }
        let mut continents = HashSet::new();
        for c in &self.continents {
            if !continents.insert(c.id) {
                return Err(ConfigurationError::DuplicateContinent(c.id));
            }
        }
        let count = self.territories.len();
        for (position, t) in self.territories.iter().enumerate() {
            if t.id.index() != position {
                return Err(ConfigurationError::TerritoryOrder { position, id: t.id });
            }
            if !continents.contains(&t.continent) {
                return Err(ConfigurationError::UnknownContinent {
                    territory: t.id,
                    continent: t.continent,
                });
            }
            for &target in &t.connects {
                if target == t.id {
                    return Err(ConfigurationError::SelfConnection(t.id));
                }
                if target.index() >= count {
                    return Err(ConfigurationError::UnknownConnection {
                        territory: t.id,
                        target,
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_missions(&self) -> Result<(), ConfigurationError> {
        let continents: HashSet<ContinentId> = self.continents.iter().map(|c| c.id).collect();
        for (index, mission) in self.missions.iter().enumerate() {
            let reason = match mission {
                Mission::Conquer { continents: group, extra } => {
                    if let Some(c) = group.iter().find(|c| !continents.contains(c)) {
                        Some(format!("unknown continent {}", c))
                    } else if group.len() + *extra as usize > continents.len() {
                        Some("asks for more continents than the map has".to_string())
                    } else {
                        None
                    }
                }
                Mission::Occupy {
                    territories,
                    required,
                    ..
                } => {
                    if let Some(t) = required.iter().find(|t| t.index() >= self.territories.len())
                    {
                        Some(format!("unknown territory {}", t))
                    } else if required.len() > *territories as usize {
                        Some("more required territories than target count".to_string())
                    } else {
                        None
                    }
                }
                Mission::Liberate { targets } if targets.is_empty() => {
                    Some("no target players".to_string())
                }
                Mission::Liberate { .. } | Mission::Wildcard => None,
            };
            if let Some(reason) = reason {
                return Err(ConfigurationError::Mission { index, reason });
            }
        }
        Ok(())
    }
}

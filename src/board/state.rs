//! Game state representation.
//!
//! A `BoardState` is a complete, self-contained snapshot of a game: territory
//! occupancy, reinforcement pools, hands, deck, missions and the turn
//! position. It is a plain value. Transitions (`resolve::apply`) return a new
//! state and leave the old one untouched, so callers can branch freely.
//!
//! The static part of a game (configuration, territory graph, mission pool)
//! lives in `Rules` behind an `Arc` and is shared by every state derived from
//! the same setup.

use std::fmt;
use std::sync::Arc;

use log::debug;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::card::Card;
use super::graph::TerritoryGraph;
use super::territory::{ContinentId, PlayerId, Territory, TerritoryId};
use crate::cards;
use crate::config::{ConfigurationError, FortifyReach, GameConfig};
use crate::connectivity::FortifyConnectivity;
use crate::mission::{self, Mission};
use crate::resolve::phase;

/// The phase stored in the state during ordinary play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Reinforcement,
    Attack,
    Occupy,
    Fortify,
}

/// The step a state is in, as seen by a driver.
///
/// Derived from the stored phase plus the setup latches, the pending attack
/// and the game-over condition; see `BoardState::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    InitialSelect,
    InitialReinforce,
    Reinforcement,
    Attack,
    /// The dice of a pending attack have to be resolved.
    Casualties,
    Occupy,
    Fortify,
    GameOver,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::InitialSelect => "initial select",
            Step::InitialReinforce => "initial reinforce",
            Step::Reinforcement => "reinforcement",
            Step::Attack => "attack",
            Step::Casualties => "casualties",
            Step::Occupy => "occupy",
            Step::Fortify => "fortify",
            Step::GameOver => "game over",
        };
        write!(f, "{}", s)
    }
}

/// Who has to move next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    Seat(PlayerId),
    /// The dice.
    Chance,
}

/// An attack in progress: troops committed from `from` against `to`.
///
/// Kept through the casualties step and, after a conquest, through the
/// occupy step, where `troops` is what survived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingAttack {
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub troops: u32,
}

/// Static data shared by every state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub config: GameConfig,
    pub graph: TerritoryGraph,
    pub players: usize,
    /// The missions in play for this table size; wildcard missions are
    /// evaluated against this pool.
    pub mission_pool: Vec<Mission>,
}

/// Complete game state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub rules: Arc<Rules>,
    /// Occupancy indexed by territory id.
    pub territories: Vec<Territory>,
    /// Reinforcements not yet placed, per seat.
    pub pools: Vec<u32>,
    pub hands: Vec<Vec<Card>>,
    pub deck: Vec<Card>,
    pub discard: Vec<Card>,
    /// Secret mission per seat; empty when playing without missions.
    pub missions: Vec<Mission>,
    pub current: PlayerId,
    pub phase: Phase,
    pub pending: Option<PendingAttack>,
    /// Troops per territory that fought this turn.
    pub involved: Vec<u32>,
    /// Trades made so far this game.
    pub trade_ins: u32,
    /// The current player has conquered a territory this turn.
    pub conquered: bool,
    /// Initial reinforcement still running; cleared once, never set again.
    pub initial_reinforce_open: bool,
    /// Present only with `FortifyReach::Connected`.
    pub connectivity: Option<FortifyConnectivity>,
    /// Seed for deck reshuffles, combined with `reshuffles`.
    pub seed: u64,
    pub reshuffles: u64,
    /// Every troop ever handed out: starting troops, awards, trade bonuses.
    pub troops_granted: u64,
    /// Troops removed by combat.
    pub troops_lost: u64,
}

impl BoardState {
    /// Sets up a new game for `players` seats.
    ///
    /// The deck is shuffled and missions are dealt with `rng`. When the
    /// ruleset does not let players choose their territories, the map is
    /// dealt out here as well and the game starts in initial reinforcement.
    pub fn new(
        config: GameConfig,
        players: usize,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigurationError> {
        config.validate(players)?;

        let graph = TerritoryGraph::from_config(&config);
        let mission_pool = if config.with_missions {
            config.missions_for(players)
        } else {
            Vec::new()
        };
        let initial = config.initial_troops_for(players);
        let count = graph.len();

        let mut deck = Vec::new();
        if config.with_cards {
            deck.extend(
                config
                    .territories
                    .iter()
                    .map(|t| Card::territory(t.card_type, t.id)),
            );
            deck.extend((0..config.jokers).map(|_| Card::joker()));
            deck.shuffle(rng);
        }

        let missions = if config.with_missions {
            let continents: Vec<ContinentId> = config.continents.iter().map(|c| c.id).collect();
            mission::deal(&mission_pool, players, &continents, rng)
        } else {
            Vec::new()
        };

        let choose = config.choose_initial_territories;
        let connected = config.fortify_reach == FortifyReach::Connected;
        let rules = Arc::new(Rules {
            config,
            graph,
            players,
            mission_pool,
        });

        let mut state = BoardState {
            rules,
            territories: vec![Territory::unowned(); count],
            pools: vec![initial; players],
            hands: vec![Vec::new(); players],
            deck,
            discard: Vec::new(),
            missions,
            current: PlayerId(0),
            phase: Phase::Reinforcement,
            pending: None,
            involved: vec![0; count],
            trade_ins: 0,
            conquered: false,
            initial_reinforce_open: true,
            connectivity: None,
            seed: rng.gen(),
            reshuffles: 0,
            troops_granted: initial as u64 * players as u64,
            troops_lost: 0,
        };

        if !choose {
            let mut order: Vec<TerritoryId> = state.graph().territories().collect();
            order.shuffle(rng);
            for (i, t) in order.into_iter().enumerate() {
                let seat = i % players;
                state.territories[t.index()] = Territory {
                    occupant: Some(PlayerId(seat as u8)),
                    troops: 1,
                };
                state.pools[seat] -= 1;
            }
            debug!("dealt {} territories to {} players", count, players);
        }
        if connected {
            state.connectivity = Some(FortifyConnectivity::build(
                &state.rules.graph,
                &state.territories,
            ));
        }
        if !choose {
            phase::start_initial_reinforce(&mut state, 0);
        }
        Ok(state)
    }

    /// Sets up a new game from a seed.
    pub fn with_seed(
        config: GameConfig,
        players: usize,
        seed: u64,
    ) -> Result<Self, ConfigurationError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        BoardState::new(config, players, &mut rng)
    }

    pub fn config(&self) -> &GameConfig {
        &self.rules.config
    }

    pub fn graph(&self) -> &TerritoryGraph {
        &self.rules.graph
    }

    /// Number of seats.
    pub fn players(&self) -> usize {
        self.rules.players
    }

    pub fn territory(&self, t: TerritoryId) -> Option<&Territory> {
        self.territories.get(t.index())
    }

    pub fn owner(&self, t: TerritoryId) -> Option<PlayerId> {
        self.territory(t).and_then(|x| x.occupant)
    }

    pub fn troops(&self, t: TerritoryId) -> u32 {
        self.territory(t).map_or(0, |x| x.troops)
    }

    /// Territories held by `player`, in id order.
    pub fn owned(&self, player: PlayerId) -> impl Iterator<Item = TerritoryId> + '_ {
        self.territories
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.is_owned_by(player))
            .map(|(i, _)| TerritoryId(i as u16))
    }

    pub fn territory_count(&self, player: PlayerId) -> usize {
        self.territories.iter().filter(|t| t.is_owned_by(player)).count()
    }

    /// A player is alive while they hold at least one territory.
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.territories.iter().any(|t| t.is_owned_by(player))
    }

    pub fn hand(&self, player: PlayerId) -> &[Card] {
        self.hands.get(player.index()).map_or(&[], |h| h.as_slice())
    }

    /// Reinforcements `player` has yet to place.
    pub fn reinforcements(&self, player: PlayerId) -> u32 {
        self.pools.get(player.index()).copied().unwrap_or(0)
    }

    pub fn mission(&self, player: PlayerId) -> Option<&Mission> {
        self.missions.get(player.index())
    }

    /// The sole holder of every territory of `continent`, if any.
    pub fn continent_owner(&self, continent: ContinentId) -> Option<PlayerId> {
        let members = &self.graph().continent(continent)?.members;
        let first = self.owner(*members.first()?)?;
        members
            .iter()
            .all(|&t| self.owner(t) == Some(first))
            .then_some(first)
    }

    /// Continents wholly held by `player`.
    pub fn conquered_continents(&self, player: PlayerId) -> Vec<ContinentId> {
        self.graph()
            .continents()
            .iter()
            .filter(|c| self.continent_owner(c.id) == Some(player))
            .map(|c| c.id)
            .collect()
    }

    /// Some territory has no owner yet.
    pub fn in_initial_select(&self) -> bool {
        self.territories.iter().any(|t| t.occupant.is_none())
    }

    /// True iff selection is over and a single player holds every territory.
    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    /// The sole remaining occupant once the game is over.
    pub fn winner(&self) -> Option<PlayerId> {
        let mut occupants = self.territories.iter().map(|t| t.occupant);
        let first = occupants.next()??;
        occupants.all(|o| o == Some(first)).then_some(first)
    }

    pub fn step(&self) -> Step {
        if self.in_initial_select() {
            return Step::InitialSelect;
        }
        if self.is_game_over() {
            return Step::GameOver;
        }
        if self.initial_reinforce_open {
            return Step::InitialReinforce;
        }
        match self.phase {
            Phase::Reinforcement => Step::Reinforcement,
            Phase::Attack if self.pending.is_some() => Step::Casualties,
            Phase::Attack => Step::Attack,
            Phase::Occupy => Step::Occupy,
            Phase::Fortify => Step::Fortify,
        }
    }

    /// Who moves next; `None` once the game is over.
    pub fn actor(&self) -> Option<Actor> {
        match self.step() {
            Step::GameOver => None,
            Step::Casualties => Some(Actor::Chance),
            _ => Some(Actor::Seat(self.current)),
        }
    }

    /// The current player holds a full hand with a tradeable set and may do
    /// nothing but trade.
    pub fn must_trade(&self) -> bool {
        let config = self.config();
        if !config.with_cards {
            return false;
        }
        let hand = self.hand(self.current);
        hand.len() >= config.hand_ceiling() && cards::could_trade_in(hand, config.card_types as usize)
    }

    /// Troops that may leave `t` in a fortification.
    pub fn fortifiable_troops(&self, t: TerritoryId) -> u32 {
        let Some(territory) = self.territory(t) else {
            return 0;
        };
        let mobile = territory.mobile_troops();
        if self.config().fortify_with_non_fighting_troops {
            let fought = self.involved.get(t.index()).copied().unwrap_or(0);
            territory.troops.saturating_sub(fought).min(mobile)
        } else {
            mobile
        }
    }

    /// Troops currently on the board.
    pub fn troops_on_board(&self) -> u64 {
        self.territories.iter().map(|t| t.troops as u64).sum()
    }

    /// Every card in the game: deck, hands and discard pile, sorted.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut all: Vec<Card> = self
            .deck
            .iter()
            .chain(self.hands.iter().flatten())
            .chain(self.discard.iter())
            .copied()
            .collect();
        all.sort();
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic(players: usize) -> BoardState {
        BoardState::with_seed(GameConfig::default(), players, 1).unwrap()
    }

    #[test]
    fn new_game_starts_in_selection() {
        let state = classic(4);
        assert_eq!(state.step(), Step::InitialSelect);
        assert_eq!(state.actor(), Some(Actor::Seat(PlayerId(0))));
        assert_eq!(state.pools, vec![30; 4]);
        assert!(state.territories.iter().all(|t| t.occupant.is_none()));
        assert_eq!(state.troops_granted, 120);
    }

    #[test]
    fn deck_holds_one_card_per_territory_plus_jokers() {
        let state = classic(3);
        assert_eq!(state.deck.len(), 42 + 2);
        let jokers = state
            .deck
            .iter()
            .filter(|c| c.kind == crate::board::card::CardKind::Joker)
            .count();
        assert_eq!(jokers, 2);
    }

    #[test]
    fn every_seat_gets_a_mission() {
        let state = classic(5);
        assert_eq!(state.missions.len(), 5);
        for (seat, m) in state.missions.iter().enumerate() {
            assert!(!m.liberates(PlayerId(seat as u8)));
        }
    }

    #[test]
    fn setup_is_reproducible() {
        assert_eq!(classic(3), classic(3));
    }

    #[test]
    fn invalid_player_count() {
        assert!(matches!(
            BoardState::with_seed(GameConfig::default(), 8, 0),
            Err(ConfigurationError::PlayerCount { .. })
        ));
    }

    #[test]
    fn dealt_territories_skip_selection() {
        let config = GameConfig {
            choose_initial_territories: false,
            ..GameConfig::default()
        };
        let state = BoardState::with_seed(config, 4, 3).unwrap();
        assert_eq!(state.step(), Step::InitialReinforce);
        for seat in 0..4u8 {
            // 42 territories dealt round-robin: seats 0 and 1 get 11.
            let expected = if seat < 2 { 11 } else { 10 };
            assert_eq!(state.territory_count(PlayerId(seat)), expected);
            assert_eq!(state.pools[seat as usize], 30 - expected as u32);
        }
        assert_eq!(state.current, PlayerId(0));
    }

    #[test]
    fn connectivity_only_for_connected_reach() {
        assert!(classic(2).connectivity.is_none());
        let config = GameConfig {
            fortify_reach: FortifyReach::Connected,
            ..GameConfig::default()
        };
        assert!(BoardState::with_seed(config, 2, 0).unwrap().connectivity.is_some());
    }

    #[test]
    fn winner_requires_full_ownership() {
        let mut state = classic(2);
        assert_eq!(state.winner(), None);
        for t in state.territories.iter_mut() {
            *t = Territory {
                occupant: Some(PlayerId(1)),
                troops: 1,
            };
        }
        assert_eq!(state.winner(), Some(PlayerId(1)));
        assert_eq!(state.step(), Step::GameOver);
        assert_eq!(state.actor(), None);
        state.territories[0].occupant = Some(PlayerId(0));
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn continent_owner() {
        let mut state = classic(2);
        let members = state.graph().continent(ContinentId(5)).unwrap().members.clone();
        for t in &members {
            state.territories[t.index()] = Territory {
                occupant: Some(PlayerId(0)),
                troops: 2,
            };
        }
        assert_eq!(state.continent_owner(ContinentId(5)), Some(PlayerId(0)));
        assert_eq!(state.conquered_continents(PlayerId(0)), vec![ContinentId(5)]);
        assert_eq!(state.continent_owner(ContinentId(4)), None);
    }

    #[test]
    fn step_display() {
        assert_eq!(Step::InitialReinforce.to_string(), "initial reinforce");
        assert_eq!(Step::GameOver.to_string(), "game over");
    }
}

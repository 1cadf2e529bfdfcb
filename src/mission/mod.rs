//! Secret missions.
//!
//! Every seat is dealt one mission at setup. Missions are evaluated in
//! three-valued logic: a redacted view shows opponents' missions as
//! `Mission::Wildcard`, and "one of the missions in the pool" can be true,
//! false, or depend on which one it is.

pub mod logic;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::state::BoardState;
use crate::board::territory::{ContinentId, PlayerId, TerritoryId};

pub use logic::Logic;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mission {
    /// Eliminate every target player.
    Liberate { targets: Vec<PlayerId> },
    /// Hold every named continent plus `extra` further continents.
    Conquer {
        continents: Vec<ContinentId>,
        #[serde(default)]
        extra: u32,
    },
    /// Hold at most `territories` territories, each with at least `troops`
    /// troops, including every `required` one.
    Occupy {
        territories: u32,
        troops: u32,
        #[serde(default)]
        required: Vec<TerritoryId>,
    },
    /// Any mission of the pool; stands in for a mission the viewer cannot see.
    Wildcard,
}

impl Mission {
    /// True if this mission asks `player` to eliminate themselves.
    pub fn liberates(&self, player: PlayerId) -> bool {
        matches!(self, Mission::Liberate { targets } if targets.contains(&player))
    }

    /// Mission used when dealing cannot hand out a proper one: the first
    /// occupy mission of the pool, else conquering every continent.
    pub fn fallback(pool: &[Mission], continents: &[ContinentId]) -> Mission {
        pool.iter()
            .find(|m| matches!(m, Mission::Occupy { .. }))
            .cloned()
            .unwrap_or_else(|| Mission::Conquer {
                continents: continents.to_vec(),
                extra: 0,
            })
    }
}

/// Deals one mission per seat from a shuffled copy of `pool`.
///
/// A seat dealt a mission to liberate itself swaps with a seat for which
/// the exchange is harmless; if there is none it gets the fallback mission.
/// Missing missions (pool smaller than the table) are filled with the
/// fallback as well.
pub fn deal(
    pool: &[Mission],
    players: usize,
    continents: &[ContinentId],
    rng: &mut impl Rng,
) -> Vec<Mission> {
    let mut deck = pool.to_vec();
    deck.shuffle(rng);
    deck.truncate(players);
    if deck.len() < players {
        warn!(
            "mission pool of {} cannot serve {} players, filling with fallback",
            pool.len(),
            players
        );
        deck.resize(players, Mission::fallback(pool, continents));
    }

    for seat in 0..players {
        let me = PlayerId(seat as u8);
        if !deck[seat].liberates(me) {
            continue;
        }
        let partner = (0..players).find(|&other| {
            other != seat
                && !deck[other].liberates(me)
                && !deck[seat].liberates(PlayerId(other as u8))
        });
        match partner {
            Some(other) => deck.swap(seat, other),
            None => {
                warn!("no mission swap for seat {}, using fallback", seat);
                deck[seat] = Mission::fallback(pool, continents);
            }
        }
    }
    debug!("dealt {} missions", players);
    deck
}

/// Evaluates `mission` for any player at the table.
pub fn evaluate(state: &BoardState, mission: &Mission) -> Logic {
    match mission {
        Mission::Liberate { targets } => Logic::from_bool(liberated(state, targets)),
        Mission::Conquer { .. } | Mission::Occupy { .. } => Logic::from_bool(
            (0..state.players()).any(|p| holds(state, mission, PlayerId(p as u8))),
        ),
        Mission::Wildcard => evaluate_wildcard(state),
    }
}

/// Evaluates the mission of `player`, restricted to that player where the
/// mission is about holding territory.
pub fn mission_status(state: &BoardState, player: PlayerId) -> Logic {
    match state.mission(player) {
        None => Logic::False,
        Some(m @ (Mission::Conquer { .. } | Mission::Occupy { .. })) => {
            Logic::from_bool(holds(state, m, player))
        }
        Some(m) => evaluate(state, m),
    }
}

/// The mission of `player` is known to be accomplished.
pub fn mission_accomplished(state: &BoardState, player: PlayerId) -> bool {
    mission_status(state, player).valid()
}

/// Combines every concrete mission of the pool with `maybe`, stopping as
/// soon as the result is no longer certain.
fn evaluate_wildcard(state: &BoardState) -> Logic {
    let mut concrete = state
        .rules
        .mission_pool
        .iter()
        .filter(|m| !matches!(m, Mission::Wildcard));
    let Some(first) = concrete.next() else {
        return Logic::False;
    };
    let mut value = evaluate(state, first);
    for m in concrete {
        if value.uncertain() {
            break;
        }
        value = value.maybe(evaluate(state, m));
    }
    value
}

fn liberated(state: &BoardState, targets: &[PlayerId]) -> bool {
    targets.iter().all(|&p| !state.is_alive(p))
}

/// Territory-holding missions for one player.
fn holds(state: &BoardState, mission: &Mission, player: PlayerId) -> bool {
    match mission {
        Mission::Conquer { continents, extra } => {
            let held = state.conquered_continents(player);
            held.len() >= continents.len() + *extra as usize
                && continents.iter().all(|c| held.contains(c))
        }
        Mission::Occupy {
            territories,
            troops,
            required,
        } => {
            if !state.is_alive(player) {
                return false;
            }
            let owned: Vec<TerritoryId> = state.owned(player).collect();
            owned.len() <= *territories as usize
                && owned.iter().all(|&t| state.troops(t) >= *troops)
                && required.iter().all(|t| owned.contains(t))
        }
        Mission::Liberate { .. } | Mission::Wildcard => false,
    }
}

impl BoardState {
    /// See [`evaluate`].
    pub fn evaluate(&self, mission: &Mission) -> Logic {
        evaluate(self, mission)
    }

    /// See [`mission_status`].
    pub fn mission_status(&self, player: PlayerId) -> Logic {
        mission_status(self, player)
    }

    pub fn mission_accomplished(&self, player: PlayerId) -> bool {
        mission_accomplished(self, player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::territory::Territory;
    use crate::config::GameConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn liberate(p: u8) -> Mission {
        Mission::Liberate {
            targets: vec![PlayerId(p)],
        }
    }

    /// Classic map after selection, every territory held by `owner(t)` with
    /// two troops.
    fn board(players: usize, owner: impl Fn(usize) -> u8) -> BoardState {
        let mut state = BoardState::with_seed(GameConfig::default(), players, 5).unwrap();
        for (i, t) in state.territories.iter_mut().enumerate() {
            *t = Territory {
                occupant: Some(PlayerId(owner(i))),
                troops: 2,
            };
        }
        state
    }

    fn with_pool(mut state: BoardState, pool: Vec<Mission>) -> BoardState {
        let mut rules = (*state.rules).clone();
        rules.mission_pool = pool;
        state.rules = Arc::new(rules);
        state
    }

    #[test]
    fn deal_never_hands_out_self_liberation() {
        let pool: Vec<Mission> = (0..3).map(liberate).collect();
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let dealt = deal(&pool, 3, &[ContinentId(0)], &mut rng);
            assert_eq!(dealt.len(), 3);
            for (seat, m) in dealt.iter().enumerate() {
                assert!(!m.liberates(PlayerId(seat as u8)), "seed {}", seed);
            }
        }
    }

    #[test]
    fn deal_falls_back_without_a_swap_partner() {
        // Two seats, the only missions liberate seat 0: seat 0 cannot keep
        // one and nobody can take it off their hands.
        let pool = vec![liberate(0), liberate(0)];
        let mut rng = SmallRng::seed_from_u64(1);
        let dealt = deal(&pool, 2, &[ContinentId(0), ContinentId(1)], &mut rng);
        assert_eq!(
            dealt[0],
            Mission::Conquer {
                continents: vec![ContinentId(0), ContinentId(1)],
                extra: 0
            }
        );
        assert_eq!(dealt[1], liberate(0));
    }

    #[test]
    fn deal_fills_short_pool_with_occupy_mission() {
        let occupy = Mission::Occupy {
            territories: 24,
            troops: 1,
            required: Vec::new(),
        };
        let pool = vec![occupy.clone()];
        let mut rng = SmallRng::seed_from_u64(0);
        let dealt = deal(&pool, 3, &[], &mut rng);
        assert_eq!(dealt, vec![occupy.clone(), occupy.clone(), occupy]);
    }

    #[test]
    fn liberate_requires_elimination() {
        let state = board(3, |i| if i < 20 { 0 } else { 1 });
        assert_eq!(state.evaluate(&liberate(2)), Logic::True);
        assert_eq!(state.evaluate(&liberate(1)), Logic::False);
    }

    #[test]
    fn conquer_needs_named_and_extra_continents() {
        use crate::board::classic::{AFRICA, ASIA, EUROPE, SOUTH_AMERICA};
        // Player 0 holds South America (9..=12) and Europe (13..=19).
        let state = board(2, |i| if (9..=19).contains(&i) { 0 } else { 1 });
        let sa_eu = Mission::Conquer {
            continents: vec![EUROPE, SOUTH_AMERICA],
            extra: 0,
        };
        let sa_eu_plus = Mission::Conquer {
            continents: vec![EUROPE, SOUTH_AMERICA],
            extra: 1,
        };
        let asia_africa = Mission::Conquer {
            continents: vec![ASIA, AFRICA],
            extra: 0,
        };
        assert_eq!(state.evaluate(&sa_eu), Logic::True);
        assert_eq!(state.evaluate(&sa_eu_plus), Logic::False);
        // Player 1 holds North America, Africa, Asia and Australia.
        assert_eq!(state.evaluate(&asia_africa), Logic::True);
    }

    #[test]
    fn occupy_counts_and_troops() {
        let mut state = board(2, |i| if i < 18 { 0 } else { 1 });
        let mission = Mission::Occupy {
            territories: 18,
            troops: 2,
            required: vec![TerritoryId(3)],
        };
        assert_eq!(state.evaluate(&mission), Logic::True);
        state.territories[5].troops = 1;
        assert_eq!(state.evaluate(&mission), Logic::False);
    }

    #[test]
    fn eliminated_players_do_not_occupy() {
        let state = board(3, |i| (i % 2) as u8);
        let mission = Mission::Occupy {
            territories: 1,
            troops: 1,
            required: Vec::new(),
        };
        assert_eq!(state.evaluate(&mission), Logic::False);
    }

    #[test]
    fn own_status_is_restricted_to_the_player() {
        let mut state = board(2, |i| if i < 18 { 0 } else { 1 });
        let mission = Mission::Occupy {
            territories: 24,
            troops: 2,
            required: Vec::new(),
        };
        state.missions = vec![mission.clone(), mission];
        // Player 0 holds 18 territories, player 1 holds 24.
        assert!(state.mission_accomplished(PlayerId(0)));
        assert!(state.mission_accomplished(PlayerId(1)));
        state.territories[30].troops = 1;
        assert!(state.mission_accomplished(PlayerId(0)));
        assert_eq!(state.mission_status(PlayerId(1)), Logic::False);
    }

    #[test]
    fn wildcard_agrees_or_is_unknown() {
        let state = board(3, |i| if i < 21 { 0 } else { 1 });
        // Seat 2 holds nothing: liberating it is done, liberating 0 is not.
        let all_true = with_pool(state.clone(), vec![liberate(2), Mission::Wildcard, liberate(2)]);
        assert_eq!(all_true.evaluate(&Mission::Wildcard), Logic::True);

        let all_false = with_pool(state.clone(), vec![liberate(0), liberate(1)]);
        assert_eq!(all_false.evaluate(&Mission::Wildcard), Logic::False);

        let mixed = with_pool(state.clone(), vec![liberate(2), liberate(0), liberate(2)]);
        assert_eq!(mixed.evaluate(&Mission::Wildcard), Logic::Unknown);

        let empty = with_pool(state, vec![Mission::Wildcard]);
        assert_eq!(empty.evaluate(&Mission::Wildcard), Logic::False);
    }

    #[test]
    fn status_without_missions_is_false() {
        let mut state = board(2, |i| (i % 2) as u8);
        state.missions.clear();
        assert_eq!(state.mission_status(PlayerId(0)), Logic::False);
    }

    #[test]
    fn mission_json_shape() {
        let json = serde_json::to_string(&liberate(3)).unwrap();
        assert_eq!(json, r#"{"type":"liberate","targets":[3]}"#);
        let m: Mission = serde_json::from_str(r#"{"type":"conquer","continents":[1,4]}"#).unwrap();
        assert_eq!(
            m,
            Mission::Conquer {
                continents: vec![ContinentId(1), ContinentId(4)],
                extra: 0
            }
        );
        let w: Mission = serde_json::from_str(r#"{"type":"wildcard"}"#).unwrap();
        assert_eq!(w, Mission::Wildcard);
    }
}

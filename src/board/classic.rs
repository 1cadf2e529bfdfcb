//! The classic 42-territory world map.
//!
//! Territories are listed continent by continent; a territory's id is its
//! position in `CLASSIC_TERRITORIES`. Borders are stored once per pair in
//! `CLASSIC_BORDERS` and expanded into symmetric connection lists when the
//! map is turned into a `GameConfig`. All data is compile-time `static`.

use crate::board::territory::{ContinentId, PlayerId, TerritoryId};
use crate::config::{ContinentConfig, TerritoryConfig};
use crate::mission::Mission;

/// Number of territories on the classic map.
pub const CLASSIC_TERRITORY_COUNT: usize = 42;

/// Number of borders (unordered pairs) on the classic map.
pub const CLASSIC_BORDER_COUNT: usize = 84;

pub const NORTH_AMERICA: ContinentId = ContinentId(0);
pub const SOUTH_AMERICA: ContinentId = ContinentId(1);
pub const EUROPE: ContinentId = ContinentId(2);
pub const AFRICA: ContinentId = ContinentId(3);
pub const ASIA: ContinentId = ContinentId(4);
pub const AUSTRALIA: ContinentId = ContinentId(5);

/// Card categories printed on classic territory cards.
pub const INFANTRY: u8 = 1;
pub const CAVALRY: u8 = 2;
pub const ARTILLERY: u8 = 3;

/// Static metadata for one classic territory.
#[derive(Debug, Clone, Copy)]
pub struct ClassicTerritory {
    pub name: &'static str,
    pub continent: ContinentId,
    pub card_type: u8,
}

const fn t(name: &'static str, continent: ContinentId, card_type: u8) -> ClassicTerritory {
    ClassicTerritory {
        name,
        continent,
        card_type,
    }
}

/// (name, bonus) for each classic continent, indexed by continent id.
pub static CLASSIC_CONTINENTS: [(&str, u32); 6] = [
    ("North America", 5),
    ("South America", 2),
    ("Europe", 5),
    ("Africa", 3),
    ("Asia", 7),
    ("Australia", 2),
];

#[rustfmt::skip]
pub static CLASSIC_TERRITORIES: [ClassicTerritory; CLASSIC_TERRITORY_COUNT] = [
    t("Alaska", NORTH_AMERICA, ARTILLERY),                 // 0
    t("Alberta", NORTH_AMERICA, ARTILLERY),                // 1
    t("Central America", NORTH_AMERICA, INFANTRY),         // 2
    t("Eastern United States", NORTH_AMERICA, INFANTRY),   // 3
    t("Greenland", NORTH_AMERICA, CAVALRY),                // 4
    t("Northwest Territory", NORTH_AMERICA, CAVALRY),      // 5
    t("Ontario", NORTH_AMERICA, ARTILLERY),                // 6
    t("Quebec", NORTH_AMERICA, ARTILLERY),                 // 7
    t("Western United States", NORTH_AMERICA, ARTILLERY),  // 8
    t("Argentina", SOUTH_AMERICA, INFANTRY),               // 9
    t("Brazil", SOUTH_AMERICA, INFANTRY),                  // 10
    t("Peru", SOUTH_AMERICA, CAVALRY),                     // 11
    t("Venezuela", SOUTH_AMERICA, CAVALRY),                // 12
    t("Great Britain", EUROPE, INFANTRY),                  // 13
    t("Iceland", EUROPE, CAVALRY),                         // 14
    t("Northern Europe", EUROPE, CAVALRY),                 // 15
    t("Scandinavia", EUROPE, INFANTRY),                    // 16
    t("Southern Europe", EUROPE, INFANTRY),                // 17
    t("Ukraine", EUROPE, INFANTRY),                        // 18
    t("Western Europe", EUROPE, INFANTRY),                 // 19
    t("Central Africa", AFRICA, ARTILLERY),                // 20
    t("East Africa", AFRICA, INFANTRY),                    // 21
    t("Egypt", AFRICA, CAVALRY),                           // 22
    t("Madagascar", AFRICA, CAVALRY),                      // 23
    t("North Africa", AFRICA, INFANTRY),                   // 24
    t("South Africa", AFRICA, ARTILLERY),                  // 25
    t("Afghanistan", ASIA, INFANTRY),                      // 26
    t("China", ASIA, ARTILLERY),                           // 27
    t("India", ASIA, CAVALRY),                             // 28
    t("Irkutsk", ASIA, ARTILLERY),                         // 29
    t("Japan", ASIA, CAVALRY),                             // 30
    t("Kamchatka", ASIA, ARTILLERY),                       // 31
    t("Middle East", ASIA, ARTILLERY),                     // 32
    t("Mongolia", ASIA, CAVALRY),                          // 33
    t("Siam", ASIA, CAVALRY),                              // 34
    t("Siberia", ASIA, INFANTRY),                          // 35
    t("Ural", ASIA, INFANTRY),                             // 36
    t("Yakutsk", ASIA, ARTILLERY),                         // 37
    t("Eastern Australia", AUSTRALIA, CAVALRY),            // 38
    t("Indonesia", AUSTRALIA, INFANTRY),                   // 39
    t("New Guinea", AUSTRALIA, CAVALRY),                   // 40
    t("Western Australia", AUSTRALIA, ARTILLERY),          // 41
];

/// Unordered borders between classic territories.
#[rustfmt::skip]
pub static CLASSIC_BORDERS: [(u16, u16); CLASSIC_BORDER_COUNT] = [
    // North America
    (1, 0), (3, 2), (5, 0), (5, 1), (5, 4), (6, 1), (6, 4), (6, 3), (6, 5),
    (7, 3), (7, 4), (7, 5), (7, 6), (8, 1), (8, 2), (8, 3), (8, 6),
    // South America
    (10, 9), (11, 9), (11, 10), (12, 2), (12, 10), (12, 11),
    // Europe
    (14, 4), (14, 13), (15, 13), (16, 13), (16, 14), (16, 15), (17, 15),
    (18, 15), (18, 16), (18, 17), (19, 13), (19, 15), (19, 17),
    // Africa
    (21, 20), (22, 17), (22, 21), (23, 21), (24, 10), (24, 17), (24, 19),
    (24, 20), (24, 21), (24, 22), (25, 20), (25, 21), (25, 23),
    // Asia
    (26, 18), (27, 26), (28, 26), (28, 27), (31, 0), (31, 29), (31, 30),
    (32, 17), (32, 18), (32, 21), (32, 22), (32, 26), (32, 28), (33, 27),
    (33, 29), (33, 30), (33, 31), (34, 27), (34, 28), (35, 27), (35, 29),
    (35, 33), (36, 18), (36, 26), (36, 27), (36, 35), (37, 29), (37, 31),
    (37, 35),
    // Australia
    (39, 34), (40, 38), (40, 39), (41, 38), (41, 39), (41, 40),
];

/// Continent groups used by the classic conquer missions, with the number
/// of additional continents of the player's choice.
pub static CLASSIC_CONTINENT_GROUPS: [(&[ContinentId], u32); 6] = [
    (&[ASIA, SOUTH_AMERICA], 0),
    (&[ASIA, AFRICA], 0),
    (&[NORTH_AMERICA, AFRICA], 0),
    (&[NORTH_AMERICA, AUSTRALIA], 0),
    (&[EUROPE, SOUTH_AMERICA], 1),
    (&[EUROPE, AUSTRALIA], 1),
];

/// Number of seats covered by the classic liberate missions.
pub const CLASSIC_SEATS: u8 = 6;

/// Continent table of the classic map.
pub fn classic_continents() -> Vec<ContinentConfig> {
    CLASSIC_CONTINENTS
        .iter()
        .enumerate()
        .map(|(i, &(name, bonus))| ContinentConfig {
            id: ContinentId(i as u8),
            name: name.to_string(),
            bonus,
        })
        .collect()
}

/// Territory table of the classic map with symmetric connection lists.
pub fn classic_territories() -> Vec<TerritoryConfig> {
    let mut connects: Vec<Vec<TerritoryId>> = vec![Vec::new(); CLASSIC_TERRITORY_COUNT];
    for &(a, b) in CLASSIC_BORDERS.iter() {
        connects[a as usize].push(TerritoryId(b));
        connects[b as usize].push(TerritoryId(a));
    }
    CLASSIC_TERRITORIES
        .iter()
        .zip(connects)
        .enumerate()
        .map(|(i, (info, mut connects))| {
            connects.sort();
            TerritoryConfig {
                id: TerritoryId(i as u16),
                name: info.name.to_string(),
                continent: info.continent,
                card_type: info.card_type,
                connects,
            }
        })
        .collect()
}

/// The classic mission catalog: liberate each seat, the six continent
/// groups, and the two occupation missions.
pub fn classic_missions() -> Vec<Mission> {
    let mut missions: Vec<Mission> = (0..CLASSIC_SEATS)
        .map(|seat| Mission::Liberate {
            targets: vec![PlayerId(seat)],
        })
        .collect();
    missions.extend(
        CLASSIC_CONTINENT_GROUPS
            .iter()
            .map(|&(continents, extra)| Mission::Conquer {
                continents: continents.to_vec(),
                extra,
            }),
    );
    missions.push(Mission::Occupy {
        territories: 18,
        troops: 2,
        required: Vec::new(),
    });
    missions.push(Mission::Occupy {
        territories: 24,
        troops: 1,
        required: Vec::new(),
    });
    missions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn border_count() {
        assert_eq!(CLASSIC_BORDERS.len(), CLASSIC_BORDER_COUNT);
    }

    #[test]
    fn no_duplicate_or_self_borders() {
        let mut seen = HashSet::new();
        for &(a, b) in CLASSIC_BORDERS.iter() {
            assert_ne!(a, b, "self border at {}", a);
            let key = (a.min(b), a.max(b));
            assert!(seen.insert(key), "duplicate border {:?}", key);
        }
    }

    #[test]
    fn every_territory_has_a_border() {
        let territories = classic_territories();
        for t in &territories {
            assert!(!t.connects.is_empty(), "{} is isolated", t.name);
        }
    }

    #[test]
    fn connections_are_symmetric() {
        let territories = classic_territories();
        for t in &territories {
            for n in &t.connects {
                assert!(
                    territories[n.index()].connects.contains(&t.id),
                    "{} -> {} is one-way",
                    t.name,
                    territories[n.index()].name
                );
            }
        }
    }

    #[test]
    fn continent_sizes() {
        let territories = classic_territories();
        let count = |c: ContinentId| territories.iter().filter(|t| t.continent == c).count();
        assert_eq!(count(NORTH_AMERICA), 9);
        assert_eq!(count(SOUTH_AMERICA), 4);
        assert_eq!(count(EUROPE), 7);
        assert_eq!(count(AFRICA), 6);
        assert_eq!(count(ASIA), 12);
        assert_eq!(count(AUSTRALIA), 4);
    }

    #[test]
    fn known_borders_sample() {
        let territories = classic_territories();
        let adjacent = |a: u16, b: u16| territories[a as usize].connects.contains(&TerritoryId(b));
        // Alaska - Kamchatka crosses the Bering strait.
        assert!(adjacent(0, 31));
        // Brazil - North Africa crosses the Atlantic.
        assert!(adjacent(10, 24));
        // Greenland - Iceland.
        assert!(adjacent(4, 14));
        // Siam - Indonesia joins Asia and Australia.
        assert!(adjacent(34, 39));
        assert!(!adjacent(0, 30));
        assert!(!adjacent(13, 24));
    }

    #[test]
    fn mission_catalog_shape() {
        let missions = classic_missions();
        assert_eq!(missions.len(), 6 + 6 + 2);
        let wildcard_groups = missions
            .iter()
            .filter(|m| matches!(m, Mission::Conquer { extra: 1, .. }))
            .count();
        assert_eq!(wildcard_groups, 2);
    }
}

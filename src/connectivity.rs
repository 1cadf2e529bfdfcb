//! Fortify connectivity.
//!
//! For every player, the territories they own split into connected
//! components over the borders between them. Each owned territory carries
//! the label of its component (the smallest territory id in it), so
//! reachability is a label comparison. Labels are canonical: two states with
//! the same ownership always carry the same labels.
//!
//! Only kept when the ruleset allows multi-hop fortification. An ownership
//! change touches only the components bordering the changed territory.

use std::collections::VecDeque;

use crate::board::graph::TerritoryGraph;
use crate::board::territory::{PlayerId, Territory, TerritoryId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortifyConnectivity {
    /// Component label per territory; `None` while unowned.
    labels: Vec<Option<TerritoryId>>,
}

impl FortifyConnectivity {
    /// Labels every owned territory from scratch.
    pub fn build(graph: &TerritoryGraph, territories: &[Territory]) -> Self {
        let mut connectivity = FortifyConnectivity {
            labels: vec![None; territories.len()],
        };
        let mut owners: Vec<PlayerId> = territories.iter().filter_map(|t| t.occupant).collect();
        owners.sort();
        owners.dedup();
        for owner in owners {
            connectivity.relabel(graph, territories, owner);
        }
        connectivity
    }

    /// Updates labels after `territory` changed hands from `old` to its
    /// current occupant. Only the components touching `territory` change:
    /// the old owner's component is re-walked from the bordering
    /// territories it still holds, the new owner's bordering components are
    /// merged.
    pub fn ownership_changed(
        &mut self,
        graph: &TerritoryGraph,
        territories: &[Territory],
        territory: TerritoryId,
        old: Option<PlayerId>,
    ) {
        let new = territories.get(territory.index()).and_then(|t| t.occupant);
        if new == old {
            return;
        }
        self.labels[territory.index()] = None;
        if let Some(old) = old {
            self.split(graph, territories, territory, old);
        }
        if let Some(new) = new {
            self.merge(graph, territories, territory, new);
        }
    }

    /// True iff both territories are owned by `owner` and connected through
    /// territories `owner` holds.
    pub fn can_reach(
        &self,
        territories: &[Territory],
        owner: PlayerId,
        src: TerritoryId,
        dst: TerritoryId,
    ) -> bool {
        let owned = |t: TerritoryId| territories.get(t.index()).is_some_and(|x| x.is_owned_by(owner));
        if !owned(src) || !owned(dst) {
            return false;
        }
        match (self.labels.get(src.index()), self.labels.get(dst.index())) {
            (Some(Some(a)), Some(Some(b))) => a == b,
            _ => false,
        }
    }

    /// Component label of `t`, if owned.
    pub fn label(&self, t: TerritoryId) -> Option<TerritoryId> {
        self.labels.get(t.index()).copied().flatten()
    }

    /// Recomputes the labels of every territory owned by `owner` with a BFS
    /// per component, visiting territories in ascending id order.
    fn relabel(&mut self, graph: &TerritoryGraph, territories: &[Territory], owner: PlayerId) {
        let mut visited = vec![false; territories.len()];
        let mut queue = VecDeque::new();
        for (i, t) in territories.iter().enumerate() {
            if visited[i] || !t.is_owned_by(owner) {
                continue;
            }
            let root = TerritoryId(i as u16);
            visited[i] = true;
            queue.push_back(root);
            while let Some(cur) = queue.pop_front() {
                self.labels[cur.index()] = Some(root);
                for &n in graph.neighbors(cur) {
                    let ni = n.index();
                    if !visited[ni] && territories[ni].is_owned_by(owner) {
                        visited[ni] = true;
                        queue.push_back(n);
                    }
                }
            }
        }
    }

    /// Relabels what is left of `owner`'s component after losing `lost`.
    fn split(
        &mut self,
        graph: &TerritoryGraph,
        territories: &[Territory],
        lost: TerritoryId,
        owner: PlayerId,
    ) {
        let mut visited = vec![false; territories.len()];
        for &start in graph.neighbors(lost) {
            if visited[start.index()] || !territories[start.index()].is_owned_by(owner) {
                continue;
            }
            visited[start.index()] = true;
            let mut members = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(cur) = queue.pop_front() {
                for &n in graph.neighbors(cur) {
                    let ni = n.index();
                    if !visited[ni] && territories[ni].is_owned_by(owner) {
                        visited[ni] = true;
                        members.push(n);
                        queue.push_back(n);
                    }
                }
            }
            let root = members.iter().copied().min();
            for m in members {
                self.labels[m.index()] = root;
            }
        }
    }

    /// Joins `gained` with the components of `owner` bordering it.
    fn merge(
        &mut self,
        graph: &TerritoryGraph,
        territories: &[Territory],
        gained: TerritoryId,
        owner: PlayerId,
    ) {
        let joined: Vec<TerritoryId> = graph
            .neighbors(gained)
            .iter()
            .filter(|n| territories[n.index()].is_owned_by(owner))
            .filter_map(|n| self.labels[n.index()])
            .collect();
        let root = joined.iter().copied().fold(gained, Ord::min);
        for label in self.labels.iter_mut() {
            if label.is_some_and(|l| joined.contains(&l)) {
                *label = Some(root);
            }
        }
        self.labels[gained.index()] = Some(root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContinentConfig, GameConfig, TerritoryConfig};
    use crate::board::territory::ContinentId;

    /// A path 0 - 1 - 2 - 3 - 4.
    fn path_graph() -> TerritoryGraph {
        let territories = (0..5u16)
            .map(|i| TerritoryConfig {
                id: TerritoryId(i),
                name: String::new(),
                continent: ContinentId(0),
                card_type: 1,
                connects: if i < 4 { vec![TerritoryId(i + 1)] } else { Vec::new() },
            })
            .collect();
        let config = GameConfig {
            continents: vec![ContinentConfig {
                id: ContinentId(0),
                name: String::new(),
                bonus: 1,
            }],
            territories,
            ..GameConfig::default()
        };
        TerritoryGraph::from_config(&config)
    }

    fn owned(owners: &[u8]) -> Vec<Territory> {
        owners
            .iter()
            .map(|&p| Territory {
                occupant: Some(PlayerId(p)),
                troops: 1,
            })
            .collect()
    }

    #[test]
    fn components_split_by_enemy_territory() {
        let graph = path_graph();
        let territories = owned(&[0, 0, 1, 0, 0]);
        let c = FortifyConnectivity::build(&graph, &territories);
        let p0 = PlayerId(0);
        assert!(c.can_reach(&territories, p0, TerritoryId(0), TerritoryId(1)));
        assert!(c.can_reach(&territories, p0, TerritoryId(3), TerritoryId(4)));
        assert!(!c.can_reach(&territories, p0, TerritoryId(1), TerritoryId(3)));
        assert!(!c.can_reach(&territories, p0, TerritoryId(1), TerritoryId(2)));
        assert!(!c.can_reach(&territories, PlayerId(1), TerritoryId(2), TerritoryId(3)));
        assert_eq!(c.label(TerritoryId(4)), Some(TerritoryId(3)));
    }

    #[test]
    fn conquest_merges_and_splits() {
        let graph = path_graph();
        let mut territories = owned(&[0, 0, 1, 0, 0]);
        let mut c = FortifyConnectivity::build(&graph, &territories);

        // Player 0 takes territory 2: one component.
        territories[2].occupant = Some(PlayerId(0));
        c.ownership_changed(&graph, &territories, TerritoryId(2), Some(PlayerId(1)));
        assert!(c.can_reach(&territories, PlayerId(0), TerritoryId(0), TerritoryId(4)));
        assert_eq!(c, FortifyConnectivity::build(&graph, &territories));

        // Player 1 takes territory 1 back: player 0 splits in two.
        territories[1].occupant = Some(PlayerId(1));
        c.ownership_changed(&graph, &territories, TerritoryId(1), Some(PlayerId(0)));
        assert!(!c.can_reach(&territories, PlayerId(0), TerritoryId(0), TerritoryId(2)));
        assert!(c.can_reach(&territories, PlayerId(0), TerritoryId(2), TerritoryId(4)));
        assert_eq!(c, FortifyConnectivity::build(&graph, &territories));
    }

    #[test]
    fn distant_components_keep_their_labels() {
        let graph = path_graph();
        let mut territories = owned(&[0, 1, 1, 0, 2]);
        let mut c = FortifyConnectivity::build(&graph, &territories);
        let before = c.clone();

        // Player 1 loses territory 1 to player 0: territory 2 becomes its
        // own component, player 2 is untouched.
        territories[1].occupant = Some(PlayerId(0));
        c.ownership_changed(&graph, &territories, TerritoryId(1), Some(PlayerId(1)));
        assert_eq!(c.label(TerritoryId(1)), Some(TerritoryId(0)));
        assert_eq!(c.label(TerritoryId(2)), Some(TerritoryId(2)));
        assert_eq!(c.label(TerritoryId(3)), before.label(TerritoryId(3)));
        assert_eq!(c.label(TerritoryId(4)), before.label(TerritoryId(4)));
        assert_eq!(c, FortifyConnectivity::build(&graph, &territories));

        // Player 0 takes territory 2 as well and joins up with territory 3.
        territories[2].occupant = Some(PlayerId(0));
        c.ownership_changed(&graph, &territories, TerritoryId(2), Some(PlayerId(1)));
        assert_eq!(c.label(TerritoryId(2)), Some(TerritoryId(0)));
        assert!(c.can_reach(&territories, PlayerId(0), TerritoryId(0), TerritoryId(3)));
        assert_eq!(c, FortifyConnectivity::build(&graph, &territories));
    }

    #[test]
    fn selection_of_unowned_territory() {
        let graph = path_graph();
        let mut territories = vec![Territory::unowned(); 5];
        territories[0] = Territory {
            occupant: Some(PlayerId(0)),
            troops: 1,
        };
        let mut c = FortifyConnectivity::build(&graph, &territories);
        assert_eq!(c.label(TerritoryId(1)), None);

        territories[1] = Territory {
            occupant: Some(PlayerId(0)),
            troops: 1,
        };
        c.ownership_changed(&graph, &territories, TerritoryId(1), None);
        assert!(c.can_reach(&territories, PlayerId(0), TerritoryId(1), TerritoryId(0)));
    }
}

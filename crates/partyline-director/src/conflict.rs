//! Weighted undirected conflict graph between participants.
//!
//! The graph encodes how much friction each pair of personas produces when
//! pitted against each other. Lookups are symmetric: `(a, b)` and `(b, a)`
//! resolve to the same edge. Pairs without an edge get the graph's default
//! weight.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use partyline_types::{ParticipantId, clamp_unit};

/// Weight of a pair with no explicit edge.
pub const DEFAULT_CONFLICT_WEIGHT: f64 = 0.1;

/// One explicit edge of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictEdge {
    /// One end of the edge.
    pub a: ParticipantId,
    /// The other end of the edge.
    pub b: ParticipantId,
    /// Friction in `[0, 1]`.
    pub weight: f64,
}

/// Static conflict graph with an explicit default-weight policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictGraph {
    /// Edge weights keyed by the ordered pair `(min, max)`.
    edges: BTreeMap<(ParticipantId, ParticipantId), f64>,
    /// Weight returned for pairs without an edge.
    default_weight: f64,
}

impl ConflictGraph {
    /// Create a graph with no edges.
    pub fn new(default_weight: f64) -> Self {
        Self {
            edges: BTreeMap::new(),
            default_weight: clamp_unit(default_weight),
        }
    }

    /// Build a graph from a list of edges. Later edges overwrite earlier ones
    /// for the same pair.
    pub fn from_edges(default_weight: f64, edges: &[ConflictEdge]) -> Self {
        edges.iter().fold(Self::new(default_weight), |graph, edge| {
            graph.with_edge(edge.a, edge.b, edge.weight)
        })
    }

    /// Add (or replace) the edge between `a` and `b`.
    ///
    /// Self-loops are ignored; the weight is clamped to `[0, 1]`.
    #[must_use]
    pub fn with_edge(mut self, a: ParticipantId, b: ParticipantId, weight: f64) -> Self {
        if a != b {
            self.edges.insert(pair_key(a, b), clamp_unit(weight));
        }
        self
    }

    /// Conflict weight between two participants.
    pub fn weight(&self, a: ParticipantId, b: ParticipantId) -> f64 {
        self.edges
            .get(&pair_key(a, b))
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Weight used for unlisted pairs.
    pub const fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /// All explicit edges in key order.
    pub fn edges(&self) -> impl Iterator<Item = ConflictEdge> + '_ {
        self.edges.iter().map(|(&(a, b), &weight)| ConflictEdge { a, b, weight })
    }
}

impl Default for ConflictGraph {
    fn default() -> Self {
        Self::new(DEFAULT_CONFLICT_WEIGHT)
            .with_edge(ParticipantId::MemeGoblin, ParticipantId::Logician, 0.7)
            .with_edge(ParticipantId::MemeGoblin, ParticipantId::Therapist, 0.4)
            .with_edge(ParticipantId::Logician, ParticipantId::Therapist, 0.3)
            .with_edge(ParticipantId::MidwestDad, ParticipantId::Logician, 0.4)
            .with_edge(ParticipantId::MidwestDad, ParticipantId::MemeGoblin, 0.5)
    }
}

/// Normalize an unordered pair into a map key.
fn pair_key(a: ParticipantId, b: ParticipantId) -> (ParticipantId, ParticipantId) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn lookup_is_symmetric() {
        let graph = ConflictGraph::default();
        for a in ParticipantId::ALL {
            for b in ParticipantId::ALL {
                assert!(approx(graph.weight(a, b), graph.weight(b, a)));
            }
        }
    }

    #[test]
    fn default_edges() {
        let graph = ConflictGraph::default();
        assert!(approx(
            graph.weight(ParticipantId::Logician, ParticipantId::MemeGoblin),
            0.7
        ));
        assert!(approx(
            graph.weight(ParticipantId::MemeGoblin, ParticipantId::MidwestDad),
            0.5
        ));
        assert_eq!(graph.edges().count(), 5);
    }

    #[test]
    fn missing_pair_uses_default_weight() {
        let graph = ConflictGraph::default();
        assert!(approx(
            graph.weight(ParticipantId::Therapist, ParticipantId::MidwestDad),
            DEFAULT_CONFLICT_WEIGHT
        ));
    }

    #[test]
    fn weights_are_clamped_and_self_loops_ignored() {
        let graph = ConflictGraph::new(0.2)
            .with_edge(ParticipantId::Logician, ParticipantId::Therapist, 3.0)
            .with_edge(ParticipantId::Logician, ParticipantId::Logician, 0.9);
        assert!(approx(
            graph.weight(ParticipantId::Therapist, ParticipantId::Logician),
            1.0
        ));
        assert!(approx(
            graph.weight(ParticipantId::Logician, ParticipantId::Logician),
            0.2
        ));
        assert_eq!(graph.edges().count(), 1);
    }

    #[test]
    fn from_edges_last_write_wins() {
        let edges = [
            ConflictEdge {
                a: ParticipantId::MemeGoblin,
                b: ParticipantId::Therapist,
                weight: 0.2,
            },
            ConflictEdge {
                a: ParticipantId::Therapist,
                b: ParticipantId::MemeGoblin,
                weight: 0.6,
            },
        ];
        let graph = ConflictGraph::from_edges(0.1, &edges);
        assert!(approx(
            graph.weight(ParticipantId::MemeGoblin, ParticipantId::Therapist),
            0.6
        ));
    }
}

//! Basic structural statistics for a goal-vote graph.
//!
//! # Statistics Provided
//!
//! - **vertex_count**: Number of entities.
//! - **edge_count**: Distinct ordered pairs with a recorded edge (zero-weight
//!   edges included, repeated edges counted once).
//! - **total_weight**: Sum of all edge weights (total goals in the football
//!   setting).
//! - **density**: `edge_count / (vertex_count * (vertex_count - 1))`, with
//!   self-loops excluded from the numerator.
//! - **sink_count**: Vertices with zero outgoing weight. Their score is not
//!   propagated.
//! - **source_count**: Vertices with zero incoming weight. They are kept
//!   alive only by the leak term.
//! - **isolated_count**: Vertices with neither incoming nor outgoing edges.
//! - **self_loop_count**: Vertices that are their own neighbor.
//! - **weakly_connected_component_count**: Disjoint groups of entities that
//!   never played each other, directly or transitively.
//! - **max_out_weight / max_in_weight**: Largest per-vertex weight totals.

use petgraph::algo::connected_components;
use serde::Serialize;

use super::Entity;
use super::store::ScoreGraph;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a [`ScoreGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of distinct ordered pairs with an edge.
    pub edge_count: usize,
    /// Sum of all accumulated edge weights.
    pub total_weight: u64,
    /// Edge density excluding self-loops; 0.0 for fewer than two vertices.
    pub density: f64,
    /// Vertices with zero outgoing weight.
    pub sink_count: usize,
    /// Vertices with zero incoming weight.
    pub source_count: usize,
    /// Vertices with no edges in either direction.
    pub isolated_count: usize,
    /// Vertices with an edge to themselves.
    pub self_loop_count: usize,
    /// Number of weakly connected components.
    pub weakly_connected_component_count: usize,
    /// Largest outgoing weight total over all vertices.
    pub max_out_weight: u64,
    /// Largest incoming weight total over all vertices.
    pub max_in_weight: u64,
}

impl GraphStats {
    /// Compute statistics from a [`ScoreGraph`].
    #[must_use]
    pub fn from_graph<K: Entity>(graph: &ScoreGraph<K>) -> Self {
        let vertex_count = graph.len();
        let edge_count = graph.vertices().map(|v| v.outgoing().len()).sum();
        let total_weight = graph.vertices().map(super::Vertex::outgoing_total).sum();

        let self_loop_count = graph
            .vertices()
            .enumerate()
            .filter(|(idx, v)| v.outgoing().keys().any(|id| id.index() == *idx))
            .count();

        let sink_count = graph.vertices().filter(|v| v.is_sink()).count();
        let source_count = graph.vertices().filter(|v| v.incoming_total() == 0).count();
        let isolated_count = graph
            .vertices()
            .filter(|v| v.outgoing().is_empty() && v.incoming().is_empty())
            .count();

        let max_out_weight = graph
            .vertices()
            .map(super::Vertex::outgoing_total)
            .max()
            .unwrap_or(0);
        let max_in_weight = graph
            .vertices()
            .map(super::Vertex::incoming_total)
            .max()
            .unwrap_or(0);

        let weakly_connected_component_count = connected_components(&graph.to_digraph());

        Self {
            vertex_count,
            edge_count,
            total_weight,
            density: compute_density(vertex_count, edge_count - self_loop_count),
            sink_count,
            source_count,
            isolated_count,
            self_loop_count,
            weakly_connected_component_count,
            max_out_weight,
            max_in_weight,
        }
    }

    /// Return `true` if no vertex sends any weight.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.total_weight == 0
    }

    /// Return `true` if some score will be trapped each pass.
    #[must_use]
    pub const fn has_sinks(&self) -> bool {
        self.sink_count > 0
    }
}

// ---------------------------------------------------------------------------
// Internal helpers (cast precision suppressed at function scope)
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
fn compute_density(vertex_count: usize, edge_count: usize) -> f64 {
    if vertex_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (vertex_count * (vertex_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(nodes: &[&str], edges: &[(&str, &str, i64)]) -> ScoreGraph<String> {
        let mut graph = ScoreGraph::default();
        for id in nodes {
            graph.add_node(*id);
        }
        for &(from, to, w) in edges {
            graph.add_edge(from, to, w).unwrap();
        }
        graph
    }

    #[test]
    fn empty_graph_stats() {
        let stats = GraphStats::from_graph(&make_graph(&[], &[]));

        assert_eq!(stats.vertex_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert!(stats.density.abs() < f64::EPSILON);
        assert_eq!(stats.weakly_connected_component_count, 0);
        assert_eq!(stats.isolated_count, 0);
        assert!(stats.is_flat());
        assert!(!stats.has_sinks());
    }

    #[test]
    fn single_vertex_no_edges() {
        let stats = GraphStats::from_graph(&make_graph(&["A"], &[]));

        assert_eq!(stats.vertex_count, 1);
        assert_eq!(stats.isolated_count, 1);
        assert_eq!(stats.sink_count, 1);
        assert_eq!(stats.source_count, 1);
        assert_eq!(stats.weakly_connected_component_count, 1);
    }

    #[test]
    fn repeated_edges_count_once() {
        let stats = GraphStats::from_graph(&make_graph(&[], &[("A", "B", 2), ("A", "B", 3)]));

        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.total_weight, 5);
        assert_eq!(stats.max_out_weight, 5);
        assert_eq!(stats.max_in_weight, 5);
        assert!((stats.density - 0.5).abs() < 1e-10, "1 / (2 * 1)");
    }

    #[test]
    fn sinks_and_sources() {
        // A → B → C: A is a source, C a sink.
        let stats = GraphStats::from_graph(&make_graph(&[], &[("A", "B", 1), ("B", "C", 1)]));

        assert_eq!(stats.sink_count, 1);
        assert_eq!(stats.source_count, 1);
        assert!(stats.has_sinks());
    }

    #[test]
    fn zero_weight_edge_leaves_sink() {
        // A 0-0 draw records edges without votes.
        let stats = GraphStats::from_graph(&make_graph(&[], &[("A", "B", 0), ("B", "A", 0)]));

        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.sink_count, 2);
        assert_eq!(stats.isolated_count, 0);
        assert!(stats.is_flat());
    }

    #[test]
    fn self_loops_counted_and_excluded_from_density() {
        let stats = GraphStats::from_graph(&make_graph(&[], &[("A", "A", 1), ("A", "B", 1)]));

        assert_eq!(stats.self_loop_count, 1);
        assert_eq!(stats.edge_count, 2);
        assert!((stats.density - 0.5).abs() < 1e-10);
    }

    #[test]
    fn disjoint_components() {
        let stats = GraphStats::from_graph(&make_graph(&["E"], &[("A", "B", 1), ("C", "D", 1)]));

        assert_eq!(stats.weakly_connected_component_count, 3);
        assert_eq!(stats.isolated_count, 1);
    }
}

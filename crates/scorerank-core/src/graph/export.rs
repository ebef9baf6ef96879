//! Conversion to petgraph for external analysis and rendering.
//!
//! Node indices of the exported [`DiGraph`] equal the [`VertexId`] of the
//! corresponding vertex, and each accumulated edge becomes exactly one
//! petgraph edge carrying its total weight.
//!
//! [`VertexId`]: super::VertexId

use std::fmt;

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};

use super::Entity;
use super::store::ScoreGraph;

impl<K: Entity> ScoreGraph<K> {
    /// Export the structure (keys and accumulated weights, no scores) as a
    /// petgraph [`DiGraph`].
    #[must_use]
    pub fn to_digraph(&self) -> DiGraph<K, u64> {
        let edge_count = self.vertices.iter().map(|v| v.outgoing().len()).sum();
        let mut graph = DiGraph::with_capacity(self.vertices.len(), edge_count);

        for vertex in &self.vertices {
            graph.add_node(vertex.key().clone());
        }
        for (idx, vertex) in self.vertices.iter().enumerate() {
            for (&target, &weight) in vertex.outgoing() {
                graph.add_edge(NodeIndex::new(idx), NodeIndex::new(target.index()), weight);
            }
        }

        graph
    }
}

impl<K: Entity + fmt::Display> ScoreGraph<K> {
    /// Render the structure in Graphviz DOT format with weights as edge
    /// labels.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let graph = self.to_digraph();
        format!("{}", Dot::with_config(&graph, &[]))
    }
}

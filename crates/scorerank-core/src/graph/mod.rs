//! Goal-vote graph module.
//!
//! # Overview
//!
//! A [`ScoreGraph`] owns one [`Vertex`] per entity in a dense arena and
//! records weighted, directed relationships between them. In the football
//! setting an edge `A → B` with weight `w` means "B scored `w` goals against
//! A": every goal is a vote that A sends to B.
//!
//! ## Pipeline
//!
//! ```text
//! (from, to, weight) triples
//!        ↓  ScoreGraph::add_edge()
//! ScoreGraph (vertex arena + adjacency maps, scores undefined)
//!        ↓  ScoreGraph::redistribute()
//! every vertex at the baseline term
//!        ↓  ScoreGraph::iterate() × N
//! ScoreRank scores
//!        ↓  ScoreGraph::ranked_scores()
//! Vec<(entity, score)> sorted by score
//! ```
//!
//! ## Inspection
//!
//! - [`GraphStats`] summarizes structure (sinks, self-loops, components).
//! - [`ScoreGraph::to_digraph`] converts to a `petgraph` graph for external
//!   tooling, and [`ScoreGraph::to_dot`] renders Graphviz DOT.

pub mod export;
pub mod stats;
pub mod store;
pub mod vertex;

use std::fmt;
use std::hash::Hash;

// Re-export primary types at module level for convenience.
pub use stats::GraphStats;
pub use store::{GraphState, ScoreGraph};
pub use vertex::{Vertex, VertexId};

/// Requirements on a graph key: hashable identity plus a `Debug` rendering
/// for errors and log fields.
pub trait Entity: Eq + Hash + Clone + fmt::Debug {}

impl<T: Eq + Hash + Clone + fmt::Debug> Entity for T {}

#![forbid(unsafe_code)]
//! scorerank-core library.
//!
//! Builds a directed, weighted "goal vote" graph between entities (teams) and
//! redistributes a notion of strength across it with a PageRank-style
//! iteration, producing the ScoreRank of every entity.
//!
//! # Conventions
//!
//! - **Errors**: Library operations return [`error::GraphError`]; callers that
//!   only need to bubble failures up can convert into `anyhow::Error`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//!   The subscriber installed by the host process decides what is recorded;
//!   nothing in this crate changes behavior based on logging configuration.
//!
//! # Quick start
//!
//! ```rust
//! use scorerank_core::{RankConfig, ScoreGraph};
//!
//! let mut graph: ScoreGraph<String> = ScoreGraph::new(RankConfig::constant(0.2))?;
//! graph.add_edge("Arsenal", "Chelsea", 2)?;
//! graph.add_edge("Chelsea", "Arsenal", 1)?;
//!
//! graph.redistribute();
//! graph.iterate_n(5)?;
//!
//! for (team, score) in graph.ranked_scores()? {
//!     println!("{team}: {score:.3}");
//! }
//! # Ok::<(), scorerank_core::GraphError>(())
//! ```

pub mod error;
pub mod graph;
pub mod rank;

pub use error::{ErrorCode, GraphError};
pub use graph::{Entity, GraphState, GraphStats, ScoreGraph, Vertex, VertexId};
pub use rank::{
    BaselineMode, Convergence, ConvergenceTrace, IterationReport, RankConfig, Snapshot,
};

#![forbid(unsafe_code)]
//! scorerank-league library.
//!
//! Football results on top of `scorerank-core`: loading results files,
//! turning them into goal-vote graphs, building the conventional league
//! table, and backtesting ScoreRank against bookmaker odds.
//!
//! # Conventions
//!
//! - **Errors**: [`load::LoadError`] for file input, [`scorerank_core::GraphError`]
//!   for ranking.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`). Skipped
//!   rows are reported at `warn`.

pub mod backtest;
pub mod bookie;
pub mod goal_votes;
pub mod load;
pub mod record;
pub mod stats;
pub mod table;

pub use backtest::{BacktestConfig, BacktestReport, Prediction, run_backtest};
pub use bookie::implied_outcome;
pub use goal_votes::{build_goal_graph, rank_matches};
pub use load::{LoadError, load_matches, read_matches, sort_by_date};
pub use record::{MatchOdds, MatchOutcome, MatchRecord};
pub use stats::{average_ranks, pearson, spearman};
pub use table::{PositionComparison, TableComparison, TableRow, compare_with_table, points_table};

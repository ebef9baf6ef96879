//! ScoreRank propagation.
//!
//! # Overview
//!
//! ScoreRank is PageRank over goal votes: every goal a team concedes sends a
//! share of that team's strength to the scorer. Repeating the redistribution
//! lets strength earned against strong opponents count for more than
//! strength earned against weak ones.
//!
//! ```text
//! score'(v) = (1 - leak) * Σ score(u) * w(u→v) / W_out(u)  +  leak * baseline
//! ```
//!
//! - [`config`]: leak factor, [`BaselineMode`], default pass count.
//! - [`propagate`]: `redistribute`, `iterate`, `iterate_n`, `iterate_until`.
//! - [`trace`]: per-pass ranking snapshots.

pub mod config;
pub mod propagate;
pub mod trace;

pub use config::{BaselineMode, RankConfig};
pub use propagate::{Convergence, IterationReport};
pub use trace::{ConvergenceTrace, Snapshot};

//! Subcommand handlers plus the argument groups they share.

pub mod backtest;
pub mod completions;
pub mod convergence;
pub mod graph;
pub mod rank;
pub mod table;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use scorerank_core::{BaselineMode, RankConfig};
use scorerank_league::{MatchRecord, load_matches};
use tracing::info;

/// One or more results files, read in order and concatenated.
#[derive(Args, Debug, Clone)]
pub struct MatchInput {
    /// Results CSV files (football-data.co.uk layout).
    #[arg(required = true, value_name = "CSV")]
    pub files: Vec<PathBuf>,
}

impl MatchInput {
    /// Load every file, failing on the first bad one.
    pub fn load(&self) -> Result<Vec<MatchRecord>> {
        let matches = load_matches(&self.files).with_context(|| {
            format!("Failed to load {} results file(s)", self.files.len())
        })?;
        info!(files = self.files.len(), matches = matches.len(), "loaded results");
        Ok(matches)
    }
}

/// Baseline convention as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BaselineArg {
    /// Every team starts at 1.0.
    Constant,
    /// Every team starts at 1 / team count.
    Normalized,
}

impl From<BaselineArg> for BaselineMode {
    fn from(arg: BaselineArg) -> Self {
        match arg {
            BaselineArg::Constant => Self::Constant,
            BaselineArg::Normalized => Self::Normalized,
        }
    }
}

/// Flags that override the `[rank]` section of the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct RankOverrides {
    /// Share of each score drawn from the baseline rather than from votes.
    #[arg(long, value_name = "0..1")]
    pub leak: Option<f64>,

    /// Baseline convention.
    #[arg(long, value_enum)]
    pub baseline: Option<BaselineArg>,

    /// Propagation passes after redistribution.
    #[arg(long, short = 'n')]
    pub iterations: Option<usize>,
}

impl RankOverrides {
    /// Apply flags on top of `base`.
    pub fn apply(&self, base: RankConfig) -> RankConfig {
        RankConfig {
            leak: self.leak.unwrap_or(base.leak),
            baseline: self.baseline.map_or(base.baseline, BaselineMode::from),
            iterations: self.iterations.unwrap_or(base.iterations),
        }
    }
}

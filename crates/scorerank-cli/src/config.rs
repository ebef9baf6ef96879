//! Project configuration (`scorerank.toml`).
//!
//! ```toml
//! [rank]
//! leak = 0.2
//! baseline = "constant"   # or "normalized"
//! iterations = 5
//!
//! [backtest]
//! history = 380
//! min_appearances = 3
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::path::Path;

use anyhow::{Context, Result};
use scorerank_core::RankConfig;
use scorerank_league::BacktestConfig;
use serde::{Deserialize, Serialize};

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "scorerank.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub rank: RankConfig,
    #[serde(default)]
    pub backtest: BacktestConfig,
}

/// Load configuration from `explicit` if given, else from
/// `<cwd>/scorerank.toml` if it exists, else defaults.
///
/// # Errors
///
/// Fails if an explicitly named file is missing, or any file cannot be read
/// or parsed.
pub fn load_project_config(explicit: Option<&Path>, cwd: &Path) -> Result<ProjectConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = cwd.join(CONFIG_FILE);
            if !path.exists() {
                return Ok(ProjectConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

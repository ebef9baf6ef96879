//! Ranking configuration: leak factor, baseline convention, pass count.

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// How the baseline term is chosen for initialization and for the leak
/// component of every pass.
///
/// The choice decides where the total score settles: around the vertex count
/// for [`Constant`](Self::Constant), around 1.0 for
/// [`Normalized`](Self::Normalized) (sinks aside).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineMode {
    /// Every vertex starts at, and is topped up towards, 1.0.
    #[default]
    Constant,
    /// Every vertex starts at, and is topped up towards, `1 / vertex_count`.
    Normalized,
}

impl BaselineMode {
    /// Baseline term for a graph with `vertex_count` vertices.
    ///
    /// An empty graph has no meaningful normalized baseline; 0.0 is returned
    /// since no vertex would receive it anyway.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn term(self, vertex_count: usize) -> f64 {
        match self {
            Self::Constant => 1.0,
            Self::Normalized if vertex_count == 0 => 0.0,
            Self::Normalized => 1.0 / vertex_count as f64,
        }
    }
}

/// Configuration for ScoreRank propagation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankConfig {
    /// Fraction of each new score drawn from the baseline term rather than
    /// from propagated votes. Must be within `[0, 1]`.
    /// Default: 0.2.
    #[serde(default = "default_leak")]
    pub leak: f64,
    /// Baseline convention shared by `redistribute` and `iterate`.
    /// Default: [`BaselineMode::Constant`].
    #[serde(default)]
    pub baseline: BaselineMode,
    /// Number of passes collaborators run after redistribution.
    /// Default: 5.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            leak: default_leak(),
            baseline: BaselineMode::default(),
            iterations: default_iterations(),
        }
    }
}

impl RankConfig {
    /// Constant baseline (1.0 per vertex) with the given leak.
    #[must_use]
    pub fn constant(leak: f64) -> Self {
        Self {
            leak,
            baseline: BaselineMode::Constant,
            ..Self::default()
        }
    }

    /// Normalized baseline (`1 / n` per vertex) with the given leak.
    #[must_use]
    pub fn normalized(leak: f64) -> Self {
        Self {
            leak,
            baseline: BaselineMode::Normalized,
            ..Self::default()
        }
    }

    /// Builder-style override of the pass count.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Check that the leak factor is a finite number in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidLeak`] otherwise.
    pub fn validate(&self) -> Result<(), GraphError> {
        if (0.0..=1.0).contains(&self.leak) {
            Ok(())
        } else {
            Err(GraphError::InvalidLeak(self.leak))
        }
    }
}

const fn default_leak() -> f64 {
    0.2
}

const fn default_iterations() -> usize {
    5
}

//! Error types for graph construction and score propagation.
//!
//! Every [`GraphError`] maps onto a stable [`ErrorCode`] so reporting layers
//! can branch on a machine-readable identifier instead of message text.

use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    EntityNotFound,
    InvalidWeight,
    WeightOverflow,
    UninitializedScore,
    InvalidLeak,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EntityNotFound => "E2001",
            Self::InvalidWeight => "E2002",
            Self::WeightOverflow => "E2003",
            Self::UninitializedScore => "E3001",
            Self::InvalidLeak => "E1001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EntityNotFound => "Entity not found",
            Self::InvalidWeight => "Negative edge weight",
            Self::WeightOverflow => "Accumulated edge weight overflow",
            Self::UninitializedScore => "Score not initialized",
            Self::InvalidLeak => "Leak factor out of range",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::EntityNotFound => None,
            Self::InvalidWeight => Some("Edge weights count goals and must be zero or more."),
            Self::WeightOverflow => {
                Some("Accumulated weights must fit in an unsigned 64-bit total.")
            }
            Self::UninitializedScore => {
                Some("Call redistribute() after the last node or edge is added.")
            }
            Self::InvalidLeak => Some("Use a leak factor between 0.0 and 1.0 inclusive."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by [`ScoreGraph`](crate::graph::ScoreGraph) operations.
///
/// Entity keys are rendered with their `Debug` representation so the error
/// type stays independent of the graph's key type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// The entity was never added to the graph.
    #[error("entity not found in graph: {key}")]
    NotFound { key: String },

    /// A caller tried to add an edge with a negative weight.
    #[error("negative edge weight {weight} for {from} -> {to}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: i64,
    },

    /// Adding the weight would overflow an accumulated total.
    #[error("edge weight {weight} for {from} -> {to} overflows the accumulated total")]
    WeightOverflow {
        from: String,
        to: String,
        weight: u64,
    },

    /// A score-dependent operation ran before `redistribute` gave this
    /// entity a baseline score.
    #[error("score for {key} is undefined; redistribute has not run since it was added")]
    UninitializedScore { key: String },

    /// Leak factor outside `[0, 1]` (or not a finite number).
    #[error("leak factor {0} is outside [0, 1]")]
    InvalidLeak(f64),
}

impl GraphError {
    /// Return the stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::EntityNotFound,
            Self::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            Self::WeightOverflow { .. } => ErrorCode::WeightOverflow,
            Self::UninitializedScore { .. } => ErrorCode::UninitializedScore,
            Self::InvalidLeak(_) => ErrorCode::InvalidLeak,
        }
    }

    pub(crate) fn not_found(key: &(impl fmt::Debug + ?Sized)) -> Self {
        Self::NotFound {
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn uninitialized(key: &(impl fmt::Debug + ?Sized)) -> Self {
        Self::UninitializedScore {
            key: format!("{key:?}"),
        }
    }
}

//! Error types for world operations.

use formic_core::AgentId;
use formic_grid::GridError;
use std::fmt;

/// Errors from world mutators and accessors.
///
/// All variants are recoverable: a simulation host runs many independent
/// trials and must be able to handle every one of these without a
/// process restart.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldError {
    /// A surface operation failed (out-of-bounds position, missing layer).
    Grid(GridError),
    /// The target agent is not a current member of the population.
    UnknownAgent {
        /// The id that was not found.
        id: AgentId,
    },
    /// A spawn would exceed the configured population cap.
    PopulationLimit {
        /// The configured maximum population.
        limit: usize,
    },
    /// The behavior strategy returned an unusable decision.
    BehaviorFailed {
        /// Name of the failing behavior.
        name: String,
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "{e}"),
            Self::UnknownAgent { id } => write!(f, "agent {id} is not a population member"),
            Self::PopulationLimit { limit } => {
                write!(f, "population limit {limit} reached")
            }
            Self::BehaviorFailed { name, reason } => {
                write!(f, "behavior '{name}' failed: {reason}")
            }
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for WorldError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

//! Error types for surface operations.

use formic_core::Position;
use std::fmt;

/// Errors arising from surface construction or cell/layer access.
///
/// All variants are local, recoverable conditions. The surface never
/// silently clamps an out-of-range position; every boundary violation
/// is surfaced to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// A position lies outside the surface extent.
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Number of rows in the extent.
        rows: u32,
        /// Number of columns in the extent.
        cols: u32,
    },
    /// No layer is registered under the given name.
    UnknownLayer {
        /// The requested layer name.
        name: String,
    },
    /// A layer is already registered under the given name.
    DuplicateLayer {
        /// The conflicting layer name.
        name: String,
    },
    /// The requested extent has a zero or oversized dimension.
    InvalidExtent {
        /// Requested number of rows.
        rows: u32,
        /// Requested number of columns.
        cols: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                position,
                rows,
                cols,
            } => {
                write!(f, "position {position} out of bounds [0, {rows}) x [0, {cols})")
            }
            Self::UnknownLayer { name } => write!(f, "unknown layer '{name}'"),
            Self::DuplicateLayer { name } => write!(f, "layer '{name}' already exists"),
            Self::InvalidExtent { rows, cols } => {
                write!(f, "invalid extent {rows} x {cols}")
            }
        }
    }
}

impl std::error::Error for GridError {}

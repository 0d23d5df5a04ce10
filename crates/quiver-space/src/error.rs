//! Error types for axis and grid construction and indexing.

use std::fmt;

/// Errors arising from grid construction or index lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// The axis bounds and step produce no sample points.
    EmptyAxis {
        /// Lower bound (inclusive).
        lower: f64,
        /// Upper bound (exclusive).
        upper: f64,
    },
    /// An axis parameter is non-finite, or the step is not positive.
    InvalidAxis {
        /// What went wrong.
        reason: String,
    },
    /// A dimension exceeds the supported maximum.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The requested value.
        value: usize,
        /// Maximum allowed value.
        max: usize,
    },
    /// A grid index is outside the grid's shape.
    IndexOutOfBounds {
        /// The offending `(i, j)` index.
        index: (usize, usize),
        /// The grid shape `(|xs|, |ys|)`.
        shape: (usize, usize),
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAxis { lower, upper } => {
                write!(f, "axis [{lower}, {upper}) has no sample points")
            }
            Self::InvalidAxis { reason } => write!(f, "invalid axis: {reason}"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::IndexOutOfBounds { index, shape } => write!(
                f,
                "index ({}, {}) out of bounds for grid {}x{}",
                index.0, index.1, shape.0, shape.1
            ),
        }
    }
}

impl std::error::Error for SpaceError {}

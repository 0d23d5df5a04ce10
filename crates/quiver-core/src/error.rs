//! Error types for field evaluation and aggregation.
//!
//! Organized by layer: [`EvalError`] for a single charge evaluated at a
//! single point, and [`FieldError`] for a whole-grid snapshot. Both are
//! surfaced synchronously; there is no retry or partial-result path.

use glam::DVec2;
use std::error::Error;
use std::fmt;

/// Errors from evaluating one charge's contribution at one point.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalError {
    /// The evaluation point coincides with the charge's retarded position,
    /// so the inverse-square law divides by zero.
    Singular {
        /// The evaluation point.
        point: DVec2,
        /// The retarded charge position that coincides with `point`.
        retarded: DVec2,
    },
    /// The trajectory returned a NaN or infinite position.
    NonFiniteTrajectory {
        /// The (already clamped) time the trajectory was queried at.
        time: f64,
        /// The position it returned.
        position: DVec2,
    },
    /// The evaluation produced a non-finite field, divergence, or curl.
    NonFiniteResult {
        /// The evaluation point.
        point: DVec2,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singular { point, retarded } => write!(
                f,
                "singular evaluation at ({}, {}): coincides with retarded charge at ({}, {})",
                point.x, point.y, retarded.x, retarded.y
            ),
            Self::NonFiniteTrajectory { time, position } => write!(
                f,
                "trajectory returned non-finite position ({}, {}) at t={time}",
                position.x, position.y
            ),
            Self::NonFiniteResult { point } => {
                write!(f, "non-finite field at ({}, {})", point.x, point.y)
            }
        }
    }
}

impl Error for EvalError {}

/// Errors from generating a full field snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// Evaluating one of the charge sources failed.
    ChargeFailed {
        /// Position of the failing source in the source list.
        index: usize,
        /// The underlying evaluation error.
        reason: EvalError,
    },
    /// The requested time is NaN or infinite.
    InvalidTime {
        /// The rejected time.
        value: f64,
    },
    /// Snapshot grids do not match the declared grid shape.
    ShapeMismatch {
        /// The declared `(|xs|, |ys|)` shape.
        shape: (usize, usize),
        /// Name of the offending grid.
        grid: &'static str,
        /// Its actual element count.
        len: usize,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChargeFailed { index, reason } => {
                write!(f, "charge {index} failed: {reason}")
            }
            Self::InvalidTime { value } => {
                write!(f, "time must be finite, got {value}")
            }
            Self::ShapeMismatch { shape, grid, len } => match shape.0.checked_mul(shape.1) {
                Some(n) => write!(
                    f,
                    "{grid} grid has {len} elements, expected {}x{} = {n}",
                    shape.0, shape.1
                ),
                None => write!(
                    f,
                    "{grid} grid has {len} elements, shape {}x{} overflows",
                    shape.0, shape.1
                ),
            },
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ChargeFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_failed_chains_source() {
        let err = FieldError::ChargeFailed {
            index: 2,
            reason: EvalError::Singular {
                point: DVec2::new(1.0, 0.0),
                retarded: DVec2::new(1.0, 0.0),
            },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("charge 2 failed"), "got: {msg}");
        assert!(msg.contains("singular"));
        assert!(err.source().is_some());
    }

    #[test]
    fn shape_mismatch_reports_expected_len() {
        let err = FieldError::ShapeMismatch {
            shape: (3, 4),
            grid: "divergence",
            len: 11,
        };
        assert_eq!(
            err.to_string(),
            "divergence grid has 11 elements, expected 3x4 = 12"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn non_finite_trajectory_display() {
        let err = EvalError::NonFiniteTrajectory {
            time: 0.5,
            position: DVec2::new(f64::NAN, 0.0),
        };
        assert!(err.to_string().contains("t=0.5"));
    }
}

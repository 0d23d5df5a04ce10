//! One-dimensional coordinate sequences.

use crate::error::SpaceError;
use serde::{Deserialize, Serialize};

/// Serializable description of an axis: `lower`, `upper`, `step`.
///
/// This is the configuration form; [`Axis::from_spec`] validates it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// First coordinate (inclusive).
    pub lower: f64,
    /// Upper bound (exclusive).
    pub upper: f64,
    /// Spacing between consecutive coordinates.
    pub step: f64,
}

/// An evenly spaced, ordered sequence of real coordinates.
///
/// Coordinates are `lower + k * step` for `k` in
/// `0..ceil((upper - lower) / step)`, so `upper` itself is excluded.
/// The sequence is fixed at construction and never empty.
///
/// # Examples
///
/// ```
/// use quiver_space::Axis;
///
/// let axis = Axis::new(-5.0, 5.0, 0.5).unwrap();
/// assert_eq!(axis.len(), 20);
/// assert_eq!(axis.coord(0), Some(-5.0));
/// assert_eq!(axis.coord(19), Some(4.5));
/// assert_eq!(axis.coord(20), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    lower: f64,
    upper: f64,
    step: f64,
    len: usize,
}

impl Axis {
    /// Maximum number of coordinates on one axis.
    pub const MAX_LEN: usize = 1 << 20;

    /// Create an axis from bounds and step.
    ///
    /// Returns `Err(SpaceError::InvalidAxis)` for non-finite bounds or a
    /// non-positive step, `Err(SpaceError::EmptyAxis)` when `upper <= lower`,
    /// and `Err(SpaceError::DimensionTooLarge)` past [`Axis::MAX_LEN`].
    pub fn new(lower: f64, upper: f64, step: f64) -> Result<Self, SpaceError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(SpaceError::InvalidAxis {
                reason: format!("bounds must be finite, got [{lower}, {upper})"),
            });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(SpaceError::InvalidAxis {
                reason: format!("step must be finite and positive, got {step}"),
            });
        }
        if upper <= lower {
            return Err(SpaceError::EmptyAxis { lower, upper });
        }
        let count = ((upper - lower) / step).ceil();
        if !count.is_finite() || count > Self::MAX_LEN as f64 {
            return Err(SpaceError::DimensionTooLarge {
                name: "axis length",
                value: if count.is_finite() {
                    count as usize
                } else {
                    usize::MAX
                },
                max: Self::MAX_LEN,
            });
        }
        let len = count as usize;
        if len == 0 {
            return Err(SpaceError::EmptyAxis { lower, upper });
        }
        Ok(Self {
            lower,
            upper,
            step,
            len,
        })
    }

    /// Validate and build an axis from its configuration form.
    pub fn from_spec(spec: &AxisSpec) -> Result<Self, SpaceError> {
        Self::new(spec.lower, spec.upper, spec.step)
    }

    /// The configuration form of this axis.
    pub fn spec(&self) -> AxisSpec {
        AxisSpec {
            lower: self.lower,
            upper: self.upper,
            step: self.step,
        }
    }

    /// Number of coordinates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always returns `false`; construction rejects empty axes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First coordinate.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Exclusive upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Coordinate spacing.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The `k`-th coordinate, or `None` past the end.
    pub fn coord(&self, k: usize) -> Option<f64> {
        (k < self.len).then(|| self.coord_unchecked(k))
    }

    #[inline]
    pub(crate) fn coord_unchecked(&self, k: usize) -> f64 {
        self.lower + k as f64 * self.step
    }

    /// Iterate over the coordinates in ascending order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.len).map(move |k| self.coord_unchecked(k))
    }

    /// All coordinates collected into a vector.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn arange_semantics_exclude_upper() {
        let axis = Axis::new(0.0, 1.0, 0.25).unwrap();
        assert_eq!(axis.to_vec(), vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn partial_last_step_is_included() {
        // ceil(1.0 / 0.3) = 4: 0.0, 0.3, 0.6, 0.9
        let axis = Axis::new(0.0, 1.0, 0.3).unwrap();
        assert_eq!(axis.len(), 4);
        assert_relative_eq!(axis.coord(3).unwrap(), 0.9, epsilon = 1e-12);
    }

    #[test]
    fn offset_grid_avoids_integers() {
        let axis = Axis::new(-5.25, 5.25, 0.5).unwrap();
        assert_eq!(axis.len(), 21);
        assert!(axis.iter().all(|x| x.fract() != 0.0));
    }

    #[test]
    fn rejects_empty_range() {
        assert_eq!(
            Axis::new(1.0, 1.0, 0.1),
            Err(SpaceError::EmptyAxis {
                lower: 1.0,
                upper: 1.0
            })
        );
        assert!(matches!(
            Axis::new(2.0, 1.0, 0.1),
            Err(SpaceError::EmptyAxis { .. })
        ));
    }

    #[test]
    fn rejects_bad_step() {
        for step in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            match Axis::new(0.0, 1.0, step) {
                Err(SpaceError::InvalidAxis { reason }) => assert!(reason.contains("step")),
                other => panic!("expected InvalidAxis for step {step}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(matches!(
            Axis::new(f64::NEG_INFINITY, 1.0, 0.1),
            Err(SpaceError::InvalidAxis { .. })
        ));
    }

    #[test]
    fn rejects_too_many_points() {
        match Axis::new(0.0, 1.0, 1e-9) {
            Err(SpaceError::DimensionTooLarge { max, .. }) => assert_eq!(max, Axis::MAX_LEN),
            other => panic!("expected DimensionTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn spec_round_trips_through_from_spec() {
        let axis = Axis::new(-2.0, 3.0, 0.5).unwrap();
        assert_eq!(Axis::from_spec(&axis.spec()).unwrap(), axis);
    }

    proptest! {
        #[test]
        fn coords_are_ascending_and_below_upper(
            lower in -100.0f64..100.0,
            width in 0.01f64..50.0,
            step in 0.01f64..5.0,
        ) {
            let axis = Axis::new(lower, lower + width, step).unwrap();
            let coords = axis.to_vec();
            prop_assert_eq!(coords.len(), axis.len());
            prop_assert!(!coords.is_empty());
            prop_assert_eq!(coords[0], lower);
            for w in coords.windows(2) {
                prop_assert!(w[1] > w[0]);
            }
            // Last coordinate stays within one step of the exclusive bound.
            prop_assert!(*coords.last().unwrap() < lower + width + step * 1e-9);
        }
    }
}

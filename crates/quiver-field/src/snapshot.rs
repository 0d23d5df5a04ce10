//! Immutable per-time-step field grids.

use glam::{DVec2, DVec3};
use quiver_core::FieldError;

/// The field, divergence, and curl over a grid at one instant.
///
/// All three grids share the canonical layout of the grid they were
/// sampled on: flat index `i * |ys| + j` for point `(i, j)`. The curl is
/// stored as a 3-vector whose in-plane components are always zero.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSnapshot {
    timestamp: f64,
    shape: (usize, usize),
    field: Vec<DVec2>,
    divergence: Vec<f64>,
    curl: Vec<DVec3>,
}

impl FieldSnapshot {
    /// Assemble a snapshot, checking that every grid matches `shape`.
    pub fn new(
        timestamp: f64,
        shape: (usize, usize),
        field: Vec<DVec2>,
        divergence: Vec<f64>,
        curl: Vec<DVec3>,
    ) -> Result<Self, FieldError> {
        let Some(expected) = shape.0.checked_mul(shape.1) else {
            return Err(FieldError::ShapeMismatch {
                shape,
                grid: "field",
                len: field.len(),
            });
        };
        for (grid, len) in [
            ("field", field.len()),
            ("divergence", divergence.len()),
            ("curl", curl.len()),
        ] {
            if len != expected {
                return Err(FieldError::ShapeMismatch { shape, grid, len });
            }
        }
        Ok(Self {
            timestamp,
            shape,
            field,
            divergence,
            curl,
        })
    }

    /// The time this snapshot was evaluated at.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// `(|xs|, |ys|)`.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.field.len()
    }

    /// `true` if the grid has no points.
    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    fn index(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.shape.0 && j < self.shape.1).then_some(i * self.shape.1 + j)
    }

    /// Field vector at point `(i, j)`.
    pub fn field(&self, i: usize, j: usize) -> Option<DVec2> {
        self.index(i, j).map(|k| self.field[k])
    }

    /// Divergence at point `(i, j)`.
    pub fn divergence(&self, i: usize, j: usize) -> Option<f64> {
        self.index(i, j).map(|k| self.divergence[k])
    }

    /// Curl at point `(i, j)`.
    pub fn curl(&self, i: usize, j: usize) -> Option<DVec3> {
        self.index(i, j).map(|k| self.curl[k])
    }

    /// The z-component of the curl at point `(i, j)`.
    pub fn curl_z(&self, i: usize, j: usize) -> Option<f64> {
        self.curl(i, j).map(|c| c.z)
    }

    /// The flat field grid.
    pub fn field_grid(&self) -> &[DVec2] {
        &self.field
    }

    /// The flat divergence grid.
    pub fn divergence_grid(&self) -> &[f64] {
        &self.divergence
    }

    /// The flat curl grid.
    pub fn curl_grid(&self) -> &[DVec3] {
        &self.curl
    }

    /// `(i, j, field, divergence, curl_z)` in canonical order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, usize, DVec2, f64, f64)> + '_ {
        let ny = self.shape.1;
        self.field
            .iter()
            .zip(&self.divergence)
            .zip(&self.curl)
            .enumerate()
            .map(move |(k, ((f, d), c))| (k / ny, k % ny, *f, *d, c.z))
    }

    /// Largest field magnitude on the grid, or `0.0` for an empty grid.
    pub fn max_field_magnitude(&self) -> f64 {
        self.field.iter().map(|f| f.length()).fold(0.0, f64::max)
    }

    /// Separate x and y component arrays, as quiver-plot renderers take them.
    pub fn components(&self) -> (Vec<f64>, Vec<f64>) {
        self.field.iter().map(|f| (f.x, f.y)).unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldSnapshot {
        let field = (0..6).map(|k| DVec2::new(k as f64, -(k as f64))).collect();
        let divergence = (0..6).map(|k| k as f64 * 0.5).collect();
        let curl = (0..6).map(|k| DVec3::new(0.0, 0.0, k as f64)).collect();
        FieldSnapshot::new(1.5, (2, 3), field, divergence, curl).unwrap()
    }

    #[test]
    fn accessors_follow_canonical_layout() {
        let s = sample();
        assert_eq!(s.timestamp(), 1.5);
        assert_eq!(s.shape(), (2, 3));
        assert_eq!(s.len(), 6);
        // (1, 2) is flat index 1 * 3 + 2 = 5
        assert_eq!(s.field(1, 2), Some(DVec2::new(5.0, -5.0)));
        assert_eq!(s.divergence(1, 2), Some(2.5));
        assert_eq!(s.curl_z(1, 2), Some(5.0));
        assert_eq!(s.curl(0, 1), Some(DVec3::new(0.0, 0.0, 1.0)));
        assert_eq!(s.field(2, 0), None);
        assert_eq!(s.divergence(0, 3), None);
    }

    #[test]
    fn iter_yields_indices_in_order() {
        let s = sample();
        let indices: Vec<_> = s.iter().map(|(i, j, ..)| (i, j)).collect();
        assert_eq!(indices, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        let (_, _, f, d, c) = s.iter().nth(4).unwrap();
        assert_eq!((f, d, c), (DVec2::new(4.0, -4.0), 2.0, 4.0));
    }

    #[test]
    fn mismatched_grid_rejected() {
        let err = FieldSnapshot::new(
            0.0,
            (2, 2),
            vec![DVec2::ZERO; 4],
            vec![0.0; 4],
            vec![DVec3::ZERO; 3],
        )
        .unwrap_err();
        assert_eq!(
            err,
            FieldError::ShapeMismatch {
                shape: (2, 2),
                grid: "curl",
                len: 3
            }
        );
    }

    #[test]
    fn overflowing_shape_rejected() {
        let shape = (usize::MAX, 2);
        let err = FieldSnapshot::new(0.0, shape, Vec::new(), Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(
            err,
            FieldError::ShapeMismatch {
                shape,
                grid: "field",
                len: 0
            }
        );
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn summary_helpers() {
        let s = sample();
        assert!((s.max_field_magnitude() - 5.0 * 2f64.sqrt()).abs() < 1e-12);
        let (u, v) = s.components();
        assert_eq!(u, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(v, vec![0.0, -1.0, -2.0, -3.0, -4.0, -5.0]);
    }
}

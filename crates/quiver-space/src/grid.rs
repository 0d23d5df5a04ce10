//! The 2D sampling grid: Cartesian product of two axes.

use crate::axis::Axis;
use crate::error::SpaceError;
use glam::DVec2;

/// One sample point of a [`Grid2D`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPoint {
    /// Index along the x axis.
    pub i: usize,
    /// Index along the y axis.
    pub j: usize,
    /// Physical position `(xs[i], ys[j])`.
    pub position: DVec2,
}

/// A fixed set of evaluation points `xs × ys`.
///
/// # Canonical ordering
///
/// Points are visited x-major: the outer loop runs over `xs`, the inner
/// loop over `ys`. Flat index `k` of point `(i, j)` is `i * |ys| + j`.
/// Every snapshot grid is laid out in this order, so index `k` refers to
/// the same physical location across field, divergence, and curl.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid2D {
    xs: Axis,
    ys: Axis,
}

impl Grid2D {
    /// Maximum number of points in one grid.
    pub const MAX_POINTS: usize = 1 << 26;

    /// Build a grid from two axes.
    pub fn new(xs: Axis, ys: Axis) -> Result<Self, SpaceError> {
        let count = xs.len().checked_mul(ys.len()).unwrap_or(usize::MAX);
        if count > Self::MAX_POINTS {
            return Err(SpaceError::DimensionTooLarge {
                name: "point count",
                value: count,
                max: Self::MAX_POINTS,
            });
        }
        Ok(Self { xs, ys })
    }

    /// Square grid using the same bounds and step on both axes.
    pub fn square(lower: f64, upper: f64, step: f64) -> Result<Self, SpaceError> {
        let axis = Axis::new(lower, upper, step)?;
        Self::new(axis.clone(), axis)
    }

    /// The x axis.
    pub fn xs(&self) -> &Axis {
        &self.xs
    }

    /// The y axis.
    pub fn ys(&self) -> &Axis {
        &self.ys
    }

    /// `(|xs|, |ys|)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.xs.len(), self.ys.len())
    }

    /// Total number of sample points.
    pub fn point_count(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    fn check_bounds(&self, i: usize, j: usize) -> Result<(), SpaceError> {
        if i >= self.xs.len() || j >= self.ys.len() {
            return Err(SpaceError::IndexOutOfBounds {
                index: (i, j),
                shape: self.shape(),
            });
        }
        Ok(())
    }

    /// Flat canonical index of point `(i, j)`.
    pub fn flat_index(&self, i: usize, j: usize) -> Result<usize, SpaceError> {
        self.check_bounds(i, j)?;
        Ok(i * self.ys.len() + j)
    }

    /// Inverse of [`flat_index`](Self::flat_index).
    pub fn unflatten(&self, k: usize) -> Result<(usize, usize), SpaceError> {
        let ny = self.ys.len();
        let (i, j) = (k / ny, k % ny);
        self.check_bounds(i, j)?;
        Ok((i, j))
    }

    /// Physical position of point `(i, j)`.
    pub fn point(&self, i: usize, j: usize) -> Result<DVec2, SpaceError> {
        self.check_bounds(i, j)?;
        Ok(DVec2::new(
            self.xs.coord_unchecked(i),
            self.ys.coord_unchecked(j),
        ))
    }

    /// Iterate over all points in canonical order.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            next: 0,
        }
    }

    /// All `(i, j)` indices in canonical order.
    pub fn canonical_ordering(&self) -> Vec<(usize, usize)> {
        self.iter().map(|p| (p.i, p.j)).collect()
    }

    /// Flat x and y coordinate arrays in canonical order, as a plotting
    /// library's meshgrid would produce them.
    pub fn meshgrid(&self) -> (Vec<f64>, Vec<f64>) {
        self.iter()
            .map(|p| (p.position.x, p.position.y))
            .unzip()
    }
}

/// Canonical-order iterator over a [`Grid2D`].
pub struct GridIter<'a> {
    grid: &'a Grid2D,
    next: usize,
}

impl Iterator for GridIter<'_> {
    type Item = GridPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.grid.point_count() {
            return None;
        }
        let ny = self.grid.ys.len();
        let (i, j) = (self.next / ny, self.next % ny);
        self.next += 1;
        Some(GridPoint {
            i,
            j,
            position: DVec2::new(
                self.grid.xs.coord_unchecked(i),
                self.grid.ys.coord_unchecked(j),
            ),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.point_count() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter<'_> {}

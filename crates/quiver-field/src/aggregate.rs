//! Superposition of every charge's contribution over a grid.

use crate::charge::ChargeSource;
use crate::retarded::{Contribution, RetardedFieldEvaluator};
use crate::snapshot::FieldSnapshot;
use glam::{DVec2, DVec3};
use quiver_core::FieldError;
use quiver_space::Grid2D;

/// Builds a [`FieldSnapshot`] by summing the evaluator's contributions
/// from every source at every grid point.
///
/// Points are visited in the grid's canonical order and sources are
/// summed in list order, so identical inputs give bit-identical
/// snapshots. The first evaluator fault aborts the snapshot; nothing is
/// returned for the partially filled grid.
#[derive(Clone, Debug)]
pub struct FieldAggregator {
    grid: Grid2D,
    evaluator: RetardedFieldEvaluator,
}

impl FieldAggregator {
    /// Pair a grid with an evaluator.
    pub fn new(grid: Grid2D, evaluator: RetardedFieldEvaluator) -> Self {
        Self { grid, evaluator }
    }

    /// The sampling grid.
    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    /// The per-charge evaluator.
    pub fn evaluator(&self) -> &RetardedFieldEvaluator {
        &self.evaluator
    }

    /// Total contribution of `sources` at a single point.
    pub fn contribution_at(
        &self,
        point: DVec2,
        t: f64,
        sources: &[ChargeSource],
    ) -> Result<Contribution, FieldError> {
        let mut total = Contribution::ZERO;
        for (index, source) in sources.iter().enumerate() {
            total += self
                .evaluator
                .evaluate(point, t, source)
                .map_err(|reason| FieldError::ChargeFailed { index, reason })?;
        }
        Ok(total)
    }

    /// Evaluate field, divergence, and curl over the whole grid at `t`.
    ///
    /// An empty source list yields an all-zero snapshot.
    ///
    /// # Errors
    ///
    /// - [`FieldError::InvalidTime`] if `t` is NaN or infinite.
    /// - [`FieldError::ChargeFailed`] naming the first source whose
    ///   evaluation failed.
    pub fn generate(&self, t: f64, sources: &[ChargeSource]) -> Result<FieldSnapshot, FieldError> {
        if !t.is_finite() {
            return Err(FieldError::InvalidTime { value: t });
        }
        tracing::trace!(t, charges = sources.len(), points = self.grid.point_count(), "generating snapshot");

        let n = self.grid.point_count();
        let mut field = Vec::with_capacity(n);
        let mut divergence = Vec::with_capacity(n);
        let mut curl = Vec::with_capacity(n);
        for point in self.grid.iter() {
            let total = self.contribution_at(point.position, t, sources)?;
            field.push(total.field);
            divergence.push(total.divergence);
            curl.push(DVec3::new(0.0, 0.0, total.curl_z));
        }
        FieldSnapshot::new(t, self.grid.shape(), field, divergence, curl)
    }
}

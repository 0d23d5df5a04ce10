//! Per-frame performance metrics for the animation driver.
//!
//! [`StepMetrics`] captures timing and summary data for a single frame,
//! enabling logging, profiling, and determinism checks.

/// Timing and summary metrics collected during a single frame.
///
/// All durations are in microseconds. The driver fills in
/// `generate_us` when the snapshot is computed and `present_us` after
/// the sink accepts it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole frame, in microseconds.
    pub total_us: u64,
    /// Time spent generating the snapshot, in microseconds.
    pub generate_us: u64,
    /// Time spent in the sink, in microseconds.
    pub present_us: u64,
    /// Number of grid points evaluated.
    pub point_count: usize,
    /// Number of charges summed at each point.
    pub charge_count: usize,
    /// Largest field magnitude on the grid.
    pub max_field_magnitude: f64,
    /// Digest of the snapshot.
    pub digest: u64,
}

impl StepMetrics {
    /// Point-charge evaluations per second of generation time.
    ///
    /// Returns `None` if generation took less than a microsecond.
    pub fn evaluations_per_second(&self) -> Option<f64> {
        (self.generate_us > 0).then(|| {
            (self.point_count * self.charge_count) as f64 / (self.generate_us as f64 * 1e-6)
        })
    }
}

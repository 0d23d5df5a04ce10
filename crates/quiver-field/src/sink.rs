//! The renderer boundary: where finished snapshots go.
//!
//! Rendering, colormaps, and window management live outside this
//! workspace. A [`SnapshotSink`] receives each completed snapshot with
//! the charge positions for that frame and either accepts it or fails.

use crate::digest::snapshot_digest;
use crate::snapshot::FieldSnapshot;
use glam::DVec2;
use quiver_core::StepId;
use std::error::Error;
use std::fmt;

/// A charge's on-screen marker for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ChargeMarker {
    /// Scene name of the charge.
    pub name: String,
    /// Position at the frame time.
    pub position: DVec2,
    /// Signed charge, for choosing a marker color.
    pub charge: f64,
}

/// A sink refused or failed to present a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkError {
    /// What went wrong.
    pub reason: String,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink failed: {}", self.reason)
    }
}

impl Error for SinkError {}

/// Consumer of completed snapshots.
///
/// Called once per frame, strictly after the snapshot is fully computed.
/// A sink never sees a partial snapshot.
pub trait SnapshotSink {
    /// Present one frame.
    fn present(
        &mut self,
        step: StepId,
        snapshot: &FieldSnapshot,
        markers: &[ChargeMarker],
    ) -> Result<(), SinkError>;
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for &mut S {
    fn present(
        &mut self,
        step: StepId,
        snapshot: &FieldSnapshot,
        markers: &[ChargeMarker],
    ) -> Result<(), SinkError> {
        (**self).present(step, snapshot, markers)
    }
}

/// Discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn present(&mut self, _: StepId, _: &FieldSnapshot, _: &[ChargeMarker]) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Per-frame statistics recorded by [`SummarySink`].
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSummary {
    /// Frame index.
    pub step: StepId,
    /// Snapshot time.
    pub timestamp: f64,
    /// Largest field magnitude on the grid.
    pub max_field_magnitude: f64,
    /// Largest absolute divergence on the grid.
    pub max_abs_divergence: f64,
    /// Largest absolute curl-z on the grid.
    pub max_abs_curl: f64,
    /// [`snapshot_digest`] of the frame.
    pub digest: u64,
}

/// Headless sink: records a [`FrameSummary`] per frame and logs it.
#[derive(Clone, Debug, Default)]
pub struct SummarySink {
    frames: Vec<FrameSummary>,
}

impl SummarySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Summaries of every frame presented so far.
    pub fn frames(&self) -> &[FrameSummary] {
        &self.frames
    }
}

impl SnapshotSink for SummarySink {
    fn present(
        &mut self,
        step: StepId,
        snapshot: &FieldSnapshot,
        markers: &[ChargeMarker],
    ) -> Result<(), SinkError> {
        let summary = FrameSummary {
            step,
            timestamp: snapshot.timestamp(),
            max_field_magnitude: snapshot.max_field_magnitude(),
            max_abs_divergence: abs_max(snapshot.divergence_grid().iter().copied()),
            max_abs_curl: abs_max(snapshot.curl_grid().iter().map(|c| c.z)),
            digest: snapshot_digest(snapshot),
        };
        tracing::info!(
            step = %summary.step,
            t = summary.timestamp,
            charges = markers.len(),
            max_field = summary.max_field_magnitude,
            max_div = summary.max_abs_divergence,
            max_curl = summary.max_abs_curl,
            digest = format_args!("{:016x}", summary.digest),
            "frame"
        );
        self.frames.push(summary);
        Ok(())
    }
}

fn abs_max(values: impl Iterator<Item = f64>) -> f64 {
    values.map(f64::abs).fold(0.0, f64::max)
}

//! Test utilities and mock types for Quiver development.
//!
//! Provides mock [`SnapshotSink`] implementations ([`RecordingSink`],
//! [`FailingSink`]) and, in [`fixtures`], standard charge scenes and
//! unit-constant evaluators for scenario tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;

use quiver_core::StepId;
use quiver_field::{ChargeMarker, FieldSnapshot, SinkError, SnapshotSink};

/// One frame as seen by a [`RecordingSink`].
#[derive(Clone, Debug)]
pub struct RecordedFrame {
    pub step: StepId,
    pub snapshot: FieldSnapshot,
    pub markers: Vec<ChargeMarker>,
}

/// Mock sink that keeps a copy of every presented frame.
///
/// Inspect with [`frames`](RecordingSink::frames) after driving an
/// animation.
#[derive(Default)]
pub struct RecordingSink {
    frames: Vec<RecordedFrame>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every frame presented so far, in order.
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    /// Steps of every frame presented so far.
    pub fn steps(&self) -> Vec<StepId> {
        self.frames.iter().map(|f| f.step).collect()
    }
}

impl SnapshotSink for RecordingSink {
    fn present(
        &mut self,
        step: StepId,
        snapshot: &FieldSnapshot,
        markers: &[ChargeMarker],
    ) -> Result<(), SinkError> {
        self.frames.push(RecordedFrame {
            step,
            snapshot: snapshot.clone(),
            markers: markers.to_vec(),
        });
        Ok(())
    }
}

/// Mock sink that accepts `succeed_count` frames, then fails every call.
pub struct FailingSink {
    succeed_count: usize,
    presented: usize,
}

impl FailingSink {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            presented: 0,
        }
    }

    /// Number of `present` calls so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.presented
    }
}

impl SnapshotSink for FailingSink {
    fn present(
        &mut self,
        step: StepId,
        _snapshot: &FieldSnapshot,
        _markers: &[ChargeMarker],
    ) -> Result<(), SinkError> {
        self.presented += 1;
        if self.presented > self.succeed_count {
            return Err(SinkError {
                reason: format!("FailingSink: refused frame {step}"),
            });
        }
        Ok(())
    }
}

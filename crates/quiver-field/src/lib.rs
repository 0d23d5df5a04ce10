//! Retarded electric field evaluation for Quiver.
//!
//! The pipeline for one time step:
//!
//! 1. [`RetardedFieldEvaluator`] computes one charge's field, divergence,
//!    and curl-z at one point, seeing the charge at its retarded position.
//! 2. [`FieldAggregator`] sums every charge over a [`quiver_space::Grid2D`]
//!    into an immutable [`FieldSnapshot`].
//! 3. A [`SnapshotSink`] receives the finished snapshot.
//!
//! Charges ride any [`quiver_core::Trajectory`]; the [`trajectory`] module
//! supplies the common ones.
//!
//! ```
//! use glam::DVec2;
//! use quiver_field::{ChargeSource, FieldAggregator, RetardedFieldEvaluator, Stationary};
//! use quiver_space::Grid2D;
//!
//! let grid = Grid2D::square(-1.25, 1.25, 0.5).unwrap();
//! let evaluator = RetardedFieldEvaluator::builder().build().unwrap();
//! let aggregator = FieldAggregator::new(grid, evaluator);
//!
//! let q = ChargeSource::new(1e-9, Stationary { position: DVec2::ZERO });
//! let snapshot = aggregator.generate(0.0, &[q]).unwrap();
//! assert_eq!(snapshot.shape(), (5, 5));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod charge;
pub mod digest;
pub mod nabla;
pub mod retarded;
pub mod sink;
pub mod snapshot;
pub mod trajectory;

pub use aggregate::FieldAggregator;
pub use charge::ChargeSource;
pub use digest::snapshot_digest;
pub use nabla::Nabla;
pub use retarded::{
    Contribution, DerivativeMode, RetardedFieldEvaluator, RetardedFieldEvaluatorBuilder,
    RetardedGeometry, SingularityPolicy,
};
pub use sink::{ChargeMarker, FrameSummary, NullSink, SinkError, SnapshotSink, SummarySink};
pub use snapshot::FieldSnapshot;
pub use trajectory::{
    CircularOrbit, LinearMotion, Oscillation, Stationary, TrajectorySpec, Waypoints,
};

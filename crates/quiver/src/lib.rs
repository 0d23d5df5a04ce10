//! Quiver: animated retarded electric fields of moving point charges.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Quiver sub-crates. For most users, adding `quiver` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use quiver::prelude::*;
//!
//! // The built-in scene: a +1/-1 pair orbiting the origin at radius 2.
//! let mut config = SimulationConfig::default();
//! config.time.steps = 4;
//!
//! let mut animation = FieldAnimation::new(&config).unwrap();
//! let frame = animation.step().unwrap().unwrap();
//! assert_eq!(frame.step, StepId(0));
//! assert_eq!(frame.snapshot.shape(), (21, 21));
//! assert_eq!(frame.markers.len(), 2);
//!
//! let mut sink = SummarySink::new();
//! let summary = animation.run(&mut sink).unwrap();
//! assert_eq!(summary.frames, 3);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `quiver-core` | Constants, step IDs, error types, the trajectory trait |
//! | [`space`] | `quiver-space` | Sampling axes and the 2D grid |
//! | [`field`] | `quiver-field` | Retarded evaluator, aggregator, snapshots, sinks |
//! | [`engine`] | `quiver-engine` | Configuration and the animation driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`quiver-core`).
///
/// Contains [`types::PhysicalConstants`], [`types::CoulombConvention`],
/// the error types, and the [`types::Trajectory`] trait.
pub use quiver_core as types;

/// Sampling axes and grids (`quiver-space`).
///
/// [`space::Grid2D`] fixes the row-major ordering every snapshot uses.
pub use quiver_space as space;

/// Field evaluation and aggregation (`quiver-field`).
///
/// [`field::RetardedFieldEvaluator`] for one charge at one point,
/// [`field::FieldAggregator`] for a whole grid.
pub use quiver_field as field;

/// Configuration and the animation driver (`quiver-engine`).
pub use quiver_engine as engine;

/// Common imports for typical Quiver usage.
///
/// ```rust
/// use quiver::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use quiver_core::{CoulombConvention, PhysicalConstants, StepId, Trajectory};

    // Errors
    pub use quiver_core::{EvalError, FieldError};

    // Space
    pub use quiver_space::{Axis, Grid2D};

    // Field
    pub use quiver_field::{
        ChargeMarker, ChargeSource, CircularOrbit, DerivativeMode, FieldAggregator,
        FieldSnapshot, LinearMotion, NullSink, Oscillation, RetardedFieldEvaluator,
        SingularityPolicy, SnapshotSink, Stationary, SummarySink, TrajectorySpec, Waypoints,
    };

    // Engine
    pub use quiver_engine::{
        AnimationError, ConfigError, FieldAnimation, Frame, SimulationConfig, StepMetrics,
    };
}

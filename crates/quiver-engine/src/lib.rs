//! Animation driver for Quiver retarded-field renders.
//!
//! Turns a [`SimulationConfig`] into a [`FieldAnimation`] that generates
//! one [`quiver_field::FieldSnapshot`] per frame and hands it to a
//! [`quiver_field::SnapshotSink`]. Configuration loads from TOML; charges
//! are collected into a named [`Scene`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod metrics;
pub mod scene;

pub use animation::{AnimationError, FieldAnimation, Frame, RunSummary};
pub use config::{ChargeConfig, ConfigError, GridConfig, SimulationConfig, TimeConfig};
pub use metrics::StepMetrics;
pub use scene::Scene;

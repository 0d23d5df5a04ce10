//! Core types and traits for the Quiver field simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Quiver workspace:
//! step IDs, physical constants, error types, and the [`Trajectory`]
//! trait through which charge motion is supplied.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod error;
pub mod id;
pub mod traits;

pub use constants::{ConstantsError, CoulombConvention, PhysicalConstants};
pub use error::{EvalError, FieldError};
pub use id::StepId;
pub use traits::Trajectory;

//! Sampling grids for Quiver simulations.
//!
//! A [`Grid2D`] is the Cartesian product of two [`Axis`] coordinate
//! sequences. It fixes the set of evaluation points for a whole run and
//! defines the canonical point ordering every field snapshot uses:
//! outer loop over x, inner loop over y.
//!
//! # Example
//!
//! ```
//! use quiver_space::{Axis, Grid2D};
//!
//! let xs = Axis::new(-1.0, 1.0, 0.5).unwrap();
//! let ys = Axis::new(0.0, 1.0, 0.5).unwrap();
//! let grid = Grid2D::new(xs, ys).unwrap();
//! assert_eq!(grid.shape(), (4, 2));
//! assert_eq!(grid.flat_index(1, 1).unwrap(), 3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod error;
pub mod grid;

pub use axis::{Axis, AxisSpec};
pub use error::SpaceError;
pub use grid::{Grid2D, GridIter, GridPoint};

//! Small dense solvers backing the flows.
//!
//! - [`linear`] solves augmented systems by Gaussian elimination.
//! - [`planes`] intersects three or more planes at a point.

pub mod linear;
pub mod planes;

pub use linear::solve_augmented;
pub use planes::{intersection, intersection_with_tolerance};

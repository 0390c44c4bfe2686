//! Arc cost and capacity evaluation.
//!
//! - [`Transit`] — direct cost lookup pre-bound to a validated matrix
//! - [`CapacityTracker`] — cumulative load along a route prefix

mod capacity;
mod transit;

pub use capacity::{CapacityTracker, Infeasible};
pub use transit::Transit;

//! Reporting structures for solved instances.
//!
//! [`extract`] turns an internal [`Solution`](crate::models::Solution) into
//! the serializable [`SolveReport`] handed back to callers.

mod extract;

pub use extract::{extract, RouteReport, SolveReport, SolveStatus, Stop};

//! Domain model types for capacitated vehicle routing.
//!
//! Provides the validated problem instance, vehicles with capacity limits,
//! routes as ordered sequences of stops, and solutions with their
//! invariant checks.

mod instance;
mod route;
mod solution;
mod vehicle;

pub use instance::Instance;
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::Vehicle;

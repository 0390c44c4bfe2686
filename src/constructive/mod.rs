//! Constructive heuristics for building initial CVRP solutions.
//!
//! - [`cheapest_arc`] — Path-cheapest-arc across the whole fleet, O(n²m)

mod cheapest_arc;

pub use cheapest_arc::cheapest_arc;

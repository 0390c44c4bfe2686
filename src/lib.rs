//! # cvrp-gls
//!
//! Capacitated vehicle routing engine: validates an instance, builds an
//! initial solution with the path-cheapest-arc heuristic and improves it
//! with guided local search under a time budget.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Instance, Vehicle, Route, Solution)
//! - [`distance`] — Cost matrix
//! - [`evaluation`] — Transit cost lookup and capacity tracking
//! - [`constructive`] — Cheapest-arc construction heuristic
//! - [`local_search`] — Local search operators (2-opt, Relocate, Exchange, Or-opt)
//! - [`gls`] — Guided local search and termination criteria
//! - [`report`] — Solution extraction into the output format
//! - [`solver`] — End-to-end `solve` entry points
//!
//! ## Example
//!
//! ```
//! use cvrp_gls::{solve_request, SolveRequest};
//!
//! let request = SolveRequest {
//!     distance_matrix: vec![
//!         vec![0.0, 4.0, 5.0],
//!         vec![4.0, 0.0, 2.0],
//!         vec![5.0, 2.0, 0.0],
//!     ],
//!     demands: vec![0, 3, 4],
//!     vehicle_capacities: vec![10],
//!     num_vehicles: 1,
//!     depot: 0,
//!     time_limit: Some(0.05),
//! };
//!
//! let report = solve_request(&request).unwrap();
//! assert!(report.is_success());
//! assert_eq!(report.total_distance, 11.0);
//! assert_eq!(report.total_load, 7);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod gls;
pub mod local_search;
pub mod models;
pub mod report;
pub mod solver;

pub use error::{Error, InvalidInstance, Result};
pub use models::{Instance, Solution};
pub use report::{SolveReport, SolveStatus};
pub use solver::{solve, solve_batch, solve_json, solve_request, solve_with, SolveRequest, SolverConfig};

//! Travel-cost matrices.
//!
//! Provides a dense, possibly asymmetric cost matrix for routing problems.

mod matrix;

pub use matrix::DistanceMatrix;

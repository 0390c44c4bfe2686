//! Error types for instance validation and solving.

use thiserror::Error as ThisError;

/// Why an instance was rejected before any search started.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum InvalidInstance {
    #[error("distance matrix is empty")]
    EmptyMatrix,
    #[error("distance matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("demand vector has {demands} entries but the matrix has {nodes} nodes")]
    DemandLength { demands: usize, nodes: usize },
    #[error("num_vehicles must be positive, got {num_vehicles}")]
    NoVehicles { num_vehicles: i64 },
    #[error("{num_vehicles} vehicles but only {capacities} capacities")]
    NotEnoughCapacities {
        num_vehicles: usize,
        capacities: usize,
    },
    #[error("depot {depot} is outside [0, {nodes})")]
    DepotOutOfRange { depot: i64, nodes: usize },
    #[error("node {node} has negative demand {demand}")]
    NegativeDemand { node: usize, demand: i64 },
    #[error("vehicle {vehicle} has negative capacity {capacity}")]
    NegativeCapacity { vehicle: usize, capacity: i64 },
    #[error("cost {from} -> {to} is not a finite non-negative number: {cost}")]
    InvalidCost { from: usize, to: usize, cost: f64 },
    #[error("diagonal entry for node {node} must be zero, got {cost}")]
    NonZeroDiagonal { node: usize, cost: f64 },
    #[error("depot {depot} must have zero demand, got {demand}")]
    DepotDemand { depot: usize, demand: i64 },
    #[error("total demand {demand} exceeds total fleet capacity {capacity}")]
    InsufficientCapacity { demand: i128, capacity: i128 },
}

/// Errors surfaced by the engine.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid instance: {0}")]
    InvalidInstance(#[from] InvalidInstance),
    /// Per-vehicle capacities left some nodes unplaceable even though the
    /// aggregate check passed.
    #[error("no feasible construction: {} node(s) could not be routed", .unrouted.len())]
    NoFeasibleConstruction { unrouted: Vec<usize> },
    #[error("time limit must be a finite non-negative number of seconds, got {0}")]
    InvalidTimeLimit(f64),
    #[error("node {node} has no location (only {locations} provided)")]
    LocationOutOfRange { node: usize, locations: usize },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

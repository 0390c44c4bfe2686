//! Vehicle type with its load capacity.

/// A vehicle of the fleet.
///
/// # Examples
///
/// ```
/// use cvrp_gls::models::Vehicle;
///
/// let v = Vehicle::new(0, 200);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vehicle {
    id: usize,
    capacity: i64,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity.
    pub fn new(id: usize, capacity: i64) -> Self {
        Self { id, capacity }
    }

    /// Vehicle ID (its index in the fleet).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum cumulative load.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }
}

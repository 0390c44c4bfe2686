//! Cumulative load constraint.

use crate::models::Vehicle;

/// A route prefix whose cumulative load overflowed the vehicle capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Infeasible {
    /// Index of the first stop (in the route's stop list) that overflowed.
    pub position: usize,
    /// Cumulative load at that stop, saturated at `i64::MAX`.
    pub load: i64,
    /// Capacity of the vehicle.
    pub capacity: i64,
}

/// Checks cumulative demand along candidate routes.
///
/// # Examples
///
/// ```
/// use cvrp_gls::evaluation::{CapacityTracker, Infeasible};
/// use cvrp_gls::models::Vehicle;
///
/// let demands = [0, 3, 4, 5];
/// let fleet = [Vehicle::new(0, 8)];
/// let tracker = CapacityTracker::new(&demands, &fleet);
///
/// assert_eq!(tracker.feasible_prefix_load(&[1, 2], 0), Ok(vec![3, 7]));
/// assert_eq!(
///     tracker.feasible_prefix_load(&[1, 3, 2], 0),
///     Err(Infeasible { position: 2, load: 12, capacity: 8 }),
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CapacityTracker<'a> {
    demands: &'a [i64],
    vehicles: &'a [Vehicle],
}

impl<'a> CapacityTracker<'a> {
    pub fn new(demands: &'a [i64], vehicles: &'a [Vehicle]) -> Self {
        Self { demands, vehicles }
    }

    /// Walks `route` accumulating demand and returns the running load at
    /// each stop, or the first stop where the load exceeds the capacity
    /// of `vehicle`.
    pub fn feasible_prefix_load(&self, route: &[usize], vehicle: usize) -> Result<Vec<i64>, Infeasible> {
        let capacity = self.vehicles[vehicle].capacity();
        let mut load: i64 = 0;
        let mut loads = Vec::with_capacity(route.len());

        for (position, &node) in route.iter().enumerate() {
            load = match load.checked_add(self.demands[node]) {
                Some(next) if next <= capacity => next,
                next => {
                    return Err(Infeasible {
                        position,
                        load: next.unwrap_or(i64::MAX),
                        capacity,
                    })
                }
            };
            loads.push(load);
        }

        Ok(loads)
    }

    /// Returns `true` if a route carrying `load` in total fits `vehicle`.
    ///
    /// Demands are non-negative, so the total is the largest prefix load
    /// and this agrees with [`CapacityTracker::feasible_prefix_load`].
    #[inline]
    pub fn admits(&self, vehicle: usize, load: i64) -> bool {
        load <= self.vehicles[vehicle].capacity()
    }

    /// Returns `true` if `node` can be appended to a route of `vehicle`
    /// currently carrying `load`.
    #[inline]
    pub fn can_append(&self, vehicle: usize, load: i64, node: usize) -> bool {
        load.checked_add(self.demands[node])
            .is_some_and(|next| self.admits(vehicle, next))
    }

    /// Returns `true` if swapping `out` for `node` keeps a route of
    /// `vehicle` currently carrying `load` within capacity.
    ///
    /// `out` must be a stop of that route, so `load - demand(out)` is
    /// non-negative.
    #[inline]
    pub fn can_replace(&self, vehicle: usize, load: i64, out: usize, node: usize) -> bool {
        self.can_append(vehicle, load - self.demands[out], node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Vec<i64>, Vec<Vehicle>) {
        (vec![0, 10, 20, 15], vec![Vehicle::new(0, 50), Vehicle::new(1, 25)])
    }

    #[test]
    fn test_prefix_loads() {
        let (demands, fleet) = setup();
        let tracker = CapacityTracker::new(&demands, &fleet);
        assert_eq!(tracker.feasible_prefix_load(&[1, 2, 3], 0), Ok(vec![10, 30, 45]));
        assert_eq!(tracker.feasible_prefix_load(&[], 1), Ok(vec![]));
    }

    #[test]
    fn test_overflow_reported_at_first_stop() {
        let (demands, fleet) = setup();
        let tracker = CapacityTracker::new(&demands, &fleet);
        assert_eq!(
            tracker.feasible_prefix_load(&[1, 2, 3], 1),
            Err(Infeasible {
                position: 1,
                load: 30,
                capacity: 25
            })
        );
    }

    #[test]
    fn test_admits_and_append() {
        let (demands, fleet) = setup();
        let tracker = CapacityTracker::new(&demands, &fleet);
        assert!(tracker.admits(1, 25));
        assert!(!tracker.admits(1, 26));
        assert!(tracker.can_append(1, 10, 3));
        assert!(!tracker.can_append(1, 10, 2));
    }

    #[test]
    fn test_can_replace() {
        let (demands, fleet) = setup();
        let tracker = CapacityTracker::new(&demands, &fleet);
        // Route [1] on vehicle 1: 10 - 10 + 20 = 20 <= 25.
        assert!(tracker.can_replace(1, 10, 1, 2));
        // Route [1, 3] on vehicle 1: 25 - 10 + 20 = 35 > 25.
        assert!(!tracker.can_replace(1, 25, 1, 2));
    }

    #[test]
    fn test_huge_loads_never_wrap() {
        let demands = vec![0, i64::MAX, 1];
        let fleet = vec![Vehicle::new(0, i64::MAX)];
        let tracker = CapacityTracker::new(&demands, &fleet);

        assert!(tracker.can_append(0, 0, 1));
        assert!(!tracker.can_append(0, i64::MAX, 2));
        assert!(!tracker.can_append(0, 1, 1));
        assert!(!tracker.can_replace(0, i64::MAX, 2, 1));
        assert_eq!(
            tracker.feasible_prefix_load(&[1, 2], 0),
            Err(Infeasible {
                position: 1,
                load: i64::MAX,
                capacity: i64::MAX
            })
        );
        assert_eq!(tracker.feasible_prefix_load(&[2, 2], 0), Ok(vec![1, 2]));
    }

    #[test]
    fn test_admits_matches_prefix_walk() {
        let (demands, fleet) = setup();
        let tracker = CapacityTracker::new(&demands, &fleet);
        for route in [vec![1], vec![1, 3], vec![2, 3], vec![3, 2, 1]] {
            let load: i64 = route.iter().map(|&n| demands[n]).sum();
            for vehicle in 0..fleet.len() {
                assert_eq!(
                    tracker.admits(vehicle, load),
                    tracker.feasible_prefix_load(&route, vehicle).is_ok()
                );
            }
        }
    }
}

//! Solution and violation types.

use super::{Instance, Route};

/// Relative tolerance when comparing a stored objective with a recomputed one.
const COST_TOLERANCE: f64 = 1e-6;

/// A type of invariant violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// The solution does not hold exactly one route per vehicle, in order.
    FleetMismatch {
        /// Route index in the solution.
        route_index: usize,
        /// Vehicle id stored on that route, if any.
        vehicle_id: Option<usize>,
    },
    /// Cumulative load exceeded the vehicle capacity.
    CapacityExceeded {
        /// Vehicle whose route overflowed.
        vehicle: usize,
        /// First stop (within the route) where the load overflowed.
        position: usize,
        /// Load at that stop.
        load: i64,
        /// Vehicle capacity.
        capacity: i64,
    },
    /// The stored route load does not match the sum of its demands.
    LoadMismatch {
        vehicle: usize,
        stored: i64,
        actual: i64,
    },
    /// A non-depot node is not served by any route.
    MissingNode { node: usize },
    /// A node is visited more than once.
    DuplicateNode { node: usize },
    /// The depot appears as an intermediate stop.
    DepotVisited { vehicle: usize },
    /// A stop references a node outside the instance.
    UnknownNode { vehicle: usize, node: usize },
    /// The stored objective differs from the recomputed raw route costs.
    CostMismatch { stored: f64, actual: f64 },
}

/// An invariant violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete assignment of nodes to vehicle routes.
///
/// Holds exactly one route per vehicle (unused vehicles have empty routes)
/// and the raw objective, i.e. the summed transit cost of all routes.
///
/// # Examples
///
/// ```
/// use cvrp_gls::models::{Instance, Solution};
///
/// let instance = Instance::new(
///     &[
///         vec![0.0, 1.0, 2.0],
///         vec![1.0, 0.0, 1.0],
///         vec![2.0, 1.0, 0.0],
///     ],
///     vec![0, 1, 1],
///     &[1, 1],
///     2,
///     0,
/// )
/// .unwrap();
///
/// let sol = Solution::from_routes(&instance, vec![vec![1], vec![2]]);
/// assert_eq!(sol.num_served(), 2);
/// assert_eq!(sol.cost(), 6.0);
/// assert!(sol.validate(&instance).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    routes: Vec<Route>,
    cost: f64,
}

impl Solution {
    /// Creates a solution with one empty route per vehicle.
    pub fn new(num_vehicles: usize) -> Self {
        Self {
            routes: (0..num_vehicles).map(Route::new).collect(),
            cost: 0.0,
        }
    }

    /// Builds a solution from per-vehicle stop lists, computing loads and
    /// the raw objective. No feasibility check is made; see
    /// [`Solution::validate`].
    ///
    /// # Panics
    ///
    /// Panics if a stop is not a node of `instance`.
    pub fn from_routes(instance: &Instance, stops: Vec<Vec<usize>>) -> Self {
        let routes = stops
            .into_iter()
            .enumerate()
            .map(|(vehicle, nodes)| {
                let mut route = Route::new(vehicle);
                for node in nodes {
                    route.push(node, instance.demand(node));
                }
                route
            })
            .collect();
        let mut solution = Self { routes, cost: 0.0 };
        solution.recompute_cost(instance);
        solution
    }

    /// Returns the routes, indexed by vehicle id.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the route of a vehicle.
    pub fn route(&self, vehicle: usize) -> &Route {
        &self.routes[vehicle]
    }

    pub(crate) fn route_mut(&mut self, vehicle: usize) -> &mut Route {
        &mut self.routes[vehicle]
    }

    /// Mutable access to two distinct routes at once.
    pub(crate) fn route_pair_mut(&mut self, a: usize, b: usize) -> (&mut Route, &mut Route) {
        debug_assert_ne!(a, b);
        if a < b {
            let (left, right) = self.routes.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.routes.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    /// Number of routes (one per vehicle).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of vehicles with at least one stop.
    pub fn num_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Total number of nodes served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Total load across all routes. Widened, since every route may carry
    /// up to `i64::MAX`.
    pub fn total_load(&self) -> i128 {
        self.routes.iter().map(|r| i128::from(r.load())).sum()
    }

    /// Raw objective: summed transit cost of all routes.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub(crate) fn add_cost(&mut self, delta: f64) {
        self.cost += delta;
    }

    /// Recomputes the raw objective from scratch.
    pub fn recompute_cost(&mut self, instance: &Instance) {
        let transit = instance.transit();
        let depot = instance.depot();
        self.cost = self
            .routes
            .iter()
            .map(|r| transit.route_cost(depot, r.nodes()))
            .sum();
    }

    /// Checks every solution invariant against `instance`.
    ///
    /// A valid solution yields an empty list.
    pub fn validate(&self, instance: &Instance) -> Vec<Violation> {
        let mut violations = Vec::new();
        let depot = instance.depot();
        let nodes = instance.num_nodes();
        let tracker = instance.capacity_tracker();
        let mut seen = vec![0usize; nodes];

        if self.routes.len() != instance.num_vehicles() {
            violations.push(Violation::new(ViolationType::FleetMismatch {
                route_index: self.routes.len().min(instance.num_vehicles()),
                vehicle_id: None,
            }));
        }

        for (idx, route) in self.routes.iter().enumerate() {
            let vehicle = route.vehicle_id();
            if vehicle != idx || vehicle >= instance.num_vehicles() {
                violations.push(Violation::new(ViolationType::FleetMismatch {
                    route_index: idx,
                    vehicle_id: Some(vehicle),
                }));
                continue;
            }

            let mut known = true;
            for &node in route.nodes() {
                if node >= nodes {
                    violations.push(Violation::new(ViolationType::UnknownNode { vehicle, node }));
                    known = false;
                } else if node == depot {
                    violations.push(Violation::new(ViolationType::DepotVisited { vehicle }));
                } else {
                    seen[node] += 1;
                }
            }
            if !known {
                continue;
            }

            let actual = route
                .nodes()
                .iter()
                .fold(0i64, |acc, &n| acc.saturating_add(instance.demand(n)));
            if actual != route.load() {
                violations.push(Violation::new(ViolationType::LoadMismatch {
                    vehicle,
                    stored: route.load(),
                    actual,
                }));
            }

            if let Err(inf) = tracker.feasible_prefix_load(route.nodes(), vehicle) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    vehicle,
                    position: inf.position,
                    load: inf.load,
                    capacity: inf.capacity,
                }));
            }
        }

        for node in instance.customers() {
            match seen[node] {
                0 => violations.push(Violation::new(ViolationType::MissingNode { node })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::DuplicateNode { node })),
            }
        }

        if violations.is_empty() {
            let mut fresh = self.clone();
            fresh.recompute_cost(instance);
            let tolerance = COST_TOLERANCE * fresh.cost.abs().max(1.0);
            if (fresh.cost - self.cost).abs() > tolerance {
                violations.push(Violation::new(ViolationType::CostMismatch {
                    stored: self.cost,
                    actual: fresh.cost,
                }));
            }
        }

        violations
    }
}

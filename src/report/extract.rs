use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gls::SearchStats;
use crate::models::{Instance, Solution};

/// Outcome of a solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "no_solution")]
    NoSolution,
}

/// One stop of a reported route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub node: usize,
    /// Cumulative load after serving this stop.
    pub load: i64,
}

/// A used vehicle's route, depot first and last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    pub vehicle_id: usize,
    pub route: Vec<Stop>,
    /// Raw transit cost of the route.
    pub distance: f64,
    pub load: i64,
}

impl RouteReport {
    /// Node indices in visiting order, depots included.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.route.iter().map(|s| s.node)
    }
}

/// Final result of a solve call.
///
/// Serializes to the wire shape:
///
/// ```text
/// { "status": "success", "objective_value": 7.0,
///   "routes": [ { "vehicle_id": 0, "route": [ { "node": 0, "load": 0 }, ... ],
///                 "distance": 7.0, "load": 3 } ],
///   "total_distance": 7.0, "total_load": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub status: SolveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective_value: Option<f64>,
    pub routes: Vec<RouteReport>,
    pub total_distance: f64,
    /// Sum of route loads; wider than a single route's load.
    pub total_load: i128,
    /// Search counters; not part of the wire format.
    #[serde(skip)]
    pub stats: Option<SearchStats>,
}

impl SolveReport {
    /// Report for an instance where no feasible solution was found.
    pub fn no_solution() -> Self {
        Self {
            status: SolveStatus::NoSolution,
            objective_value: None,
            routes: Vec::new(),
            total_distance: 0.0,
            total_load: 0,
            stats: None,
        }
    }

    /// Whether a feasible solution was found.
    pub fn is_success(&self) -> bool {
        self.status == SolveStatus::Success
    }

    /// Maps each reported route onto caller-supplied per-node values, such
    /// as coordinates, keyed by vehicle id.
    ///
    /// # Errors
    ///
    /// [`Error::LocationOutOfRange`] if a route visits a node that has no
    /// entry in `locations`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvrp_gls::report::{RouteReport, SolveReport, SolveStatus, Stop};
    ///
    /// let mut report = SolveReport::no_solution();
    /// report.status = SolveStatus::Success;
    /// report.routes.push(RouteReport {
    ///     vehicle_id: 1,
    ///     route: vec![
    ///         Stop { node: 0, load: 0 },
    ///         Stop { node: 2, load: 1 },
    ///         Stop { node: 0, load: 1 },
    ///     ],
    ///     distance: 4.0,
    ///     load: 1,
    /// });
    ///
    /// let locations = ["depot", "a", "b"];
    /// let routes = report.calculated_routes(&locations).unwrap();
    /// assert_eq!(routes[&1], vec!["depot", "b", "depot"]);
    /// ```
    pub fn calculated_routes<T: Clone>(&self, locations: &[T]) -> Result<BTreeMap<usize, Vec<T>>> {
        self.routes
            .iter()
            .map(|r| {
                let mapped = r
                    .nodes()
                    .map(|node| {
                        locations
                            .get(node)
                            .cloned()
                            .ok_or(Error::LocationOutOfRange {
                                node,
                                locations: locations.len(),
                            })
                    })
                    .collect::<Result<Vec<T>>>()?;
                Ok((r.vehicle_id, mapped))
            })
            .collect()
    }
}

/// Builds the report for a feasible solution.
///
/// Routes of unused vehicles are omitted. Distances and the objective are
/// recomputed from raw transit costs, so no search penalty can leak into
/// the report.
pub fn extract(instance: &Instance, solution: &Solution) -> SolveReport {
    let transit = instance.transit();
    let depot = instance.depot();

    let routes: Vec<RouteReport> = solution
        .routes()
        .iter()
        .filter(|r| !r.is_empty())
        .map(|r| {
            let mut load = 0;
            let mut stops = Vec::with_capacity(r.len() + 2);
            stops.push(Stop { node: depot, load });
            for &node in r.nodes() {
                load = load.saturating_add(instance.demand(node));
                stops.push(Stop { node, load });
            }
            stops.push(Stop { node: depot, load });

            RouteReport {
                vehicle_id: r.vehicle_id(),
                route: stops,
                distance: transit.route_cost(depot, r.nodes()),
                load,
            }
        })
        .collect();

    let total_distance = routes.iter().map(|r| r.distance).sum();
    let total_load = routes.iter().map(|r| i128::from(r.load)).sum();

    SolveReport {
        status: SolveStatus::Success,
        objective_value: Some(total_distance),
        routes,
        total_distance,
        total_load,
        stats: None,
    }
}

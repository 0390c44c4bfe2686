//! Path-cheapest-arc constructive heuristic.
//!
//! All vehicles grow their routes in parallel from the depot. At every step
//! the cheapest feasible arc from any vehicle's current tail to any unrouted
//! node is taken. Routes close at the depot once nothing else fits.
//!
//! # Complexity
//!
//! O(n² × m) where n = number of nodes and m = number of vehicles.

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::models::{Instance, Solution};

/// Constructs an initial solution by repeatedly appending the cheapest
/// capacity-feasible (vehicle, node) arc.
///
/// Ties on arc cost go to the lowest vehicle index, then the lowest node
/// index, so the result is reproducible.
///
/// Returns [`Error::NoFeasibleConstruction`] when nodes remain that no
/// vehicle can take.
///
/// # Examples
///
/// ```
/// use cvrp_gls::models::Instance;
/// use cvrp_gls::constructive::cheapest_arc;
///
/// let rows: Vec<Vec<f64>> = (0..4)
///     .map(|i| (0..4).map(|j| (i as f64 - j as f64).abs()).collect())
///     .collect();
/// let instance = Instance::new(&rows, vec![0, 10, 10, 10], &[30], 1, 0).unwrap();
///
/// let solution = cheapest_arc(&instance).unwrap();
/// assert_eq!(solution.route(0).nodes(), &[1, 2, 3]);
/// assert_eq!(solution.cost(), 6.0);
/// ```
pub fn cheapest_arc(instance: &Instance) -> Result<Solution> {
    let transit = instance.transit();
    let tracker = instance.capacity_tracker();
    let depot = instance.depot();
    let num_vehicles = instance.num_vehicles();

    let mut solution = Solution::new(num_vehicles);
    let mut tails = vec![depot; num_vehicles];
    let mut unrouted: Vec<usize> = instance.customers().collect();

    while !unrouted.is_empty() {
        // (cost, vehicle, position in `unrouted`)
        let mut best: Option<(f64, usize, usize)> = None;

        for vehicle in 0..num_vehicles {
            let load = solution.route(vehicle).load();
            for (pos, &node) in unrouted.iter().enumerate() {
                if !tracker.can_append(vehicle, load, node) {
                    continue;
                }
                let cost = transit.cost(tails[vehicle], node);
                if best.is_none_or(|(c, _, _)| cost < c) {
                    best = Some((cost, vehicle, pos));
                }
            }
        }

        let Some((cost, vehicle, pos)) = best else {
            debug!("construction stuck with {} unrouted node(s)", unrouted.len());
            return Err(Error::NoFeasibleConstruction { unrouted });
        };

        let node = unrouted.remove(pos);
        trace!("vehicle {vehicle} takes node {node} at cost {cost}");
        solution.route_mut(vehicle).push(node, instance.demand(node));
        tails[vehicle] = node;
    }

    solution.recompute_cost(instance);
    debug!(
        "constructed {} route(s), cost {:.3}",
        solution.num_used(),
        solution.cost()
    );

    Ok(solution)
}

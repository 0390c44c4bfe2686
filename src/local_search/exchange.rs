//! Inter-route node exchange (swap).
//!
//! # Algorithm
//!
//! For every pair of nodes `a ∈ R1`, `b ∈ R2` with `R1 ≠ R2`, put `b` at
//! `a`'s position and `a` at `b`'s position. The move is only considered if
//! both routes stay within capacity after the demand transfer.
//!
//! # Complexity
//!
//! O(n²) per scan where n = number of nodes.

use super::{neighbors, ArcCost, IMPROVEMENT_EPS};
use crate::models::{Instance, Solution};

/// Swap the stop at `first_pos` of `first_route` with the stop at
/// `second_pos` of `second_route`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub first_route: usize,
    pub first_pos: usize,
    pub second_route: usize,
    pub second_pos: usize,
}

impl Exchange {
    /// Cost change of this move under `cost`.
    pub fn delta<C: ArcCost>(&self, solution: &Solution, depot: usize, cost: &C) -> f64 {
        let first = solution.route(self.first_route).nodes();
        let second = solution.route(self.second_route).nodes();
        replacement_delta(first, self.first_pos, second[self.second_pos], depot, cost)
            + replacement_delta(second, self.second_pos, first[self.first_pos], depot, cost)
    }

    pub(crate) fn apply(&self, solution: &mut Solution, instance: &Instance) {
        let a = solution.route(self.first_route).nodes()[self.first_pos];
        let b = solution.route(self.second_route).nodes()[self.second_pos];
        let (da, db) = (instance.demand(a), instance.demand(b));
        let (first, second) = solution.route_pair_mut(self.first_route, self.second_route);
        first.replace(self.first_pos, b, da, db);
        second.replace(self.second_pos, a, db, da);
    }
}

/// Finds the best improving exchange move across all route pairs.
pub fn best_exchange<C: ArcCost>(
    solution: &Solution,
    instance: &Instance,
    cost: &C,
) -> Option<(Exchange, f64)> {
    let depot = instance.depot();
    let tracker = instance.capacity_tracker();
    let routes = solution.routes();
    let mut best: Option<(Exchange, f64)> = None;

    for (r1, first) in routes.iter().enumerate() {
        for (r2, second) in routes.iter().enumerate().skip(r1 + 1) {
            for (p, &a) in first.nodes().iter().enumerate() {
                for (q, &b) in second.nodes().iter().enumerate() {
                    if !tracker.can_replace(r1, first.load(), a, b)
                        || !tracker.can_replace(r2, second.load(), b, a)
                    {
                        continue;
                    }

                    let delta = replacement_delta(first.nodes(), p, b, depot, cost)
                        + replacement_delta(second.nodes(), q, a, depot, cost);
                    if delta < -IMPROVEMENT_EPS && best.is_none_or(|(_, d)| delta < d) {
                        let mv = Exchange {
                            first_route: r1,
                            first_pos: p,
                            second_route: r2,
                            second_pos: q,
                        };
                        best = Some((mv, delta));
                    }
                }
            }
        }
    }

    best
}

/// Cost of putting `node` in place of the stop at `pos`.
fn replacement_delta<C: ArcCost>(
    route: &[usize],
    pos: usize,
    node: usize,
    depot: usize,
    cost: &C,
) -> f64 {
    let (prev, next) = neighbors(route, pos, depot);
    let old = route[pos];
    cost.arc(prev, node) + cost.arc(node, next) - cost.arc(prev, old) - cost.arc(old, next)
}

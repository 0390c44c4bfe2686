//! Intra-route Or-opt segment relocation.
//!
//! # Algorithm
//!
//! Removes a segment of 1 to [`MAX_SEGMENT`] consecutive stops and
//! reinserts it elsewhere in the same route, keeping its orientation, so
//! the arcs inside the segment are unchanged even for asymmetric costs.
//! The route load does not change.
//!
//! # Complexity
//!
//! O(n²) per route per scan.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::{ArcCost, IMPROVEMENT_EPS};
use crate::models::Solution;

/// Longest segment moved by Or-opt.
pub const MAX_SEGMENT: usize = 3;

/// Move `len` stops starting at `start` so that they begin at `target` in
/// the route left after removing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrOpt {
    pub vehicle: usize,
    pub start: usize,
    pub len: usize,
    pub target: usize,
}

impl OrOpt {
    /// Cost change of this move under `cost`.
    pub fn delta<C: ArcCost>(&self, solution: &Solution, depot: usize, cost: &C) -> f64 {
        let route = solution.route(self.vehicle).nodes();
        segment_removal_delta(route, self.start, self.len, depot, cost)
            + segment_insertion_delta(route, self.start, self.len, self.target, depot, cost)
    }

    pub(crate) fn apply(&self, solution: &mut Solution) {
        solution
            .route_mut(self.vehicle)
            .move_segment(self.start, self.len, self.target);
    }
}

/// Finds the best improving Or-opt move over all routes.
pub fn best_or_opt<C: ArcCost>(
    solution: &Solution,
    depot: usize,
    cost: &C,
) -> Option<(OrOpt, f64)> {
    let mut best: Option<(OrOpt, f64)> = None;

    for route in solution.routes() {
        let nodes = route.nodes();
        let n = nodes.len();

        for len in 1..=MAX_SEGMENT.min(n.saturating_sub(1)) {
            for start in 0..=n - len {
                let removal = segment_removal_delta(nodes, start, len, depot, cost);

                for target in 0..=n - len {
                    if target == start {
                        continue;
                    }
                    let delta =
                        removal + segment_insertion_delta(nodes, start, len, target, depot, cost);
                    if delta < -IMPROVEMENT_EPS && best.is_none_or(|(_, d)| delta < d) {
                        let mv = OrOpt {
                            vehicle: route.vehicle_id(),
                            start,
                            len,
                            target,
                        };
                        best = Some((mv, delta));
                    }
                }
            }
        }
    }

    best
}

/// Node at index `k` of the route with `start..start + len` removed.
#[inline]
fn remainder_at(route: &[usize], start: usize, len: usize, k: usize) -> usize {
    if k < start {
        route[k]
    } else {
        route[k + len]
    }
}

fn segment_removal_delta<C: ArcCost>(
    route: &[usize],
    start: usize,
    len: usize,
    depot: usize,
    cost: &C,
) -> f64 {
    let end = start + len - 1;
    let prev = if start == 0 { depot } else { route[start - 1] };
    let next = if end + 1 == route.len() {
        depot
    } else {
        route[end + 1]
    };
    cost.arc(prev, next) - cost.arc(prev, route[start]) - cost.arc(route[end], next)
}

fn segment_insertion_delta<C: ArcCost>(
    route: &[usize],
    start: usize,
    len: usize,
    target: usize,
    depot: usize,
    cost: &C,
) -> f64 {
    let remaining = route.len() - len;
    let prev = if target == 0 {
        depot
    } else {
        remainder_at(route, start, len, target - 1)
    };
    let next = if target == remaining {
        depot
    } else {
        remainder_at(route, start, len, target)
    };
    let (first, last) = (route[start], route[start + len - 1]);
    cost.arc(prev, first) + cost.arc(last, next) - cost.arc(prev, next)
}

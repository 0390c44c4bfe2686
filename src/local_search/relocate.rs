//! Inter-route node relocation.
//!
//! # Algorithm
//!
//! Tries moving each node from its current route to every insertion
//! position of every other route, including routes of unused vehicles.
//! Only moves the capacity tracker admits for the receiving route are
//! considered; the donor route only gets lighter.
//!
//! # Complexity
//!
//! O(n × (n + m)) per scan where n = nodes and m = vehicles.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::{insertion_delta, removal_delta, ArcCost, IMPROVEMENT_EPS};
use crate::models::{Instance, Solution};

/// Move the stop at `from_pos` of `from_route` to `to_pos` of `to_route`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocate {
    pub from_route: usize,
    pub from_pos: usize,
    pub to_route: usize,
    pub to_pos: usize,
}

impl Relocate {
    /// Cost change of this move under `cost`.
    pub fn delta<C: ArcCost>(&self, solution: &Solution, depot: usize, cost: &C) -> f64 {
        let donor = solution.route(self.from_route).nodes();
        let node = donor[self.from_pos];
        removal_delta(donor, self.from_pos, depot, cost)
            + insertion_delta(
                solution.route(self.to_route).nodes(),
                self.to_pos,
                node,
                depot,
                cost,
            )
    }

    pub(crate) fn apply(&self, solution: &mut Solution, instance: &Instance) {
        let node = solution.route(self.from_route).nodes()[self.from_pos];
        let demand = instance.demand(node);
        let (donor, receiver) = solution.route_pair_mut(self.from_route, self.to_route);
        donor.remove(self.from_pos, demand);
        receiver.insert(self.to_pos, node, demand);
    }
}

/// Finds the best improving relocate move across all route pairs.
pub fn best_relocate<C: ArcCost>(
    solution: &Solution,
    instance: &Instance,
    cost: &C,
) -> Option<(Relocate, f64)> {
    let depot = instance.depot();
    let tracker = instance.capacity_tracker();
    let mut best: Option<(Relocate, f64)> = None;

    for donor in solution.routes() {
        let from_route = donor.vehicle_id();
        for (from_pos, &node) in donor.nodes().iter().enumerate() {
            let removal = removal_delta(donor.nodes(), from_pos, depot, cost);

            for receiver in solution.routes() {
                let to_route = receiver.vehicle_id();
                if to_route == from_route
                    || !tracker.can_append(to_route, receiver.load(), node)
                {
                    continue;
                }

                for to_pos in 0..=receiver.len() {
                    let delta =
                        removal + insertion_delta(receiver.nodes(), to_pos, node, depot, cost);
                    if delta < -IMPROVEMENT_EPS && best.is_none_or(|(_, d)| delta < d) {
                        let mv = Relocate {
                            from_route,
                            from_pos,
                            to_route,
                            to_pos,
                        };
                        best = Some((mv, delta));
                    }
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect()
    }

    #[test]
    fn test_relocate_merges_routes() {
        // Two routes [1] and [2] on a line; serving both from one is cheaper.
        let inst = Instance::new(&line(3), vec![0, 1, 1], &[2, 2], 2, 0).expect("valid");
        let sol = Solution::from_routes(&inst, vec![vec![1], vec![2]]);
        let transit = inst.transit();
        let (mv, delta) = best_relocate(&sol, &inst, &transit).expect("improving move");
        assert_eq!(
            mv,
            Relocate {
                from_route: 0,
                from_pos: 0,
                to_route: 1,
                to_pos: 0
            }
        );
        assert!((delta + 2.0).abs() < 1e-10);

        let mut next = sol.clone();
        mv.apply(&mut next, &inst);
        next.recompute_cost(&inst);
        assert_eq!(next.route(1).nodes(), &[1, 2]);
        assert_eq!(next.route(1).load(), 2);
        assert!(next.route(0).is_empty());
        assert!((next.cost() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_relocate_respects_capacity() {
        let inst = Instance::new(&line(3), vec![0, 1, 1], &[1, 1], 2, 0).expect("valid");
        let sol = Solution::from_routes(&inst, vec![vec![1], vec![2]]);
        assert!(best_relocate(&sol, &inst, &inst.transit()).is_none());
    }

    #[test]
    fn test_relocate_delta_matches_recompute() {
        let inst = Instance::new(&line(5), vec![0, 1, 1, 1, 1], &[3, 3], 2, 0).expect("valid");
        let sol = Solution::from_routes(&inst, vec![vec![4, 1], vec![2, 3]]);
        let transit = inst.transit();
        let (mv, delta) = best_relocate(&sol, &inst, &transit).expect("improving move");
        assert!((mv.delta(&sol, 0, &transit) - delta).abs() < 1e-10);

        let mut next = sol.clone();
        mv.apply(&mut next, &inst);
        next.recompute_cost(&inst);
        assert!((next.cost() - (sol.cost() + delta)).abs() < 1e-10);
        assert!(next.validate(&inst).is_empty());
    }
}

//! Intra-route 2-opt segment reversal.
//!
//! # Algorithm
//!
//! For each segment `[i..=j]` of a route, compute the change in cost from
//! reversing it. Costs may be asymmetric, so the arcs inside the segment
//! change direction and are part of the delta:
//!
//! ```text
//! delta = c(prev, r[j]) + Σ c(r[k+1], r[k]) + c(r[i], next)
//!       - c(prev, r[i]) - Σ c(r[k], r[k+1]) - c(r[j], next)
//! ```
//!
//! Both sums run over `k in i..j` and are accumulated incrementally while
//! `j` grows, so a full scan is O(n²) per route.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::{neighbors, ArcCost, IMPROVEMENT_EPS};
use crate::models::Solution;

/// Reverse the stops `from..=to` of one vehicle's route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOpt {
    pub vehicle: usize,
    pub from: usize,
    pub to: usize,
}

impl TwoOpt {
    /// Cost change of this move under `cost`.
    pub fn delta<C: ArcCost>(&self, solution: &Solution, depot: usize, cost: &C) -> f64 {
        let route = solution.route(self.vehicle).nodes();
        reversal_delta(route, depot, cost, self.from, self.to)
    }

    pub(crate) fn apply(&self, solution: &mut Solution) {
        solution.route_mut(self.vehicle).reverse(self.from, self.to);
    }
}

/// Finds the best improving 2-opt move over all routes.
pub fn best_two_opt<C: ArcCost>(
    solution: &Solution,
    depot: usize,
    cost: &C,
) -> Option<(TwoOpt, f64)> {
    let mut best: Option<(TwoOpt, f64)> = None;

    for route in solution.routes() {
        let nodes = route.nodes();
        let n = nodes.len();
        if n < 2 {
            continue;
        }

        for i in 0..n - 1 {
            let (prev, _) = neighbors(nodes, i, depot);
            let head_old = cost.arc(prev, nodes[i]);
            let mut forward = 0.0;
            let mut backward = 0.0;

            for j in i + 1..n {
                forward += cost.arc(nodes[j - 1], nodes[j]);
                backward += cost.arc(nodes[j], nodes[j - 1]);
                let (_, next) = neighbors(nodes, j, depot);

                let old = head_old + forward + cost.arc(nodes[j], next);
                let new = cost.arc(prev, nodes[j]) + backward + cost.arc(nodes[i], next);
                let delta = new - old;

                if delta < -IMPROVEMENT_EPS && best.is_none_or(|(_, d)| delta < d) {
                    let mv = TwoOpt {
                        vehicle: route.vehicle_id(),
                        from: i,
                        to: j,
                    };
                    best = Some((mv, delta));
                }
            }
        }
    }

    best
}

fn reversal_delta<C: ArcCost>(route: &[usize], depot: usize, cost: &C, i: usize, j: usize) -> f64 {
    let (prev, _) = neighbors(route, i, depot);
    let (_, next) = neighbors(route, j, depot);

    let mut old = cost.arc(prev, route[i]) + cost.arc(route[j], next);
    let mut new = cost.arc(prev, route[j]) + cost.arc(route[i], next);
    for k in i..j {
        old += cost.arc(route[k], route[k + 1]);
        new += cost.arc(route[k + 1], route[k]);
    }

    new - old
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Instance;

    fn square() -> Instance {
        // Depot at (0,0), customers at (0,1), (1,1), (1,0), Manhattan metric.
        let pts = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
        let rows: Vec<Vec<f64>> = pts
            .iter()
            .map(|a: &(f64, f64)| {
                pts.iter()
                    .map(|b| (a.0 - b.0).abs() + (a.1 - b.1).abs())
                    .collect()
            })
            .collect();
        Instance::new(&rows, vec![0, 1, 1, 1], &[3], 1, 0).expect("valid")
    }

    #[test]
    fn test_reverses_crossing() {
        let inst = square();
        let sol = Solution::from_routes(&inst, vec![vec![1, 3, 2]]);
        let transit = inst.transit();
        let (mv, delta) = best_two_opt(&sol, 0, &transit).expect("improving move");
        assert!(delta < 0.0);

        let mut improved = sol.clone();
        mv.apply(&mut improved);
        improved.recompute_cost(&inst);
        assert!((improved.cost() - (sol.cost() + delta)).abs() < 1e-10);
        assert!((improved.cost() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_move_when_optimal() {
        let inst = square();
        let sol = Solution::from_routes(&inst, vec![vec![1, 2, 3]]);
        assert!(best_two_opt(&sol, 0, &inst.transit()).is_none());
    }

    #[test]
    fn test_delta_counts_reversed_arcs() {
        // Cheap only in the 0→1→2→0 direction.
        let rows = vec![
            vec![0.0, 1.0, 5.0],
            vec![5.0, 0.0, 1.0],
            vec![1.0, 5.0, 0.0],
        ];
        let inst = Instance::new(&rows, vec![0, 1, 1], &[2], 1, 0).expect("valid");
        let transit = inst.transit();

        let good = Solution::from_routes(&inst, vec![vec![1, 2]]);
        assert!(best_two_opt(&good, 0, &transit).is_none());

        let bad = Solution::from_routes(&inst, vec![vec![2, 1]]);
        let (mv, delta) = best_two_opt(&bad, 0, &transit).expect("improving move");
        assert_eq!(mv, TwoOpt { vehicle: 0, from: 0, to: 1 });
        assert!((delta - (3.0 - 15.0)).abs() < 1e-10);
        assert!((mv.delta(&bad, 0, &transit) - delta).abs() < 1e-10);
    }

    #[test]
    fn test_short_routes_skipped() {
        let inst = square();
        let sol = Solution::from_routes(&inst, vec![vec![2]]);
        assert!(best_two_opt(&sol, 0, &inst.transit()).is_none());
    }
}

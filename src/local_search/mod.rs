//! Neighborhood operators for improving CVRP solutions.
//!
//! - [`two_opt`](best_two_opt) — Intra-route segment reversal
//! - [`relocate`](best_relocate) — Inter-route node relocation
//! - [`exchange`](best_exchange) — Inter-route node swap
//! - [`or_opt`](best_or_opt) — Intra-route segment relocation
//!
//! Every operator is generic over [`ArcCost`], so the same scan runs on raw
//! transit costs or on penalty-augmented costs. Operators only return moves
//! the capacity tracker admits and whose delta is strictly negative.

mod exchange;
mod or_opt;
mod relocate;
mod two_opt;

pub use exchange::{best_exchange, Exchange};
pub use or_opt::{best_or_opt, OrOpt, MAX_SEGMENT};
pub use relocate::{best_relocate, Relocate};
pub use two_opt::{best_two_opt, TwoOpt};

use crate::evaluation::Transit;
use crate::models::{Instance, Solution};

/// Smallest delta treated as an improvement.
pub const IMPROVEMENT_EPS: f64 = 1e-9;

/// Directed arc cost used to score moves.
pub trait ArcCost {
    fn arc(&self, from: usize, to: usize) -> f64;
}

impl ArcCost for Transit<'_> {
    #[inline]
    fn arc(&self, from: usize, to: usize) -> f64 {
        self.cost(from, to)
    }
}

/// A neighborhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    TwoOpt(TwoOpt),
    Relocate(Relocate),
    Exchange(Exchange),
    OrOpt(OrOpt),
}

impl Move {
    /// Cost change of this move under `cost`, without applying it.
    pub fn delta<C: ArcCost>(&self, solution: &Solution, depot: usize, cost: &C) -> f64 {
        match self {
            Move::TwoOpt(mv) => mv.delta(solution, depot, cost),
            Move::Relocate(mv) => mv.delta(solution, depot, cost),
            Move::Exchange(mv) => mv.delta(solution, depot, cost),
            Move::OrOpt(mv) => mv.delta(solution, depot, cost),
        }
    }

    /// Applies the move. The solution's stored objective is not updated.
    pub fn apply(&self, solution: &mut Solution, instance: &Instance) {
        match self {
            Move::TwoOpt(mv) => mv.apply(solution),
            Move::Relocate(mv) => mv.apply(solution, instance),
            Move::Exchange(mv) => mv.apply(solution, instance),
            Move::OrOpt(mv) => mv.apply(solution),
        }
    }

    /// Vehicles whose routes this move changes.
    pub fn touched(&self) -> (usize, Option<usize>) {
        match self {
            Move::TwoOpt(mv) => (mv.vehicle, None),
            Move::Relocate(mv) => (mv.from_route, Some(mv.to_route)),
            Move::Exchange(mv) => (mv.first_route, Some(mv.second_route)),
            Move::OrOpt(mv) => (mv.vehicle, None),
        }
    }

    /// Short operator name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Move::TwoOpt(_) => "2-opt",
            Move::Relocate(_) => "relocate",
            Move::Exchange(_) => "exchange",
            Move::OrOpt(_) => "or-opt",
        }
    }
}

/// Scans every neighborhood and returns the move with the most negative
/// delta under `cost`.
///
/// Neighborhoods are scanned in a fixed order (2-opt, relocate, exchange,
/// or-opt) and a later candidate only wins if strictly better, so the
/// result is deterministic.
///
/// # Examples
///
/// ```
/// use cvrp_gls::models::{Instance, Solution};
/// use cvrp_gls::local_search::best_move;
///
/// let rows: Vec<Vec<f64>> = (0..4)
///     .map(|i| (0..4).map(|j| (i as f64 - j as f64).abs()).collect())
///     .collect();
/// let instance = Instance::new(&rows, vec![0, 1, 1, 1], &[3], 1, 0).unwrap();
/// let solution = Solution::from_routes(&instance, vec![vec![2, 1, 3]]);
///
/// let (mv, delta) = best_move(&solution, &instance, &instance.transit()).unwrap();
/// assert!(delta < 0.0);
///
/// let mut improved = solution.clone();
/// mv.apply(&mut improved, &instance);
/// improved.recompute_cost(&instance);
/// assert!(improved.cost() < solution.cost());
/// ```
pub fn best_move<C: ArcCost>(
    solution: &Solution,
    instance: &Instance,
    cost: &C,
) -> Option<(Move, f64)> {
    let depot = instance.depot();
    let candidates = [
        best_two_opt(solution, depot, cost).map(|(mv, d)| (Move::TwoOpt(mv), d)),
        best_relocate(solution, instance, cost).map(|(mv, d)| (Move::Relocate(mv), d)),
        best_exchange(solution, instance, cost).map(|(mv, d)| (Move::Exchange(mv), d)),
        best_or_opt(solution, depot, cost).map(|(mv, d)| (Move::OrOpt(mv), d)),
    ];

    let mut best: Option<(Move, f64)> = None;
    for (mv, delta) in candidates.into_iter().flatten() {
        if best.is_none_or(|(_, d)| delta < d) {
            best = Some((mv, delta));
        }
    }
    best
}

/// Stops on either side of position `pos`, using the depot at the ends.
#[inline]
pub(crate) fn neighbors(route: &[usize], pos: usize, depot: usize) -> (usize, usize) {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos + 1 == route.len() {
        depot
    } else {
        route[pos + 1]
    };
    (prev, next)
}

/// Cost change of removing the stop at `pos`.
pub(crate) fn removal_delta<C: ArcCost>(route: &[usize], pos: usize, depot: usize, cost: &C) -> f64 {
    let (prev, next) = neighbors(route, pos, depot);
    let node = route[pos];
    cost.arc(prev, next) - cost.arc(prev, node) - cost.arc(node, next)
}

/// Cost change of inserting `node` before position `pos`.
pub(crate) fn insertion_delta<C: ArcCost>(
    route: &[usize],
    pos: usize,
    node: usize,
    depot: usize,
    cost: &C,
) -> f64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() { depot } else { route[pos] };
    cost.arc(prev, node) + cost.arc(node, next) - cost.arc(prev, next)
}

//! Guided local search driver.

use std::time::{Duration, Instant};

use log::{debug, info, trace};
use serde::Serialize;

use super::penalty::{AugmentedCost, PenaltyMatrix};
use super::termination::{SearchProgress, Termination};
use crate::local_search::{best_move, Move, IMPROVEMENT_EPS};
use crate::models::{Instance, Solution};

/// Lifecycle of one solve call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Constructed,
    Searching,
    /// The termination criterion fired.
    TimedOut,
    /// Penalizing could no longer change the landscape.
    Converged,
    Reported,
}

/// Counters collected during a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchStats {
    pub phase: SearchPhase,
    pub iterations: usize,
    pub moves: usize,
    pub penalizations: usize,
    pub lambda: f64,
    pub initial_cost: f64,
    pub best_cost: f64,
    pub elapsed: Duration,
}

/// Result of [`GuidedLocalSearch::run`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best solution by raw cost seen at any point.
    pub best: Solution,
    pub stats: SearchStats,
}

/// Guided local search over the 2-opt, relocate, exchange and Or-opt
/// neighborhoods.
///
/// Each iteration applies the move that most improves the augmented cost.
/// At a local optimum the edges of the current solution with maximal
/// utility `raw / (1 + penalty)` get their penalty raised and the search
/// goes on. The best solution by raw cost is kept aside and returned.
///
/// # Examples
///
/// ```
/// use cvrp_gls::constructive::cheapest_arc;
/// use cvrp_gls::gls::{GuidedLocalSearch, MaxIterations};
/// use cvrp_gls::models::Instance;
///
/// let rows: Vec<Vec<f64>> = (0..5)
///     .map(|i| (0..5).map(|j| ((i * 3 + j * 7) % 11) as f64 * (i != j) as u8 as f64).collect())
///     .collect();
/// let instance = Instance::new(&rows, vec![0, 1, 1, 1, 1], &[2, 2], 2, 0).unwrap();
/// let initial = cheapest_arc(&instance).unwrap();
///
/// let mut gls = GuidedLocalSearch::new(&instance, 0.1);
/// let outcome = gls.run(initial.clone(), &MaxIterations(100));
/// assert!(outcome.best.cost() <= initial.cost());
/// assert!(outcome.best.validate(&instance).is_empty());
/// ```
pub struct GuidedLocalSearch<'a> {
    instance: &'a Instance,
    penalties: PenaltyMatrix,
    lambda: f64,
}

impl<'a> GuidedLocalSearch<'a> {
    /// Creates a search whose penalty weight is `lambda_coefficient` times
    /// the average arc cost of the instance.
    pub fn new(instance: &'a Instance, lambda_coefficient: f64) -> Self {
        let lambda = lambda_coefficient * instance.distances().average_arc_cost();
        Self {
            instance,
            penalties: PenaltyMatrix::new(instance.num_nodes()),
            lambda,
        }
    }

    /// Penalty weight in cost units.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Current edge penalties.
    pub fn penalties(&self) -> &PenaltyMatrix {
        &self.penalties
    }

    /// Improves `initial` until `termination` fires or the search converges.
    pub fn run<T: Termination>(&mut self, initial: Solution, termination: &T) -> SearchOutcome {
        let start = Instant::now();
        let instance = self.instance;
        let transit = instance.transit();
        let depot = instance.depot();

        let mut stats = SearchStats {
            phase: SearchPhase::Searching,
            lambda: self.lambda,
            initial_cost: initial.cost(),
            ..SearchStats::default()
        };
        debug!(
            "gls start: cost {:.3}, lambda {:.4}",
            initial.cost(),
            self.lambda
        );

        // Move deltas accumulate rounding error; every recorded best carries
        // an exactly recomputed cost instead.
        let mut current = initial;
        current.recompute_cost(instance);
        let mut best = current.clone();

        loop {
            let progress = SearchProgress {
                iteration: stats.iterations,
                best_cost: best.cost(),
            };
            if termination.is_termination(&progress) {
                stats.phase = SearchPhase::TimedOut;
                break;
            }
            if instance.num_customers() == 0 {
                stats.phase = SearchPhase::Converged;
                break;
            }
            stats.iterations += 1;

            let candidate = {
                let augmented = AugmentedCost::new(transit, &self.penalties, self.lambda);
                best_move(&current, instance, &augmented)
            };

            match candidate {
                Some((mv, augmented_delta)) => {
                    let raw_delta = mv.delta(&current, depot, &transit);
                    mv.apply(&mut current, instance);
                    current.add_cost(raw_delta);
                    stats.moves += 1;
                    debug_assert!(touched_routes_feasible(&current, instance, &mv));
                    trace!(
                        "{} move: augmented {:.4}, raw {:.4}",
                        mv.name(),
                        augmented_delta,
                        raw_delta
                    );

                    if current.cost() < best.cost() - IMPROVEMENT_EPS {
                        current.recompute_cost(instance);
                        if current.cost() < best.cost() - IMPROVEMENT_EPS {
                            best = current.clone();
                            trace!("new best {:.3} at iteration {}", best.cost(), stats.iterations);
                        }
                    }
                }
                None => {
                    if !self.penalize(&current) {
                        stats.phase = SearchPhase::Converged;
                        break;
                    }
                    stats.penalizations += 1;
                }
            }
        }

        stats.best_cost = best.cost();
        stats.elapsed = start.elapsed();
        info!(
            "gls {:?} after {} iterations ({} moves, {} penalizations): {:.3} -> {:.3}",
            stats.phase,
            stats.iterations,
            stats.moves,
            stats.penalizations,
            stats.initial_cost,
            stats.best_cost
        );

        SearchOutcome { best, stats }
    }

    /// Raises the penalty of every maximal-utility edge of `solution`.
    ///
    /// Returns `false` when no penalty can change the augmented landscape.
    fn penalize(&mut self, solution: &Solution) -> bool {
        if self.lambda <= 0.0 {
            return false;
        }

        let transit = self.instance.transit();
        let depot = self.instance.depot();
        let edges: Vec<(usize, usize)> = solution
            .routes()
            .iter()
            .filter(|r| !r.is_empty())
            .flat_map(|r| {
                let nodes = r.nodes();
                std::iter::once(depot)
                    .chain(nodes.iter().copied())
                    .zip(nodes.iter().copied().chain(std::iter::once(depot)))
            })
            .collect();

        let utility =
            |(i, j): (usize, usize)| transit.cost(i, j) / (1.0 + f64::from(self.penalties.get(i, j)));
        let max_utility = edges.iter().map(|&e| utility(e)).fold(0.0, f64::max);
        if max_utility <= 0.0 {
            return false;
        }

        let tolerance = max_utility * 1e-12;
        let chosen: Vec<(usize, usize)> = edges
            .into_iter()
            .filter(|&e| utility(e) >= max_utility - tolerance)
            .collect();
        for &(i, j) in &chosen {
            self.penalties.increment(i, j);
        }
        trace!("penalized {} edge(s) at utility {:.4}", chosen.len(), max_utility);

        true
    }
}

fn touched_routes_feasible(solution: &Solution, instance: &Instance, mv: &Move) -> bool {
    let tracker = instance.capacity_tracker();
    let (a, b) = mv.touched();
    std::iter::once(a)
        .chain(b)
        .all(|v| tracker.feasible_prefix_load(solution.route(v).nodes(), v).is_ok())
}

//! End-to-end solve pipeline.
//!
//! Instance → cheapest-arc construction → guided local search → report.
//! Every call owns its own state, so independent requests can run in
//! parallel without coordination (see [`solve_batch`]).

use std::time::Duration;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constructive::cheapest_arc;
use crate::error::{Error, Result};
use crate::gls::{AnyOf, GuidedLocalSearch, MaxIterations, MaxTime, SearchPhase, Termination};
use crate::models::Instance;
use crate::report::{extract, SolveReport};

/// Default wall-clock budget of the search.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(1);

/// Default penalty weight, relative to the average arc cost.
pub const DEFAULT_LAMBDA_COEFFICIENT: f64 = 0.1;

/// Search parameters for one solve call.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Wall-clock budget of the search phase.
    pub time_limit: Duration,
    /// GLS penalty weight as a fraction of the average arc cost.
    pub lambda_coefficient: f64,
    /// Optional cap on search iterations, on top of the time limit.
    pub max_iterations: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            lambda_coefficient: DEFAULT_LAMBDA_COEFFICIENT,
            max_iterations: None,
        }
    }
}

impl SolverConfig {
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_lambda_coefficient(mut self, lambda_coefficient: f64) -> Self {
        self.lambda_coefficient = lambda_coefficient;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Config for a request: its time limit in seconds, or the default.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTimeLimit`] for a negative or non-finite limit.
    pub fn from_request(request: &SolveRequest) -> Result<Self> {
        let config = Self::default();
        match request.time_limit {
            None => Ok(config),
            Some(secs) => Duration::try_from_secs_f64(secs)
                .map(|limit| config.with_time_limit(limit))
                .map_err(|_| Error::InvalidTimeLimit(secs)),
        }
    }
}

/// Raw solve input, as received from the I/O layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub distance_matrix: Vec<Vec<f64>>,
    pub demands: Vec<i64>,
    pub vehicle_capacities: Vec<i64>,
    pub num_vehicles: i64,
    pub depot: i64,
    /// Seconds; defaults to one second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<f64>,
}

impl SolveRequest {
    /// Validates the request into an [`Instance`].
    pub fn instance(&self) -> Result<Instance> {
        let instance = Instance::new(
            &self.distance_matrix,
            self.demands.clone(),
            &self.vehicle_capacities,
            self.num_vehicles,
            self.depot,
        )?;
        Ok(instance)
    }
}

/// Solves `instance` within `config.time_limit` (and `max_iterations`, if set).
///
/// Returns a `no_solution` report when per-vehicle capacities leave some
/// node unplaceable. Reaching the time limit is a normal, successful end.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cvrp_gls::models::Instance;
/// use cvrp_gls::solver::{solve, SolverConfig};
///
/// let instance = Instance::new(
///     &[
///         vec![0.0, 1.0, 2.0, 2.0],
///         vec![1.0, 0.0, 1.0, 2.0],
///         vec![2.0, 1.0, 0.0, 1.0],
///         vec![2.0, 2.0, 1.0, 0.0],
///     ],
///     vec![0, 1, 1, 2],
///     &[2, 2],
///     2,
///     0,
/// )
/// .unwrap();
///
/// let config = SolverConfig::default().with_time_limit(Duration::from_millis(50));
/// let report = solve(&instance, &config);
/// assert!(report.is_success());
/// assert_eq!(report.total_load, 4);
/// ```
pub fn solve(instance: &Instance, config: &SolverConfig) -> SolveReport {
    let deadline = MaxTime::new(config.time_limit);
    match config.max_iterations {
        Some(n) => solve_with(instance, config, &AnyOf(deadline, MaxIterations(n))),
        None => solve_with(instance, config, &deadline),
    }
}

/// Like [`solve`], but stops the search by `termination` instead of the
/// config's limits.
pub fn solve_with<T: Termination>(
    instance: &Instance,
    config: &SolverConfig,
    termination: &T,
) -> SolveReport {
    let initial = match cheapest_arc(instance) {
        Ok(solution) => solution,
        Err(err) => {
            warn!("{err}");
            return SolveReport::no_solution();
        }
    };
    debug!(
        "{:?}: {} route(s), cost {:.3}",
        SearchPhase::Constructed,
        initial.num_used(),
        initial.cost()
    );

    let mut search = GuidedLocalSearch::new(instance, config.lambda_coefficient);
    let outcome = search.run(initial, termination);
    debug_assert!(outcome.best.validate(instance).is_empty());

    let mut stats = outcome.stats;
    stats.phase = SearchPhase::Reported;
    let mut report = extract(instance, &outcome.best);
    info!(
        "solved {} customers with {} vehicle(s): objective {:.3}",
        instance.num_customers(),
        report.routes.len(),
        report.total_distance
    );
    report.stats = Some(stats);
    report
}

/// Validates and solves a raw request.
///
/// # Errors
///
/// [`Error::InvalidInstance`] or [`Error::InvalidTimeLimit`] for bad input.
/// An instance that passes validation always yields `Ok`, possibly with a
/// `no_solution` report.
pub fn solve_request(request: &SolveRequest) -> Result<SolveReport> {
    let config = SolverConfig::from_request(request)?;
    let instance = request.instance()?;
    Ok(solve(&instance, &config))
}

/// JSON in, JSON out wrapper around [`solve_request`].
pub fn solve_json(input: &str) -> Result<String> {
    let request: SolveRequest = serde_json::from_str(input)?;
    let report = solve_request(&request)?;
    Ok(serde_json::to_string(&report)?)
}

/// Solves independent requests in parallel, one per rayon task.
///
/// Results keep the order of `requests`.
pub fn solve_batch(requests: &[SolveRequest]) -> Vec<Result<SolveReport>> {
    requests.par_iter().map(solve_request).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidInstance;
    use crate::report::SolveStatus;

    fn request() -> SolveRequest {
        SolveRequest {
            distance_matrix: vec![
                vec![0.0, 3.0, 4.0, 5.0],
                vec![3.0, 0.0, 2.0, 6.0],
                vec![4.0, 2.0, 0.0, 3.0],
                vec![5.0, 6.0, 3.0, 0.0],
            ],
            demands: vec![0, 1, 1, 2],
            vehicle_capacities: vec![2, 2],
            num_vehicles: 2,
            depot: 0,
            time_limit: Some(0.05),
        }
    }

    #[test]
    fn test_config_builders() {
        let config = SolverConfig::default()
            .with_time_limit(Duration::from_millis(10))
            .with_lambda_coefficient(0.3)
            .with_max_iterations(7);
        assert_eq!(config.time_limit, Duration::from_millis(10));
        assert_eq!(config.lambda_coefficient, 0.3);
        assert_eq!(config.max_iterations, Some(7));
    }

    #[test]
    fn test_config_from_request() {
        let mut req = request();
        req.time_limit = None;
        assert_eq!(
            SolverConfig::from_request(&req).expect("valid").time_limit,
            DEFAULT_TIME_LIMIT
        );

        req.time_limit = Some(2.5);
        assert_eq!(
            SolverConfig::from_request(&req).expect("valid").time_limit,
            Duration::from_millis(2500)
        );

        req.time_limit = Some(-1.0);
        assert!(matches!(
            SolverConfig::from_request(&req),
            Err(Error::InvalidTimeLimit(_))
        ));

        req.time_limit = Some(f64::NAN);
        assert!(SolverConfig::from_request(&req).is_err());
    }

    #[test]
    fn test_solve_request() {
        let report = solve_request(&request()).expect("valid");
        assert_eq!(report.status, SolveStatus::Success);
        assert_eq!(report.total_load, 4);
        assert!(report.routes.iter().all(|r| r.load <= 2));
        let stats = report.stats.expect("stats");
        assert_eq!(stats.phase, SearchPhase::Reported);
        assert!(stats.best_cost <= stats.initial_cost);
    }

    #[test]
    fn test_per_vehicle_infeasible_is_no_solution() {
        // Aggregate capacity suffices, but the greedy order fills vehicle 0
        // with nodes 1 and 2 first, which strands node 3.
        let mut req = request();
        req.demands = vec![0, 1, 1, 3];
        req.vehicle_capacities = vec![3, 2];
        let report = solve_request(&req).expect("valid instance");
        assert_eq!(report.status, SolveStatus::NoSolution);
        assert!(report.routes.is_empty());
        assert_eq!(report.objective_value, None);
    }

    #[test]
    fn test_huge_capacities() {
        let mut req = request();
        req.distance_matrix.truncate(3);
        req.distance_matrix.iter_mut().for_each(|row| row.truncate(3));
        req.demands = vec![0, 1, 1];
        req.vehicle_capacities = vec![i64::MAX, i64::MAX];
        let report = solve_request(&req).expect("valid");
        assert!(report.is_success());
        assert_eq!(report.total_load, 2);
    }

    #[test]
    fn test_huge_demands_stay_within_capacity() {
        let mut req = request();
        req.distance_matrix.truncate(3);
        req.distance_matrix.iter_mut().for_each(|row| row.truncate(3));
        req.demands = vec![0, i64::MAX, 1];

        // One vehicle cannot carry both.
        req.vehicle_capacities = vec![i64::MAX];
        req.num_vehicles = 1;
        assert!(matches!(
            solve_request(&req),
            Err(Error::InvalidInstance(InvalidInstance::InsufficientCapacity { .. }))
        ));

        // Two vehicles must split them.
        req.vehicle_capacities = vec![i64::MAX, i64::MAX];
        req.num_vehicles = 2;
        let instance = req.instance().expect("valid");
        let report = solve_with(&instance, &SolverConfig::default(), &MaxIterations(50));
        assert!(report.is_success());
        assert_eq!(report.routes.len(), 2);
        assert!(report.routes.iter().all(|r| r.route.len() == 3));
        assert_eq!(report.total_load, i128::from(i64::MAX) + 1);
    }

    #[test]
    fn test_invalid_instance_is_error() {
        let mut req = request();
        req.depot = 4;
        assert!(matches!(
            solve_request(&req),
            Err(Error::InvalidInstance(InvalidInstance::DepotOutOfRange { depot: 4, nodes: 4 }))
        ));
    }

    #[test]
    fn test_solve_with_iterations() {
        let instance = request().instance().expect("valid");
        let report = solve_with(&instance, &SolverConfig::default(), &MaxIterations(0));
        assert!(report.is_success());
        let stats = report.stats.expect("stats");
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.initial_cost, stats.best_cost);
    }

    #[test]
    fn test_solve_json() {
        let input = serde_json::to_string(&request()).expect("serialize");
        let output = solve_json(&input).expect("solved");
        let report: SolveReport = serde_json::from_str(&output).expect("deserialize");
        assert!(report.is_success());
        assert_eq!(report.total_load, 4);

        assert!(matches!(solve_json("{ not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_solve_batch_keeps_order() {
        let mut bad = request();
        bad.num_vehicles = 0;
        let results = solve_batch(&[request(), bad, request()]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}

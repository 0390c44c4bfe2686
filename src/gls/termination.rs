//! Termination criteria for the search loop.
//!
//! The loop asks its criterion between iterations, never inside a move
//! scan, so a wall-clock limit may overrun by at most one scan.

use std::time::{Duration, Instant};

/// Snapshot of the search handed to a termination criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchProgress {
    /// Completed iterations (applied moves plus penalization rounds).
    pub iteration: usize,
    /// Raw cost of the best solution found so far.
    pub best_cost: f64,
}

/// Decides when the search should stop.
pub trait Termination {
    /// Returns `true` if the search must stop now.
    fn is_termination(&self, progress: &SearchProgress) -> bool;
}

/// Stops once a wall-clock budget has elapsed.
#[derive(Debug, Clone, Copy)]
pub struct MaxTime {
    start: Instant,
    limit: Duration,
}

impl MaxTime {
    /// Starts the clock now.
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }
}

impl Termination for MaxTime {
    fn is_termination(&self, _: &SearchProgress) -> bool {
        self.start.elapsed() >= self.limit
    }
}

/// Stops after a fixed number of iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxIterations(pub usize);

impl Termination for MaxIterations {
    fn is_termination(&self, progress: &SearchProgress) -> bool {
        progress.iteration >= self.0
    }
}

/// Stops as soon as either criterion does.
#[derive(Debug, Clone, Copy)]
pub struct AnyOf<A, B>(pub A, pub B);

impl<A: Termination, B: Termination> Termination for AnyOf<A, B> {
    fn is_termination(&self, progress: &SearchProgress) -> bool {
        self.0.is_termination(progress) || self.1.is_termination(progress)
    }
}

impl<T: Termination + ?Sized> Termination for &T {
    fn is_termination(&self, progress: &SearchProgress) -> bool {
        (**self).is_termination(progress)
    }
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn is_termination(&self, progress: &SearchProgress) -> bool {
        (**self).is_termination(progress)
    }
}

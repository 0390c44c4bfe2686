//! Edge penalties and the augmented arc cost.

use crate::evaluation::Transit;
use crate::local_search::ArcCost;

/// Dense penalty counts for directed edges `(from, to)`.
///
/// Stored row-major like the distance matrix. Increments saturate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltyMatrix {
    data: Vec<u32>,
    size: usize,
}

impl PenaltyMatrix {
    /// Creates an all-zero matrix for `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Penalty count of the edge `from -> to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> u32 {
        self.data[from * self.size + to]
    }

    /// Adds one to the penalty of `from -> to`.
    #[inline]
    pub fn increment(&mut self, from: usize, to: usize) {
        let val = &mut self.data[from * self.size + to];
        *val = val.saturating_add(1);
    }

    /// Sum of all penalty counts.
    pub fn total(&self) -> u64 {
        self.data.iter().map(|&p| u64::from(p)).sum()
    }
}

/// `raw(i, j) + lambda * penalty(i, j)`, the cost seen by the operators
/// during guided local search.
#[derive(Debug, Clone, Copy)]
pub struct AugmentedCost<'a> {
    transit: Transit<'a>,
    penalties: &'a PenaltyMatrix,
    lambda: f64,
}

impl<'a> AugmentedCost<'a> {
    pub fn new(transit: Transit<'a>, penalties: &'a PenaltyMatrix, lambda: f64) -> Self {
        Self {
            transit,
            penalties,
            lambda,
        }
    }
}

impl ArcCost for AugmentedCost<'_> {
    #[inline]
    fn arc(&self, from: usize, to: usize) -> f64 {
        let raw = self.transit.cost(from, to);
        match self.penalties.get(from, to) {
            0 => raw,
            p => raw + self.lambda * f64::from(p),
        }
    }
}

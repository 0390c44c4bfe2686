//! Arc cost lookup.

use crate::distance::DistanceMatrix;

/// Travel cost between two nodes, bound to a validated matrix.
///
/// # Examples
///
/// ```
/// use cvrp_gls::distance::DistanceMatrix;
/// use cvrp_gls::evaluation::Transit;
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 1.0, 4.0,
///     2.0, 0.0, 1.0,
///     4.0, 3.0, 0.0,
/// ]).unwrap();
/// let transit = Transit::new(&dm);
/// assert_eq!(transit.cost(0, 1), 1.0);
/// // depot -> 1 -> 2 -> depot
/// assert_eq!(transit.route_cost(0, &[1, 2]), 6.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Transit<'a> {
    distances: &'a DistanceMatrix,
}

impl<'a> Transit<'a> {
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self { distances }
    }

    /// Cost of the arc `from -> to`.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Cost of `depot -> stops[0] -> ... -> stops[n-1] -> depot`.
    ///
    /// An empty route costs nothing.
    pub fn route_cost(&self, depot: usize, stops: &[usize]) -> f64 {
        let (Some(&first), Some(&last)) = (stops.first(), stops.last()) else {
            return 0.0;
        };
        let inner: f64 = stops.windows(2).map(|w| self.cost(w[0], w[1])).sum();
        self.cost(depot, first) + inner + self.cost(last, depot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_cost_asymmetric() {
        let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 10.0, 10.0, 0.0, 1.0, 1.0, 10.0, 0.0])
            .expect("valid");
        let transit = Transit::new(&dm);
        assert_eq!(transit.route_cost(0, &[1, 2]), 3.0);
        assert_eq!(transit.route_cost(0, &[2, 1]), 30.0);
    }

    #[test]
    fn test_route_cost_empty_and_single() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 3.0, 4.0, 0.0]).expect("valid");
        let transit = Transit::new(&dm);
        assert_eq!(transit.route_cost(0, &[]), 0.0);
        assert_eq!(transit.route_cost(0, &[1]), 7.0);
    }
}

//! Dense travel-cost matrix.

use crate::error::InvalidInstance;

/// A dense n×n cost matrix stored in row-major order.
///
/// Entries are directed: `get(i, j)` and `get(j, i)` may differ.
///
/// # Examples
///
/// ```
/// use cvrp_gls::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 4.0, 6.0],
///     vec![5.0, 0.0, 2.0],
///     vec![6.0, 3.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.get(0, 1), 4.0);
/// assert_eq!(dm.get(1, 0), 5.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Builds a matrix from nested rows, validating shape and entries.
    ///
    /// Every entry must be finite and non-negative and the diagonal must be
    /// zero.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, InvalidInstance> {
        let size = rows.len();
        if size == 0 {
            return Err(InvalidInstance::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(InvalidInstance::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend_from_slice(values);
        }

        Self::from_data(size, data)
    }

    /// Creates a matrix from a flat row-major grid of `size * size` entries.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, InvalidInstance> {
        if size == 0 {
            return Err(InvalidInstance::EmptyMatrix);
        }
        if data.len() != size * size {
            return Err(InvalidInstance::NotSquare {
                row: data.len() / size,
                len: data.len() % size,
                expected: size,
            });
        }

        for (idx, &cost) in data.iter().enumerate() {
            let (from, to) = (idx / size, idx % size);
            if !cost.is_finite() || cost < 0.0 {
                return Err(InvalidInstance::InvalidCost { from, to, cost });
            }
            if from == to && cost != 0.0 {
                return Err(InvalidInstance::NonZeroDiagonal { node: from, cost });
            }
        }

        Ok(Self { data, size })
    }

    /// Returns the cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Mean of all off-diagonal entries, or `0.0` for a single node.
    pub fn average_arc_cost(&self) -> f64 {
        let arcs = self.size * (self.size - 1);
        if arcs == 0 {
            return 0.0;
        }
        let total: f64 = self.data.iter().sum();
        total / arcs as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            vec![0.0, 5.0, 8.0],
            vec![5.0, 0.0, 3.0],
            vec![8.0, 3.0, 0.0],
        ])
        .expect("valid")
    }

    #[test]
    fn test_from_rows() {
        let dm = sample();
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.get(0, 2), 8.0);
        assert_eq!(dm.get(2, 1), 3.0);
    }

    #[test]
    fn test_symmetric() {
        assert!(sample().is_symmetric(1e-10));
    }

    #[test]
    fn test_asymmetric_matrix() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 10.0, 15.0, 0.0]).expect("valid");
        assert!(!dm.is_symmetric(1e-10));
        assert_eq!(dm.get(0, 1), 10.0);
        assert_eq!(dm.get(1, 0), 15.0);
    }

    #[test]
    fn test_from_rows_not_square() {
        let err = DistanceMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            InvalidInstance::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_from_rows_empty() {
        assert_eq!(
            DistanceMatrix::from_rows(&[]).unwrap_err(),
            InvalidInstance::EmptyMatrix
        );
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_err());
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        let err = DistanceMatrix::from_data(2, vec![0.0, -1.0, 1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            InvalidInstance::InvalidCost { from: 0, to: 1, .. }
        ));
        let err = DistanceMatrix::from_data(2, vec![0.0, 1.0, f64::NAN, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            InvalidInstance::InvalidCost { from: 1, to: 0, .. }
        ));
    }

    #[test]
    fn test_rejects_nonzero_diagonal() {
        let err = DistanceMatrix::from_data(2, vec![0.0, 1.0, 1.0, 2.0]).unwrap_err();
        assert_eq!(err, InvalidInstance::NonZeroDiagonal { node: 1, cost: 2.0 });
    }

    #[test]
    fn test_average_arc_cost() {
        // (5 + 8 + 5 + 3 + 8 + 3) / 6
        assert!((sample().average_arc_cost() - 32.0 / 6.0).abs() < 1e-10);
        let single = DistanceMatrix::from_data(1, vec![0.0]).expect("valid");
        assert_eq!(single.average_arc_cost(), 0.0);
    }
}

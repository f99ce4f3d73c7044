//! Dense travel-time matrix.

use crate::error::ConfigurationError;

/// A dense n×n travel-time matrix in minutes, stored in row-major order.
///
/// The matrix may be asymmetric and no triangle inequality is assumed.
/// Self-distance is zero by convention but not enforced. Every entry is
/// checked non-negative on construction and the matrix is immutable
/// afterwards.
///
/// # Examples
///
/// ```
/// use u_vrptw::distance::TravelMatrix;
///
/// let tm = TravelMatrix::from_rows(vec![
///     vec![0, 17],
///     vec![13, 0],
/// ]).unwrap();
/// assert_eq!(tm.get(0, 1), 17);
/// assert_eq!(tm.get(1, 0), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelMatrix {
    data: Vec<i64>,
    size: usize,
}

impl TravelMatrix {
    /// Creates a matrix from explicit rows.
    ///
    /// Fails if the rows do not form a square grid or contain a negative
    /// duration.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, ConfigurationError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(ConfigurationError::NonSquareMatrix {
                    row: row_idx,
                    expected: size,
                    actual: row.len(),
                });
            }
            for (col_idx, &value) in row.iter().enumerate() {
                if value < 0 {
                    return Err(ConfigurationError::NegativeDuration {
                        what: format!("travel {row_idx} -> {col_idx}"),
                        value,
                    });
                }
            }
            data.extend(row);
        }
        Ok(Self { data, size })
    }

    /// Travel time from site `from` to site `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Number of sites covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}

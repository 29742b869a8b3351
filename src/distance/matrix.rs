//! Dense travel-time matrix.

use serde::{Deserialize, Serialize};

use super::Time;

/// A dense n×n travel-time matrix stored in row-major order.
///
/// Entries are directed: `get(u, v)` need not equal `get(v, u)`, and no
/// triangle inequality is assumed.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
///
/// let mut tm = TravelTimeMatrix::new(3);
/// tm.set(0, 2, 4);
/// tm.set(2, 0, 9);
/// assert_eq!(tm.get(0, 2), 4);
/// assert_eq!(tm.get(2, 0), 9);
/// assert_eq!(tm.size(), 3);
/// assert!(!tm.is_symmetric());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelTimeMatrix {
    data: Vec<Time>,
    size: usize,
}

impl TravelTimeMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit row-major n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<Time>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a matrix from nested rows.
    ///
    /// Returns `None` unless every row has exactly `rows.len()` entries.
    pub fn from_rows(rows: &[Vec<Time>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        let data = rows.iter().flatten().copied().collect();
        Some(Self { data, size })
    }

    /// Returns the travel time from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Time {
        self.data[from * self.size + to]
    }

    /// Sets the travel time from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, time: Time) {
        self.data[from * self.size + to] = time;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `index` addresses a row of this matrix.
    pub fn contains(&self, index: usize) -> bool {
        index < self.size
    }

    /// Returns `true` if any entry is negative.
    pub fn has_negative(&self) -> bool {
        self.data.iter().any(|&t| t < 0)
    }

    /// Largest entry, or `None` for an empty matrix.
    pub fn max_value(&self) -> Option<Time> {
        self.data.iter().copied().max()
    }

    /// Returns `true` if `get(u, v) == get(v, u)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }

    /// Iterates over the rows of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[Time]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.size.max(1)).take(self.size)
    }
}

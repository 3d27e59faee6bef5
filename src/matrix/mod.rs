mod norm;
mod ops;
mod util;
pub(crate) mod vector;

pub use vector::Vector;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::Scalar;

/// Shape and index errors raised by [`Matrix`] and [`Vector`].
///
/// Vectors report their shape as an `n x 1` column.
///
/// ```
/// use echelon::{Matrix, MatrixError};
///
/// let m = Matrix::from_rows(2, 2, &[1, 2, 3, 4]);
/// assert_eq!(
///     m.get_row(3).unwrap_err(),
///     MatrixError::IndexOutOfRange { index: 3, bound: 2 },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Operand shapes are incompatible.
    DimensionMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Got `(rows, cols)`.
        got: (usize, usize),
    },
    /// A 1-based row or column index was 0 or larger than `bound`.
    IndexOutOfRange { index: usize, bound: usize },
    /// Nested input rows do not all have the same length.
    Ragged { row: usize, expected: usize, got: usize },
}

impl MatrixError {
    #[inline]
    pub(crate) fn length_mismatch(expected: usize, got: usize) -> Self {
        MatrixError::DimensionMismatch {
            expected: (expected, 1),
            got: (got, 1),
        }
    }
}

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixError::DimensionMismatch { expected, got } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            MatrixError::IndexOutOfRange { index, bound } => {
                write!(f, "index {} out of range 1..={}", index, bound)
            }
            MatrixError::Ragged { row, expected, got } => write!(
                f,
                "row {} has {} entries, expected {}",
                row, got, expected
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatrixError {}

/// Dense heap-allocated matrix.
///
/// Row-major `Vec<T>` storage is the single source of truth: the row and
/// column views are both read from it, so they always describe the same
/// grid no matter which setter ran last.
///
/// The public accessors (`get_row`, `set_entry`, ...) take 1-based indices
/// and return [`MatrixError::IndexOutOfRange`] on a bad index. `m[(i, j)]`
/// indexes 0-based and panics like a slice.
///
/// # Examples
///
/// ```
/// use echelon::Matrix;
///
/// let a = Matrix::new(vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(a.dim(), (2, 2));
/// assert_eq!(a.get_entry(1, 2).unwrap(), 2.0);
/// assert_eq!(a[(1, 0)], 3.0);
///
/// let id = Matrix::<f64>::eye(3);
/// assert_eq!(id[(2, 2)], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Build a matrix from a list of rows.
    ///
    /// Returns [`MatrixError::Ragged`] if the rows differ in length.
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(MatrixError::Ragged {
                    row: i + 1,
                    expected: ncols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Create an `nrows x ncols` matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `slice.len() != nrows * ncols`.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self {
            data: row_major.to_vec(),
            nrows,
            ncols,
        }
    }

    /// Build a matrix whose columns are the given vectors.
    ///
    /// ```
    /// use echelon::{Matrix, Vector};
    /// let m = Matrix::from_cols(&[Vector::from_slice(&[1, 2]), Vector::from_slice(&[3, 4])]).unwrap();
    /// assert_eq!(m, Matrix::from_rows(2, 2, &[1, 3, 2, 4]));
    /// ```
    pub fn from_cols(cols: &[Vector<T>]) -> Result<Self, MatrixError> {
        let nrows = cols.first().map_or(0, Vector::len);
        for c in cols {
            c.check_len(nrows).map_err(|_| MatrixError::length_mismatch(nrows, c.len()))?;
        }
        Ok(Self::from_fn(nrows, cols.len(), |i, j| cols[j][i]))
    }

    /// Build a matrix whose rows are the given vectors.
    pub fn from_row_vectors(rows: &[Vector<T>]) -> Result<Self, MatrixError> {
        let ncols = rows.first().map_or(0, Vector::len);
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for (i, r) in rows.iter().enumerate() {
            if r.len() != ncols {
                return Err(MatrixError::Ragged {
                    row: i + 1,
                    expected: ncols,
                    got: r.len(),
                });
            }
            data.extend_from_slice(r.as_slice());
        }
        Ok(Self {
            data,
            nrows: rows.len(),
            ncols,
        })
    }
}

impl<T> Matrix<T> {
    /// `(rows, cols)`.
    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Create a matrix by calling `f(row, col)` for each element (0-based).
    ///
    /// ```
    /// use echelon::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| if i == j { 1.0_f64 } else { 0.0 });
    /// assert_eq!(m, Matrix::eye(3));
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Row-major view of the whole buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Row `i` (0-based) as a slice.
    #[inline]
    pub fn row_slice(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    #[inline]
    fn check_row(&self, i: usize) -> Result<usize, MatrixError> {
        if i == 0 || i > self.nrows {
            Err(MatrixError::IndexOutOfRange {
                index: i,
                bound: self.nrows,
            })
        } else {
            Ok(i - 1)
        }
    }

    #[inline]
    fn check_col(&self, j: usize) -> Result<usize, MatrixError> {
        if j == 0 || j > self.ncols {
            Err(MatrixError::IndexOutOfRange {
                index: j,
                bound: self.ncols,
            })
        } else {
            Ok(j - 1)
        }
    }
}

// ── 1-based accessors ───────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Row `i` (1-based).
    ///
    /// ```
    /// use echelon::{Matrix, Vector};
    /// let m = Matrix::from_rows(2, 2, &[1, 2, 3, 4]);
    /// assert_eq!(m.get_row(2).unwrap(), Vector::from_slice(&[3, 4]));
    /// assert!(m.get_row(0).is_err());
    /// ```
    pub fn get_row(&self, i: usize) -> Result<Vector<T>, MatrixError> {
        let r = self.check_row(i)?;
        Ok(Vector::from_slice(self.row_slice(r)))
    }

    /// Column `j` (1-based).
    pub fn get_col(&self, j: usize) -> Result<Vector<T>, MatrixError> {
        let c = self.check_col(j)?;
        Ok(self.col_vector(c))
    }

    /// Entry at row `i`, column `j` (1-based).
    pub fn get_entry(&self, i: usize, j: usize) -> Result<T, MatrixError> {
        let r = self.check_row(i)?;
        let c = self.check_col(j)?;
        Ok(self[(r, c)])
    }

    /// Replace row `i` (1-based). The new row must have `ncols` entries.
    pub fn set_row(&mut self, i: usize, row: &Vector<T>) -> Result<(), MatrixError> {
        let r = self.check_row(i)?;
        row.check_len(self.ncols)
            .map_err(|_| MatrixError::length_mismatch(self.ncols, row.len()))?;
        let n = self.ncols;
        self.data[r * n..(r + 1) * n].copy_from_slice(row.as_slice());
        Ok(())
    }

    /// Replace column `j` (1-based). The new column must have `nrows` entries.
    ///
    /// ```
    /// use echelon::{Matrix, Vector};
    /// let mut m = Matrix::from_rows(2, 2, &[1, 2, 3, 4]);
    /// m.set_col(1, &Vector::from_slice(&[9, 8])).unwrap();
    /// assert_eq!(m.get_row(2).unwrap(), Vector::from_slice(&[8, 4]));
    /// assert!(m.set_col(1, &Vector::from_slice(&[1])).is_err());
    /// ```
    pub fn set_col(&mut self, j: usize, col: &Vector<T>) -> Result<(), MatrixError> {
        let c = self.check_col(j)?;
        col.check_len(self.nrows)
            .map_err(|_| MatrixError::length_mismatch(self.nrows, col.len()))?;
        for (r, &v) in col.iter().enumerate() {
            self[(r, c)] = v;
        }
        Ok(())
    }

    /// Replace the entry at row `i`, column `j` (1-based).
    pub fn set_entry(&mut self, i: usize, j: usize, value: T) -> Result<(), MatrixError> {
        let r = self.check_row(i)?;
        let c = self.check_col(j)?;
        self[(r, c)] = value;
        Ok(())
    }

    /// All rows, top to bottom.
    pub fn row_space(&self) -> Vec<Vector<T>> {
        (0..self.nrows)
            .map(|r| Vector::from_slice(self.row_slice(r)))
            .collect()
    }

    /// All columns, left to right.
    pub fn col_space(&self) -> Vec<Vector<T>> {
        (0..self.ncols).map(|c| self.col_vector(c)).collect()
    }

    /// Column `c` (0-based).
    pub(crate) fn col_vector(&self, c: usize) -> Vector<T> {
        (0..self.nrows).map(|r| self[(r, c)]).collect()
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(col < self.ncols, "column {} out of bounds", col);
        &self.data[row * self.ncols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(col < self.ncols, "column {} out of bounds", col);
        &mut self.data[row * self.ncols + col]
    }
}

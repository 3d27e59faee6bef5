use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::traits::Scalar;

use super::vector::Vector;
use super::Matrix;

// ── Map ─────────────────────────────────────────────────────────────

impl<T: Copy> Matrix<T> {
    /// Apply a function to every element, producing a new matrix.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, 4.0, 9.0, 16.0]);
    /// let r = m.map(|x: f64| x.sqrt());
    /// assert_eq!(r[(0, 1)], 2.0);
    /// assert_eq!(r[(1, 1)], 4.0);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Swap two rows in place (0-based).
    ///
    /// ```
    /// use echelon::Matrix;
    /// let mut m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(1, 0)], 1.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.ncols;
            for j in 0..n {
                self.data.swap(a * n + j, b * n + j);
            }
        }
    }

    /// Copy of the matrix with one extra column appended on the right.
    pub(crate) fn augment(&self, col: &Vector<T>) -> Self {
        debug_assert_eq!(col.len(), self.nrows);
        let n = self.ncols;
        Matrix::from_fn(self.nrows, n + 1, |i, j| {
            if j < n {
                self[(i, j)]
            } else {
                col[i]
            }
        })
    }
}

// ── Diagonals ───────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// The `k`-th diagonal: `k = 0` is the main diagonal, `k > 0` lies above
    /// it and `k < 0` below. Empty if `k` falls outside the matrix.
    ///
    /// ```
    /// use echelon::{Matrix, Vector};
    /// let m = Matrix::from_rows(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// assert_eq!(m.diag(0), Vector::from_slice(&[1, 5, 9]));
    /// assert_eq!(m.diag(1), Vector::from_slice(&[2, 6]));
    /// assert_eq!(m.diag(-2), Vector::from_slice(&[7]));
    /// assert!(m.diag(3).is_empty());
    /// ```
    pub fn diag(&self, k: isize) -> Vector<T> {
        let offset = k.unsigned_abs();
        let (row0, col0) = if k >= 0 { (0, offset) } else { (offset, 0) };
        let mut out = Vec::new();
        let (mut i, mut j) = (row0, col0);
        while i < self.nrows && j < self.ncols {
            out.push(self[(i, j)]);
            i += 1;
            j += 1;
        }
        Vector::from_vec(out)
    }

    /// Sum of the main diagonal.
    pub fn trace(&self) -> T {
        self.diag(0).iter().fold(T::zero(), |acc, &x| acc + x)
    }
}

// ── Display ─────────────────────────────────────────────────────────

/// One bracketed row per line, entries right-aligned per column.
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;

        let mut widths: Vec<usize> = alloc::vec![0; n];
        for (j, width) in widths.iter_mut().enumerate() {
            for i in 0..m {
                let w = WriteCounting::count(|wc| write!(wc, "{}", self[(i, j)]));
                *width = (*width).max(w);
            }
        }

        for i in 0..m {
            write!(f, "[")?;
            for (j, width) in widths.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:>width$}", self[(i, j)], width = *width)?;
            }
            write!(f, "]")?;
            if i + 1 < m {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}

use alloc::vec;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::traits::{LinalgScalar, Scalar};

use super::vector::Vector;
use super::{Matrix, MatrixError};

// ── Checked arithmetic ──────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    fn check_same_shape(&self, rhs: &Self) -> Result<(), MatrixError> {
        if self.dim() == rhs.dim() {
            Ok(())
        } else {
            Err(MatrixError::DimensionMismatch {
                expected: self.dim(),
                got: rhs.dim(),
            })
        }
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self, MatrixError> {
        self.check_same_shape(rhs)?;
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        })
    }

    /// Elementwise sum. Shapes must match.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1, 2, 3, 4]);
    /// let b = Matrix::from_rows(2, 2, &[5, 6, 7, 8]);
    /// assert_eq!(a.checked_add(&b).unwrap(), Matrix::from_rows(2, 2, &[6, 8, 10, 12]));
    /// assert!(a.checked_add(&Matrix::zeros(2, 3)).is_err());
    /// ```
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, MatrixError> {
        self.zip_with(rhs, |a, b| a + b)
    }

    /// Elementwise difference. Shapes must match.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, MatrixError> {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Multiply every entry by `s`.
    pub fn scale(&self, s: T) -> Self {
        self.map(|x| x * s)
    }

    /// Matrix product `(m×k)·(k×n) → (m×n)`.
    ///
    /// Entry `(i, j)` is the sum of the elementwise products of row `i` of
    /// `self` and column `j` of `rhs`.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
    /// let b = Matrix::from_rows(3, 1, &[1, 0, -1]);
    /// assert_eq!(a.checked_mul(&b).unwrap(), Matrix::from_rows(2, 1, &[-2, -2]));
    /// assert!(b.checked_mul(&b).is_err());
    /// ```
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, MatrixError> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::DimensionMismatch {
                expected: (self.ncols, rhs.ncols),
                got: rhs.dim(),
            });
        }
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        for i in 0..m {
            for k in 0..n {
                let a_ik = self.data[i * n + k];
                for j in 0..p {
                    data[i * p + j] = data[i * p + j] + a_ik * rhs.data[k * p + j];
                }
            }
        }
        Ok(Matrix {
            data,
            nrows: m,
            ncols: p,
        })
    }

    /// Matrix-vector product. `v.len()` must equal `ncols`.
    pub fn checked_mul_vector(&self, v: &Vector<T>) -> Result<Vector<T>, MatrixError> {
        v.check_len(self.ncols)
            .map_err(|_| MatrixError::length_mismatch(self.ncols, v.len()))?;
        Ok((0..self.nrows)
            .map(|i| {
                self.row_slice(i)
                    .iter()
                    .zip(v.iter())
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect())
    }

    /// Transpose: (M×N) → (N×M). Always a fresh buffer.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!(t.dim(), (3, 2));
    /// assert_eq!(t[(1, 0)], 2.0);
    /// ```
    pub fn transpose(&self) -> Self {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }
}

impl<T: LinalgScalar> Matrix<T> {
    /// Conjugate transpose `Aᴴ`. Same as [`transpose`](Self::transpose) for
    /// real elements.
    pub fn adjoint(&self) -> Self {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)].conj())
    }
}

// ── Operators ───────────────────────────────────────────────────────

fn shape_panic(op: &str, lhs: (usize, usize), rhs: (usize, usize)) -> ! {
    panic!(
        "dimension mismatch: {}x{} {} {}x{}",
        lhs.0, lhs.1, op, rhs.0, rhs.1
    )
}

macro_rules! impl_matrix_binop {
    ($trait:ident, $method:ident, $checked:ident, $sym:literal) => {
        impl<T: Scalar> $trait<&Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                match self.$checked(rhs) {
                    Ok(m) => m,
                    Err(_) => shape_panic($sym, self.dim(), rhs.dim()),
                }
            }
        }

        impl<T: Scalar> $trait for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                (&self).$method(&rhs)
            }
        }

        impl<T: Scalar> $trait<&Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                (&self).$method(rhs)
            }
        }

        impl<T: Scalar> $trait<Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                self.$method(&rhs)
            }
        }
    };
}

impl_matrix_binop!(Add, add, checked_add, "+");
impl_matrix_binop!(Sub, sub, checked_sub, "-");
impl_matrix_binop!(Mul, mul, checked_mul, "*");

// ── Matrix * Vector → Vector ────────────────────────────────────────

impl<T: Scalar> Mul<&Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: &Vector<T>) -> Vector<T> {
        match self.checked_mul_vector(rhs) {
            Ok(v) => v,
            Err(_) => shape_panic("*", self.dim(), (rhs.len(), 1)),
        }
    }
}

impl<T: Scalar> Mul<Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: Vector<T>) -> Vector<T> {
        self * &rhs
    }
}

impl<T: Scalar> Mul<Vector<T>> for Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: Vector<T>) -> Vector<T> {
        &self * &rhs
    }
}

// ── Scalar multiplication / division ────────────────────────────────

impl<T: Scalar> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Div<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn div(self, rhs: T) -> Matrix<T> {
        self.map(|x| x / rhs)
    }
}

impl<T: Scalar> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|x| T::zero() - x)
    }
}

macro_rules! impl_scalar_mul_matrix {
    ($($t:ty),*) => {
        $(
            impl Mul<Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                fn mul(self, rhs: Matrix<$t>) -> Matrix<$t> {
                    rhs.scale(self)
                }
            }

            impl Mul<&Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                fn mul(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                    rhs.scale(self)
                }
            }
        )*
    };
}

impl_scalar_mul_matrix!(f32, f64, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);

        let c = &a + &b;
        assert_eq!(c[(0, 0)], 6.0);
        assert_eq!(c[(1, 1)], 12.0);

        let d = &b - &a;
        assert_eq!(d[(0, 0)], 4.0);
        assert_eq!(d[(1, 1)], 4.0);
    }

    #[test]
    fn checked_shape_errors() {
        let a: Matrix<f64> = Matrix::zeros(2, 3);
        let b: Matrix<f64> = Matrix::zeros(3, 2);
        assert_eq!(
            a.checked_add(&b),
            Err(MatrixError::DimensionMismatch {
                expected: (2, 3),
                got: (3, 2)
            })
        );
        assert!(a.checked_sub(&b).is_err());
        assert!(a.checked_mul(&a).is_err());
        assert!(a.checked_mul(&b).is_ok());
        assert!(a.checked_mul_vector(&Vector::zeros(2)).is_err());
    }

    #[test]
    #[should_panic(expected = "dimension mismatch: 2x3 * 2x3")]
    fn mul_operator_panics_on_inner_mismatch() {
        let a: Matrix<f64> = Matrix::zeros(2, 3);
        let _ = &a * &a;
    }

    #[test]
    fn matrix_multiply() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        let c = &a * &b;
        assert_eq!(c, Matrix::from_rows(2, 2, &[19.0, 22.0, 43.0, 50.0]));
    }

    #[test]
    fn rectangular_multiply() {
        let a = Matrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
        let b = Matrix::from_rows(3, 2, &[7, 8, 9, 10, 11, 12]);
        let c = a * b;
        assert_eq!(c.dim(), (2, 2));
        assert_eq!(c, Matrix::from_rows(2, 2, &[58, 64, 139, 154]));
    }

    #[test]
    fn matrix_vector_product() {
        let a = Matrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
        let v = Vector::from_slice(&[1, 1, 1]);
        assert_eq!(&a * &v, Vector::from_slice(&[6, 15]));
    }

    #[test]
    fn scalar_multiply_both_sides() {
        let a = Matrix::from_rows(1, 2, &[1.5_f64, -2.0]);
        assert_eq!(&a * 2.0, Matrix::from_rows(1, 2, &[3.0, -4.0]));
        assert_eq!(2.0 * &a, Matrix::from_rows(1, 2, &[3.0, -4.0]));
        assert_eq!(&a / 0.5, Matrix::from_rows(1, 2, &[3.0, -4.0]));
        assert_eq!(-a, Matrix::from_rows(1, 2, &[-1.5, 2.0]));
    }

    #[test]
    fn transpose_twice_is_identity() {
        let a = Matrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
        let t = a.transpose();
        assert_eq!(t.dim(), (3, 2));
        assert_eq!(t.get_row(1).unwrap(), a.get_col(1).unwrap());
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn transpose_does_not_alias() {
        let a = Matrix::from_rows(2, 2, &[1, 2, 3, 4]);
        let mut t = a.transpose();
        t.set_entry(1, 1, 100).unwrap();
        assert_eq!(a[(0, 0)], 1);
    }

    #[test]
    fn adjoint_of_real_is_transpose() {
        let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.adjoint(), a.transpose());
    }
}

use log::debug;

use crate::linalg::{gram_schmidt, LinalgError};
use crate::matrix::{Matrix, MatrixError, Vector};
use crate::traits::LinalgScalar;

/// Thin QR decomposition built by Gram-Schmidt on the columns of `A`.
///
/// For an `m x n` matrix with linearly independent columns, `Q` is `m x n`
/// with orthonormal columns and `R` is `n x n` upper triangular with
/// `R[i][j] = ⟨qᵢ, aⱼ⟩`, so that `A = Q·R`.
///
/// # Example
///
/// ```
/// use echelon::{Matrix, Vector};
/// use echelon::linalg::GramSchmidtQr;
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 1.0, 0.0, 1.0]);
/// let qr = GramSchmidtQr::new(&a).unwrap();
/// let x = qr.solve(&Vector::from_slice(&[3.0, 1.0])).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct GramSchmidtQr<T: LinalgScalar> {
    q: Matrix<T>,
    r: Matrix<T>,
    tol: T::Real,
}

impl<T: LinalgScalar> GramSchmidtQr<T> {
    /// Decompose `a`. Fails with [`LinalgError::LinearlyDependent`] if the
    /// columns of `a` are dependent (always the case for a wide matrix).
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        let (m, n) = a.dim();
        let cols = a.col_space();
        let basis = gram_schmidt(&cols)?;

        let q = if n == 0 {
            Matrix::zeros(m, 0)
        } else {
            Matrix::from_cols(&basis)?
        };

        let mut r = Matrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                r[(i, j)] = basis[i].inner(&cols[j])?;
            }
        }

        Ok(Self {
            q,
            r,
            tol: T::lepsilon() * a.frobenius_norm(),
        })
    }

    /// The `m x n` factor with orthonormal columns.
    pub fn q(&self) -> &Matrix<T> {
        &self.q
    }

    /// The `n x n` upper-triangular factor.
    pub fn r(&self) -> &Matrix<T> {
        &self.r
    }

    /// Solve `A x = b` through `R x = Qᴴ b` and back substitution.
    ///
    /// For a tall `A` this is the least-squares solution. A diagonal entry
    /// of `R` below machine epsilon scaled by `‖A‖_F` is
    /// [`LinalgError::Singular`].
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        let (m, n) = self.q.dim();
        if b.len() != m {
            return Err(MatrixError::length_mismatch(m, b.len()).into());
        }

        let y = self.q.adjoint().checked_mul_vector(b)?;

        let mut x = Vector::zeros(n);
        for i in (0..n).rev() {
            let d = self.r[(i, i)];
            if d == T::zero() || d.modulus() < self.tol {
                debug!("qr solve: R[{}][{}] vanishes", i + 1, i + 1);
                return Err(LinalgError::Singular);
            }
            let mut s = y[i];
            for j in (i + 1)..n {
                s = s - self.r[(i, j)] * x[j];
            }
            x[i] = s / d;
        }
        Ok(x)
    }
}

/// Solve `A x = b` with a Gram-Schmidt QR decomposition of `A`.
///
/// The columns of `A` must be linearly independent. `b` must have one entry
/// per row of `A`.
///
/// ```
/// use echelon::{Matrix, Vector};
/// use echelon::linalg::{qr_solve, LinalgError};
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 4.0]);
/// let x = qr_solve(&a, &Vector::from_slice(&[2.0, 2.0])).unwrap();
/// assert!((x[1] - 0.5).abs() < 1e-12);
///
/// let dependent = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(
///     qr_solve(&dependent, &Vector::from_slice(&[1.0, 1.0])),
///     Err(LinalgError::LinearlyDependent),
/// );
/// ```
pub fn qr_solve<T: LinalgScalar>(a: &Matrix<T>, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
    GramSchmidtQr::new(a)?.solve(b)
}

pub(crate) mod det;
pub(crate) mod echelon;
pub(crate) mod eigen;
pub(crate) mod gram_schmidt;
pub(crate) mod qr;
pub(crate) mod solve;
pub(crate) mod svd;
pub(crate) mod symmetric_eigen;

pub use det::{determinant, determinant_lu, submatrix};
pub use echelon::{is_independent, rank, rank_with_tol, row_echelon, row_echelon_with_tol, RANK_TOLERANCE};
pub use eigen::{eigen, sort_descending, EigenPair, EigenSolver, SymmetricEigen};
pub use gram_schmidt::gram_schmidt;
pub use qr::{qr_solve, GramSchmidtQr};
pub use solve::{gauss_solve, GaussSolution};
pub use svd::{svd, Svd};

use crate::matrix::MatrixError;

/// Errors from linear algebra operations.
///
/// Shape and index problems surface as [`LinalgError::Matrix`], so `?`
/// works across the matrix API and the algorithms alike.
///
/// ```
/// use echelon::Matrix;
/// use echelon::linalg::{determinant, LinalgError};
///
/// let rect = Matrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
/// assert_eq!(
///     determinant(&rect).unwrap_err(),
///     LinalgError::NotSquare { rows: 2, cols: 3 },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Operand shapes or indices are invalid.
    Matrix(MatrixError),
    /// Operation requires a square matrix.
    NotSquare { rows: usize, cols: usize },
    /// Input vectors (or matrix columns) are linearly dependent.
    LinearlyDependent,
    /// A zero pivot made the triangular solve impossible.
    Singular,
    /// The eigensolver requires a symmetric (Hermitian) matrix.
    NotSymmetric,
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
}

impl From<MatrixError> for LinalgError {
    fn from(e: MatrixError) -> Self {
        LinalgError::Matrix(e)
    }
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Matrix(e) => write!(f, "{}", e),
            LinalgError::NotSquare { rows, cols } => write!(
                f,
                "matrix is {}x{}, operation requires a square matrix",
                rows, cols
            ),
            LinalgError::LinearlyDependent => write!(f, "vectors are not linearly independent"),
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::NotSymmetric => write!(f, "matrix is not symmetric"),
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinalgError::Matrix(e) => Some(e),
            _ => None,
        }
    }
}

pub(crate) fn require_square<T>(a: &crate::Matrix<T>) -> Result<usize, LinalgError> {
    let (rows, cols) = a.dim();
    if rows == cols {
        Ok(rows)
    } else {
        Err(LinalgError::NotSquare { rows, cols })
    }
}

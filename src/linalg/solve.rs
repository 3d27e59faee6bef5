use log::debug;

use crate::linalg::echelon::zero_threshold;
use crate::linalg::{rank_with_tol, LinalgError};
use crate::matrix::{Matrix, MatrixError, Vector};
use crate::traits::LinalgScalar;

/// Classification of a linear system `A x = b`.
#[derive(Debug, Clone, PartialEq)]
pub enum GaussSolution<T> {
    /// `rank(A) < rank([A|b])`: the system is inconsistent.
    NoSolution,
    /// `rank(A) == rank([A|b]) == cols(A)`.
    ///
    /// The carried vector is always empty; use
    /// [`qr_solve`](crate::linalg::qr_solve) to compute the solution itself.
    Unique(Vector<T>),
    /// Consistent with `free_variables = cols(A) - rank(A)` free parameters.
    Infinite { free_variables: usize },
}

/// Classify `A x = b` by comparing the rank of `A` with the rank of the
/// augmented matrix `[A|b]`.
///
/// Returns [`MatrixError::DimensionMismatch`] if `b` does not have one entry
/// per row of `A`.
///
/// ```
/// use echelon::{Matrix, Vector};
/// use echelon::linalg::{gauss_solve, GaussSolution};
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 1.0, 2.0, 2.0]);
/// let inconsistent = gauss_solve(&a, &Vector::from_slice(&[1.0, 3.0])).unwrap();
/// assert_eq!(inconsistent, GaussSolution::NoSolution);
///
/// let line = gauss_solve(&a, &Vector::from_slice(&[1.0, 2.0])).unwrap();
/// assert_eq!(line, GaussSolution::Infinite { free_variables: 1 });
/// ```
pub fn gauss_solve<T: LinalgScalar>(
    a: &Matrix<T>,
    b: &Vector<T>,
) -> Result<GaussSolution<T>, LinalgError> {
    let (m, n) = a.dim();
    if b.len() != m {
        return Err(MatrixError::length_mismatch(m, b.len()).into());
    }

    // One threshold for both so rank(A) <= rank([A|b]) holds.
    let aug = a.augment(b);
    let tol = zero_threshold(&aug);
    let rank_a = rank_with_tol(a, tol);
    let rank_aug = rank_with_tol(&aug, tol);

    let solution = if rank_a < rank_aug {
        debug!("gauss_solve: inconsistent, rank {} < augmented rank {}", rank_a, rank_aug);
        GaussSolution::NoSolution
    } else if rank_a == n {
        debug!("gauss_solve: unique solution, rank {}", rank_a);
        GaussSolution::Unique(Vector::empty())
    } else {
        debug!("gauss_solve: {} free variables", n - rank_a);
        GaussSolution::Infinite {
            free_variables: n - rank_a,
        }
    };
    Ok(solution)
}

use alloc::vec::Vec;
use core::cmp::Ordering;
use log::debug;
use num_traits::Float;

use crate::linalg::symmetric_eigen::{tridiagonal_qr, tridiagonalize, Tridiagonal};
use crate::linalg::{require_square, LinalgError};
use crate::matrix::{Matrix, Vector};
use crate::traits::LinalgScalar;

/// An eigenvalue with one of its eigenvectors.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenPair<T> {
    pub value: T,
    pub vector: Vector<T>,
}

/// A dense eigensolver.
///
/// Implementations return pairs covering the whole spectrum of `a`, repeated
/// eigenvalues once per multiplicity, in no particular order. [`Svd`] is
/// generic over this trait, so any solver can stand in for the bundled
/// [`SymmetricEigen`].
///
/// [`Svd`]: crate::linalg::Svd
pub trait EigenSolver<T: LinalgScalar> {
    fn eigen(&self, a: &Matrix<T>) -> Result<Vec<EigenPair<T>>, LinalgError>;
}

/// Eigensolver for real symmetric and complex Hermitian matrices.
///
/// Householder tridiagonalization followed by implicit QR iteration with
/// Wilkinson shifts. Eigenvalues come back real and ascending, eigenvectors
/// orthonormal. Fails with [`LinalgError::NotSquare`],
/// [`LinalgError::NotSymmetric`], or [`LinalgError::ConvergenceFailure`]
/// after `30·n` QR sweeps.
///
/// ```
/// use echelon::Matrix;
/// use echelon::linalg::{EigenSolver, SymmetricEigen};
///
/// let a = Matrix::from_rows(2, 2, &[5.0_f64, 2.0, 2.0, 2.0]);
/// let pairs = SymmetricEigen.eigen(&a).unwrap();
/// assert!((pairs[0].value - 1.0).abs() < 1e-10);
/// assert!((pairs[1].value - 6.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetricEigen;

impl<T: LinalgScalar> EigenSolver<T> for SymmetricEigen {
    fn eigen(&self, a: &Matrix<T>) -> Result<Vec<EigenPair<T>>, LinalgError> {
        let n = require_square(a)?;
        if !is_hermitian(a) {
            return Err(LinalgError::NotSymmetric);
        }
        if n == 0 {
            return Ok(Vec::new());
        }

        let Tridiagonal {
            mut diag,
            mut off_diag,
            mut q,
        } = tridiagonalize(a);
        let sweeps = tridiagonal_qr(&mut diag, &mut off_diag, &mut q, 30 * n)?;
        debug!("symmetric eigen: {}x{} converged after {} QR sweeps", n, n, sweeps);

        Ok(diag
            .into_iter()
            .enumerate()
            .map(|(j, value)| EigenPair {
                value: T::from_real(value),
                vector: q.col_vector(j),
            })
            .collect())
    }
}

/// `a == aᴴ` up to `sqrt(ε)` relative to the largest entry.
fn is_hermitian<T: LinalgScalar>(a: &Matrix<T>) -> bool {
    let n = a.nrows();
    let tol = T::lepsilon().sqrt() * a.max_abs();
    for i in 0..n {
        for j in i..n {
            if (a[(i, j)] - a[(j, i)].conj()).modulus() > tol {
                return false;
            }
        }
    }
    true
}

/// Eigenpairs of a symmetric (Hermitian) matrix with [`SymmetricEigen`].
///
/// Only Hermitian input is accepted: any other square matrix is rejected
/// with [`LinalgError::NotSymmetric`]. For general (non-Hermitian) matrices,
/// implement [`EigenSolver`] and call it directly or pass it to
/// [`Svd::with_solver`](crate::linalg::Svd::with_solver).
///
/// ```
/// use echelon::Matrix;
/// use echelon::linalg::{eigen, LinalgError};
///
/// let a = Matrix::from_rows(2, 2, &[3.0_f64, 1.0, 1.0, 3.0]);
/// let pairs = eigen(&a).unwrap();
/// assert_eq!(pairs.len(), 2);
///
/// let skew = Matrix::from_rows(2, 2, &[0.0_f64, 1.0, -1.0, 0.0]);
/// assert_eq!(eigen(&skew).unwrap_err(), LinalgError::NotSymmetric);
/// ```
pub fn eigen<T: LinalgScalar>(a: &Matrix<T>) -> Result<Vec<EigenPair<T>>, LinalgError> {
    SymmetricEigen.eigen(a)
}

/// Sort eigenpairs by eigenvalue, largest first: real part, then modulus.
///
/// ```
/// use echelon::Vector;
/// use echelon::linalg::{sort_descending, EigenPair};
///
/// let mut pairs: Vec<EigenPair<f64>> = [1.0, -4.0, 3.0]
///     .iter()
///     .map(|&value| EigenPair { value, vector: Vector::from_slice(&[value]) })
///     .collect();
/// sort_descending(&mut pairs);
/// let order: Vec<f64> = pairs.iter().map(|p| p.value).collect();
/// assert_eq!(order, vec![3.0, 1.0, -4.0]);
/// ```
pub fn sort_descending<T: LinalgScalar>(pairs: &mut [EigenPair<T>]) {
    pairs.sort_by(|a, b| descending(a.value, b.value));
}

fn descending<T: LinalgScalar>(a: T, b: T) -> Ordering {
    let by_re = b.re().partial_cmp(&a.re()).unwrap_or(Ordering::Equal);
    by_re.then_with(|| {
        b.modulus()
            .partial_cmp(&a.modulus())
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    #[test]
    fn pairs_satisfy_definition() {
        let a = Matrix::from_rows(3, 3, &[2.0_f64, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0]);
        let pairs = eigen(&a).unwrap();
        assert_eq!(pairs.len(), 3);
        for p in &pairs {
            let av = &a * &p.vector;
            let lv = p.vector.scale(p.value);
            assert!((av - lv).norm() < TOL, "Av != λv for λ = {}", p.value);
            assert_near(p.vector.norm(), 1.0, TOL, "unit eigenvector");
        }
    }

    #[test]
    fn rejects_bad_shapes() {
        let rect = Matrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(eigen(&rect), Err(LinalgError::NotSquare { rows: 2, cols: 3 }));

        let nonsym = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        assert_eq!(eigen(&nonsym), Err(LinalgError::NotSymmetric));
    }

    #[test]
    fn empty_and_scalar() {
        assert!(eigen(&Matrix::<f64>::zeros(0, 0)).unwrap().is_empty());
        let one = eigen(&Matrix::from_rows(1, 1, &[7.0_f64])).unwrap();
        assert_eq!(one[0].value, 7.0);
        assert_eq!(one[0].vector, Vector::from_slice(&[1.0]));
    }

    #[test]
    fn descending_order() {
        let a = Matrix::from_rows(3, 3, &[1.0_f64, 0.0, 0.0, 0.0, -5.0, 0.0, 0.0, 0.0, 4.0]);
        let mut pairs = eigen(&a).unwrap();
        sort_descending(&mut pairs);
        let vals: Vec<f64> = pairs.iter().map(|p| p.value).collect();
        assert_eq!(vals, alloc::vec![4.0, 1.0, -5.0]);
    }

    #[test]
    fn custom_solver_plugs_in() {
        struct Diagonal;
        impl EigenSolver<f64> for Diagonal {
            fn eigen(&self, a: &Matrix<f64>) -> Result<Vec<EigenPair<f64>>, LinalgError> {
                let n = require_square(a)?;
                Ok((0..n)
                    .map(|i| EigenPair {
                        value: a[(i, i)],
                        vector: Matrix::<f64>::eye(n).col_vector(i),
                    })
                    .collect())
            }
        }
        let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 9.0]);
        let pairs = Diagonal.eigen(&a).unwrap();
        assert_eq!(pairs[1].value, 9.0);
    }
}

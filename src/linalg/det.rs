use log::trace;
use num_traits::Zero;

use crate::linalg::{require_square, LinalgError};
use crate::matrix::{Matrix, MatrixError};
use crate::traits::{LinalgScalar, Scalar};

/// `a` with row `i` and column `j` removed (1-based).
///
/// ```
/// use echelon::Matrix;
/// use echelon::linalg::submatrix;
///
/// let a = Matrix::from_rows(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
/// assert_eq!(submatrix(&a, 2, 2).unwrap(), Matrix::from_rows(2, 2, &[1, 3, 7, 9]));
/// assert!(submatrix(&a, 4, 1).is_err());
/// ```
pub fn submatrix<T: Scalar>(a: &Matrix<T>, i: usize, j: usize) -> Result<Matrix<T>, MatrixError> {
    let (rows, cols) = a.dim();
    if i == 0 || i > rows {
        return Err(MatrixError::IndexOutOfRange { index: i, bound: rows });
    }
    if j == 0 || j > cols {
        return Err(MatrixError::IndexOutOfRange { index: j, bound: cols });
    }
    Ok(minor(a, i - 1, j - 1))
}

/// 0-based minor; indices already validated.
fn minor<T: Scalar>(a: &Matrix<T>, row: usize, col: usize) -> Matrix<T> {
    let (rows, cols) = a.dim();
    Matrix::from_fn(rows - 1, cols - 1, |r, c| {
        let src_r = if r < row { r } else { r + 1 };
        let src_c = if c < col { c } else { c + 1 };
        a[(src_r, src_c)]
    })
}

/// Determinant by cofactor expansion along the first row.
///
/// Works for every [`Scalar`], integers included, so integer matrices get an
/// exact result. The empty matrix has determinant 1. Cost grows as `n!`;
/// use [`determinant_lu`] for anything beyond small matrices.
///
/// ```
/// use echelon::Matrix;
/// use echelon::linalg::determinant;
///
/// let a = Matrix::from_rows(3, 3, &[6, 1, 1, 4, -2, 5, 2, 8, 7]);
/// assert_eq!(determinant(&a).unwrap(), -306);
/// ```
pub fn determinant<T: Scalar>(a: &Matrix<T>) -> Result<T, LinalgError> {
    require_square(a)?;
    Ok(cofactor_expansion(a))
}

fn cofactor_expansion<T: Scalar>(a: &Matrix<T>) -> T {
    match a.nrows() {
        0 => T::one(),
        1 => a[(0, 0)],
        2 => a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)],
        n => {
            let mut det = T::zero();
            for j in 0..n {
                let entry = a[(0, j)];
                if entry == T::zero() {
                    continue;
                }
                let term = entry * cofactor_expansion(&minor(a, 0, j));
                det = if j % 2 == 0 { det + term } else { det - term };
            }
            det
        }
    }
}

/// Determinant via Gaussian elimination with partial pivoting, `O(n³)`.
///
/// Returns exactly zero once no pivot exceeds machine epsilon times the
/// largest entry modulus of `a`.
///
/// ```
/// use echelon::Matrix;
/// use echelon::linalg::determinant_lu;
///
/// let a = Matrix::from_rows(2, 2, &[3.0_f64, 8.0, 4.0, 6.0]);
/// assert!((determinant_lu(&a).unwrap() + 14.0).abs() < 1e-12);
/// ```
pub fn determinant_lu<T: LinalgScalar>(a: &Matrix<T>) -> Result<T, LinalgError> {
    let n = require_square(a)?;
    let mut u = a.clone();
    // A pivot this small relative to the largest entry means a zero column.
    let singular_below = T::lepsilon() * a.max_abs();
    let mut det = T::one();

    for k in 0..n {
        let (p, pivot_mod) = (k..n)
            .map(|r| (r, u[(r, k)].modulus()))
            .fold((k, <T::Real as Zero>::zero()), |best, cur| {
                if cur.1 > best.1 {
                    cur
                } else {
                    best
                }
            });

        if pivot_mod <= singular_below {
            trace!("determinant_lu: no pivot in column {}", k);
            return Ok(T::zero());
        }
        if p != k {
            u.swap_rows(k, p);
            det = T::zero() - det;
        }

        let pivot = u[(k, k)];
        det = det * pivot;
        for r in (k + 1)..n {
            let l = u[(r, k)] / pivot;
            if l == T::zero() {
                continue;
            }
            for j in (k + 1)..n {
                u[(r, j)] = u[(r, j)] - l * u[(k, j)];
            }
        }
    }

    Ok(det)
}

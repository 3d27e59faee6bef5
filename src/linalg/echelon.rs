use log::{debug, trace};
use num_traits::Zero;

use crate::linalg::LinalgError;
use crate::matrix::{Matrix, Vector};
use crate::traits::{real_const, LinalgScalar};

/// Relative zero threshold used by [`rank`]: entries with modulus at or
/// below `RANK_TOLERANCE · max|aᵢⱼ|` are treated as zero.
pub const RANK_TOLERANCE: f64 = 1e-8;

/// Row-echelon form of `a`.
///
/// Works on a copy; `a` is untouched. Columns are visited left to right with
/// a pivot-row cursor: the first nonzero entry at or below the cursor is
/// swapped up, its row is scaled so the pivot is 1, and the entries below it
/// are eliminated. A column with no nonzero entry is skipped. Entries above
/// pivots are left alone (this is not the reduced form).
///
/// ```
/// use echelon::Matrix;
/// use echelon::linalg::row_echelon;
///
/// let a = Matrix::from_rows(2, 3, &[2.0_f64, 4.0, 6.0, 1.0, 3.0, 5.0]);
/// let r = row_echelon(&a);
/// assert_eq!(r, Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 0.0, 1.0, 2.0]));
/// ```
pub fn row_echelon<T: LinalgScalar>(a: &Matrix<T>) -> Matrix<T> {
    row_echelon_with_tol(a, <T::Real as Zero>::zero())
}

/// Row-echelon form where entries with modulus `<= tol` do not qualify as
/// pivots and are zeroed when their column is skipped.
pub fn row_echelon_with_tol<T: LinalgScalar>(a: &Matrix<T>, tol: T::Real) -> Matrix<T> {
    let mut m = a.clone();
    let (rows, cols) = m.dim();
    let mut pivot_row = 0;

    for col in 0..cols {
        if pivot_row >= rows {
            break;
        }

        let Some(p) = (pivot_row..rows).find(|&r| m[(r, col)].modulus() > tol) else {
            trace!("row_echelon: column {} has no pivot", col);
            for r in pivot_row..rows {
                m[(r, col)] = T::zero();
            }
            continue;
        };
        trace!("row_echelon: pivot for column {} in row {}", col, p);

        m.swap_rows(pivot_row, p);

        let pivot = m[(pivot_row, col)];
        for j in (col + 1)..cols {
            m[(pivot_row, j)] = m[(pivot_row, j)] / pivot;
        }
        m[(pivot_row, col)] = T::one();

        for r in (pivot_row + 1)..rows {
            let factor = m[(r, col)];
            if factor == T::zero() {
                continue;
            }
            for j in (col + 1)..cols {
                m[(r, j)] = m[(r, j)] - factor * m[(pivot_row, j)];
            }
            m[(r, col)] = T::zero();
        }

        pivot_row += 1;
    }

    m
}

/// Rank of `a`: the number of nonzero rows of its row-echelon form, where
/// entries with modulus at or below [`RANK_TOLERANCE`] times the largest
/// entry modulus of `a` count as zero. Scaling `a` does not change its rank.
///
/// ```
/// use echelon::Matrix;
/// use echelon::linalg::rank;
///
/// assert_eq!(rank(&Matrix::<f64>::zeros(3, 4)), 0);
/// assert_eq!(rank(&Matrix::<f64>::eye(4)), 4);
/// assert_eq!(rank(&Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0])), 1);
/// ```
pub fn rank<T: LinalgScalar>(a: &Matrix<T>) -> usize {
    rank_with_tol(a, zero_threshold(a))
}

/// Absolute zero threshold [`rank`] uses for `a`.
pub(crate) fn zero_threshold<T: LinalgScalar>(a: &Matrix<T>) -> T::Real {
    real_const::<T>(RANK_TOLERANCE) * a.max_abs()
}

/// [`rank`] with an explicit absolute zero tolerance.
pub fn rank_with_tol<T: LinalgScalar>(a: &Matrix<T>, tol: T::Real) -> usize {
    let r = row_echelon_with_tol(a, tol);
    let count = (0..r.nrows())
        .filter(|&i| r.row_slice(i).iter().any(|x| x.modulus() > tol))
        .count();
    debug!("rank of {}x{} matrix: {}", a.nrows(), a.ncols(), count);
    count
}

/// Whether `vectors` are linearly independent: the matrix with the vectors
/// as rows has rank equal to the vector count. The empty set is independent.
///
/// Vectors of different lengths are a [`MatrixError::Ragged`] error.
///
/// [`MatrixError::Ragged`]: crate::MatrixError::Ragged
pub fn is_independent<T: LinalgScalar>(vectors: &[Vector<T>]) -> Result<bool, LinalgError> {
    if vectors.is_empty() {
        return Ok(true);
    }
    let m = Matrix::from_row_vectors(vectors)?;
    Ok(rank(&m) == vectors.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixError;

    #[test]
    fn echelon_of_identity_is_identity() {
        let id: Matrix<f64> = Matrix::eye(3);
        assert_eq!(row_echelon(&id), id);
    }

    #[test]
    fn echelon_swaps_zero_pivot() {
        let a = Matrix::from_rows(2, 2, &[0.0_f64, 2.0, 4.0, 6.0]);
        let r = row_echelon(&a);
        assert_eq!(r, Matrix::from_rows(2, 2, &[1.0, 1.5, 0.0, 1.0]));
    }

    #[test]
    fn echelon_skips_empty_column() {
        let a = Matrix::from_rows(3, 3, &[0.0_f64, 1.0, 2.0, 0.0, 2.0, 4.0, 0.0, 3.0, 7.0]);
        let r = row_echelon(&a);
        assert_eq!(
            r,
            Matrix::from_rows(3, 3, &[0.0, 1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0])
        );
        assert_eq!(rank(&a), 2);
    }

    #[test]
    fn echelon_does_not_mutate_input() {
        let a = Matrix::from_rows(2, 2, &[2.0_f64, 4.0, 1.0, 3.0]);
        let before = a.clone();
        let _ = row_echelon(&a);
        assert_eq!(a, before);
    }

    #[test]
    fn echelon_is_not_reduced() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 1.0, 0.0, 1.0]);
        let r = row_echelon(&a);
        assert_eq!(r[(0, 1)], 1.0);
    }

    #[test]
    fn wide_and_tall_ranks() {
        let wide = Matrix::from_rows(2, 4, &[1.0_f64, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(rank(&wide), 1);
        assert_eq!(rank(&wide.transpose()), 1);

        let tall = Matrix::from_rows(3, 2, &[1.0_f64, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(rank(&tall), 2);
    }

    #[test]
    fn rank_absorbs_rounding_noise() {
        let a = Matrix::from_rows(2, 2, &[0.1_f64, 0.2, 0.3, 0.6]);
        assert_eq!(rank(&a), 1);

        let nearly = Matrix::from_rows(2, 2, &[1.0_f64, 1.0, 1.0, 1.0 + 1e-12]);
        assert_eq!(rank(&nearly), 1);
        assert_eq!(rank_with_tol(&nearly, 0.0), 2);
    }

    #[test]
    fn rank_ignores_scale() {
        let tiny: Matrix<f64> = Matrix::eye(2).scale(1e-9);
        assert_eq!(rank(&tiny), 2);
        assert_eq!(rank(&Matrix::<f64>::eye(3).scale(1e12)), 3);

        let nearly = Matrix::from_rows(2, 2, &[1e-9_f64, 1e-9, 1e-9, 1e-9 * (1.0 + 1e-12)]);
        assert_eq!(rank(&nearly), 1);

        let cols = [
            Vector::from_slice(&[1e-9_f64, 0.0]),
            Vector::from_slice(&[0.0, 1e-9]),
        ];
        assert!(is_independent(&cols).unwrap());
    }

    #[test]
    fn independence_check() {
        let e1 = Vector::from_slice(&[1.0_f64, 0.0]);
        let e2 = Vector::from_slice(&[1.0_f64, 1.0]);
        let dup = Vector::from_slice(&[2.0_f64, 0.0]);
        assert!(is_independent(&[e1.clone(), e2.clone()]).unwrap());
        assert!(!is_independent(&[e1.clone(), dup]).unwrap());
        assert!(is_independent::<f64>(&[]).unwrap());
        assert_eq!(
            is_independent(&[e1, Vector::from_slice(&[1.0])]),
            Err(LinalgError::Matrix(MatrixError::Ragged {
                row: 2,
                expected: 2,
                got: 1
            }))
        );
    }
}

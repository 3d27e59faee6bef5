use alloc::vec::Vec;
use log::warn;

use crate::linalg::{is_independent, LinalgError};
use crate::matrix::{MatrixError, Vector};
use crate::traits::LinalgScalar;

/// Orthonormalize a set of linearly independent vectors.
///
/// Classical Gram-Schmidt in input order: from each vector `s` the
/// projection `(⟨e, s⟩ / ⟨e, e⟩)·e` onto every previously accepted vector
/// `e` is subtracted, and the remainder is divided by its Euclidean norm.
/// The inner product is Hermitian (conjugate on the left), so complex inputs
/// come out orthonormal too.
///
/// Returns [`MatrixError::DimensionMismatch`] if the vectors have different
/// lengths and [`LinalgError::LinearlyDependent`] if they are not
/// independent. The output has the same length and order as the input.
///
/// ```
/// use echelon::Vector;
/// use echelon::linalg::gram_schmidt;
///
/// let e = gram_schmidt(&[
///     Vector::from_slice(&[1.0_f64, 0.0]),
///     Vector::from_slice(&[1.0, 1.0]),
/// ]).unwrap();
/// assert_eq!(e[0], Vector::from_slice(&[1.0, 0.0]));
/// assert_eq!(e[1], Vector::from_slice(&[0.0, 1.0]));
/// ```
pub fn gram_schmidt<T: LinalgScalar>(vectors: &[Vector<T>]) -> Result<Vec<Vector<T>>, LinalgError> {
    if let Some(first) = vectors.first() {
        let n = first.len();
        if let Some(bad) = vectors.iter().find(|v| v.len() != n) {
            return Err(MatrixError::length_mismatch(n, bad.len()).into());
        }
    }
    if !is_independent(vectors)? {
        return Err(LinalgError::LinearlyDependent);
    }

    let mut basis: Vec<Vector<T>> = Vec::with_capacity(vectors.len());
    for (k, s) in vectors.iter().enumerate() {
        let mut u = s.clone();
        for e in &basis {
            u = u.checked_sub(&projection(e, s)?)?;
        }
        let u = match u.normalize() {
            Some(unit) => unit,
            None => {
                warn!("gram_schmidt: vector {} collapsed to zero, left unnormalized", k + 1);
                u
            }
        };
        basis.push(u);
    }
    Ok(basis)
}

/// Projection of `s` onto the line spanned by `e`; zero when `e` is zero.
fn projection<T: LinalgScalar>(e: &Vector<T>, s: &Vector<T>) -> Result<Vector<T>, MatrixError> {
    let ee = e.inner(e)?;
    if ee == T::zero() {
        return Ok(Vector::zeros(e.len()));
    }
    Ok(e.scale(e.inner(s)? / ee))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    #[test]
    fn unit_square_basis() {
        let e = gram_schmidt(&[
            Vector::from_slice(&[1.0_f64, 0.0]),
            Vector::from_slice(&[1.0, 1.0]),
        ])
        .unwrap();
        assert_eq!(e.len(), 2);
        assert_eq!(e[0], Vector::from_slice(&[1.0, 0.0]));
        assert_eq!(e[1], Vector::from_slice(&[0.0, 1.0]));
    }

    #[test]
    fn output_is_orthonormal() {
        let vs = [
            Vector::from_slice(&[2.0_f64, 1.0, 0.0, 1.0]),
            Vector::from_slice(&[1.0, 3.0, 1.0, 0.0]),
            Vector::from_slice(&[0.0, 1.0, 4.0, 2.0]),
        ];
        let e = gram_schmidt(&vs).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(e[i].dot(&e[j]).unwrap(), expected, TOL, &alloc::format!("<e{}, e{}>", i, j));
            }
        }
    }

    #[test]
    fn first_vector_is_only_normalized() {
        let e = gram_schmidt(&[Vector::from_slice(&[3.0_f64, 4.0])]).unwrap();
        assert_near(e[0][0], 0.6, TOL, "x");
        assert_near(e[0][1], 0.8, TOL, "y");
    }

    #[test]
    fn small_vectors_are_normalized() {
        let vs = [
            Vector::from_slice(&[1e-9_f64, 0.0]),
            Vector::from_slice(&[1e-9, 1e-9]),
        ];
        let e = gram_schmidt(&vs).unwrap();
        assert_near(e[0][0], 1.0, TOL, "e0.x");
        assert_near(e[1][0], 0.0, TOL, "e1.x");
        assert_near(e[1][1], 1.0, TOL, "e1.y");
    }

    #[test]
    fn dependent_set_is_rejected() {
        let vs = [
            Vector::from_slice(&[1.0_f64, 2.0]),
            Vector::from_slice(&[2.0, 4.0]),
        ];
        assert_eq!(gram_schmidt(&vs), Err(LinalgError::LinearlyDependent));
    }

    #[test]
    fn unequal_lengths_are_rejected() {
        let vs = [
            Vector::from_slice(&[1.0_f64, 0.0]),
            Vector::from_slice(&[0.0, 1.0, 0.0]),
        ];
        assert_eq!(
            gram_schmidt(&vs),
            Err(LinalgError::Matrix(MatrixError::DimensionMismatch {
                expected: (2, 1),
                got: (3, 1)
            }))
        );
    }

    #[test]
    fn empty_input() {
        assert!(gram_schmidt::<f64>(&[]).unwrap().is_empty());
    }

    #[test]
    fn zero_reference_vector_projects_to_zero() {
        let z: Vector<f64> = Vector::zeros(2);
        let s = Vector::from_slice(&[1.0_f64, 2.0]);
        assert_eq!(projection(&z, &s).unwrap(), Vector::zeros(2));
    }
}

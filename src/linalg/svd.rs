use alloc::vec::Vec;
use log::debug;
use num_traits::{Float, Zero};

use crate::linalg::{sort_descending, EigenSolver, LinalgError, SymmetricEigen};
use crate::matrix::{Matrix, MatrixError, Vector};
use crate::traits::{real_const, LinalgScalar};

/// Singular value decomposition `A = U Σ Vᴴ` built from the eigenpairs of
/// `AᴴA`.
///
/// For an `m x n` matrix `A`:
/// - `V` is `n x n`, the eigenvectors of `AᴴA` as columns, sorted by
///   descending eigenvalue;
/// - `Σ` is `m x n` with `σᵢ = sqrt(|λᵢ|)` on the diagonal for
///   `i < min(m, n)` and zeros elsewhere;
/// - `U` is `m x m`; column `j < min(m, n)` is `A vⱼ / σⱼ`, or zero when
///   `σⱼ` is numerically zero, i.e. `σⱼ² <= ε·max(m, n)·σ_max²`. The
///   remaining columns are zero.
///
/// The product `U Σ Vᴴ` reproduces `A`, but `U` is only orthonormal on the
/// columns belonging to nonzero singular values.
///
/// # Example
///
/// ```
/// use echelon::Matrix;
/// use echelon::linalg::Svd;
///
/// let a = Matrix::from_rows(3, 2, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// let svd = Svd::new(&a).unwrap();
/// let rebuilt = svd.u() * svd.sigma() * svd.v().adjoint();
/// for i in 0..3 {
///     for j in 0..2 {
///         assert!((rebuilt[(i, j)] - a[(i, j)]).abs() < 1e-10);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Svd<T: LinalgScalar> {
    u: Matrix<T>,
    sigma: Matrix<T>,
    v: Matrix<T>,
    singular_values: Vec<T::Real>,
}

impl<T: LinalgScalar> Svd<T> {
    /// Decompose `a` using [`SymmetricEigen`] on `AᴴA`.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        Self::with_solver(a, &SymmetricEigen)
    }

    /// Decompose `a` using the given eigensolver on `AᴴA`.
    pub fn with_solver<S>(a: &Matrix<T>, solver: &S) -> Result<Self, LinalgError>
    where
        S: EigenSolver<T> + ?Sized,
    {
        let (m, n) = a.dim();
        let aha = a.adjoint().checked_mul(a)?;

        let mut pairs = solver.eigen(&aha)?;
        if pairs.len() != n {
            return Err(MatrixError::DimensionMismatch {
                expected: (n, n),
                got: (n, pairs.len()),
            }
            .into());
        }
        sort_descending(&mut pairs);

        let vectors: Vec<Vector<T>> = pairs.iter().map(|p| p.vector.clone()).collect();
        let v = if n == 0 {
            Matrix::zeros(0, 0)
        } else {
            Matrix::from_cols(&vectors)?
        };
        if v.nrows() != n {
            return Err(MatrixError::DimensionMismatch {
                expected: (n, n),
                got: v.dim(),
            }
            .into());
        }

        let k = m.min(n);
        let singular_values: Vec<T::Real> = pairs
            .iter()
            .take(k)
            .map(|p| p.value.modulus().sqrt())
            .collect();

        let mut sigma = Matrix::zeros(m, n);
        for (i, &s) in singular_values.iter().enumerate() {
            sigma[(i, i)] = T::from_real(s);
        }

        let zero = <T::Real as Zero>::zero();
        let sigma_max = singular_values.first().copied().unwrap_or(zero);
        // eigenvalues of AᴴA carry absolute error ~ε·σ_max², so σ is only
        // resolved down to sqrt(ε)·σ_max
        let cutoff = T::lepsilon() * real_const::<T>(m.max(n) as f64) * sigma_max * sigma_max;

        let mut u = Matrix::zeros(m, m);
        for (j, &s) in singular_values.iter().enumerate() {
            if s == zero || s * s <= cutoff {
                debug!("svd: singular value {} is zero, U column left zero", j + 1);
                continue;
            }
            let col = a.checked_mul_vector(&vectors[j])?.div_scalar(T::from_real(s));
            for (i, &x) in col.iter().enumerate() {
                u[(i, j)] = x;
            }
        }

        Ok(Self {
            u,
            sigma,
            v,
            singular_values,
        })
    }

    /// Left factor (`m x m`).
    #[inline]
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// Rectangular diagonal factor (`m x n`).
    #[inline]
    pub fn sigma(&self) -> &Matrix<T> {
        &self.sigma
    }

    /// Right factor (`n x n`); `A = U Σ Vᴴ`.
    #[inline]
    pub fn v(&self) -> &Matrix<T> {
        &self.v
    }

    /// The `min(m, n)` singular values, largest first.
    #[inline]
    pub fn singular_values(&self) -> &[T::Real] {
        &self.singular_values
    }

    /// `(U, Σ, V)`.
    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>, Matrix<T>) {
        (self.u, self.sigma, self.v)
    }
}

/// `(U, Σ, V)` with `A ≈ U Σ Vᴴ`; see [`Svd`].
///
/// ```
/// use echelon::Matrix;
/// use echelon::linalg::svd;
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, -3.0]);
/// let (_, sigma, _) = svd(&a).unwrap();
/// assert!((sigma[(0, 0)] - 3.0).abs() < 1e-12);
/// assert!((sigma[(1, 1)] - 2.0).abs() < 1e-12);
/// ```
pub fn svd<T: LinalgScalar>(a: &Matrix<T>) -> Result<(Matrix<T>, Matrix<T>, Matrix<T>), LinalgError> {
    Svd::new(a).map(Svd::into_parts)
}

impl<T: LinalgScalar> Matrix<T> {
    /// Singular value decomposition; see [`Svd`].
    pub fn svd(&self) -> Result<Svd<T>, LinalgError> {
        Svd::new(self)
    }
}

use num_traits::{Float, One, Zero};

use crate::traits::{LinalgScalar, Scalar};

use super::vector::Vector;
use super::Matrix;

// ── Vector norms ────────────────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// Squared L2 norm (dot product with self). No sqrt, works with integers.
    ///
    /// ```
    /// use echelon::Vector;
    /// let v = Vector::from_slice(&[3, 4]);
    /// assert_eq!(v.norm_squared(), 25);
    /// ```
    pub fn norm_squared(&self) -> T {
        self.iter().fold(T::zero(), |acc, &x| acc + x * x)
    }
}

impl<T: LinalgScalar> Vector<T> {
    /// p-norm `(Σ|xᵢ|^p)^(1/p)`.
    ///
    /// ```
    /// use echelon::Vector;
    /// let v = Vector::from_slice(&[3.0_f64, -4.0]);
    /// assert!((v.norm_p(1.0) - 7.0).abs() < 1e-12);
    /// assert!((v.norm_p(2.0) - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm_p(&self, p: T::Real) -> T::Real {
        let sum = self
            .iter()
            .fold(<T::Real as Zero>::zero(), |acc, &x| acc + x.modulus().powf(p));
        sum.powf(<T::Real as One>::one() / p)
    }

    /// L2 (Euclidean) norm.
    pub fn norm(&self) -> T::Real {
        let sum = self.iter().fold(<T::Real as Zero>::zero(), |acc, &x| {
            let m = x.modulus();
            acc + m * m
        });
        sum.sqrt()
    }

    /// L1 norm (sum of absolute values / moduli).
    pub fn norm_l1(&self) -> T::Real {
        self.iter()
            .fold(<T::Real as Zero>::zero(), |acc, &x| acc + x.modulus())
    }

    /// Largest modulus among the components; zero for an empty vector.
    pub fn norm_inf(&self) -> T::Real {
        self.iter()
            .fold(<T::Real as Zero>::zero(), |acc, &x| acc.max(x.modulus()))
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalize(&self) -> Option<Self> {
        let n = self.norm();
        if n == <T::Real as Zero>::zero() {
            None
        } else {
            Some(self.div_scalar(T::from_real(n)))
        }
    }
}

// ── Matrix norms ────────────────────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Frobenius norm (square root of the sum of squared moduli).
    ///
    /// ```
    /// use echelon::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T::Real {
        let sum = self.data.iter().fold(<T::Real as Zero>::zero(), |acc, &x| {
            let m = x.modulus();
            acc + m * m
        });
        sum.sqrt()
    }

    /// Largest entry modulus.
    pub fn max_abs(&self) -> T::Real {
        self.data
            .iter()
            .fold(<T::Real as Zero>::zero(), |acc, &x| acc.max(x.modulus()))
    }
}

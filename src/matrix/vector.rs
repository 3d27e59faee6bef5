use alloc::vec::Vec;
use core::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use crate::traits::{LinalgScalar, Scalar};

use super::MatrixError;

/// Heap-allocated vector with a length fixed at construction.
///
/// Every arithmetic operation returns a new `Vector`; the checked methods
/// report a [`MatrixError::DimensionMismatch`] for unequal lengths, and the
/// operator overloads panic on them the way slice indexing does.
///
/// # Examples
///
/// ```
/// use echelon::Vector;
///
/// let v = Vector::from_slice(&[1.0_f64, 2.0, 3.0]);
/// assert_eq!(v[0], 1.0);
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.dot(&v).unwrap(), 14.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T> Vector<T> {
    /// Wrap an owned `Vec`.
    ///
    /// ```
    /// use echelon::Vector;
    /// let v = Vector::from_vec(vec![1, 2, 3]);
    /// assert_eq!(v[2], 3);
    /// ```
    #[inline]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// The zero-length vector.
    #[inline]
    pub fn empty() -> Self {
        Self { data: Vec::new() }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Unwrap into the underlying `Vec`.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub(crate) fn check_len(&self, other: usize) -> Result<(), MatrixError> {
        if self.len() == other {
            Ok(())
        } else {
            Err(MatrixError::length_mismatch(self.len(), other))
        }
    }
}

impl<T: Scalar> Vector<T> {
    /// Copy a slice into a new vector.
    #[inline]
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// A vector of `n` zeros.
    ///
    /// ```
    /// use echelon::Vector;
    /// let v: Vector<f64> = Vector::zeros(4);
    /// assert_eq!(v.len(), 4);
    /// assert_eq!(v[3], 0.0);
    /// ```
    pub fn zeros(n: usize) -> Self {
        Self {
            data: alloc::vec![T::zero(); n],
        }
    }

    /// Apply `f` to every element.
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Vector<U> {
        Vector {
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self, MatrixError> {
        self.check_len(rhs.len())?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Componentwise sum.
    ///
    /// ```
    /// use echelon::Vector;
    /// let a = Vector::from_slice(&[1, 2]);
    /// let b = Vector::from_slice(&[3, 4]);
    /// assert_eq!(a.checked_add(&b).unwrap(), Vector::from_slice(&[4, 6]));
    /// assert!(a.checked_add(&Vector::from_slice(&[1])).is_err());
    /// ```
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, MatrixError> {
        self.zip_with(rhs, |a, b| a + b)
    }

    /// Componentwise difference.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, MatrixError> {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Dot product `Σ aᵢ·bᵢ` (no conjugation).
    ///
    /// ```
    /// use echelon::Vector;
    /// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b).unwrap(), 32.0);
    /// ```
    pub fn dot(&self, rhs: &Self) -> Result<T, MatrixError> {
        self.check_len(rhs.len())?;
        Ok(self
            .data
            .iter()
            .zip(rhs.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b))
    }

    /// Multiply every component by `s`.
    pub fn scale(&self, s: T) -> Self {
        self.map(|x| x * s)
    }

    /// Divide every component by `s`.
    pub fn div_scalar(&self, s: T) -> Self {
        self.map(|x| x / s)
    }
}

impl<T: LinalgScalar> Vector<T> {
    /// Hermitian inner product `Σ conj(aᵢ)·bᵢ`. Same as [`dot`](Self::dot)
    /// for real elements.
    pub fn inner(&self, rhs: &Self) -> Result<T, MatrixError> {
        self.check_len(rhs.len())?;
        Ok(self
            .data
            .iter()
            .zip(rhs.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a.conj() * b))
    }

    /// Elementwise complex conjugate.
    pub fn conj(&self) -> Self {
        self.map(|x| x.conj())
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for Vector<T> {
    fn from(data: [T; N]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

// ── Operators ───────────────────────────────────────────────────────

macro_rules! impl_vector_binop {
    ($trait:ident, $method:ident, $checked:ident, $sym:literal) => {
        impl<T: Scalar> $trait<&Vector<T>> for &Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: &Vector<T>) -> Vector<T> {
                match self.$checked(rhs) {
                    Ok(v) => v,
                    Err(_) => panic!(
                        "dimension mismatch: vector of length {} {} vector of length {}",
                        self.len(),
                        $sym,
                        rhs.len(),
                    ),
                }
            }
        }

        impl<T: Scalar> $trait for Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: Vector<T>) -> Vector<T> {
                (&self).$method(&rhs)
            }
        }

        impl<T: Scalar> $trait<&Vector<T>> for Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: &Vector<T>) -> Vector<T> {
                (&self).$method(rhs)
            }
        }

        impl<T: Scalar> $trait<Vector<T>> for &Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: Vector<T>) -> Vector<T> {
                self.$method(&rhs)
            }
        }
    };
}

impl_vector_binop!(Add, add, checked_add, "+");
impl_vector_binop!(Sub, sub, checked_sub, "-");

/// `&a * &b` is the dot product.
impl<T: Scalar> Mul<&Vector<T>> for &Vector<T> {
    type Output = T;

    fn mul(self, rhs: &Vector<T>) -> T {
        match self.dot(rhs) {
            Ok(d) => d,
            Err(_) => panic!(
                "dimension mismatch: dot product of lengths {} and {}",
                self.len(),
                rhs.len(),
            ),
        }
    }
}

impl<T: Scalar> Mul<T> for Vector<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: T) -> Vector<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Mul<T> for &Vector<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: T) -> Vector<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Div<T> for Vector<T> {
    type Output = Vector<T>;

    fn div(self, rhs: T) -> Vector<T> {
        self.div_scalar(rhs)
    }
}

impl<T: Scalar> Div<T> for &Vector<T> {
    type Output = Vector<T>;

    fn div(self, rhs: T) -> Vector<T> {
        self.div_scalar(rhs)
    }
}

impl<T: Scalar> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        self.map(|x| T::zero() - x)
    }
}

macro_rules! impl_scalar_mul_vector {
    ($($t:ty),*) => {
        $(
            impl Mul<Vector<$t>> for $t {
                type Output = Vector<$t>;
                fn mul(self, rhs: Vector<$t>) -> Vector<$t> {
                    rhs.scale(self)
                }
            }

            impl Mul<&Vector<$t>> for $t {
                type Output = Vector<$t>;
                fn mul(self, rhs: &Vector<$t>) -> Vector<$t> {
                    rhs.scale(self)
                }
            }
        )*
    };
}

impl_scalar_mul_vector!(f32, f64, i32, i64);

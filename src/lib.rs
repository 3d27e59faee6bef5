//! # echelon
//!
//! Dense vectors and matrices with the classic first-course linear algebra
//! algorithms: row-echelon reduction, rank, Gaussian system classification,
//! Gram-Schmidt QR solving, cofactor determinants, and an SVD built from the
//! eigen-decomposition of `AᴴA`. Small-to-moderate matrices, exact or
//! floating-point arithmetic.
//!
//! ## Quick start
//!
//! ```
//! use echelon::{Matrix, Vector};
//! use echelon::linalg::{qr_solve, rank};
//!
//! let a = Matrix::from_rows(3, 3, &[
//!     2.0_f64, 1.0, -1.0,
//!     -3.0, -1.0, 2.0,
//!     -2.0, 1.0, 2.0,
//! ]);
//! let b = Vector::from_slice(&[8.0, -11.0, -3.0]);
//! assert_eq!(rank(&a), 3);
//! let x = qr_solve(&a, &b).unwrap(); // x = [2, 3, -1]
//! assert!((x[0] - 2.0).abs() < 1e-10);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — [`Matrix<T>`] with row-major storage, 1-based checked
//!   accessors, 0-based `m[(i, j)]` indexing, arithmetic operators and
//!   checked equivalents, norms, transpose. [`Vector<T>`] for
//!   fixed-length sequences with dot products and p-norms.
//!
//! - [`linalg`] — algorithms over `Matrix`/`Vector`:
//!   [`linalg::row_echelon`], [`linalg::rank`], [`linalg::gauss_solve`],
//!   [`linalg::gram_schmidt`], [`linalg::qr_solve`],
//!   [`linalg::determinant`], [`linalg::eigen`], [`linalg::svd`].
//!   Inputs are never mutated.
//!
//! - [`traits`] — element trait hierarchy:
//!   - [`Scalar`] — all elements (`Copy + PartialEq + Debug + Zero + One + Num`),
//!     including integers
//!   - [`FloatScalar`] — real floats
//!   - [`LinalgScalar`] — real floats and complex numbers, required by the
//!     algorithms that divide or take square roots
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | `std::error::Error` impls, system float math |
//! | `libm`    | no       | Pure-Rust float fallback for `no_std` |
//! | `complex` | no       | `Complex<f32>` / `Complex<f64>` elements via `num-complex` |
//! | `all`     | no       | `std` + `complex` |
//!
//! ## Logging
//!
//! Algorithms emit `trace`/`debug` records through the [`log`] facade
//! (pivot choices, system classification, eigen iteration counts). No logger
//! is installed by the library.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod linalg;
pub mod matrix;
pub mod traits;

pub use linalg::LinalgError;
pub use matrix::{Matrix, MatrixError, Vector};
pub use traits::{FloatScalar, LinalgScalar, Scalar};

#[cfg(feature = "complex")]
pub use num_complex::Complex;

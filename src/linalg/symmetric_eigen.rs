use alloc::vec;
use alloc::vec::Vec;
use num_traits::{Float, Zero};

use crate::linalg::LinalgError;
use crate::matrix::Matrix;
use crate::traits::{two, LinalgScalar};

/// Real symmetric tridiagonal form of a Hermitian matrix: `Qᴴ A Q = T`.
///
/// `diag` holds the `n` diagonal entries of `T`, `off_diag` its `n - 1`
/// sub-diagonal entries (`off_diag[k] = T[k+1][k]`, all real and
/// non-negative), and `q` the accumulated unitary transform.
pub(crate) struct Tridiagonal<T: LinalgScalar> {
    pub diag: Vec<T::Real>,
    pub off_diag: Vec<T::Real>,
    pub q: Matrix<T>,
}

/// Householder tridiagonalization of a square Hermitian matrix.
///
/// `a` is read, not modified. For complex input the sub-diagonal produced
/// by the reflections is complex; a final diagonal unitary scaling rotates
/// every entry onto the non-negative real axis so the QR sweep can run in
/// real arithmetic.
pub(crate) fn tridiagonalize<T: LinalgScalar>(a: &Matrix<T>) -> Tridiagonal<T> {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols());

    let mut w = a.clone();
    let mut q = Matrix::<T>::eye(n);
    let mut sub = vec![T::zero(); n.saturating_sub(1)];
    let eps = T::lepsilon();

    for k in 0..n.saturating_sub(2) {
        // Householder vector from w[k+1.., k]
        let mut norm_sq = <T::Real as Zero>::zero();
        for i in (k + 1)..n {
            let v = w[(i, k)];
            norm_sq = norm_sq + (v * v.conj()).re();
        }

        if norm_sq <= eps * eps {
            continue;
        }

        let norm = norm_sq.sqrt();
        let wk1k = w[(k + 1, k)];
        let alpha = wk1k.modulus();

        let sigma = if alpha < eps {
            T::from_real(norm)
        } else {
            T::from_real(norm) * (wk1k / T::from_real(alpha))
        };

        let v0 = wk1k + sigma;
        let v = |i: usize| if i == 0 { v0 } else { w[(k + 1 + i, k)] };

        let sub_n = n - k - 1;
        let v_norm_sq = (0..sub_n).fold(<T::Real as Zero>::zero(), |acc, i| {
            let vi = v(i);
            acc + (vi * vi.conj()).re()
        });

        let tau_real = two::<T::Real>() / v_norm_sq;
        let tau = T::from_real(tau_real);

        // p = tau * A_sub * v
        let mut p = vec![T::zero(); sub_n];
        for (i, pi) in p.iter_mut().enumerate() {
            let mut dot = T::zero();
            for j in 0..sub_n {
                dot = dot + w[(k + 1 + i, k + 1 + j)] * v(j);
            }
            *pi = tau * dot;
        }

        // u = p - (tau / 2)(vᴴ p) v
        let vhp = (0..sub_n).fold(T::zero(), |acc, i| acc + v(i).conj() * p[i]);
        let half_tau_vhp = T::from_real(tau_real / two::<T::Real>()) * vhp;
        let u: Vec<T> = (0..sub_n).map(|i| p[i] - half_tau_vhp * v(i)).collect();

        // A_sub -= v uᴴ + u vᴴ
        let vs: Vec<T> = (0..sub_n).map(v).collect();
        for i in 0..sub_n {
            for j in 0..sub_n {
                let cur = w[(k + 1 + i, k + 1 + j)];
                w[(k + 1 + i, k + 1 + j)] = cur - vs[i] * u[j].conj() - u[i] * vs[j].conj();
            }
        }

        // The reflection maps w[k+1.., k] onto -sigma·e₁
        sub[k] = T::zero() - sigma;

        // Q = Q (I - tau v vᴴ)
        for row in 0..n {
            let s = tau * (0..sub_n).fold(T::zero(), |acc, m| acc + q[(row, k + 1 + m)] * vs[m]);
            for j in 0..sub_n {
                q[(row, k + 1 + j)] = q[(row, k + 1 + j)] - s * vs[j].conj();
            }
        }
    }

    if n >= 2 {
        sub[n - 2] = w[(n - 1, n - 2)];
    }
    let diag = (0..n).map(|i| w[(i, i)].re()).collect();

    // Dᴴ T D with d₀ = 1, d_{k+1} = d_k · e_k / |e_k| makes T real.
    let mut off_diag = Vec::with_capacity(sub.len());
    let mut phase = T::one();
    for (k, &e) in sub.iter().enumerate() {
        let m = e.modulus();
        if m > <T::Real as Zero>::zero() {
            phase = phase * (e / T::from_real(m));
        }
        for i in 0..n {
            q[(i, k + 1)] = q[(i, k + 1)] * phase;
        }
        off_diag.push(m);
    }

    Tridiagonal { diag, off_diag, q }
}

/// Implicit QR iteration with Wilkinson shift on a real symmetric
/// tridiagonal matrix, accumulating Givens rotations into the columns of `q`.
///
/// On return `diag` holds the eigenvalues sorted ascending with the matching
/// eigenvectors as the columns of `q`; `off_diag` is destroyed. Returns the
/// number of QR sweeps, or [`LinalgError::ConvergenceFailure`] once
/// `max_iter` sweeps have not deflated the matrix.
pub(crate) fn tridiagonal_qr<T: LinalgScalar>(
    diag: &mut [T::Real],
    off_diag: &mut [T::Real],
    q: &mut Matrix<T>,
    max_iter: usize,
) -> Result<usize, LinalgError> {
    let n = diag.len();
    if n <= 1 {
        return Ok(0);
    }

    let zero = <T::Real as Zero>::zero();
    let two = two::<T::Real>();
    let eps = T::lepsilon();
    let mut iter = 0usize;
    let mut hi = n - 1;

    while hi > 0 {
        let mut lo = hi;
        while lo > 0 {
            let threshold = eps * (diag[lo - 1].abs() + diag[lo].abs());
            if off_diag[lo - 1].abs() <= threshold {
                off_diag[lo - 1] = zero;
                break;
            }
            lo -= 1;
        }

        if lo == hi {
            hi -= 1;
            continue;
        }

        iter += 1;
        if iter > max_iter {
            return Err(LinalgError::ConvergenceFailure);
        }

        // Wilkinson shift from the trailing 2x2 block
        let d = (diag[hi - 1] - diag[hi]) / two;
        let e = off_diag[hi - 1];
        let r = (d * d + e * e).sqrt();
        let shift = diag[hi] - e * e / (d + if d >= zero { r } else { zero - r });

        let mut x = diag[lo] - shift;
        let mut z = off_diag[lo];

        for k in lo..hi {
            let (c, s) = givens(x, z);

            if k > lo {
                off_diag[k - 1] = c * x + s * z;
            }

            let d_k = diag[k];
            let d_k1 = diag[k + 1];
            let e_k = off_diag[k];

            diag[k] = c * c * d_k + two * c * s * e_k + s * s * d_k1;
            diag[k + 1] = s * s * d_k - two * c * s * e_k + c * c * d_k1;
            off_diag[k] = c * s * (d_k1 - d_k) + (c * c - s * s) * e_k;

            // Chase the bulge at (k, k+2)
            if k + 1 < hi {
                let e_next = off_diag[k + 1];
                x = off_diag[k];
                z = s * e_next;
                off_diag[k + 1] = c * e_next;
            }

            // Q = Q Gᵀ
            let (cc, ss) = (T::from_real(c), T::from_real(s));
            for i in 0..q.nrows() {
                let qik = q[(i, k)];
                let qik1 = q[(i, k + 1)];
                q[(i, k)] = cc * qik + ss * qik1;
                q[(i, k + 1)] = cc * qik1 - ss * qik;
            }
        }
    }

    sort_ascending::<T>(diag, q);
    Ok(iter)
}

/// Givens rotation: `(c, s)` such that `[c, s; -s, c] * [a; b] = [r; 0]`.
#[inline]
pub(crate) fn givens<R: Float>(a: R, b: R) -> (R, R) {
    if b == R::zero() {
        (R::one(), R::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = R::one() / (R::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = R::one() / (R::one() + t * t).sqrt();
        (c, c * t)
    }
}

/// Selection sort of the eigenvalues, permuting the columns of `q` along.
fn sort_ascending<T: LinalgScalar>(diag: &mut [T::Real], q: &mut Matrix<T>) {
    let n = diag.len();
    for i in 0..n {
        let mut min_idx = i;
        for j in (i + 1)..n {
            if diag[j] < diag[min_idx] {
                min_idx = j;
            }
        }
        if min_idx != i {
            diag.swap(i, min_idx);
            for row in 0..q.nrows() {
                let tmp = q[(row, i)];
                q[(row, i)] = q[(row, min_idx)];
                q[(row, min_idx)] = tmp;
            }
        }
    }
}

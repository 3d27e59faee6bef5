use echelon::linalg::{
    determinant, determinant_lu, eigen, gauss_solve, gram_schmidt, is_independent, qr_solve,
    rank, row_echelon, sort_descending, submatrix, svd, GaussSolution, GramSchmidtQr,
    LinalgError,
};
use echelon::{Matrix, MatrixError, Vector};

const TOL: f64 = 1e-10;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
}

fn assert_mat_near(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64, msg: &str) {
    assert_eq!(a.dim(), b.dim(), "{}: shape", msg);
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            assert_near(a[(i, j)], b[(i, j)], tol, &format!("{} ({},{})", msg, i, j));
        }
    }
}

// ── Vector / Matrix basics ──────────────────────────────────────────

#[test]
fn vector_arithmetic() {
    let u = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let v = Vector::from_slice(&[4.0, -5.0, 6.0]);
    assert_eq!(&u + &v, &v + &u);
    assert_eq!(&(&u + &v) - &v, u);
    assert_eq!(&u * &v, 12.0);
    assert_eq!(&u * 2.0, Vector::from_slice(&[2.0, 4.0, 6.0]));
    assert_eq!(&u / 2.0, Vector::from_slice(&[0.5, 1.0, 1.5]));
    assert_near(Vector::from_slice(&[3.0_f64, 4.0]).norm(), 5.0, TOL, "norm");
    assert!(u.checked_add(&Vector::from_slice(&[1.0])).is_err());
}

#[test]
#[should_panic(expected = "dimension mismatch")]
fn vector_operator_panics_on_length() {
    let _ = Vector::from_slice(&[1.0, 2.0]) + Vector::from_slice(&[1.0]);
}

#[test]
fn matrix_products_by_operand_kind() {
    let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let b = Matrix::from_rows(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
    assert_eq!(&a * &b, Matrix::from_rows(2, 2, &[58.0, 64.0, 139.0, 154.0]));
    assert_eq!(
        &a * &Vector::from_slice(&[1.0, 0.0, -1.0]),
        Vector::from_slice(&[-2.0, -2.0])
    );
    assert_eq!(&a * 2.0, Matrix::from_rows(2, 3, &[2.0, 4.0, 6.0, 8.0, 10.0, 12.0]));
    assert_eq!(a.transpose().transpose(), a);
    assert_eq!(
        a.checked_mul(&a),
        Err(MatrixError::DimensionMismatch {
            expected: (3, 3),
            got: (2, 3)
        })
    );
}

// ── Echelon / rank ──────────────────────────────────────────────────

#[test]
fn rank_of_zero_and_identity() {
    init_logging();
    for n in 1..6 {
        assert_eq!(rank(&Matrix::<f64>::zeros(n, n + 1)), 0);
        assert_eq!(rank(&Matrix::<f64>::eye(n)), n);
    }
}

#[test]
fn echelon_form_shape() {
    let a = Matrix::from_rows(
        3,
        4,
        &[0.0, 2.0, 4.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 4.0, 6.0, 4.0],
    );
    let r = row_echelon(&a);
    let mut last_pivot: Option<usize> = None;
    for i in 0..3 {
        if let Some(p) = r.row_slice(i).iter().position(|&x| x != 0.0) {
            assert_near(r[(i, p)], 1.0, TOL, "pivot");
            if let Some(prev) = last_pivot {
                assert!(p > prev, "pivots move right");
            }
            for below in (i + 1)..3 {
                assert_eq!(r[(below, p)], 0.0);
            }
            last_pivot = Some(p);
        }
    }
    assert_eq!(rank(&a), 2);
}

// ── Linear systems ──────────────────────────────────────────────────

#[test]
fn gauss_solve_classification() {
    init_logging();
    let id = Matrix::<f64>::eye(2);
    assert_eq!(
        gauss_solve(&id, &Vector::from_slice(&[3.0, 5.0])).unwrap(),
        GaussSolution::Unique(Vector::empty())
    );

    let a = Matrix::from_rows(2, 2, &[1.0, 1.0, 2.0, 2.0]);
    assert_eq!(
        gauss_solve(&a, &Vector::from_slice(&[1.0, 3.0])).unwrap(),
        GaussSolution::NoSolution
    );
    assert_eq!(
        gauss_solve(&a, &Vector::from_slice(&[1.0, 2.0])).unwrap(),
        GaussSolution::Infinite { free_variables: 1 }
    );
}

#[test]
fn qr_properties() {
    init_logging();
    let a = Matrix::from_rows(
        4,
        3,
        &[1.0, 2.0, 0.0, 0.0, 1.0, 3.0, 2.0, 0.0, 1.0, 1.0, 1.0, 1.0],
    );
    let qr = GramSchmidtQr::new(&a).unwrap();
    assert_mat_near(&(qr.q().transpose() * qr.q()), &Matrix::eye(3), TOL, "QᵀQ");
    assert_mat_near(&(qr.q() * qr.r()), &a, TOL, "QR");
}

#[test]
fn qr_solve_residual() {
    let a = Matrix::from_rows(
        4,
        4,
        &[4.0, -2.0, 1.0, 0.0, 3.0, 6.0, -4.0, 2.0, 2.0, 1.0, 8.0, -5.0, 1.0, 0.0, 2.0, 7.0],
    );
    let b = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
    let x = qr_solve(&a, &b).unwrap();
    assert!((&a * &x - &b).norm() < TOL);
}

#[test]
fn qr_solve_dependent_columns() {
    let a = Matrix::from_rows(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
    let b = Vector::from_slice(&[1.0, 2.0, 3.0]);
    assert_eq!(qr_solve(&a, &b), Err(LinalgError::LinearlyDependent));
}

// ── Gram-Schmidt ────────────────────────────────────────────────────

#[test]
fn gram_schmidt_unit_square() {
    let e = gram_schmidt(&[
        Vector::from_slice(&[1.0, 0.0]),
        Vector::from_slice(&[1.0, 1.0]),
    ])
    .unwrap();
    assert_eq!(e, vec![Vector::from_slice(&[1.0, 0.0]), Vector::from_slice(&[0.0, 1.0])]);
}

#[test]
fn gram_schmidt_spans_same_space() {
    let vs = vec![
        Vector::from_slice(&[1.0, 1.0, 0.0]),
        Vector::from_slice(&[0.0, 1.0, 1.0]),
    ];
    let e = gram_schmidt(&vs).unwrap();
    let mut all = vs.clone();
    all.extend(e.iter().cloned());
    // four vectors in a 2-dimensional span
    assert_eq!(rank(&Matrix::from_row_vectors(&all).unwrap()), 2);
    assert!(is_independent(&e).unwrap());
}

// ── Determinant ─────────────────────────────────────────────────────

#[test]
fn determinant_properties() {
    let a = Matrix::from_rows(3, 3, &[1, 2, 3, 4, 5, 6, 1, 2, 3]);
    assert_eq!(determinant(&a).unwrap(), 0);

    let b = Matrix::from_rows(
        4,
        4,
        &[2.0, -1.0, 0.0, 3.0, 1.0, 4.0, -2.0, 0.0, 0.0, 5.0, 1.0, -1.0, 3.0, 0.0, 2.0, 1.0],
    );
    let det = determinant(&b).unwrap();
    assert_near(det, determinant(&b.transpose()).unwrap(), 1e-9, "det(Bᵀ)");
    assert_near(det, determinant_lu(&b).unwrap(), 1e-9, "cofactor vs LU");
}

#[test]
fn laplace_expansion_via_submatrix() {
    let a = Matrix::from_rows(3, 3, &[2, 0, 1, 1, 3, 2, 1, 1, 1]);
    let mut by_column = 0;
    for i in 1..=3 {
        let minor = determinant(&submatrix(&a, i, 1).unwrap()).unwrap();
        let sign = if i % 2 == 1 { 1 } else { -1 };
        by_column += sign * a.get_entry(i, 1).unwrap() * minor;
    }
    assert_eq!(by_column, determinant(&a).unwrap());
}

// ── Eigen / SVD ─────────────────────────────────────────────────────

#[test]
fn eigen_sorted_descending() {
    init_logging();
    let a = Matrix::from_rows(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
    let mut pairs = eigen(&a).unwrap();
    sort_descending(&mut pairs);
    let s = 2.0_f64.sqrt();
    assert_near(pairs[0].value, 2.0 + s, TOL, "λ1");
    assert_near(pairs[1].value, 2.0, TOL, "λ2");
    assert_near(pairs[2].value, 2.0 - s, TOL, "λ3");
}

#[test]
fn svd_round_trip_3x2() {
    init_logging();
    let a = Matrix::from_rows(3, 2, &[3.0, 1.0, 1.0, 3.0, 1.0, 1.0]);
    let (u, s, v) = svd(&a).unwrap();
    assert_eq!((u.dim(), s.dim(), v.dim()), ((3, 3), (3, 2), (2, 2)));
    assert_mat_near(&(&u * &s * v.transpose()), &a, 1e-9, "UΣVᵀ");
    assert!(s[(0, 0)] >= s[(1, 1)]);
    assert_eq!(s[(2, 0)], 0.0);
}

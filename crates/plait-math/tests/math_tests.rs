//! Integration tests for plait-math.

use plait_math::frames::{
    curvature_binormal, orthonormal_parallel_transport, orthonormalize, rotate_axis_angle,
    signed_angle,
};
use plait_math::local::{asymmetry, cross_matrix, outer, rotation2, sym_b_product};
use plait_math::sparse::CsrMatrix;
use plait_math::{DVec3, GradKappa, Mat2};

// ─── Small Matrix Tests ───────────────────────────────────────

#[test]
fn outer_product_entries() {
    let a = DVec3::new(1.0, 2.0, 3.0);
    let b = DVec3::new(4.0, 5.0, 6.0);
    let m = outer(a, b);
    // (i, j) entry is a_i * b_j, stored column-major.
    assert_eq!(m.col(0), DVec3::new(4.0, 8.0, 12.0));
    assert_eq!(m.col(2), DVec3::new(6.0, 12.0, 18.0));
}

#[test]
fn cross_matrix_matches_cross_product() {
    let v = DVec3::new(0.3, -1.2, 2.5);
    let w = DVec3::new(-0.7, 0.4, 1.1);
    let lhs = cross_matrix(v) * w;
    let rhs = v.cross(w);
    assert!((lhs - rhs).length() < 1e-14);
}

#[test]
fn rotation2_quarter_turn() {
    let r = rotation2(std::f64::consts::FRAC_PI_2);
    assert!((r[(0, 0)]).abs() < 1e-15);
    assert!((r[(1, 0)] - 1.0).abs() < 1e-15);
    assert!((r[(0, 1)] + 1.0).abs() < 1e-15);
}

#[test]
fn sym_b_product_matches_dense_product() {
    let b = Mat2::new(2.0, 0.5, 0.5, 1.0);
    let g = GradKappa::from_fn(|i, j| ((i * 3 + j * 7) % 5) as f64 - 2.0);
    let fast = sym_b_product(&b, &g);
    let dense = g * b * g.transpose();
    assert!((fast - dense).abs().max() < 1e-12);
    assert_eq!(asymmetry(&fast), 0.0);
}

// ─── Frame Tests ──────────────────────────────────────────────

#[test]
fn transport_maps_frame_to_new_tangent() {
    let t0 = DVec3::Z;
    let t1 = DVec3::new(1.0, 0.0, 1.0).normalize();
    let u = DVec3::X;
    let moved = orthonormal_parallel_transport(u, t0, t1);
    assert!(moved.dot(t1).abs() < 1e-14);
    assert!((moved.length() - 1.0).abs() < 1e-14);
}

#[test]
fn transport_is_reversible() {
    let t0 = DVec3::new(0.2, 0.1, 1.0).normalize();
    let t1 = DVec3::new(-0.4, 0.9, 0.3).normalize();
    let u = orthonormalize(DVec3::X, t0);
    let there = orthonormal_parallel_transport(u, t0, t1);
    let back = orthonormal_parallel_transport(there, t1, t0);
    assert!((back - u).length() < 1e-13);
}

#[test]
fn transport_between_parallel_tangents_is_identity() {
    let u = DVec3::Y;
    assert_eq!(orthonormal_parallel_transport(u, DVec3::Z, DVec3::Z), u);
}

#[test]
fn signed_angle_sign_follows_axis() {
    let a = signed_angle(DVec3::X, DVec3::Y, DVec3::Z);
    let b = signed_angle(DVec3::X, DVec3::Y, -DVec3::Z);
    assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-14);
    assert!((b + std::f64::consts::FRAC_PI_2).abs() < 1e-14);
}

#[test]
fn rotate_axis_angle_round_trip_with_signed_angle() {
    let v = DVec3::X;
    let rotated = rotate_axis_angle(v, DVec3::Z, 0.7);
    assert!((signed_angle(v, rotated, DVec3::Z) - 0.7).abs() < 1e-14);
}

#[test]
fn curvature_binormal_of_right_angle() {
    let kb = curvature_binormal(DVec3::X, DVec3::Y, 1e-12);
    // 2 tan(θ/2) with θ = π/2.
    assert!((kb - DVec3::new(0.0, 0.0, 2.0)).length() < 1e-14);
}

#[test]
fn curvature_binormal_folded_back_is_finite() {
    let kb = curvature_binormal(DVec3::X, -DVec3::X, 1e-12);
    assert!(kb.is_finite());
}

// ─── Sparse Matrix Tests ─────────────────────────────────────

#[test]
fn empty_csr() {
    let m = CsrMatrix::new(3, 3);
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.row_ptr.len(), 4);
}

#[test]
fn csr_from_triplets() {
    let triplets = vec![(0, 0, 1.0), (1, 1, 1.0), (2, 2, 1.0)];
    let m = CsrMatrix::from_triplets(3, 3, &triplets);
    assert_eq!(m.nnz(), 3);
    assert_eq!(m.row_ptr, vec![0, 1, 2, 3]);
    assert_eq!(m.col_idx, vec![0, 1, 2]);
}

#[test]
fn csr_sums_duplicates_and_sorts_columns() {
    let triplets = vec![(0, 2, 1.0), (0, 0, 2.0), (0, 2, 0.5), (1, 1, -1.0)];
    let m = CsrMatrix::from_triplets(2, 3, &triplets);
    assert_eq!(m.nnz(), 3);
    assert_eq!(m.col_idx, vec![0, 2, 1]);
    assert_eq!(m.values, vec![2.0, 1.5, -1.0]);
}

#[test]
fn csr_mul_vec_and_dense_agree() {
    let triplets = vec![(0, 0, 2.0), (0, 1, -1.0), (1, 0, -1.0), (1, 1, 2.0)];
    let m = CsrMatrix::from_triplets(2, 2, &triplets);
    let y = m.mul_vec(&[1.0, 3.0]);
    assert_eq!(y, vec![-1.0, 5.0]);
    let dense = m.to_dense();
    assert_eq!(dense[(0, 1)], -1.0);
}

#[test]
fn csr_to_faer_keeps_shape() {
    let triplets = vec![(0, 0, 4.0), (1, 1, 4.0), (2, 2, 4.0), (0, 2, 1.0)];
    let m = CsrMatrix::from_triplets(3, 3, &triplets);
    let csc = m.to_faer().unwrap();
    assert_eq!(csc.nrows(), 3);
    assert_eq!(csc.ncols(), 3);
}

//! Fixed-size buffers for local force stencils.
//!
//! A stretching stencil spans one edge (2 vertices × 3 positions = 6 dof).
//! Bending and twisting stencils span three vertices and the two twist
//! angles between them (11 dof, laid out `x0 θ0 x1 θ1 x2`). Geometry is
//! computed with `glam` 3-vectors and written into these blocks with the
//! helpers below.

use glam::{DMat3, DVec3};
use nalgebra::{Matrix2, SMatrix, SVector, Vector2};
use plait_types::Scalar;

pub type Vec2 = Vector2<Scalar>;
pub type Mat2 = Matrix2<Scalar>;
pub type Vec6 = SVector<Scalar, 6>;
pub type Mat6 = SMatrix<Scalar, 6, 6>;
pub type Vec11 = SVector<Scalar, 11>;
pub type Mat11 = SMatrix<Scalar, 11, 11>;

/// Gradient of the two curvature components over an 11-dof stencil.
pub type GradKappa = SMatrix<Scalar, 11, 2>;

/// Outer product `a bᵀ`.
#[inline]
pub fn outer(a: DVec3, b: DVec3) -> DMat3 {
    DMat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// Matrix `[v]ₓ` such that `[v]ₓ w = v × w`.
#[inline]
pub fn cross_matrix(v: DVec3) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(0.0, v.z, -v.y),
        DVec3::new(-v.z, 0.0, v.x),
        DVec3::new(v.y, -v.x, 0.0),
    )
}

/// Counter-clockwise 2D rotation by `angle` radians.
#[inline]
pub fn rotation2(angle: Scalar) -> Mat2 {
    let (s, c) = angle.sin_cos();
    Mat2::new(c, -s, s, c)
}

/// Writes a 3×3 block with its top-left corner at `(row, col)`.
#[inline]
pub fn set_block3<const R: usize, const C: usize>(
    m: &mut SMatrix<Scalar, R, C>,
    row: usize,
    col: usize,
    block: &DMat3,
) {
    for j in 0..3 {
        let column = block.col(j);
        for i in 0..3 {
            m[(row + i, col + j)] = column[i];
        }
    }
}

/// Writes a 3-vector down column `col` starting at `row`.
#[inline]
pub fn set_segment3<const R: usize, const C: usize>(
    m: &mut SMatrix<Scalar, R, C>,
    row: usize,
    col: usize,
    v: DVec3,
) {
    for i in 0..3 {
        m[(row + i, col)] = v[i];
    }
}

/// Symmetric bilinear form `G B Gᵀ` for a symmetric 2×2 `B`.
///
/// Only the upper triangle is evaluated; the lower one is mirrored so the
/// result is exactly symmetric.
pub fn sym_b_product<const N: usize>(b: &Mat2, g: &SMatrix<Scalar, N, 2>) -> SMatrix<Scalar, N, N> {
    let gb = g * b;
    let mut out = SMatrix::<Scalar, N, N>::zeros();
    for i in 0..N {
        for j in i..N {
            let v = gb[(i, 0)] * g[(j, 0)] + gb[(i, 1)] * g[(j, 1)];
            out[(i, j)] = v;
            out[(j, i)] = v;
        }
    }
    out
}

/// Largest absolute difference between `m` and its transpose.
pub fn asymmetry<const N: usize>(m: &SMatrix<Scalar, N, N>) -> Scalar {
    let mut worst: Scalar = 0.0;
    for i in 0..N {
        for j in (i + 1)..N {
            worst = worst.max((m[(i, j)] - m[(j, i)]).abs());
        }
    }
    worst
}

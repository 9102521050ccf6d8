//! Frame transport along a strand.
//!
//! Reference frames are carried from one tangent to the next by the
//! rotation about `t0 × t1` that maps `t0` onto `t1`. The same rotation is
//! used across space (edge to edge) and across time (step to step).

use glam::DVec3;
use plait_types::constants::PARALLEL_EPSILON;
use plait_types::Scalar;

/// Transports `u` (assumed orthogonal to `t0`) from tangent `t0` to `t1`.
///
/// Returns `u` unchanged when the tangents are parallel.
pub fn orthonormal_parallel_transport(u: DVec3, t0: DVec3, t1: DVec3) -> DVec3 {
    let b = t0.cross(t1);
    let norm = b.length();
    if norm < PARALLEL_EPSILON {
        return u;
    }
    let b = b / norm;
    let n0 = t0.cross(b);
    let n1 = t1.cross(b);
    n1 * u.dot(n0) + b * u.dot(b)
}

/// Removes the component of `u` along the unit vector `t` and renormalizes.
#[inline]
pub fn orthonormalize(u: DVec3, t: DVec3) -> DVec3 {
    (u - t * u.dot(t)).normalize()
}

/// Signed angle from `u` to `v` measured around the axis `n`.
pub fn signed_angle(u: DVec3, v: DVec3, n: DVec3) -> Scalar {
    let w = u.cross(v);
    let angle = w.length().atan2(u.dot(v));
    if n.dot(w) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Rotates `v` around the unit `axis` by `angle` radians (Rodrigues).
pub fn rotate_axis_angle(v: DVec3, axis: DVec3, angle: Scalar) -> DVec3 {
    let (sin_a, cos_a) = angle.sin_cos();
    let dot = axis.dot(v);
    v * cos_a + axis.cross(v) * sin_a + axis * dot * (1.0 - cos_a)
}

/// Curvature binormal `2 (t_e × t_f) / (1 + t_e · t_f)` at the vertex
/// between unit tangents `te` and `tf`.
///
/// `chi_floor` replaces a non-positive denominator (edges folded back).
pub fn curvature_binormal(te: DVec3, tf: DVec3, chi_floor: Scalar) -> DVec3 {
    let mut chi = 1.0 + te.dot(tf);
    if chi <= 0.0 {
        chi = chi_floor;
    }
    te.cross(tf) * (2.0 / chi)
}

//! Vector and angle utilities used by the boundary filters.

use nalgebra::Vector3;

/// Dot product of two f32 3-vectors accumulated in f64.
///
/// The geometry grids store f32 components; the filters accumulate patch
/// statistics in f64 to keep the summation stable over large patches.
#[inline]
pub fn dot_f64(a: &Vector3<f32>, b: &Vector3<f32>) -> f64 {
    f64::from(a.x) * f64::from(b.x) + f64::from(a.y) * f64::from(b.y) + f64::from(a.z) * f64::from(b.z)
}

/// Signed deviation of `point` from the plane through `point_on_plane` with
/// unit normal `normal`. Positive on the side the normal points to.
#[inline]
pub fn point_plane_deviation(
    point: &Vector3<f32>,
    normal: &Vector3<f32>,
    point_on_plane: &Vector3<f32>,
) -> f64 {
    let diff = point - point_on_plane;
    dot_f64(normal, &diff)
}

/// Angular distance in degrees between two unit normals.
///
/// The dot product is capped at 1.0 before `acos` so that floating-point
/// overshoot on parallel normals cannot leave the arccos domain.
#[inline]
pub fn normal_angle_degrees(a: &Vector3<f32>, b: &Vector3<f32>) -> f64 {
    dot_f64(a, b).min(1.0).acos().to_degrees()
}

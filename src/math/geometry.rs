use nalgebra::{Rotation2, Vector2};

use std::f64::consts::PI;

/// Rotates a vector by +90 degrees (counter-clockwise).
pub fn perpendicular(v: &Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

/// 2D cross product, i.e., the z-component of the 3D cross product.
pub fn cross(u: &Vector2<f64>, v: &Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Returns the unit vector along v, or zero if v is too short to have a direction.
pub fn normalize_or_zero(v: &Vector2<f64>, tolerance: f64) -> Vector2<f64> {
    v.try_normalize(tolerance).unwrap_or_else(Vector2::zeros)
}

/// Unit vector pointing at the given angle from the x-axis.
pub fn unit_at_angle(angle: f64) -> Vector2<f64> {
    Rotation2::new(angle) * Vector2::x()
}

pub fn directed_angle(u: &Vector2<f64>, v: &Vector2<f64>) -> f64 {
    // Returns the angle from u to v, measured counter-clockwise, in [0, 2pi).
    let theta = u.angle(v);
    if cross(u, v) >= 0.0 {
        theta
    } else {
        2.0 * PI - theta
    }
}

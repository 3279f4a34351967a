//! Movement domain: small vector helpers shared by the locomotion core.

use bevy::prelude::*;

/// Projects `direction` onto the plane with the given `normal` and
/// renormalizes it. Degenerate results collapse to zero instead of NaN.
pub fn project_direction_on_plane(direction: Vec3, normal: Vec3) -> Vec3 {
    (direction - normal * direction.dot(normal)).normalize_or_zero()
}

/// Normalizes a summed normal, falling back when the sum cancels out.
pub fn normalize_or(sum: Vec3, fallback: Vec3) -> Vec3 {
    match sum.try_normalize() {
        Some(normal) => normal,
        None => fallback,
    }
}

/// Up axis opposing `gravity`; zero gravity keeps the world up axis.
pub fn up_axis_from_gravity(gravity: Vec3) -> Vec3 {
    (-gravity).try_normalize().unwrap_or(Vec3::Y)
}

/// Linear interpolation without clamping `t`.
pub(crate) fn lerp_unclamped(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Replaces non-finite components with zero.
pub(crate) fn finite_or_zero(v: Vec3) -> Vec3 {
    if v.is_finite() { v } else { Vec3::ZERO }
}

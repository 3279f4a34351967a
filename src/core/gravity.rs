//! Core domain: gravity sources sampled per position.

use bevy::prelude::*;

/// Standard gravity used when nothing else is configured.
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Gravity acting on characters. The up axis of a character is always the
/// opposite of the gravity sampled at its position.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub enum GravityField {
    /// Same acceleration everywhere
    Uniform(Vec3),
    /// Pulls toward `center` with constant strength, like a small planet
    Point { center: Vec3, strength: f32 },
}

impl Default for GravityField {
    fn default() -> Self {
        GravityField::Uniform(Vec3::NEG_Y * STANDARD_GRAVITY)
    }
}

impl GravityField {
    pub fn gravity_at(&self, position: Vec3) -> Vec3 {
        match *self {
            GravityField::Uniform(gravity) => gravity,
            GravityField::Point { center, strength } => {
                (center - position).normalize_or_zero() * strength
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_gravity_ignores_position() {
        let field = GravityField::default();
        assert_eq!(field.gravity_at(Vec3::ZERO), field.gravity_at(Vec3::splat(50.0)));
    }

    #[test]
    fn test_point_gravity_pulls_toward_center() {
        let field = GravityField::Point {
            center: Vec3::ZERO,
            strength: 5.0,
        };
        let gravity = field.gravity_at(Vec3::new(0.0, 0.0, 10.0));
        assert!((gravity - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
        assert_eq!(field.gravity_at(Vec3::ZERO), Vec3::ZERO);
    }
}

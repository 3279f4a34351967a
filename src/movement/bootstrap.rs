//! Movement domain: player bootstrap.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    ContactAccumulator, GameLayer, LocomotionController, Player, Submergence,
};

/// Default radius of the player's sphere collider.
pub const PLAYER_RADIUS: f32 = 0.5;

/// Components that make an entity a physics-driven locomotion character.
pub fn player_bundle(position: Vec3) -> impl Bundle {
    (
        // Identity & locomotion state
        (
            Player,
            LocomotionController::default(),
            ContactAccumulator::default(),
            Submergence::default(),
        ),
        Transform::from_translation(position),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::sphere(PLAYER_RADIUS),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Gravity comes from the locomotion controller
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollidingEntities::default(),
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Default,
                    GameLayer::Ground,
                    GameLayer::Stairs,
                    GameLayer::Climbable,
                    GameLayer::Water,
                    GameLayer::Platform,
                ],
            ),
        ),
    )
}

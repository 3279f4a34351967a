//! Movement domain: components and physics layers for locomotion.

use avian3d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Regular walkable surfaces
    Ground,
    /// Stairs and ramps that use the steeper stairs angle
    Stairs,
    /// Surfaces the player may climb while holding climb
    Climbable,
    /// Water volumes (sensors)
    Water,
    /// Player character
    Player,
    /// Moving platforms
    Platform,
}

#[derive(Component, Debug)]
pub struct Player;

/// Fractional depth inside water this tick, in [0, 1]. Rebuilt every tick.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct Submergence {
    pub depth: f32,
    /// Body of the water volume the depth was measured in
    pub water_body: Option<Entity>,
}

/// Marker for water volumes
#[derive(Component, Debug)]
pub struct Water;

/// Kinematic platform moved back and forth by the dev test course.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlatformPath {
    pub origin: Vec3,
    pub extent: Vec3,
    pub period: f32,
}

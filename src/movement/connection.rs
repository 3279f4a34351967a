//! Movement domain: motion of the body the character stands on.

use bevy::prelude::*;

/// Pose and mass data of a support body at the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportFrame {
    pub position: Vec3,
    pub rotation: Quat,
    pub kinematic: bool,
    pub mass: f32,
}

impl SupportFrame {
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// Light dynamic bodies get pushed around instead of carrying the character.
    pub fn carries(&self, character_mass: f32) -> bool {
        self.kinematic || self.mass >= character_mass
    }
}

/// Lookup of externally owned bodies; `None` once a body is gone.
pub trait SupportBodies {
    fn support_frame(&self, body: Entity) -> Option<SupportFrame>;
}

/// Tracks the attachment point on the current support body so its motion
/// (including rotation around an offset) can be turned into a velocity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionTracker {
    previous: Option<Entity>,
    world_position: Vec3,
    local_position: Vec3,
    velocity: Vec3,
}

impl ConnectionTracker {
    /// Velocity contributed by the support body this tick.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn previous(&self) -> Option<Entity> {
        self.previous
    }

    /// Update from this tick's connection candidate and return its velocity.
    pub fn update(
        &mut self,
        connection: Option<Entity>,
        bodies: &impl SupportBodies,
        character_position: Vec3,
        character_mass: f32,
        dt: f32,
    ) -> Vec3 {
        self.velocity = Vec3::ZERO;
        let previous = std::mem::replace(&mut self.previous, connection);

        let Some(body) = connection else {
            return self.velocity;
        };
        let Some(frame) = bodies.support_frame(body) else {
            return self.velocity;
        };
        if !frame.carries(character_mass) {
            return self.velocity;
        }

        if previous == Some(body) && dt > 0.0 {
            let movement = frame.to_world(self.local_position) - self.world_position;
            let velocity = movement / dt;
            if velocity.is_finite() {
                self.velocity = velocity;
            }
        }

        self.world_position = character_position;
        self.local_position = frame.to_local(character_position);
        self.velocity
    }
}

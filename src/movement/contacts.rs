//! Movement domain: per-tick contact classification.
//!
//! Collision contacts arrive one by one while the physics step runs and are
//! folded into a [`ContactAccumulator`]. The accumulator is drained once the
//! next locomotion tick has consumed it.

use bevy::prelude::*;

use crate::movement::SurfaceThresholds;

/// Contacts with an up-dot above this are steep walls rather than overhangs.
pub const STEEP_MIN_DOT: f32 = -0.01;

/// One contact point reported by the physics engine, with its normal
/// oriented away from the surface toward the character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceContact {
    pub normal: Vec3,
    pub body: Option<Entity>,
    /// Layer bits of the touched collider
    pub layers: u32,
}

/// How a single contact normal was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactClass {
    pub ground: bool,
    pub steep: bool,
    pub climb: bool,
}

/// Everything [`ContactAccumulator::classify`] needs besides the contact.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
    pub up: Vec3,
    pub thresholds: &'a SurfaceThresholds,
    pub desires_climbing: bool,
}

/// Summed contact normals and counts for one tick.
///
/// A sum is only a direction once normalized, which matters only when its
/// count is above one.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ContactAccumulator {
    pub ground_count: u32,
    pub ground_normal: Vec3,
    pub steep_count: u32,
    pub steep_normal: Vec3,
    pub climb_count: u32,
    pub climb_normal: Vec3,
    /// Most recent single climb normal seen this tick
    pub latest_climb_normal: Option<Vec3>,
    pub connection: Option<Entity>,
}

impl ContactAccumulator {
    /// Classify one contact and fold it into the counters.
    pub fn classify(&mut self, contact: SurfaceContact, ctx: &ClassifyContext) -> ContactClass {
        let mut class = ContactClass::default();
        // Zero or NaN normals carry no orientation; skip them entirely.
        let Some(normal) = contact.normal.try_normalize() else {
            return class;
        };

        let up_dot = ctx.up.dot(normal);
        if up_dot >= ctx.thresholds.min_dot(contact.layers) {
            class.ground = true;
            self.ground_count += 1;
            self.ground_normal += normal;
            self.connection = contact.body.or(self.connection);
            return class;
        }

        if up_dot > STEEP_MIN_DOT {
            class.steep = true;
            self.steep_count += 1;
            self.steep_normal += normal;
            if self.ground_count == 0 {
                self.connection = contact.body.or(self.connection);
            }
        }

        if ctx.desires_climbing
            && up_dot >= ctx.thresholds.min_climb_dot
            && ctx.thresholds.is_climbable(contact.layers)
        {
            class.climb = true;
            self.climb_count += 1;
            self.climb_normal += normal;
            self.latest_climb_normal = Some(normal);
            self.connection = contact.body.or(self.connection);
        }

        class
    }

    /// Classify a batch of contacts, e.g. all points of one collision event.
    pub fn classify_all(
        &mut self,
        contacts: impl IntoIterator<Item = SurfaceContact>,
        ctx: &ClassifyContext,
    ) {
        for contact in contacts {
            self.classify(contact, ctx);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ground_count == 0 && self.steep_count == 0 && self.climb_count == 0
    }

    /// Reset for the next tick.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

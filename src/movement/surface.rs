//! Movement domain: surface state machine and snap-to-ground.

use bevy::prelude::*;

use crate::movement::math::normalize_or;
use crate::movement::{ContactAccumulator, JumpState, SurfaceThresholds};

/// Ray query against the physics world.
pub trait SurfaceProbe {
    /// Nearest hit along `direction` within `max_distance`, limited to
    /// colliders on `mask`.
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32)
    -> Option<ProbeHit>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub distance: f32,
    pub normal: Vec3,
    pub body: Option<Entity>,
    pub layers: u32,
}

/// Exclusive locomotion mode, recomputed every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocomotionMode {
    Grounded,
    Steep,
    Climbing,
    Swimming,
    #[default]
    Airborne,
}

/// Per-tick inputs to [`resolve_surface`] that do not come from contacts.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceQuery<'a> {
    pub up: Vec3,
    pub position: Vec3,
    pub velocity: Vec3,
    pub submergence: f32,
    pub water_body: Option<Entity>,
    pub thresholds: &'a SurfaceThresholds,
    pub swim_threshold: f32,
    pub max_snap_speed: f32,
    pub probe_distance: f32,
    pub probe_mask: u32,
    /// Climb normal resolved on the previous climbing tick
    pub previous_climb_normal: Option<Vec3>,
}

impl SurfaceQuery<'_> {
    pub fn in_water(&self) -> bool {
        self.submergence > 0.0
    }

    pub fn swimming(&self) -> bool {
        self.submergence >= self.swim_threshold
    }
}

/// Outcome of one surface resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    pub mode: LocomotionMode,
    /// Operative contact normal; the up axis when unsupported
    pub contact_normal: Vec3,
    pub steep_normal: Vec3,
    pub climb_normal: Option<Vec3>,
    pub ground_contacts: u32,
    pub steep_contacts: u32,
    pub connection: Option<Entity>,
    /// Velocity after a possible snap reprojection
    pub velocity: Vec3,
    pub snapped: bool,
}

impl SurfaceState {
    pub fn on_ground(&self) -> bool {
        self.ground_contacts > 0
    }

    pub fn on_steep(&self) -> bool {
        self.steep_contacts > 0
    }
}

/// Resolve the contact data of one tick into a locomotion mode.
///
/// Advances the step counters in `jump` and grants a fresh jump budget when
/// the character counts as supported.
pub fn resolve_surface(
    contacts: &ContactAccumulator,
    jump: &mut JumpState,
    query: &SurfaceQuery,
    probe: &impl SurfaceProbe,
) -> SurfaceState {
    jump.advance_steps();

    let up = query.up;
    let mut state = SurfaceState {
        mode: LocomotionMode::Airborne,
        contact_normal: up,
        steep_normal: normalize_or(contacts.steep_normal, up),
        climb_normal: None,
        ground_contacts: contacts.ground_count,
        steep_contacts: contacts.steep_count,
        connection: contacts.connection,
        velocity: query.velocity,
        snapped: false,
    };

    if contacts.climb_count > 0 && jump.steps_since_jump > 2 {
        let summed = normalize_or(contacts.climb_normal, up);
        // Opposing walls can sum into a floor-like normal.
        let climb_normal =
            if contacts.climb_count > 1 && up.dot(summed) >= query.thresholds.climb_fallback_dot {
                query
                    .previous_climb_normal
                    .or(contacts.latest_climb_normal)
                    .unwrap_or(summed)
            } else {
                summed
            };
        state.mode = LocomotionMode::Climbing;
        state.ground_contacts = 1;
        state.contact_normal = climb_normal;
        state.climb_normal = Some(climb_normal);
    } else if query.swimming() {
        state.mode = LocomotionMode::Swimming;
        state.ground_contacts = 0;
        state.contact_normal = up;
        state.connection = query.water_body;
    } else if contacts.ground_count > 0 {
        state.mode = LocomotionMode::Grounded;
        state.contact_normal = normalize_or(contacts.ground_normal, up);
    } else if let Some(snap) = snap_to_ground(jump, query, probe) {
        state.mode = LocomotionMode::Grounded;
        state.ground_contacts = 1;
        state.contact_normal = snap.normal;
        state.velocity = snap.velocity;
        state.connection = snap.body;
        state.snapped = true;
    } else if let Some(normal) = recover_steep_contacts(contacts, query) {
        state.mode = LocomotionMode::Grounded;
        state.steep_contacts = 0;
        state.ground_contacts = 1;
        state.contact_normal = normal;
    } else if contacts.steep_count > 0 {
        state.mode = LocomotionMode::Steep;
    }

    if !matches!(state.mode, LocomotionMode::Steep | LocomotionMode::Airborne) {
        jump.mark_supported();
    }

    state
}

/// Result of a successful ground snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSnap {
    pub normal: Vec3,
    pub velocity: Vec3,
    pub body: Option<Entity>,
}

/// Keep a character that just left the ground glued to it when a short
/// probe still finds walkable ground below.
pub fn snap_to_ground(
    jump: &JumpState,
    query: &SurfaceQuery,
    probe: &impl SurfaceProbe,
) -> Option<GroundSnap> {
    if jump.steps_since_grounded > 1 || jump.steps_since_jump <= 2 || query.in_water() {
        return None;
    }

    let speed = query.velocity.length();
    if speed > query.max_snap_speed {
        return None;
    }

    let hit = probe.cast(
        query.position,
        -query.up,
        query.probe_distance,
        query.probe_mask,
    )?;
    let normal = hit.normal.try_normalize()?;
    if query.up.dot(normal) < query.thresholds.min_dot(hit.layers) {
        return None;
    }

    let mut velocity = query.velocity;
    let dot = velocity.dot(normal);
    if dot > 0.0 {
        velocity = (velocity - normal * dot).normalize_or_zero() * speed;
    }

    Some(GroundSnap {
        normal,
        velocity,
        body: hit.body,
    })
}

/// Several steep contacts can average into a walkable normal, e.g. when
/// wedged in a narrow crevice.
fn recover_steep_contacts(contacts: &ContactAccumulator, query: &SurfaceQuery) -> Option<Vec3> {
    if contacts.steep_count <= 1 {
        return None;
    }
    let normal = contacts.steep_normal.try_normalize()?;
    (query.up.dot(normal) >= query.thresholds.steep_recovery_dot).then_some(normal)
}

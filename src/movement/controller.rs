//! Movement domain: the per-tick locomotion pipeline.
//!
//! One call to [`LocomotionController::step`] runs surface resolution,
//! support-body tracking, velocity adjustment, jump arbitration and gravity
//! in that order, and returns the velocity to hand back to the physics
//! engine. The controller never touches the contact accumulator; callers
//! drain it after the step.

use bevy::prelude::*;

use crate::movement::math::{finite_or_zero, project_direction_on_plane, up_axis_from_gravity};
use crate::movement::velocity::{
    AdjustInput, GravityInput, InputFrame, adjust_velocity, apply_gravity, apply_water_drag,
};
use crate::movement::{
    ConnectionTracker, ContactAccumulator, Gait, JumpContext, JumpKind, JumpState,
    LocomotionMode, MovementProfile, MovementTuning, SupportBodies, SurfaceProbe, SurfaceQuery,
    SurfaceState, SurfaceThresholds, resolve_surface,
};

/// Everything the controller reads from the engine and the player for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    pub position: Vec3,
    pub velocity: Vec3,
    pub gravity: Vec3,
    pub mass: f32,
    pub dt: f32,
    /// x = right, y = up (swimming only), z = forward
    pub intent: Vec3,
    /// Orientation steering the input axes; world axes when `None`
    pub input_space: Option<Quat>,
    pub desires_climbing: bool,
    pub jump_requested: bool,
    pub boost_requested: bool,
    pub brake_requested: bool,
    pub submergence: f32,
    pub water_body: Option<Entity>,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            mass: 1.0,
            dt: 1.0 / 64.0,
            intent: Vec3::ZERO,
            input_space: None,
            desires_climbing: false,
            jump_requested: false,
            boost_requested: false,
            brake_requested: false,
            submergence: 0.0,
            water_body: None,
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Velocity to write back to the rigid body
    pub velocity: Vec3,
    pub surface: SurfaceState,
    pub profile: MovementProfile,
    pub connection_velocity: Vec3,
    pub jump: Option<JumpKind>,
}

/// Durable locomotion state of one character.
#[derive(Component, Debug, Clone, Default)]
pub struct LocomotionController {
    pub jump: JumpState,
    pub gait: Gait,
    pub mode: LocomotionMode,
    pub contact_normal: Vec3,
    connection: ConnectionTracker,
    previous_climb_normal: Option<Vec3>,
}

impl LocomotionController {
    /// Cancel ground snapping for the coming tick, e.g. for scripted launches.
    pub fn prevent_snap_to_ground(&mut self) {
        self.jump.prevent_snap_to_ground();
    }

    pub fn connection_velocity(&self) -> Vec3 {
        self.connection.velocity()
    }

    pub fn step(
        &mut self,
        input: &TickInput,
        contacts: &ContactAccumulator,
        tuning: &MovementTuning,
        thresholds: &SurfaceThresholds,
        probe: &impl SurfaceProbe,
        bodies: &impl SupportBodies,
    ) -> TickOutcome {
        let dt = if input.dt.is_finite() { input.dt.max(0.0) } else { 0.0 };
        let gravity = finite_or_zero(input.gravity);
        let up = up_axis_from_gravity(gravity);
        let submergence = if input.submergence.is_finite() {
            input.submergence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let swimming = submergence >= tuning.swim_threshold;
        let desires_climbing = input.desires_climbing && !swimming;
        let intent = finite_or_zero(input.intent).clamp_length_max(1.0);

        self.gait = self
            .gait
            .with_triggers(input.boost_requested, input.brake_requested);

        let query = SurfaceQuery {
            up,
            position: input.position,
            velocity: finite_or_zero(input.velocity),
            submergence,
            water_body: input.water_body,
            thresholds,
            swim_threshold: tuning.swim_threshold,
            max_snap_speed: tuning.max_snap_speed,
            probe_distance: tuning.probe_distance,
            probe_mask: tuning.probe_mask,
            previous_climb_normal: self.previous_climb_normal,
        };
        let surface = resolve_surface(contacts, &mut self.jump, &query, probe);
        let mut velocity = surface.velocity;

        let connection_velocity =
            self.connection
                .update(surface.connection, bodies, input.position, input.mass, dt);

        if submergence > 0.0 {
            velocity = apply_water_drag(velocity, tuning.water_drag, submergence, dt);
        }

        let space = input.input_space.unwrap_or(Quat::IDENTITY);
        let frame = InputFrame {
            up,
            right: project_direction_on_plane(space * Vec3::X, up),
            forward: project_direction_on_plane(space * Vec3::NEG_Z, up),
            contact_normal: surface.contact_normal,
        };
        let profile = MovementProfile::resolve(
            surface.mode,
            submergence,
            tuning.swim_threshold,
            self.gait,
        );
        let limits = profile.limits(tuning, surface.on_ground(), desires_climbing);
        velocity = adjust_velocity(
            velocity,
            profile,
            limits,
            &frame,
            &AdjustInput {
                intent,
                swimming,
                connection_velocity,
                dt,
            },
        );

        let mut jump = None;
        if input.jump_requested && !swimming {
            jump = self.jump.try_jump(
                &mut velocity,
                &JumpContext {
                    up,
                    gravity_magnitude: gravity.length(),
                    surface: &surface,
                    submergence,
                    swim_threshold: tuning.swim_threshold,
                    jump_height: tuning.jump_height,
                    max_air_jumps: tuning.max_air_jumps,
                    coyote_grace: tuning.coyote_grace,
                },
            );
            match jump {
                Some(kind) => debug!(
                    "{:?} jump: phase={}, mode={:?}",
                    kind, self.jump.phase, surface.mode
                ),
                None => debug!(
                    "Jump dropped: phase={}, coyote_timer={:.3}",
                    self.jump.phase, self.jump.coyote_timer
                ),
            }
        }

        velocity = apply_gravity(
            velocity,
            &GravityInput {
                gravity,
                mode: surface.mode,
                on_ground: surface.on_ground(),
                submergence,
                desires_climbing,
                contact_normal: surface.contact_normal,
                dt,
            },
            tuning,
        );

        self.jump.update_coyote(surface.on_ground(), dt);

        if let Some(normal) = surface.climb_normal {
            self.previous_climb_normal = Some(normal);
        }
        if surface.mode != self.mode {
            debug!("Locomotion mode: {:?} -> {:?}", self.mode, surface.mode);
        }
        self.mode = surface.mode;
        self.contact_normal = surface.contact_normal;

        TickOutcome {
            velocity: finite_or_zero(velocity),
            surface,
            profile,
            connection_velocity,
            jump,
        }
    }
}

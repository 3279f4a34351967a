//! Movement domain: physics-driven locomotion plugin wiring and exports.
//!
//! The locomotion core (`contacts`, `surface`, `connection`, `velocity`,
//! `jump`, `water`, `controller`) is engine-agnostic and works on plain
//! vectors. The `systems` module binds it to avian3d.

mod bootstrap;
mod components;
mod connection;
mod contacts;
mod controller;
#[cfg(feature = "dev-tools")]
mod dev;
mod events;
mod jump;
pub mod math;
mod resources;
mod surface;
mod systems;
mod velocity;
mod water;


pub use bootstrap::{PLAYER_RADIUS, player_bundle};
pub use components::{GameLayer, PlatformPath, Player, Submergence, Water};
pub use connection::{ConnectionTracker, SupportBodies, SupportFrame};
pub use contacts::{
    ClassifyContext, ContactAccumulator, ContactClass, STEEP_MIN_DOT, SurfaceContact,
};
pub use controller::{LocomotionController, TickInput, TickOutcome};
#[cfg(feature = "dev-tools")]
pub use dev::DevCoursePlugin;
pub use events::CancelGroundSnap;
pub use jump::{JumpContext, JumpKind, JumpState, jump_speed};
pub use resources::{MovementInput, MovementTuning, SurfaceThresholds, TuningError};
pub use surface::{
    GroundSnap, LocomotionMode, ProbeHit, SurfaceProbe, SurfaceQuery, SurfaceState,
    resolve_surface, snap_to_ground,
};
pub use velocity::{
    AdjustInput, CLIMB_GRIP_FACTOR, Gait, GravityInput, IDLE_SPEED_SQUARED, InputFrame,
    MotionLimits, MovementProfile, adjust_velocity, apply_gravity, apply_water_drag,
};
pub use water::{evaluate_submergence, swim_factor};

use bevy::prelude::*;

use crate::movement::systems::{
    apply_snap_cancellations, evaluate_water, gather_contacts, read_input,
    refresh_surface_thresholds, step_locomotion,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<SurfaceThresholds>()
            .init_resource::<MovementInput>()
            .add_message::<CancelGroundSnap>()
            .add_systems(Update, (read_input, apply_snap_cancellations))
            .add_systems(
                FixedUpdate,
                (
                    refresh_surface_thresholds.run_if(resource_changed::<MovementTuning>),
                    evaluate_water,
                    gather_contacts,
                    step_locomotion,
                )
                    .chain(),
            );
    }
}

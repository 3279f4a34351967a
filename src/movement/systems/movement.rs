//! Movement domain: fixed-step locomotion systems.

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::GravityField;
use crate::movement::systems::physics::PhysicsView;
use crate::movement::{
    CancelGroundSnap, ContactAccumulator, LocomotionController, MovementInput, MovementTuning,
    Player, Submergence, SurfaceThresholds, TickInput,
};

/// Re-derive cosine thresholds whenever the tuning changes.
pub(crate) fn refresh_surface_thresholds(
    tuning: Res<MovementTuning>,
    mut thresholds: ResMut<SurfaceThresholds>,
) {
    for error in tuning.validate() {
        warn!("Movement tuning: {}", error);
    }
    *thresholds = SurfaceThresholds::from_tuning(&tuning);
    debug!(
        "Surface thresholds: ground={:.3}, stairs={:.3}, climb={:.3}",
        thresholds.min_ground_dot, thresholds.min_stairs_dot, thresholds.min_climb_dot
    );
}

pub(crate) fn apply_snap_cancellations(
    mut requests: MessageReader<CancelGroundSnap>,
    mut query: Query<&mut LocomotionController>,
) {
    for request in requests.read() {
        if let Ok(mut controller) = query.get_mut(request.entity) {
            controller.prevent_snap_to_ground();
        }
    }
}

/// Run one locomotion tick per player and hand the velocity to the body.
#[allow(clippy::type_complexity)]
pub(crate) fn step_locomotion(
    time: Res<Time>,
    gravity: Res<GravityField>,
    tuning: Res<MovementTuning>,
    thresholds: Res<SurfaceThresholds>,
    mut input: ResMut<MovementInput>,
    view: PhysicsView,
    mut query: Query<
        (
            &Position,
            &Submergence,
            Option<&ComputedMass>,
            &mut LinearVelocity,
            &mut LocomotionController,
            &mut ContactAccumulator,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (position, submergence, mass, mut velocity, mut controller, mut contacts) in &mut query {
        let tick = TickInput {
            position: position.0,
            velocity: velocity.0,
            gravity: gravity.gravity_at(position.0),
            mass: mass.map_or(1.0, |m| m.value()),
            dt,
            intent: Vec3::new(input.axis.x, input.vertical, input.axis.y),
            input_space: input.input_space,
            desires_climbing: input.climb_held,
            jump_requested: input.jump_requested,
            boost_requested: input.boost_requested,
            brake_requested: input.brake_requested,
            submergence: submergence.depth,
            water_body: submergence.water_body,
        };

        let was_grounded = controller.jump.steps_since_grounded == 0;
        let outcome = controller.step(&tick, &contacts, &tuning, &thresholds, &view, &view);
        if outcome.surface.on_ground() && !was_grounded {
            debug!(
                "Landed: mode={:?}, snapped={}",
                outcome.surface.mode, outcome.surface.snapped
            );
        }

        velocity.0 = outcome.velocity;
        contacts.clear();
    }

    input.consume_requests();
}

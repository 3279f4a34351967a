//! Movement domain: contact gathering and water detection systems.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::core::GravityField;
use crate::movement::math::up_axis_from_gravity;
use crate::movement::systems::physics::PhysicsView;
use crate::movement::{
    ClassifyContext, ContactAccumulator, MovementInput, MovementTuning, Player, Submergence,
    SurfaceContact, SurfaceThresholds, Water, evaluate_submergence,
};

/// Measure submergence for every player overlapping a water volume.
pub(crate) fn evaluate_water(
    gravity: Res<GravityField>,
    tuning: Res<MovementTuning>,
    view: PhysicsView,
    waters: Query<Option<&ColliderOf>, With<Water>>,
    mut query: Query<(&Position, &CollidingEntities, &mut Submergence), With<Player>>,
) {
    for (position, colliding, mut submergence) in &mut query {
        let was_in_water = submergence.depth > 0.0;
        let up = up_axis_from_gravity(gravity.gravity_at(position.0));
        let mut deepest = Submergence::default();

        for other in colliding.iter() {
            let Ok(collider_of) = waters.get(*other) else {
                continue;
            };
            let depth = evaluate_submergence(&view, position.0, up, &tuning);
            // Overlapping volumes: the deepest reading wins.
            if depth > deepest.depth {
                deepest = Submergence {
                    depth,
                    water_body: collider_of.map(|c| c.body),
                };
            }
        }

        if deepest.depth > 0.0 && !was_in_water {
            debug!("Entered water: submergence={:.2}", deepest.depth);
        } else if deepest.depth == 0.0 && was_in_water {
            debug!("Left water");
        }
        *submergence = deepest;
    }
}

/// Fold the contacts of the last physics step into each player's accumulator.
pub(crate) fn gather_contacts(
    collisions: Collisions,
    gravity: Res<GravityField>,
    tuning: Res<MovementTuning>,
    thresholds: Res<SurfaceThresholds>,
    input: Res<MovementInput>,
    view: PhysicsView,
    mut query: Query<(Entity, &Position, &Submergence, &mut ContactAccumulator), With<Player>>,
) {
    for (entity, position, submergence, mut contacts) in &mut query {
        // Swimmers ignore solid contacts entirely.
        if submergence.depth >= tuning.swim_threshold {
            continue;
        }

        let ctx = ClassifyContext {
            up: up_axis_from_gravity(gravity.gravity_at(position.0)),
            thresholds: &thresholds,
            desires_climbing: input.climb_held,
        };

        for pair in collisions.collisions_with(entity) {
            // Manifold normals point from collider1 to collider2.
            let (other, sign) = if pair.collider1 == entity {
                (pair.collider2, -1.0)
            } else {
                (pair.collider1, 1.0)
            };
            let (body, layers) = view.collider_info(other);

            for manifold in &pair.manifolds {
                let contact = SurfaceContact {
                    normal: manifold.normal * sign,
                    body,
                    layers,
                };
                contacts.classify_all(manifold.points.iter().map(|_| contact), &ctx);
            }
        }
    }
}

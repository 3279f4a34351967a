//! Movement domain: avian3d-backed implementations of the locomotion seams.

use avian3d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::movement::{ProbeHit, SupportBodies, SupportFrame, SurfaceProbe};

/// Read-only view of the physics world used by the locomotion systems.
///
/// The player layer is never part of a probe mask, so rays cast from inside
/// the character do not hit its own collider.
#[derive(SystemParam)]
pub(crate) struct PhysicsView<'w, 's> {
    spatial_query: SpatialQuery<'w, 's>,
    colliders: Query<'w, 's, (Option<&'static ColliderOf>, Option<&'static CollisionLayers>)>,
    bodies: Query<
        'w,
        's,
        (
            &'static Position,
            &'static Rotation,
            &'static RigidBody,
            Option<&'static ComputedMass>,
        ),
    >,
}

impl PhysicsView<'_, '_> {
    /// Owning body and layer bits of a collider.
    pub(crate) fn collider_info(&self, collider: Entity) -> (Option<Entity>, u32) {
        match self.colliders.get(collider) {
            Ok((collider_of, layers)) => (
                collider_of.map(|c| c.body),
                layers.map_or(0, |l| l.memberships.0),
            ),
            Err(_) => (None, 0),
        }
    }
}

impl SurfaceProbe for PhysicsView<'_, '_> {
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
    ) -> Option<ProbeHit> {
        let direction = Dir3::new(direction).ok()?;
        let filter = SpatialQueryFilter::from_mask(LayerMask(mask));
        let hit = self
            .spatial_query
            .cast_ray(origin, direction, max_distance, true, &filter)?;
        let (body, layers) = self.collider_info(hit.entity);
        Some(ProbeHit {
            distance: hit.distance,
            normal: hit.normal,
            body,
            layers,
        })
    }
}

impl SupportBodies for PhysicsView<'_, '_> {
    fn support_frame(&self, body: Entity) -> Option<SupportFrame> {
        let (position, rotation, rigid_body, mass) = self.bodies.get(body).ok()?;
        Some(SupportFrame {
            position: position.0,
            rotation: rotation.0,
            // Static bodies never get pushed, so they carry like kinematic ones.
            kinematic: !matches!(rigid_body, RigidBody::Dynamic),
            mass: mass.map_or(0.0, |m| m.value()),
        })
    }
}

//! Movement domain: debug-only test course for trying out locomotion.

use std::f32::consts::TAU;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, PlatformPath, Water};

pub struct DevCoursePlugin;

impl Plugin for DevCoursePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_test_course)
            .add_systems(FixedUpdate, move_platforms);
    }
}

fn solid_layers(layer: GameLayer) -> CollisionLayers {
    CollisionLayers::new(layer, [GameLayer::Player])
}

pub(crate) fn spawn_test_course(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let stairs_color = Color::srgb(0.5, 0.45, 0.35);
    let climb_color = Color::srgb(0.6, 0.3, 0.3);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let water_color = Color::srgba(0.2, 0.4, 0.8, 0.5);

    // Ground
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(60.0, 1.0, 60.0))),
        MeshMaterial3d(materials.add(ground_color)),
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(60.0, 1.0, 60.0),
        solid_layers(GameLayer::Ground),
    ));

    // Ramp at 35 degrees: steep for plain ground, walkable as stairs
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(4.0, 0.5, 10.0))),
        MeshMaterial3d(materials.add(stairs_color)),
        Transform::from_xyz(-8.0, 1.5, -6.0).with_rotation(Quat::from_rotation_x(35f32.to_radians())),
        RigidBody::Static,
        Collider::cuboid(4.0, 0.5, 10.0),
        solid_layers(GameLayer::Stairs),
    ));

    // Climbable wall
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(6.0, 8.0, 1.0))),
        MeshMaterial3d(materials.add(climb_color)),
        Transform::from_xyz(8.0, 4.0, -10.0),
        RigidBody::Static,
        Collider::cuboid(6.0, 8.0, 1.0),
        solid_layers(GameLayer::Climbable),
    ));

    // Water pool: a sensor volume resting on the ground slab
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(10.0, 4.0, 10.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: water_color,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_xyz(12.0, 2.0, 10.0),
        Water,
        RigidBody::Static,
        Collider::cuboid(10.0, 4.0, 10.0),
        Sensor,
        CollisionLayers::new(GameLayer::Water, [GameLayer::Player]),
    ));

    // Moving platform
    let origin = Vec3::new(-10.0, 1.5, 10.0);
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(4.0, 0.5, 4.0))),
        MeshMaterial3d(materials.add(platform_color)),
        Transform::from_translation(origin),
        PlatformPath {
            origin,
            extent: Vec3::new(6.0, 0.0, 0.0),
            period: 6.0,
        },
        RigidBody::Kinematic,
        Collider::cuboid(4.0, 0.5, 4.0),
        AngularVelocity(Vec3::new(0.0, 0.4, 0.0)),
        solid_layers(GameLayer::Platform),
    ));

    info!("Spawned locomotion test course");
}

/// Drive kinematic platforms along their sine paths.
pub(crate) fn move_platforms(
    time: Res<Time>,
    mut query: Query<(&PlatformPath, &mut LinearVelocity)>,
) {
    let t = time.elapsed_secs();

    for (path, mut velocity) in &mut query {
        if path.period <= 0.0 {
            velocity.0 = Vec3::ZERO;
            continue;
        }
        let angular_frequency = TAU / path.period;
        velocity.0 = path.extent * angular_frequency * (angular_frequency * t).cos();
    }
}

use avian3d::prelude::*;
use bevy::prelude::*;

use rollick::content::ContentPlugin;
use rollick::core::CorePlugin;
use rollick::movement::{MovementPlugin, PLAYER_RADIUS, player_bundle};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Rollick".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((CorePlugin, ContentPlugin, MovementPlugin))
    .add_systems(Startup, setup_scene);

    #[cfg(feature = "dev-tools")]
    app.add_plugins(rollick::movement::DevCoursePlugin);

    app.run();
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 14.0, 22.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        player_bundle(Vec3::new(0.0, 3.0, 0.0)),
        Mesh3d(meshes.add(Sphere::new(PLAYER_RADIUS))),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.9))),
    ));
}

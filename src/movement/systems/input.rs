//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MovementInput;

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    cameras: Query<&Transform, With<Camera3d>>,
    mut input: ResMut<MovementInput>,
) {
    let axis_value = |negative: [KeyCode; 2], positive: [KeyCode; 2]| {
        let mut value = 0.0;
        if keyboard.any_pressed(negative) {
            value -= 1.0;
        }
        if keyboard.any_pressed(positive) {
            value += 1.0;
        }
        value
    };

    // x = right, y = forward
    let axis = Vec2::new(
        axis_value(
            [KeyCode::KeyA, KeyCode::ArrowLeft],
            [KeyCode::KeyD, KeyCode::ArrowRight],
        ),
        axis_value(
            [KeyCode::KeyS, KeyCode::ArrowDown],
            [KeyCode::KeyW, KeyCode::ArrowUp],
        ),
    );
    input.axis = axis.clamp_length_max(1.0);
    input.vertical = axis_value(
        [KeyCode::KeyQ, KeyCode::PageDown],
        [KeyCode::KeyE, KeyCode::PageUp],
    );
    input.climb_held = keyboard.pressed(KeyCode::ShiftLeft);
    input.input_space = cameras.iter().next().map(|transform| transform.rotation);

    // Edge-triggered requests stay latched until a fixed step consumes them.
    input.jump_requested |= keyboard.just_pressed(KeyCode::Space);
    input.boost_requested |= keyboard.just_pressed(KeyCode::KeyR);
    input.brake_requested |= keyboard.just_pressed(KeyCode::KeyB);
}

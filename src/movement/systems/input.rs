//! Movement domain: keyboard sampling for locomotion.

use bevy::prelude::*;

use crate::movement::LocomotionInput;

const LEFT: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const DOWN: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const UP: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const JUMP: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];

/// -1, 0 or 1. Opposing keys cancel out.
fn key_axis(keyboard: &ButtonInput<KeyCode>, negative: [KeyCode; 2], positive: [KeyCode; 2]) -> f32 {
    let mut value = 0.0;
    if keyboard.any_pressed(negative) {
        value -= 1.0;
    }
    if keyboard.any_pressed(positive) {
        value += 1.0;
    }
    value
}

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<LocomotionInput>) {
    input.axis = Vec2::new(
        key_axis(&keyboard, LEFT, RIGHT),
        // Climb direction
        key_axis(&keyboard, DOWN, UP),
    );
    input.jump_just_pressed = keyboard.any_just_pressed(JUMP);
}

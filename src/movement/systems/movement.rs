//! Movement domain: locomotion systems for input response and physics.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::audio::AudioCue;
use crate::core::Deactivated;
use crate::movement::body::AvianBody;
use crate::movement::locomotion::wall_detection_cooldown;
use crate::movement::{Facing, LocomotionInput, LocomotionState, LocomotionTuning, Player};
use crate::schedule::{Clock, TaskScheduler};
use crate::sprites::Animator;

type ActivePlayer = (With<Player>, Without<Deactivated>);

pub(crate) fn apply_locomotion_input(
    time: Res<Time>,
    input: Res<LocomotionInput>,
    tuning: Res<LocomotionTuning>,
    mut cues: MessageWriter<AudioCue>,
    mut query: Query<
        (
            &mut LocomotionState,
            &mut LinearVelocity,
            &mut RigidBody,
            &mut Sprite,
        ),
        ActivePlayer,
    >,
) {
    let dt = time.delta_secs();
    let mut pending = Vec::new();

    for (mut state, velocity, rigid_body, mut sprite) in &mut query {
        let mut body = AvianBody::new(velocity, rigid_body);
        state.apply_input(&input, &mut body, &tuning, dt, &mut pending);

        let flip = state.facing == Facing::Left;
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }

    for cue in pending {
        cues.write(cue);
    }
}

pub(crate) fn update_animation_params(
    tuning: Res<LocomotionTuning>,
    mut cues: MessageWriter<AudioCue>,
    mut query: Query<(&mut LocomotionState, &LinearVelocity, &mut Animator), ActivePlayer>,
) {
    let mut pending = Vec::new();

    for (mut state, velocity, mut animator) in &mut query {
        state.update_animator(&mut animator, velocity.0, &tuning, &mut pending);
    }

    for cue in pending {
        cues.write(cue);
    }
}

/// Runs on the fixed physics tick.
pub(crate) fn apply_physics_step(
    tuning: Res<LocomotionTuning>,
    mut scheduler: ResMut<TaskScheduler>,
    mut cues: MessageWriter<AudioCue>,
    mut query: Query<
        (
            Entity,
            &mut LocomotionState,
            &mut LinearVelocity,
            &mut RigidBody,
        ),
        ActivePlayer,
    >,
) {
    for (entity, mut state, velocity, rigid_body) in &mut query {
        let mut body = AvianBody::new(velocity, rigid_body);
        let outcome = state.physics_step(&mut body, &tuning);

        if outcome.jumped {
            cues.write(AudioCue::Jump);
        }

        if outcome.wall_jumped {
            cues.write(AudioCue::WallJump);
            scheduler.start_owned(
                entity,
                Clock::Scaled,
                wall_detection_cooldown(entity, tuning.wall_detection_cooldown),
            );
        }
    }
}

//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocomotionTuning {
    pub move_speed: f32,
    /// Horizontal speed after the mitochondria upgrade.
    pub boosted_move_speed: f32,
    pub jump_impulse: f32,
    pub wall_jump_impulse: f32,
    pub climb_speed: f32,
    /// Time constant of the vertical input smoothing, in seconds.
    pub vertical_smoothing_time: f32,
    pub wall_detection_cooldown: f32,
    /// Minimum |vx| that counts as running.
    pub running_threshold: f32,
    pub playback_rate_min: f32,
    pub playback_rate_max: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            boosted_move_speed: 8.0,
            jump_impulse: 5.0,
            wall_jump_impulse: 17.0,
            climb_speed: 1.0,
            vertical_smoothing_time: 0.1,
            wall_detection_cooldown: 0.2,
            running_threshold: 0.01,
            playback_rate_min: 0.5,
            playback_rate_max: 1.5,
        }
    }
}

/// Raw input sampled once per frame.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct LocomotionInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
}

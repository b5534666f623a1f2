//! Sprites module: animation parameters, triggers and playback.

pub mod animation;


use bevy::prelude::*;

pub use animation::*;

use crate::core::FrameSet;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, play_animations.in_set(FrameSet::Animate));
    }
}

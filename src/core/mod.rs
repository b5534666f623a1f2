//! Core domain: frame ordering, shared markers and camera setup.

mod components;
mod systems;


pub use components::{Deactivated, Spin, owner_is_live};

use bevy::prelude::*;

use crate::core::systems::{setup_camera, spin_entities};

/// World units shown per screen pixel are `1 / PIXELS_PER_UNIT`.
pub const PIXELS_PER_UNIT: f32 = 48.0;

/// Per-frame ordering: input sampling, sensor probes, locomotion decisions,
/// animation parameters, then scheduled task advancement.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Sense,
    Decide,
    Animate,
    Tasks,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSet::Input,
                FrameSet::Sense,
                FrameSet::Decide,
                FrameSet::Animate,
                FrameSet::Tasks,
            )
                .chain(),
        )
        .add_systems(Startup, setup_camera)
        .add_systems(Update, spin_entities);
    }
}

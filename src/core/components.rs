//! Core domain: markers shared across gameplay domains.

use bevy::prelude::*;

/// An entity that has been switched off: hidden, ignored by gameplay systems,
/// and the owner of nothing the scheduler should keep running.
#[derive(Component, Debug, Default)]
pub struct Deactivated;

/// Constant rotation about the Z axis.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spin {
    pub degrees_per_second: f32,
}

impl Default for Spin {
    fn default() -> Self {
        Self {
            degrees_per_second: 50.0,
        }
    }
}

/// Whether `owner` still exists and has not been deactivated.
pub fn owner_is_live(world: &World, owner: Entity) -> bool {
    world
        .get_entity(owner)
        .is_ok_and(|entity| !entity.contains::<Deactivated>())
}

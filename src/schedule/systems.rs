//! Schedule domain: frame driver for the task scheduler.

use bevy::prelude::*;

use crate::schedule::{FrameDelta, TaskScheduler};

/// Exclusive system: tasks get full world access while they step.
pub(crate) fn advance_scheduled_tasks(world: &mut World) {
    let delta = FrameDelta {
        scaled: world.resource::<Time<Virtual>>().delta_secs(),
        unscaled: world.resource::<Time<Real>>().delta_secs(),
    };

    world.resource_scope(|world, mut scheduler: Mut<TaskScheduler>| {
        scheduler.tick(world, delta);
    });
}

//! Schedule domain: cooperative timed-sequence scheduler.

mod interp;
mod scheduler;
mod sinks;
mod systems;
mod tasks;


pub use interp::{lerp_clamped, move_towards, smooth_towards};
pub use scheduler::{
    Clock, FrameDelta, TaskContext, TaskHandle, TaskScheduler, TaskStatus, TaskTick, TimedTask,
};
pub use sinks::{FloatSink, SpriteAlpha};
pub use tasks::{Delay, Lerp, MoveTowards, Sequence};

use bevy::prelude::*;

use crate::core::FrameSet;
use crate::schedule::systems::advance_scheduled_tasks;

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TaskScheduler>()
            .add_systems(Update, advance_scheduled_tasks.in_set(FrameSet::Tasks));
    }
}

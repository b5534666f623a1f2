//! Level domain: demo level layout and scene flow.

mod flow;
mod spawn;


pub use flow::{LevelFinished, LevelFlow, LevelPhase, scene_fade_in, scene_fade_out};
pub use spawn::{Backdrop, LevelMusic};

use bevy::prelude::*;

use crate::core::FrameSet;
use crate::level::flow::{finish_level, handle_level_hotkeys, handle_portal_reached, start_level_fades};
use crate::level::spawn::spawn_demo_level;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelFlow>()
            .add_message::<LevelFinished>()
            .add_systems(Startup, spawn_demo_level)
            .add_systems(PostStartup, start_level_fades)
            .add_systems(
                Update,
                (handle_level_hotkeys, handle_portal_reached).in_set(FrameSet::Decide),
            )
            .add_systems(Update, finish_level.after(FrameSet::Tasks));
    }
}

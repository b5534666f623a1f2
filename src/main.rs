mod audio;
mod content;
mod core;
mod level;
mod movement;
mod schedule;
mod sprites;
mod upgrades;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cell Ascent".to_string(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            schedule::SchedulePlugin,
            audio::GameAudioPlugin,
            sprites::SpritesPlugin,
            movement::MovementPlugin,
            upgrades::UpgradesPlugin,
            level::LevelPlugin,
        ))
        .run();
}

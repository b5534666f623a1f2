//! Level domain: scene fades, hotkeys and level exit.

use bevy::app::AppExit;
use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::audio::{MusicTrack, music_fade_in, music_fade_out};
use crate::content::SequenceTimings;
use crate::level::{Backdrop, LevelMusic};
use crate::schedule::{Clock, Delay, Lerp, Sequence, SpriteAlpha, TaskScheduler};
use crate::upgrades::PortalReached;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelPhase {
    #[default]
    FadingIn,
    Playing,
    FadingOut,
    Finished,
}

#[derive(Resource, Debug, Default)]
pub struct LevelFlow {
    pub phase: LevelPhase,
}

impl LevelFlow {
    /// Mute and quit keys only work while playing.
    pub fn hotkeys_enabled(&self) -> bool {
        self.phase == LevelPhase::Playing
    }

    /// Move to `FadingOut`. Returns false if the level is already ending.
    pub fn begin_exit(&mut self) -> bool {
        match self.phase {
            LevelPhase::FadingOut | LevelPhase::Finished => false,
            LevelPhase::FadingIn | LevelPhase::Playing => {
                self.phase = LevelPhase::FadingOut;
                true
            }
        }
    }
}

/// The level has faded out.
#[derive(Debug, Clone, Copy)]
pub struct LevelFinished;

impl Message for LevelFinished {}

fn set_phase(world: &mut World, phase: LevelPhase) {
    if let Some(mut flow) = world.get_resource_mut::<LevelFlow>() {
        flow.phase = phase;
        debug!("Level phase: {:?}", phase);
    }
}

/// Raise the backdrop to opaque, then enable hotkeys.
pub fn scene_fade_in(backdrop: Entity, duration: f32) -> Sequence {
    Sequence::new("scene-fade-in")
        .then(Lerp::new(SpriteAlpha(backdrop), 0.0, 1.0, duration))
        .then(Delay::immediate(|ctx| set_phase(ctx.world, LevelPhase::Playing)))
}

/// Drop the backdrop to transparent, then mark the level finished.
pub fn scene_fade_out(backdrop: Entity, duration: f32) -> Sequence {
    Sequence::new("scene-fade-out")
        .then(Lerp::from_current(SpriteAlpha(backdrop), 0.0, duration))
        .then(Delay::immediate(|ctx| set_phase(ctx.world, LevelPhase::Finished)))
}

pub(crate) fn start_level_fades(
    timings: Res<SequenceTimings>,
    mut scheduler: ResMut<TaskScheduler>,
    backdrops: Query<Entity, With<Backdrop>>,
    music: Query<Entity, With<LevelMusic>>,
) {
    for backdrop in &backdrops {
        scheduler.start(
            Clock::Unscaled,
            scene_fade_in(backdrop, timings.scene_fade_in),
        );
    }

    for track in &music {
        scheduler.start(
            Clock::Unscaled,
            music_fade_in(
                track,
                timings.music_volume,
                timings.music_start_delay,
                timings.music_fade_in,
            ),
        );
    }
}

fn start_level_exit(
    scheduler: &mut TaskScheduler,
    timings: &SequenceTimings,
    backdrops: &Query<Entity, With<Backdrop>>,
    music: &Query<Entity, With<LevelMusic>>,
) {
    for track in music {
        scheduler.start(
            Clock::Unscaled,
            music_fade_out(track, timings.music_fade_out),
        );
    }

    let mut faded = false;
    for backdrop in backdrops {
        scheduler.start(
            Clock::Unscaled,
            scene_fade_out(backdrop, timings.scene_fade_out),
        );
        faded = true;
    }

    // Nothing to fade: finish on the next tick
    if !faded {
        scheduler.start(
            Clock::Unscaled,
            Delay::immediate(|ctx| set_phase(ctx.world, LevelPhase::Finished)),
        );
    }
}

pub(crate) fn handle_level_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    timings: Res<SequenceTimings>,
    mut flow: ResMut<LevelFlow>,
    mut scheduler: ResMut<TaskScheduler>,
    backdrops: Query<Entity, With<Backdrop>>,
    music_entities: Query<Entity, With<LevelMusic>>,
    mut tracks: Query<&mut MusicTrack, With<LevelMusic>>,
) {
    if !flow.hotkeys_enabled() {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyM) {
        for mut track in &mut tracks {
            track.toggle_mute(timings.music_volume);
            info!("Music volume: {}", track.volume);
        }
    } else if keyboard.just_pressed(KeyCode::Escape) && flow.begin_exit() {
        info!("Leaving level");
        start_level_exit(&mut scheduler, &timings, &backdrops, &music_entities);
    }
}

pub(crate) fn handle_portal_reached(
    mut portal_events: MessageReader<PortalReached>,
    timings: Res<SequenceTimings>,
    mut flow: ResMut<LevelFlow>,
    mut scheduler: ResMut<TaskScheduler>,
    backdrops: Query<Entity, With<Backdrop>>,
    music: Query<Entity, With<LevelMusic>>,
) {
    if portal_events.read().count() == 0 {
        return;
    }

    if flow.begin_exit() {
        info!("Portal reached, fading out level");
        start_level_exit(&mut scheduler, &timings, &backdrops, &music);
    }
}

pub(crate) fn finish_level(
    flow: Res<LevelFlow>,
    mut finished: MessageWriter<LevelFinished>,
    mut exit: MessageWriter<AppExit>,
) {
    if flow.is_changed() && flow.phase == LevelPhase::Finished {
        info!("Level finished");
        finished.write(LevelFinished);
        exit.write(AppExit::Success);
    }
}

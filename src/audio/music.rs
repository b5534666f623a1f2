//! Audio domain: background music volume and fades.

use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;

use crate::schedule::{Delay, FloatSink, MoveTowards, Sequence};

/// Game music. `volume` is the live value fades write into; `nominal_volume`
/// is what a fade-in returns to and a fade-out restores afterwards.
#[derive(Component, Debug, Clone)]
pub struct MusicTrack {
    pub volume: f32,
    pub nominal_volume: f32,
    pub playing: bool,
}

impl MusicTrack {
    pub fn new(volume: f32) -> Self {
        Self {
            volume,
            nominal_volume: volume,
            playing: false,
        }
    }

    /// Mute if audible, otherwise restore to `unmuted_volume`.
    pub fn toggle_mute(&mut self, unmuted_volume: f32) {
        let volume = if self.volume > 0.0 { 0.0 } else { unmuted_volume };
        self.volume = volume;
        self.nominal_volume = volume;
    }
}

/// Live volume of a [`MusicTrack`].
#[derive(Debug, Clone, Copy)]
pub struct MusicVolume(pub Entity);

impl FloatSink for MusicVolume {
    fn get(&self, world: &World) -> Option<f32> {
        world.get::<MusicTrack>(self.0).map(|track| track.volume)
    }

    fn set(&self, world: &mut World, value: f32) {
        if let Some(mut track) = world.get_mut::<MusicTrack>(self.0) {
            track.volume = value;
        }
    }
}

fn nominal_volume(world: &World, track: Entity) -> f32 {
    world
        .get::<MusicTrack>(track)
        .map(|track| track.nominal_volume)
        .unwrap_or(0.0)
}

/// Wait `start_delay`, start playback from silence, then rise to the nominal volume.
pub fn music_fade_in(track: Entity, nominal: f32, start_delay: f32, duration: f32) -> Sequence {
    Sequence::new("music-fade-in")
        .then(
            Delay::new(start_delay, move |ctx| {
                if let Some(mut music) = ctx.world.get_mut::<MusicTrack>(track) {
                    music.playing = true;
                    music.volume = 0.0;
                }
            })
            .named("music-start"),
        )
        .then(MoveTowards::new(MusicVolume(track), nominal, duration))
}

/// Fall to silence, stop playback and restore the nominal volume.
pub fn music_fade_out(track: Entity, duration: f32) -> Sequence {
    Sequence::new("music-fade-out")
        .then(MoveTowards::new(MusicVolume(track), 0.0, duration))
        .then(Delay::immediate(move |ctx| {
            let restored = nominal_volume(ctx.world, track);
            if let Some(mut music) = ctx.world.get_mut::<MusicTrack>(track) {
                music.playing = false;
                music.volume = restored;
            }
        }))
}

/// Mirror track state onto the engine's audio sink.
pub(crate) fn sync_music_sinks(mut query: Query<(&MusicTrack, &mut AudioSink)>) {
    for (track, mut sink) in &mut query {
        sink.set_volume(Volume::Linear(track.volume));

        if track.playing && sink.is_paused() {
            sink.play();
        } else if !track.playing && !sink.is_paused() {
            sink.pause();
        }
    }
}

//! Audio domain: sound cue routing and music fades.
//!
//! Clip selection and mixing belong to the engine; this module only decides
//! which requests reach it and drives music volume through the scheduler.

mod cues;
mod music;


pub use cues::{AudioChannel, AudioCue, ChannelVoice, SfxLibrary, route_cues};
pub use music::{MusicTrack, MusicVolume, music_fade_in, music_fade_out};

use bevy::prelude::*;

use crate::audio::cues::{load_sfx_library, play_audio_cues};
use crate::audio::music::sync_music_sinks;
use crate::core::FrameSet;

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SfxLibrary>()
            .add_message::<AudioCue>()
            .add_systems(Startup, load_sfx_library)
            .add_systems(
                Update,
                (play_audio_cues, sync_music_sinks).after(FrameSet::Tasks),
            );
    }
}

//! Audio domain: one-shot cue requests and channel routing.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

/// Fire-and-forget sound request. The requester never learns whether it played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Footstep,
    Land,
    Jump,
    WallJump,
    Upgrade,
    Portal,
}

impl Message for AudioCue {}

/// A source that plays one clip at a time. Cues routed to a busy channel are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioChannel {
    Player,
    Sfx,
}

impl AudioCue {
    pub fn channel(self) -> AudioChannel {
        match self {
            AudioCue::Footstep | AudioCue::Land | AudioCue::Jump | AudioCue::WallJump => {
                AudioChannel::Player
            }
            AudioCue::Upgrade | AudioCue::Portal => AudioChannel::Sfx,
        }
    }
}

/// Marks a playing one-shot. The entity despawns when the clip ends, freeing its channel.
#[derive(Component, Debug)]
pub struct ChannelVoice {
    pub channel: AudioChannel,
}

/// Loaded clips per cue. Cues without a clip are silent.
#[derive(Resource, Debug, Default)]
pub struct SfxLibrary {
    pub clips: HashMap<AudioCue, Handle<AudioSource>>,
}

impl SfxLibrary {
    pub fn clip(&self, cue: AudioCue) -> Option<&Handle<AudioSource>> {
        self.clips.get(&cue)
    }
}

/// Keep the first cue per free channel, in request order.
pub fn route_cues(
    cues: impl IntoIterator<Item = AudioCue>,
    busy: &mut HashSet<AudioChannel>,
) -> Vec<AudioCue> {
    let mut accepted = Vec::new();
    for cue in cues {
        let channel = cue.channel();
        if busy.insert(channel) {
            accepted.push(cue);
        } else {
            debug!("Dropped {:?}: {:?} channel busy", cue, channel);
        }
    }
    accepted
}

pub(crate) fn load_sfx_library(asset_server: Res<AssetServer>, mut library: ResMut<SfxLibrary>) {
    let paths = [
        (AudioCue::Footstep, "audio/player_footstep.ogg"),
        (AudioCue::Land, "audio/player_land.ogg"),
        (AudioCue::Upgrade, "audio/upgrade.ogg"),
        (AudioCue::Portal, "audio/end_portal.ogg"),
    ];

    for (cue, path) in paths {
        library.clips.insert(cue, asset_server.load(path));
    }
}

pub(crate) fn play_audio_cues(
    mut commands: Commands,
    mut cues: MessageReader<AudioCue>,
    library: Res<SfxLibrary>,
    sources: Res<Assets<AudioSource>>,
    voices: Query<&ChannelVoice>,
) {
    let mut busy: HashSet<AudioChannel> = voices.iter().map(|voice| voice.channel).collect();

    for cue in route_cues(cues.read().copied(), &mut busy) {
        let Some(clip) = library.clip(cue) else {
            continue;
        };

        if !sources.contains(clip.id()) {
            debug!("Clip for {:?} not loaded yet, skipping", cue);
            continue;
        }

        commands.spawn((
            AudioPlayer::new(clip.clone()),
            PlaybackSettings::DESPAWN,
            ChannelVoice {
                channel: cue.channel(),
            },
        ));
    }
}

//! Data definitions for the RON tuning file.
//!
//! These structs mirror assets/data/tuning.ron. Every field has a default,
//! so a partial file only overrides what it names.

use bevy::prelude::*;
use serde::Deserialize;

use crate::movement::LocomotionTuning;

// ============================================================================
// Timed sequence durations (seconds)
// ============================================================================

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SequenceTimings {
    pub portal_approach: f32,
    pub portal_shrink: f32,
    /// Unscaled delay between collecting a pickup and despawning it.
    pub pickup_despawn_delay: f32,
    pub scene_fade_in: f32,
    pub scene_fade_out: f32,
    pub music_fade_in: f32,
    pub music_fade_out: f32,
    pub music_start_delay: f32,
    /// Nominal music volume, also the unmuted value of the mute toggle.
    pub music_volume: f32,
}

impl Default for SequenceTimings {
    fn default() -> Self {
        Self {
            portal_approach: 0.2,
            portal_shrink: 1.0,
            pickup_despawn_delay: 2.0,
            scene_fade_in: 0.5,
            scene_fade_out: 0.5,
            music_fade_in: 1.0,
            music_fade_out: 1.0,
            music_start_delay: 0.1,
            music_volume: 0.2,
        }
    }
}

// ============================================================================
// File wrapper (tuning.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TuningFile {
    pub schema_version: u32,
    pub locomotion: LocomotionTuning,
    pub timings: SequenceTimings,
}

impl Default for TuningFile {
    fn default() -> Self {
        Self {
            schema_version: 1,
            locomotion: LocomotionTuning::default(),
            timings: SequenceTimings::default(),
        }
    }
}

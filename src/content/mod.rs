//! Content domain: data-driven tuning loaded from RON.

mod data;
mod loader;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{SequenceTimings, TuningFile};
pub use loader::{ContentLoadError, TUNING_PATH, load_tuning_file, load_tuning_or_default, parse_tuning};
pub use validation::{ValidationError, validate_tuning};

use bevy::prelude::*;
use std::path::Path;

/// Inserts [`crate::movement::LocomotionTuning`] and [`SequenceTimings`]
/// before any startup system runs.
pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let tuning = load_tuning_or_default(Path::new(TUNING_PATH));
        app.insert_resource(tuning.locomotion)
            .insert_resource(tuning.timings);
    }
}

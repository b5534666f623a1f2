//! Loader for the RON tuning file at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::data::TuningFile;
use super::validation::validate_tuning;

pub const TUNING_PATH: &str = "assets/data/tuning.ron";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning RON text. `file_name` only labels errors.
pub fn parse_tuning(contents: &str, file_name: &str) -> Result<TuningFile, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

pub fn load_tuning_file(path: &Path) -> Result<TuningFile, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_tuning(&contents, &file_name)
}

/// Load and validate the tuning file, falling back to built-in defaults on
/// any failure.
pub fn load_tuning_or_default(path: &Path) -> TuningFile {
    let tuning = match load_tuning_file(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}; using default tuning", e);
            return TuningFile::default();
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for error in &errors {
            warn!("Tuning validation: {}", error);
        }
        warn!(
            "{} rejected with {} error(s); using default tuning",
            path.display(),
            errors.len()
        );
        return TuningFile::default();
    }

    info!(
        "Loaded tuning from {} (schema v{})",
        path.display(),
        tuning.schema_version
    );
    tuning
}

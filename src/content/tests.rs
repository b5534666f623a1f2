use super::*;
use std::path::Path;

const FULL_FILE: &str = r#"(
    schema_version: 1,
    locomotion: (
        move_speed: 5.0,
        boosted_move_speed: 8.0,
        jump_impulse: 5.0,
        wall_jump_impulse: 17.0,
        climb_speed: 1.0,
        vertical_smoothing_time: 0.1,
        wall_detection_cooldown: 0.2,
        running_threshold: 0.01,
        playback_rate_min: 0.5,
        playback_rate_max: 1.5,
    ),
    timings: (
        portal_approach: 0.2,
        portal_shrink: 1.0,
        pickup_despawn_delay: 2.0,
        scene_fade_in: 0.5,
        scene_fade_out: 0.5,
        music_fade_in: 1.0,
        music_fade_out: 1.0,
        music_start_delay: 0.1,
        music_volume: 0.2,
    ),
)"#;

// ---------------------------------------------------------------------------
// Parsing tests
// ---------------------------------------------------------------------------

#[test]
fn test_full_file_matches_defaults() {
    let tuning = parse_tuning(FULL_FILE, "tuning.ron").unwrap();
    assert_eq!(tuning, TuningFile::default());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let tuning = parse_tuning("(locomotion: (climb_speed: 2.5))", "tuning.ron").unwrap();

    assert_eq!(tuning.locomotion.climb_speed, 2.5);
    assert_eq!(tuning.locomotion.move_speed, 5.0);
    assert_eq!(tuning.timings, SequenceTimings::default());
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_tuning("(locomotion: [", "broken.ron").unwrap_err();

    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().starts_with("Failed to load broken.ron"));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let path = Path::new("assets/data/does_not_exist.ron");

    assert!(load_tuning_file(path).is_err());
    assert_eq!(load_tuning_or_default(path), TuningFile::default());
}

// ---------------------------------------------------------------------------
// Validation tests
// ---------------------------------------------------------------------------

#[test]
fn test_defaults_validate() {
    assert!(validate_tuning(&TuningFile::default()).is_empty());
}

#[test]
fn test_invalid_values_reported() {
    let mut tuning = TuningFile::default();
    tuning.locomotion.move_speed = 0.0;
    tuning.locomotion.playback_rate_max = 0.1;
    tuning.timings.music_volume = 1.5;

    let errors = validate_tuning(&tuning);
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();

    assert_eq!(
        fields,
        vec!["move_speed", "playback_rate_max", "music_volume"]
    );
    assert_eq!(errors[0].to_string(), "locomotion.move_speed = 0 (expected > 0)");
}

//! Validation for loaded tuning values.

use super::data::TuningFile;

/// A tuning value outside its allowed range.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub value: f32,
    pub expected: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} = {} (expected {})",
            self.section, self.field, self.value, self.expected
        )
    }
}

/// Helper macro for checking a value satisfies a predicate
macro_rules! check_value {
    ($errors:expr, $section:expr, $owner:expr, $field:ident, $expected:expr, $ok:expr) => {
        let value = $owner.$field;
        let ok: fn(f32) -> bool = $ok;
        if !ok(value) {
            $errors.push(ValidationError {
                section: $section,
                field: stringify!($field),
                value,
                expected: $expected,
            });
        }
    };
}

/// Validate every tuning value.
/// Returns a list of validation errors, empty if all values are usable.
pub fn validate_tuning(tuning: &TuningFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let positive = |v: f32| v > 0.0;
    let non_negative = |v: f32| v >= 0.0;

    // Locomotion
    let loco = &tuning.locomotion;
    check_value!(errors, "locomotion", loco, move_speed, "> 0", positive);
    check_value!(errors, "locomotion", loco, boosted_move_speed, "> 0", positive);
    check_value!(errors, "locomotion", loco, jump_impulse, ">= 0", non_negative);
    check_value!(errors, "locomotion", loco, wall_jump_impulse, ">= 0", non_negative);
    check_value!(errors, "locomotion", loco, climb_speed, ">= 0", non_negative);
    check_value!(errors, "locomotion", loco, vertical_smoothing_time, ">= 0", non_negative);
    check_value!(errors, "locomotion", loco, wall_detection_cooldown, ">= 0", non_negative);
    check_value!(errors, "locomotion", loco, running_threshold, ">= 0", non_negative);
    check_value!(errors, "locomotion", loco, playback_rate_min, "> 0", positive);

    if loco.playback_rate_max < loco.playback_rate_min {
        errors.push(ValidationError {
            section: "locomotion",
            field: "playback_rate_max",
            value: loco.playback_rate_max,
            expected: ">= playback_rate_min",
        });
    }

    // Timings
    let timings = &tuning.timings;
    check_value!(errors, "timings", timings, portal_approach, ">= 0", non_negative);
    check_value!(errors, "timings", timings, portal_shrink, ">= 0", non_negative);
    check_value!(errors, "timings", timings, pickup_despawn_delay, ">= 0", non_negative);
    check_value!(errors, "timings", timings, scene_fade_in, ">= 0", non_negative);
    check_value!(errors, "timings", timings, scene_fade_out, ">= 0", non_negative);
    check_value!(errors, "timings", timings, music_fade_in, ">= 0", non_negative);
    check_value!(errors, "timings", timings, music_fade_out, ">= 0", non_negative);
    check_value!(errors, "timings", timings, music_start_delay, ">= 0", non_negative);
    check_value!(
        errors,
        "timings",
        timings,
        music_volume,
        "0..=1",
        |v| (0.0..=1.0).contains(&v)
    );

    errors
}

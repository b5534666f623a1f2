//! Schedule domain: interpolation helpers shared by timed tasks.

/// Step `current` toward `target` by at most `max_delta`, landing exactly on
/// `target` once it is within reach.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let remaining = target - current;
    if remaining.abs() <= max_delta {
        target
    } else {
        current + remaining.signum() * max_delta
    }
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp_clamped(start: f32, end: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    start + (end - start) * t
}

/// Exponential approach of `current` toward `target` with time constant
/// `time_constant` seconds. Independent of how `dt` is sliced.
pub fn smooth_towards(current: f32, target: f32, time_constant: f32, dt: f32) -> f32 {
    if time_constant <= 0.0 {
        return target;
    }
    let blend = 1.0 - (-dt / time_constant).exp();
    current + (target - current) * blend
}

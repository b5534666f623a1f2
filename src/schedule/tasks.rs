//! Schedule domain: reusable task shapes.
//!
//! - [`Delay`]: run a one-shot action once a fixed time has passed.
//! - [`MoveTowards`]: rate-limited approach that lands exactly on its target.
//! - [`Lerp`]: normalized `t` accumulated per frame, snapped to the end value.
//! - [`Sequence`]: run child tasks back to back.

use std::collections::VecDeque;

use crate::schedule::interp::{lerp_clamped, move_towards};
use crate::schedule::scheduler::{TaskContext, TaskStatus, TaskTick, TimedTask};
use crate::schedule::sinks::FloatSink;

type DelayedAction = Box<dyn FnOnce(&mut TaskContext) + Send + Sync>;

/// Waits `duration` seconds, then runs its action once.
pub struct Delay {
    label: &'static str,
    duration: f32,
    action: Option<DelayedAction>,
}

impl Delay {
    pub fn new(duration: f32, action: impl FnOnce(&mut TaskContext) + Send + Sync + 'static) -> Self {
        Self {
            label: "delay",
            duration,
            action: Some(Box::new(action)),
        }
    }

    /// Runs on the task's first step. Inside a [`Sequence`] that is the same
    /// frame the previous step completed.
    pub fn immediate(action: impl FnOnce(&mut TaskContext) + Send + Sync + 'static) -> Self {
        Self::new(0.0, action)
    }

    pub fn named(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

impl TimedTask for Delay {
    fn step(&mut self, ctx: &mut TaskContext, tick: TaskTick) -> TaskStatus {
        if tick.elapsed < self.duration {
            return TaskStatus::Running;
        }

        if let Some(action) = self.action.take() {
            action(ctx);
        }
        TaskStatus::Complete
    }

    fn label(&self) -> &'static str {
        self.label
    }
}

/// Moves a value toward `target` at `|target - start| / duration` per second.
///
/// Reaches the target bit-for-bit no later than `duration` seconds after the
/// first step and never overshoots it.
pub struct MoveTowards<S: FloatSink> {
    sink: S,
    target: f32,
    duration: f32,
    rate: Option<f32>,
}

impl<S: FloatSink> MoveTowards<S> {
    pub fn new(sink: S, target: f32, duration: f32) -> Self {
        Self {
            sink,
            target,
            duration,
            rate: None,
        }
    }
}

impl<S: FloatSink> TimedTask for MoveTowards<S> {
    fn step(&mut self, ctx: &mut TaskContext, tick: TaskTick) -> TaskStatus {
        let Some(current) = self.sink.get(ctx.world) else {
            return TaskStatus::Complete;
        };

        let rate = match self.rate {
            Some(rate) => rate,
            None => {
                let rate = if self.duration > 0.0 {
                    (self.target - current).abs() / self.duration
                } else {
                    f32::INFINITY
                };
                self.rate = Some(rate);
                rate
            }
        };

        let next = if tick.elapsed >= self.duration {
            self.target
        } else {
            move_towards(current, self.target, rate * tick.delta)
        };
        self.sink.set(ctx.world, next);

        if next == self.target {
            TaskStatus::Complete
        } else {
            TaskStatus::Running
        }
    }

    fn label(&self) -> &'static str {
        "move-towards"
    }
}

/// Linear interpolation driven by `t += dt / duration`.
pub struct Lerp<S: FloatSink> {
    sink: S,
    from: Option<f32>,
    to: f32,
    duration: f32,
    t: f32,
}

impl<S: FloatSink> Lerp<S> {
    pub fn new(sink: S, from: f32, to: f32, duration: f32) -> Self {
        Self {
            sink,
            from: Some(from),
            to,
            duration,
            t: 0.0,
        }
    }

    /// Start from whatever value the sink holds on the first step.
    pub fn from_current(sink: S, to: f32, duration: f32) -> Self {
        Self {
            sink,
            from: None,
            to,
            duration,
            t: 0.0,
        }
    }
}

impl<S: FloatSink> TimedTask for Lerp<S> {
    fn step(&mut self, ctx: &mut TaskContext, tick: TaskTick) -> TaskStatus {
        let start = match self.from {
            Some(start) => start,
            None => {
                let Some(current) = self.sink.get(ctx.world) else {
                    return TaskStatus::Complete;
                };
                self.from = Some(current);
                current
            }
        };

        self.t += if self.duration > 0.0 {
            tick.delta / self.duration
        } else {
            1.0
        };

        if self.t >= 1.0 {
            self.sink.set(ctx.world, self.to);
            TaskStatus::Complete
        } else {
            self.sink.set(ctx.world, lerp_clamped(start, self.to, self.t));
            TaskStatus::Running
        }
    }

    fn label(&self) -> &'static str {
        "lerp"
    }
}

/// Runs child tasks one after another. When a child completes, the next one
/// takes a zero-length step in the same frame, so instant actions chain
/// without losing a frame.
pub struct Sequence {
    label: &'static str,
    steps: VecDeque<Box<dyn TimedTask>>,
    phase_elapsed: f32,
}

impl Sequence {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            steps: VecDeque::new(),
            phase_elapsed: 0.0,
        }
    }

    pub fn then(mut self, task: impl TimedTask) -> Self {
        self.steps.push_back(Box::new(task));
        self
    }

    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }
}

impl TimedTask for Sequence {
    fn step(&mut self, ctx: &mut TaskContext, tick: TaskTick) -> TaskStatus {
        let mut delta = tick.delta;

        loop {
            let Some(current) = self.steps.front_mut() else {
                return TaskStatus::Complete;
            };

            self.phase_elapsed += delta;
            let phase_tick = TaskTick {
                elapsed: self.phase_elapsed,
                delta,
            };

            match current.step(ctx, phase_tick) {
                TaskStatus::Running => return TaskStatus::Running,
                TaskStatus::Complete => {
                    self.steps.pop_front();
                    self.phase_elapsed = 0.0;
                    delta = 0.0;
                }
            }
        }
    }

    fn label(&self) -> &'static str {
        self.label
    }
}

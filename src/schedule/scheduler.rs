//! Schedule domain: the cooperative task scheduler resource.
//!
//! Every time-based transition in the game (wall-jump lockout, portal exit,
//! fades, delayed despawns) is an explicit [`TimedTask`] object holding its own
//! progress. The scheduler advances each live task once per rendered frame and
//! drops it on completion or cancellation.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::core::owner_is_live;

/// Identifies a started task. Can be polled for completion or used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Which frame delta a task consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Game time: stops when the virtual clock is paused or slowed.
    #[default]
    Scaled,
    /// Wall-clock time: keeps running through pauses (UI and audio fades).
    Unscaled,
}

/// Both frame deltas for a single rendered frame, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameDelta {
    pub scaled: f32,
    pub unscaled: f32,
}

impl FrameDelta {
    /// Same delta on both clocks.
    pub fn uniform(seconds: f32) -> Self {
        Self {
            scaled: seconds,
            unscaled: seconds,
        }
    }

    pub fn for_clock(&self, clock: Clock) -> f32 {
        match clock {
            Clock::Scaled => self.scaled,
            Clock::Unscaled => self.unscaled,
        }
    }
}

/// Time information handed to a task on each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskTick {
    /// Seconds since the task's first step, including this frame.
    pub elapsed: f32,
    /// This frame's delta on the task's clock.
    pub delta: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Complete,
}

/// A unit of per-frame work with an explicit completion predicate.
pub trait TimedTask: Send + Sync + 'static {
    /// Advance by one frame, writing any output through `ctx.world`.
    fn step(&mut self, ctx: &mut TaskContext, tick: TaskTick) -> TaskStatus;

    /// Short name used in log lines.
    fn label(&self) -> &'static str {
        "task"
    }
}

impl TimedTask for Box<dyn TimedTask> {
    fn step(&mut self, ctx: &mut TaskContext, tick: TaskTick) -> TaskStatus {
        self.as_mut().step(ctx, tick)
    }

    fn label(&self) -> &'static str {
        self.as_ref().label()
    }
}

struct ScheduledTask {
    handle: TaskHandle,
    clock: Clock,
    owner: Option<Entity>,
    elapsed: f32,
    body: Box<dyn TimedTask>,
}

/// Tasks started or cancelled since the last tick.
#[derive(Default)]
struct TaskQueue {
    next_id: u64,
    pending: Vec<ScheduledTask>,
    cancelled: HashSet<TaskHandle>,
}

impl TaskQueue {
    fn push(&mut self, owner: Option<Entity>, clock: Clock, body: Box<dyn TimedTask>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;

        debug!(
            "Task {:?} '{}' queued (clock={:?}, owner={:?})",
            handle,
            body.label(),
            clock,
            owner
        );

        self.pending.push(ScheduledTask {
            handle,
            clock,
            owner,
            elapsed: 0.0,
            body,
        });
        handle
    }
}

/// What a task sees while it steps: the world to write into, and the ability
/// to start or cancel other tasks. Started tasks first run on the next tick.
pub struct TaskContext<'a> {
    pub world: &'a mut World,
    /// Entity the stepping task is bound to, if any.
    pub owner: Option<Entity>,
    queue: &'a mut TaskQueue,
}

impl TaskContext<'_> {
    pub fn start(&mut self, clock: Clock, task: impl TimedTask) -> TaskHandle {
        self.queue.push(None, clock, Box::new(task))
    }

    pub fn start_owned(&mut self, owner: Entity, clock: Clock, task: impl TimedTask) -> TaskHandle {
        self.queue.push(Some(owner), clock, Box::new(task))
    }

    pub fn cancel(&mut self, handle: TaskHandle) {
        self.queue.cancelled.insert(handle);
    }
}

/// Runs independent, cancelable, time-driven tasks once per frame.
#[derive(Resource, Default)]
pub struct TaskScheduler {
    running: Vec<ScheduledTask>,
    queue: TaskQueue,
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("running", &self.running.len())
            .field("pending", &self.queue.pending.len())
            .finish()
    }
}

impl TaskScheduler {
    /// Start a task that runs until it completes or is cancelled by handle.
    pub fn start(&mut self, clock: Clock, task: impl TimedTask) -> TaskHandle {
        self.queue.push(None, clock, Box::new(task))
    }

    /// Start a task bound to `owner`: it is dropped as soon as `owner` is
    /// despawned or deactivated. Partial output is left as-is.
    pub fn start_owned(&mut self, owner: Entity, clock: Clock, task: impl TimedTask) -> TaskHandle {
        self.queue.push(Some(owner), clock, Box::new(task))
    }

    /// Cancel a task. Returns false if it had already finished.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.len();
        self.running.retain(|task| task.handle != handle);
        self.queue.pending.retain(|task| task.handle != handle);
        let removed = self.len() != before;
        if removed {
            debug!("Task {:?} cancelled", handle);
        }
        removed
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.running
            .iter()
            .chain(self.queue.pending.iter())
            .any(|task| task.handle == handle)
    }

    pub fn is_finished(&self, handle: TaskHandle) -> bool {
        !self.is_active(handle)
    }

    /// Number of live tasks, including those waiting for their first tick.
    pub fn len(&self) -> usize {
        self.running.len() + self.queue.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advance every live task by one frame.
    pub fn tick(&mut self, world: &mut World, delta: FrameDelta) {
        self.running.append(&mut self.queue.pending);

        let mut running = std::mem::take(&mut self.running);
        let queue = &mut self.queue;

        running.retain_mut(|task| {
            if queue.cancelled.remove(&task.handle) {
                debug!("Task {:?} '{}' cancelled", task.handle, task.body.label());
                return false;
            }

            if let Some(owner) = task.owner
                && !owner_is_live(world, owner)
            {
                debug!(
                    "Task {:?} '{}' cancelled: owner {:?} inactive",
                    task.handle,
                    task.body.label(),
                    owner
                );
                return false;
            }

            let delta = delta.for_clock(task.clock);
            task.elapsed += delta;
            let tick = TaskTick {
                elapsed: task.elapsed,
                delta,
            };

            let mut ctx = TaskContext {
                world: &mut *world,
                owner: task.owner,
                queue: &mut *queue,
            };

            match task.body.step(&mut ctx, tick) {
                TaskStatus::Running => true,
                TaskStatus::Complete => {
                    debug!(
                        "Task {:?} '{}' complete after {:.3}s",
                        task.handle,
                        task.body.label(),
                        task.elapsed
                    );
                    false
                }
            }
        });

        // Cancellations requested from inside this tick's steps
        let TaskQueue {
            pending, cancelled, ..
        } = &mut self.queue;
        running.retain(|task| !cancelled.remove(&task.handle));
        pending.retain(|task| !cancelled.remove(&task.handle));
        cancelled.clear();

        self.running = running;
    }
}

//! Movement domain: the locomotion state machine.
//!
//! All decisions live here as plain methods on [`LocomotionState`] so they
//! can run against fake probes and bodies. Systems only gather components
//! and forward the results.
//!
//! Frame order: [`LocomotionState::sense`], then
//! [`LocomotionState::apply_input`], then
//! [`LocomotionState::update_animator`]. Impulses and the climb override
//! run on the fixed physics tick in [`LocomotionState::physics_step`].

use bevy::prelude::*;

use crate::audio::AudioCue;
use crate::movement::body::PhysicsBody;
use crate::movement::sensors::ContactProbe;
use crate::movement::{
    Facing, GameLayer, LocomotionInput, LocomotionPhase, LocomotionState, LocomotionTuning,
    ProbeRig,
};
use crate::schedule::{Delay, smooth_towards};
use crate::sprites::{AnimationTrigger, Animator};

/// Smoothed input this close to its target snaps onto it.
const INPUT_SNAP: f32 = 1e-3;

/// Which one-shot impulses a physics step applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicsStepOutcome {
    pub jumped: bool,
    pub wall_jumped: bool,
}

impl LocomotionState {
    pub fn is_touching_wall(&self) -> bool {
        self.is_touching_left_wall || self.is_touching_right_wall
    }

    pub fn is_climbing(&self) -> bool {
        self.can_climb && self.is_touching_wall() && !self.is_grounded
    }

    /// Airborne last frame, grounded now.
    pub fn landed(&self) -> bool {
        !self.was_grounded_last_frame && self.is_grounded
    }

    /// Grounded last frame, airborne now.
    pub fn took_off(&self) -> bool {
        self.was_grounded_last_frame && !self.is_grounded
    }

    pub fn phase(&self, vertical_velocity: f32) -> LocomotionPhase {
        if !self.controls_enabled {
            LocomotionPhase::Locked
        } else if self.is_climbing() {
            LocomotionPhase::Climbing
        } else if self.is_grounded {
            LocomotionPhase::Grounded
        } else if vertical_velocity < 0.0 {
            LocomotionPhase::Falling
        } else {
            LocomotionPhase::Rising
        }
    }

    /// Sample the ground probe, then the wall probes if airborne.
    ///
    /// Wall contact reads as false while grounded and while wall detection
    /// is suppressed, whatever the geometry says.
    pub fn sense<P: ContactProbe + ?Sized>(&mut self, probe: &P, origin: Vec2, rig: &ProbeRig) {
        if !self.controls_enabled {
            return;
        }

        self.was_grounded_last_frame = self.is_grounded;
        self.is_grounded =
            probe.overlap_circle(origin + rig.ground_offset, rig.ground_radius, GameLayer::Ground);

        if self.is_grounded || self.wall_detection_suppressed {
            self.is_touching_left_wall = false;
            self.is_touching_right_wall = false;
            return;
        }

        self.is_touching_left_wall = probe.overlap_circle(
            origin + rig.left_wall_offset,
            rig.wall_radius,
            GameLayer::Climbable,
        );
        self.is_touching_right_wall = probe.overlap_circle(
            origin + rig.right_wall_offset,
            rig.wall_radius,
            GameLayer::Climbable,
        );
    }

    /// Per-frame decisions: horizontal velocity, facing, jump requests and
    /// vertical input smoothing.
    pub fn apply_input(
        &mut self,
        input: &LocomotionInput,
        body: &mut impl PhysicsBody,
        tuning: &LocomotionTuning,
        dt: f32,
        cues: &mut Vec<AudioCue>,
    ) {
        if !self.controls_enabled {
            return;
        }

        self.horizontal_input = input.axis.x.clamp(-1.0, 1.0);
        let velocity = body.velocity();
        body.set_velocity(Vec2::new(self.horizontal_input * self.move_speed, velocity.y));

        if self.horizontal_input != 0.0 {
            self.facing = if self.horizontal_input < 0.0 {
                Facing::Left
            } else {
                Facing::Right
            };

            if self.is_grounded {
                cues.push(AudioCue::Footstep);
            }
        }

        if input.jump_just_pressed {
            if self.can_jump && self.is_grounded {
                self.jump_requested = true;
                self.jump_trigger_pending = true;
                debug!("Jump requested");
            }

            if self.can_climb && self.is_touching_wall() {
                self.wall_jump_requested = true;
                debug!(
                    "Wall jump requested: left={}, right={}",
                    self.is_touching_left_wall, self.is_touching_right_wall
                );
            }
        }

        let target = input.axis.y.clamp(-1.0, 1.0);
        let mut smoothed = smooth_towards(
            self.vertical_input_smoothed,
            target,
            tuning.vertical_smoothing_time,
            dt,
        );
        if (smoothed - target).abs() < INPUT_SNAP {
            smoothed = target;
        }
        self.vertical_input_smoothed = smoothed;
    }

    /// Fixed-tick work: pending impulses exactly once, then the climb
    /// override on the vertical axis.
    pub fn physics_step(
        &mut self,
        body: &mut impl PhysicsBody,
        tuning: &LocomotionTuning,
    ) -> PhysicsStepOutcome {
        let mut outcome = PhysicsStepOutcome::default();

        if !self.controls_enabled {
            return outcome;
        }

        if std::mem::take(&mut self.jump_requested) {
            body.add_impulse(Vec2::new(0.0, tuning.jump_impulse));
            outcome.jumped = true;
        }

        if std::mem::take(&mut self.wall_jump_requested) && !self.wall_detection_suppressed {
            let direction = if self.is_touching_left_wall { 1.0 } else { -1.0 };
            body.add_impulse(Vec2::new(
                direction * tuning.wall_jump_impulse,
                tuning.jump_impulse + tuning.wall_jump_impulse,
            ));

            self.wall_detection_suppressed = true;
            self.is_touching_left_wall = false;
            self.is_touching_right_wall = false;
            outcome.wall_jumped = true;
            debug!("Wall jump: direction={}", direction);
        }

        if self.is_climbing() {
            let velocity = body.velocity();
            body.set_velocity(Vec2::new(
                velocity.x,
                self.vertical_input_smoothed * tuning.climb_speed,
            ));
        }

        outcome
    }

    /// Write animation parameters and fire the landing and jump edges.
    pub fn update_animator(
        &mut self,
        animator: &mut Animator,
        velocity: Vec2,
        tuning: &LocomotionTuning,
        cues: &mut Vec<AudioCue>,
    ) {
        if !self.controls_enabled {
            return;
        }

        let climbing = self.is_climbing();
        let params = &mut animator.params;
        params.is_climbing = climbing;
        params.speed = self.horizontal_input.abs();
        params.is_running = velocity.x.abs() > tuning.running_threshold;
        params.vertical_velocity = velocity.y;
        params.is_grounded = self.is_grounded;

        if climbing {
            params.climb_speed = if self.vertical_input_smoothed > 0.0 {
                1.0
            } else if self.vertical_input_smoothed < 0.0 {
                -1.0
            } else {
                0.0
            };
        }

        if !self.is_grounded && velocity.y < 0.0 && !climbing {
            params.is_falling = true;
        } else if self.is_grounded {
            params.is_falling = false;
        }

        if self.landed() {
            animator.set_trigger(AnimationTrigger::Land);
            cues.push(AudioCue::Land);
            self.airborne_trigger_sent = false;
            debug!("Landed");
        }

        if std::mem::take(&mut self.jump_trigger_pending) {
            animator.set_trigger(AnimationTrigger::Jump);
            self.airborne_trigger_sent = true;
        } else if self.took_off() && !self.airborne_trigger_sent {
            animator.set_trigger(AnimationTrigger::Jump);
            self.airborne_trigger_sent = true;
            debug!("Left ground");
        } else if self.is_grounded && !self.jump_requested && velocity.y <= 0.0 {
            // Jump never left the ground
            self.airborne_trigger_sent = false;
        }

        animator.playback_rate = if climbing || self.move_speed <= 0.0 {
            1.0
        } else {
            (velocity.x.abs() / self.move_speed)
                .clamp(tuning.playback_rate_min, tuning.playback_rate_max)
        };
    }
}

/// Lifts wall-detection suppression on `entity` after `duration` seconds.
pub fn wall_detection_cooldown(entity: Entity, duration: f32) -> Delay {
    Delay::new(duration, move |ctx| {
        if let Some(mut state) = ctx.world.get_mut::<LocomotionState>(entity) {
            state.wall_detection_suppressed = false;
            debug!("Wall detection restored for {:?}", entity);
        }
    })
    .named("wall-detection-cooldown")
}

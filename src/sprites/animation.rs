//! Animation parameters, one-shot triggers and clip playback.
//!
//! Locomotion writes named parameters and triggers into an [`Animator`];
//! playback derives the active clip from them each frame and advances its
//! frames at the animator's playback rate.

use bevy::prelude::*;

use crate::core::Deactivated;

/// One-shot animation triggers. Consumed on the next playback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTrigger {
    Land,
    Jump,
}

/// Visual profile of the player cell. Each capability upgrade swaps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SkinProfile {
    #[default]
    Base,
    Nucleus,
    Mitochondria,
    Gogli,
}

impl SkinProfile {
    pub fn tint(self) -> Color {
        match self {
            SkinProfile::Base => Color::srgb(0.62, 0.86, 0.58),
            SkinProfile::Nucleus => Color::srgb(0.48, 0.58, 0.96),
            SkinProfile::Mitochondria => Color::srgb(0.96, 0.56, 0.36),
            SkinProfile::Gogli => Color::srgb(0.86, 0.48, 0.88),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SkinProfile::Base => "cell",
            SkinProfile::Nucleus => "cell.nucleus",
            SkinProfile::Mitochondria => "cell.mitochondria",
            SkinProfile::Gogli => "cell.gogli",
        }
    }
}

/// Named parameters written by locomotion every frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationParams {
    /// Absolute horizontal input.
    pub speed: f32,
    pub is_running: bool,
    pub is_grounded: bool,
    pub is_climbing: bool,
    pub is_falling: bool,
    /// -1, 0 or 1: climb clip direction. 0 holds the first frame.
    pub climb_speed: f32,
    pub vertical_velocity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationClip {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    Land,
    Climb,
}

impl AnimationClip {
    pub fn name(self) -> &'static str {
        match self {
            AnimationClip::Idle => "idle",
            AnimationClip::Run => "run",
            AnimationClip::Jump => "jump",
            AnimationClip::Fall => "fall",
            AnimationClip::Land => "land",
            AnimationClip::Climb => "climb",
        }
    }

    pub fn frame_count(self) -> u32 {
        match self {
            AnimationClip::Idle => 4,
            AnimationClip::Run => 6,
            AnimationClip::Jump => 2,
            AnimationClip::Fall => 2,
            AnimationClip::Land => 2,
            AnimationClip::Climb => 4,
        }
    }

    pub fn frame_duration(self) -> f32 {
        match self {
            AnimationClip::Land => 0.08,
            AnimationClip::Run => 0.1,
            _ => 0.15,
        }
    }

    pub fn looping(self) -> bool {
        !matches!(self, AnimationClip::Jump | AnimationClip::Land)
    }
}

#[derive(Component, Debug)]
pub struct Animator {
    pub params: AnimationParams,
    /// Multiplier on frame timing.
    pub playback_rate: f32,
    profile: SkinProfile,
    triggers: Vec<AnimationTrigger>,
    clip: AnimationClip,
    frame: u32,
    frame_timer: f32,
    finished: bool,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            params: AnimationParams::default(),
            playback_rate: 1.0,
            profile: SkinProfile::Base,
            triggers: Vec::new(),
            clip: AnimationClip::Idle,
            frame: 0,
            frame_timer: 0.0,
            finished: false,
        }
    }
}

impl Animator {
    pub fn set_trigger(&mut self, trigger: AnimationTrigger) {
        self.triggers.push(trigger);
    }

    pub fn pending_triggers(&self) -> &[AnimationTrigger] {
        &self.triggers
    }

    /// Swap the active skin profile.
    pub fn set_profile(&mut self, profile: SkinProfile) {
        self.profile = profile;
    }

    pub fn profile(&self) -> SkinProfile {
        self.profile
    }

    pub fn clip(&self) -> AnimationClip {
        self.clip
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Sprite key for the current frame, e.g. `cell.nucleus_run_3`.
    pub fn current_sprite_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.profile.key(),
            self.clip.name(),
            self.frame + 1
        )
    }

    fn play(&mut self, clip: AnimationClip) {
        self.clip = clip;
        self.frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;
    }

    fn derive_clip(&self) -> AnimationClip {
        let params = &self.params;

        if params.is_climbing {
            return AnimationClip::Climb;
        }

        if !params.is_grounded {
            return if params.is_falling {
                AnimationClip::Fall
            } else {
                AnimationClip::Jump
            };
        }

        if params.is_running {
            AnimationClip::Run
        } else if self.clip == AnimationClip::Land && !self.finished {
            AnimationClip::Land
        } else {
            AnimationClip::Idle
        }
    }

    /// Consume triggers, settle on a clip and advance its frames by `dt`
    /// seconds scaled by the playback rate.
    pub fn advance(&mut self, dt: f32) {
        for trigger in std::mem::take(&mut self.triggers) {
            match trigger {
                AnimationTrigger::Jump => self.play(AnimationClip::Jump),
                AnimationTrigger::Land => self.play(AnimationClip::Land),
            }
        }

        let clip = self.derive_clip();
        if clip != self.clip {
            self.play(clip);
        }

        self.step_frames(dt * self.playback_rate);
    }

    fn step_frames(&mut self, dt: f32) {
        if self.finished {
            return;
        }

        let direction = match self.clip {
            AnimationClip::Climb if self.params.climb_speed > 0.0 => 1,
            AnimationClip::Climb if self.params.climb_speed < 0.0 => -1,
            AnimationClip::Climb => 0,
            _ => 1,
        };

        if direction == 0 {
            self.frame = 0;
            self.frame_timer = 0.0;
            return;
        }

        let frame_duration = self.clip.frame_duration();
        let total = self.clip.frame_count();
        self.frame_timer += dt;

        while self.frame_timer >= frame_duration {
            self.frame_timer -= frame_duration;

            if direction > 0 {
                if self.frame + 1 < total {
                    self.frame += 1;
                } else if self.clip.looping() {
                    self.frame = 0;
                } else {
                    self.finished = true;
                    return;
                }
            } else {
                self.frame = self.frame.checked_sub(1).unwrap_or(total - 1);
            }
        }
    }
}

/// Advance animators and apply their profile tint and frame to the sprite.
pub fn play_animations(
    time: Res<Time>,
    mut query: Query<(&mut Animator, &mut Sprite), Without<Deactivated>>,
) {
    let dt = time.delta_secs();

    for (mut animator, mut sprite) in &mut query {
        let before = (animator.clip(), animator.frame());
        animator.advance(dt);
        trace!("Animator playback rate: {:.2}", animator.playback_rate);

        if (animator.clip(), animator.frame()) != before {
            trace!("Sprite frame {}", animator.current_sprite_key());
        }

        let alpha = sprite.color.alpha();
        let tint = animator.profile().tint().with_alpha(alpha);
        if sprite.color != tint {
            sprite.color = tint;
        }
    }
}

//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors and platforms the ground probe looks for
    Ground,
    /// Surfaces the wall probes look for
    Climbable,
    /// Player character
    Player,
    /// Pickups and the end portal - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

/// Derived view of the locomotion flags. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionPhase {
    Grounded,
    Rising,
    Falling,
    Climbing,
    Locked,
}

/// Per-player locomotion flags and input state.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct LocomotionState {
    pub horizontal_input: f32,
    pub vertical_input_smoothed: f32,

    pub is_grounded: bool,
    pub was_grounded_last_frame: bool,
    pub is_touching_left_wall: bool,
    pub is_touching_right_wall: bool,

    /// Capability flags. Never cleared once set.
    pub can_jump: bool,
    pub can_climb: bool,

    pub controls_enabled: bool,
    /// Wall probes report no contact while set.
    pub wall_detection_suppressed: bool,
    pub move_speed: f32,
    pub facing: Facing,

    pub(crate) jump_requested: bool,
    pub(crate) wall_jump_requested: bool,
    /// A jump was requested this frame and its animation trigger is not out yet.
    pub(crate) jump_trigger_pending: bool,
    /// The current airborne span already produced its `Jump` trigger.
    pub(crate) airborne_trigger_sent: bool,
}

impl LocomotionState {
    pub fn new(move_speed: f32) -> Self {
        Self {
            horizontal_input: 0.0,
            vertical_input_smoothed: 0.0,
            is_grounded: false,
            was_grounded_last_frame: false,
            is_touching_left_wall: false,
            is_touching_right_wall: false,
            can_jump: false,
            can_climb: false,
            controls_enabled: true,
            wall_detection_suppressed: false,
            move_speed,
            facing: Facing::Right,
            jump_requested: false,
            wall_jump_requested: false,
            jump_trigger_pending: false,
            airborne_trigger_sent: false,
        }
    }
}

/// Offsets and radii of the three contact probes, relative to the body origin.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ProbeRig {
    pub ground_offset: Vec2,
    pub ground_radius: f32,
    pub left_wall_offset: Vec2,
    pub right_wall_offset: Vec2,
    pub wall_radius: f32,
}

impl ProbeRig {
    /// Probes on the bottom edge and both side edges of a box collider.
    pub fn for_body_size(size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            ground_offset: Vec2::new(0.0, -half.y),
            ground_radius: 0.1,
            left_wall_offset: Vec2::new(-half.x, 0.0),
            right_wall_offset: Vec2::new(half.x, 0.0),
            wall_radius: 0.1,
        }
    }
}

/// Trail particles shown once the speed upgrade is collected.
#[derive(Component, Debug)]
pub struct TrailEffect {
    pub owner: Entity,
}

/// Static level geometry the ground probe detects.
#[derive(Component, Debug)]
pub struct Ground;

/// Static level geometry the wall probes detect.
#[derive(Component, Debug)]
pub struct ClimbableWall;

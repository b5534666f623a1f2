use super::*;
use avian2d::prelude::*;
use bevy::prelude::*;
use std::cell::Cell;

use crate::audio::AudioCue;
use crate::content::SequenceTimings;
use crate::core::Deactivated;
use crate::schedule::{Clock, FrameDelta, TaskScheduler};
use crate::sprites::{AnimationTrigger, Animator};

const DT: f32 = 1.0 / 60.0;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Geometry answers per probe, plus a count of queries made.
#[derive(Default)]
struct FakeProbe {
    ground: bool,
    left_wall: bool,
    right_wall: bool,
    queries: Cell<u32>,
}

impl ContactProbe for FakeProbe {
    fn overlap_circle(&self, center: Vec2, _radius: f32, layer: GameLayer) -> bool {
        self.queries.set(self.queries.get() + 1);
        match layer {
            GameLayer::Ground => self.ground,
            GameLayer::Climbable if center.x < 0.0 => self.left_wall,
            GameLayer::Climbable => self.right_wall,
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
struct FakeBody {
    velocity: Vec2,
    impulses: Vec<Vec2>,
    kinematic: bool,
}

impl PhysicsBody for FakeBody {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn add_impulse(&mut self, impulse: Vec2) {
        self.impulses.push(impulse);
        self.velocity += impulse;
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }
}

fn rig() -> ProbeRig {
    ProbeRig::for_body_size(PLAYER_SIZE)
}

fn grounded_probe() -> FakeProbe {
    FakeProbe {
        ground: true,
        ..Default::default()
    }
}

fn jump_press() -> LocomotionInput {
    LocomotionInput {
        axis: Vec2::ZERO,
        jump_just_pressed: true,
    }
}

/// State that has been standing on the ground for a while.
fn standing_state() -> LocomotionState {
    let mut state = LocomotionState::new(5.0);
    let probe = grounded_probe();
    state.sense(&probe, Vec2::ZERO, &rig());
    state.sense(&probe, Vec2::ZERO, &rig());
    state
}

fn count(animator: &Animator, trigger: AnimationTrigger) -> usize {
    animator
        .pending_triggers()
        .iter()
        .filter(|t| **t == trigger)
        .count()
}

// ---------------------------------------------------------------------------
// Sensing tests
// ---------------------------------------------------------------------------

#[test]
fn test_wall_flags_cleared_while_grounded() {
    let mut state = LocomotionState::new(5.0);
    let probe = FakeProbe {
        ground: true,
        left_wall: true,
        right_wall: true,
        ..Default::default()
    };

    state.sense(&probe, Vec2::ZERO, &rig());

    assert!(state.is_grounded);
    assert!(!state.is_touching_wall());
    // Walls are not probed at floor level
    assert_eq!(probe.queries.get(), 1);
}

#[test]
fn test_wall_probes_when_airborne() {
    let mut state = LocomotionState::new(5.0);
    let probe = FakeProbe {
        left_wall: true,
        ..Default::default()
    };

    state.sense(&probe, Vec2::ZERO, &rig());

    assert!(!state.is_grounded);
    assert!(state.is_touching_left_wall);
    assert!(!state.is_touching_right_wall);
}

#[test]
fn test_suppressed_wall_detection_reads_false() {
    let mut state = LocomotionState::new(5.0);
    state.wall_detection_suppressed = true;
    let probe = FakeProbe {
        left_wall: true,
        right_wall: true,
        ..Default::default()
    };

    state.sense(&probe, Vec2::ZERO, &rig());

    assert!(!state.is_touching_wall());
}

// ---------------------------------------------------------------------------
// Locked controls tests
// ---------------------------------------------------------------------------

#[test]
fn test_locked_controls_do_nothing() {
    let tuning = LocomotionTuning::default();
    let mut state = standing_state();
    state.can_jump = true;
    state.controls_enabled = false;
    state.jump_requested = true;
    let before = state.clone();

    let probe = FakeProbe::default();
    state.sense(&probe, Vec2::ZERO, &rig());
    assert_eq!(probe.queries.get(), 0);

    let mut body = FakeBody {
        velocity: Vec2::new(1.0, -2.0),
        ..Default::default()
    };
    let mut cues = Vec::new();
    let input = LocomotionInput {
        axis: Vec2::new(1.0, 1.0),
        jump_just_pressed: true,
    };
    state.apply_input(&input, &mut body, &tuning, DT, &mut cues);
    let outcome = state.physics_step(&mut body, &tuning);

    assert_eq!(outcome, PhysicsStepOutcome::default());
    assert_eq!(body.velocity, Vec2::new(1.0, -2.0));
    assert!(body.impulses.is_empty());
    assert!(cues.is_empty());
    assert_eq!(state, before);
}

// ---------------------------------------------------------------------------
// Jump tests
// ---------------------------------------------------------------------------

#[test]
fn test_jump_without_capability_is_ignored() {
    let tuning = LocomotionTuning::default();
    let mut state = standing_state();
    let before = state.clone();
    let mut body = FakeBody::default();
    let mut cues = Vec::new();

    state.apply_input(&jump_press(), &mut body, &tuning, DT, &mut cues);
    let outcome = state.physics_step(&mut body, &tuning);

    assert!(!outcome.jumped);
    assert!(body.impulses.is_empty());
    assert_eq!(state, before);
}

#[test]
fn test_jump_applies_one_impulse_and_one_trigger() {
    let tuning = LocomotionTuning::default();
    let mut state = standing_state();
    state.can_jump = true;
    let mut body = FakeBody::default();
    let mut animator = Animator::default();
    let mut cues = Vec::new();

    state.apply_input(&jump_press(), &mut body, &tuning, DT, &mut cues);
    state.update_animator(&mut animator, body.velocity, &tuning, &mut cues);

    assert_eq!(count(&animator, AnimationTrigger::Jump), 1);
    assert_eq!(count(&animator, AnimationTrigger::Land), 0);
    assert!(body.impulses.is_empty());

    let first = state.physics_step(&mut body, &tuning);
    let second = state.physics_step(&mut body, &tuning);

    assert!(first.jumped);
    assert!(!second.jumped);
    assert_eq!(body.impulses, vec![Vec2::new(0.0, tuning.jump_impulse)]);

    // Leaving the ground next frame does not re-trigger
    state.sense(&FakeProbe::default(), Vec2::ZERO, &rig());
    assert!(state.took_off());
    state.update_animator(&mut animator, body.velocity, &tuning, &mut cues);
    assert_eq!(count(&animator, AnimationTrigger::Jump), 1);
}

#[test]
fn test_walking_off_ledge_triggers_jump_once() {
    let tuning = LocomotionTuning::default();
    let mut state = standing_state();
    let mut animator = Animator::default();
    let mut cues = Vec::new();
    let airborne = FakeProbe::default();

    for _ in 0..3 {
        state.sense(&airborne, Vec2::ZERO, &rig());
        state.update_animator(&mut animator, Vec2::new(0.0, -1.0), &tuning, &mut cues);
    }

    assert_eq!(count(&animator, AnimationTrigger::Jump), 1);
}

#[test]
fn test_blocked_jump_rearms_ledge_trigger() {
    let tuning = LocomotionTuning::default();
    let mut state = standing_state();
    state.can_jump = true;
    let mut body = FakeBody::default();
    let mut animator = Animator::default();
    let mut cues = Vec::new();

    state.apply_input(&jump_press(), &mut body, &tuning, DT, &mut cues);
    state.update_animator(&mut animator, body.velocity, &tuning, &mut cues);
    state.physics_step(&mut body, &tuning);

    // Low ceiling: the impulse is absorbed and the player never leaves the ground
    body.velocity = Vec2::ZERO;
    state.sense(&grounded_probe(), Vec2::ZERO, &rig());
    state.update_animator(&mut animator, body.velocity, &tuning, &mut cues);
    assert_eq!(count(&animator, AnimationTrigger::Jump), 1);

    state.sense(&FakeProbe::default(), Vec2::ZERO, &rig());
    state.update_animator(&mut animator, Vec2::new(0.0, -1.0), &tuning, &mut cues);

    assert_eq!(count(&animator, AnimationTrigger::Jump), 2);
}

#[test]
fn test_rising_off_the_ground_keeps_single_jump_trigger() {
    let tuning = LocomotionTuning::default();
    let mut state = standing_state();
    state.can_jump = true;
    let mut body = FakeBody::default();
    let mut animator = Animator::default();
    let mut cues = Vec::new();

    state.apply_input(&jump_press(), &mut body, &tuning, DT, &mut cues);
    state.update_animator(&mut animator, body.velocity, &tuning, &mut cues);
    state.physics_step(&mut body, &tuning);

    // Ground probe still overlaps for a frame after the impulse
    state.sense(&grounded_probe(), Vec2::ZERO, &rig());
    state.update_animator(&mut animator, body.velocity, &tuning, &mut cues);
    state.sense(&FakeProbe::default(), Vec2::ZERO, &rig());
    state.update_animator(&mut animator, body.velocity, &tuning, &mut cues);

    assert_eq!(count(&animator, AnimationTrigger::Jump), 1);
}

// ---------------------------------------------------------------------------
// Landing tests
// ---------------------------------------------------------------------------

#[test]
fn test_landing_fires_once_per_touchdown() {
    let tuning = LocomotionTuning::default();
    let mut state = LocomotionState::new(5.0);
    let mut animator = Animator::default();
    let mut cues = Vec::new();

    state.sense(&FakeProbe::default(), Vec2::ZERO, &rig());
    state.update_animator(&mut animator, Vec2::new(0.0, -3.0), &tuning, &mut cues);

    for _ in 0..5 {
        state.sense(&grounded_probe(), Vec2::ZERO, &rig());
        state.update_animator(&mut animator, Vec2::ZERO, &tuning, &mut cues);
    }

    assert_eq!(count(&animator, AnimationTrigger::Land), 1);
    assert_eq!(cues.iter().filter(|c| **c == AudioCue::Land).count(), 1);
}

#[test]
fn test_standing_never_lands() {
    let tuning = LocomotionTuning::default();
    let mut state = standing_state();
    let mut animator = Animator::default();
    let mut cues = Vec::new();

    for _ in 0..5 {
        state.sense(&grounded_probe(), Vec2::ZERO, &rig());
        state.update_animator(&mut animator, Vec2::ZERO, &tuning, &mut cues);
    }

    assert!(animator.pending_triggers().is_empty());
    assert!(cues.is_empty());
}

// ---------------------------------------------------------------------------
// Horizontal movement tests
// ---------------------------------------------------------------------------

#[test]
fn test_horizontal_velocity_and_facing() {
    let tuning = LocomotionTuning::default();
    let mut state = standing_state();
    let mut body = FakeBody {
        velocity: Vec2::new(0.0, -0.5),
        ..Default::default()
    };
    let mut cues = Vec::new();
    let input = LocomotionInput {
        axis: Vec2::new(-1.0, 0.0),
        jump_just_pressed: false,
    };

    state.apply_input(&input, &mut body, &tuning, DT, &mut cues);

    assert_eq!(body.velocity, Vec2::new(-5.0, -0.5));
    assert_eq!(state.facing, Facing::Left);
    assert_eq!(cues, vec![AudioCue::Footstep]);
}

#[test]
fn test_no_footstep_in_the_air() {
    let tuning = LocomotionTuning::default();
    let mut state = LocomotionState::new(5.0);
    let mut body = FakeBody::default();
    let mut cues = Vec::new();
    let input = LocomotionInput {
        axis: Vec2::new(1.0, 0.0),
        jump_just_pressed: false,
    };

    state.apply_input(&input, &mut body, &tuning, DT, &mut cues);

    assert_eq!(state.facing, Facing::Right);
    assert!(cues.is_empty());
}

#[test]
fn test_vertical_input_settles_on_target() {
    let tuning = LocomotionTuning::default();
    let mut state = LocomotionState::new(5.0);
    let mut body = FakeBody::default();
    let mut cues = Vec::new();
    let input = LocomotionInput {
        axis: Vec2::new(0.0, 1.0),
        jump_just_pressed: false,
    };

    state.apply_input(&input, &mut body, &tuning, DT, &mut cues);
    assert!(state.vertical_input_smoothed > 0.0 && state.vertical_input_smoothed < 1.0);

    for _ in 0..60 {
        state.apply_input(&input, &mut body, &tuning, DT, &mut cues);
    }
    assert_eq!(state.vertical_input_smoothed, 1.0);
}

// ---------------------------------------------------------------------------
// Climbing tests
// ---------------------------------------------------------------------------

fn climbing_state() -> LocomotionState {
    let mut state = LocomotionState::new(5.0);
    state.can_climb = true;
    let probe = FakeProbe {
        right_wall: true,
        ..Default::default()
    };
    state.sense(&probe, Vec2::ZERO, &rig());
    state
}

#[test]
fn test_climb_velocity_is_input_times_speed() {
    let tuning = LocomotionTuning {
        climb_speed: 1.5,
        ..Default::default()
    };
    let mut state = climbing_state();
    assert!(state.is_climbing());

    for (input, expected) in [(1.0, 1.5), (0.5, 0.75), (-1.0, -1.5), (0.0, 0.0)] {
        state.vertical_input_smoothed = input;
        let mut body = FakeBody {
            velocity: Vec2::new(3.0, -2.0),
            ..Default::default()
        };

        state.physics_step(&mut body, &tuning);

        assert_eq!(body.velocity, Vec2::new(3.0, expected));
    }
}

#[test]
fn test_no_climb_without_capability() {
    let tuning = LocomotionTuning::default();
    let mut state = climbing_state();
    state.can_climb = false;
    state.vertical_input_smoothed = 1.0;
    let mut body = FakeBody {
        velocity: Vec2::new(0.0, -2.0),
        ..Default::default()
    };

    state.physics_step(&mut body, &tuning);

    assert_eq!(body.velocity, Vec2::new(0.0, -2.0));
}

#[test]
fn test_climb_pins_playback_rate() {
    let tuning = LocomotionTuning::default();
    let mut state = climbing_state();
    state.vertical_input_smoothed = -0.4;
    let mut animator = Animator::default();
    let mut cues = Vec::new();

    state.update_animator(&mut animator, Vec2::new(20.0, -0.4), &tuning, &mut cues);

    assert_eq!(animator.playback_rate, 1.0);
    assert!(animator.params.is_climbing);
    assert_eq!(animator.params.climb_speed, -1.0);
    assert!(!animator.params.is_falling);
}

// ---------------------------------------------------------------------------
// Wall jump tests
// ---------------------------------------------------------------------------

#[test]
fn test_wall_jump_pushes_away_from_wall() {
    let tuning = LocomotionTuning::default();
    let mut state = climbing_state();
    let mut body = FakeBody::default();
    let mut cues = Vec::new();

    state.apply_input(&jump_press(), &mut body, &tuning, DT, &mut cues);
    let outcome = state.physics_step(&mut body, &tuning);

    assert!(outcome.wall_jumped);
    assert_eq!(body.impulses, vec![Vec2::new(-17.0, 22.0)]);
    assert!(state.wall_detection_suppressed);
    assert!(!state.is_touching_wall());
}

#[test]
fn test_wall_detection_cooldown_window() {
    let tuning = LocomotionTuning::default();
    let mut world = World::new();
    let mut scheduler = TaskScheduler::default();
    let player = world.spawn(climbing_state()).id();
    let touching = FakeProbe {
        right_wall: true,
        ..Default::default()
    };

    {
        let mut state = world.get_mut::<LocomotionState>(player).unwrap();
        let mut body = FakeBody::default();
        let mut cues = Vec::new();
        state.apply_input(&jump_press(), &mut body, &tuning, DT, &mut cues);
        assert!(state.physics_step(&mut body, &tuning).wall_jumped);
    }
    scheduler.start_owned(
        player,
        Clock::Scaled,
        wall_detection_cooldown(player, tuning.wall_detection_cooldown),
    );

    scheduler.tick(&mut world, FrameDelta::uniform(0.01));
    let mut state = world.get_mut::<LocomotionState>(player).unwrap();
    state.sense(&touching, Vec2::ZERO, &rig());
    assert!(!state.is_touching_wall());

    scheduler.tick(&mut world, FrameDelta::uniform(0.25));
    let mut state = world.get_mut::<LocomotionState>(player).unwrap();
    assert!(!state.wall_detection_suppressed);
    state.sense(&touching, Vec2::ZERO, &rig());
    assert!(state.is_touching_right_wall);
}

// ---------------------------------------------------------------------------
// Animation parameter tests
// ---------------------------------------------------------------------------

#[test]
fn test_playback_rate_follows_speed_ratio() {
    let tuning = LocomotionTuning::default();
    let mut state = standing_state();
    let mut animator = Animator::default();
    let mut cues = Vec::new();

    state.update_animator(&mut animator, Vec2::new(5.0, 0.0), &tuning, &mut cues);
    assert_eq!(animator.playback_rate, 1.0);

    state.update_animator(&mut animator, Vec2::new(-20.0, 0.0), &tuning, &mut cues);
    assert_eq!(animator.playback_rate, 1.5);

    state.update_animator(&mut animator, Vec2::ZERO, &tuning, &mut cues);
    assert_eq!(animator.playback_rate, 0.5);
    assert!(!animator.params.is_running);
}

#[test]
fn test_falling_flag_clears_on_ground() {
    let tuning = LocomotionTuning::default();
    let mut state = LocomotionState::new(5.0);
    let mut animator = Animator::default();
    let mut cues = Vec::new();

    state.sense(&FakeProbe::default(), Vec2::ZERO, &rig());
    state.update_animator(&mut animator, Vec2::new(0.0, -1.0), &tuning, &mut cues);
    assert!(animator.params.is_falling);

    // Stays set while airborne, even moving up
    state.update_animator(&mut animator, Vec2::new(0.0, 1.0), &tuning, &mut cues);
    assert!(animator.params.is_falling);

    state.sense(&grounded_probe(), Vec2::ZERO, &rig());
    state.update_animator(&mut animator, Vec2::ZERO, &tuning, &mut cues);
    assert!(!animator.params.is_falling);
}

#[test]
fn test_phase_derivation() {
    let mut state = standing_state();
    assert_eq!(state.phase(0.0), LocomotionPhase::Grounded);

    state.sense(&FakeProbe::default(), Vec2::ZERO, &rig());
    assert_eq!(state.phase(2.0), LocomotionPhase::Rising);
    assert_eq!(state.phase(-2.0), LocomotionPhase::Falling);

    let climbing = climbing_state();
    assert_eq!(climbing.phase(0.0), LocomotionPhase::Climbing);

    state.controls_enabled = false;
    assert_eq!(state.phase(0.0), LocomotionPhase::Locked);
}

// ---------------------------------------------------------------------------
// Portal exit tests
// ---------------------------------------------------------------------------

#[test]
fn test_begin_portal_exit_locks_body() {
    let mut state = standing_state();
    state.jump_requested = true;
    let mut body = FakeBody {
        velocity: Vec2::new(4.0, 2.0),
        ..Default::default()
    };

    begin_portal_exit(&mut state, &mut body);

    assert!(!state.controls_enabled);
    assert_eq!(body.velocity, Vec2::ZERO);
    assert!(body.kinematic);
    assert_eq!(
        state.physics_step(&mut body, &LocomotionTuning::default()),
        PhysicsStepOutcome::default()
    );
}

#[test]
fn test_portal_exit_sequence() {
    let mut world = World::new();
    let mut scheduler = TaskScheduler::default();
    let player = world
        .spawn((
            Transform::IDENTITY,
            LocomotionState::new(5.0),
            RigidBody::Kinematic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
        ))
        .id();
    let timings = SequenceTimings::default();

    scheduler.start(
        Clock::Scaled,
        portal_exit_sequence(player, Vec3::new(10.0, 0.0, 0.0), &timings),
    );

    // Eases in: faster than constant speed early on
    scheduler.tick(&mut world, FrameDelta::uniform(0.05));
    scheduler.tick(&mut world, FrameDelta::uniform(0.05));
    let x = world.get::<Transform>(player).unwrap().translation.x;
    assert!((x - 6.25).abs() < 1e-4);

    scheduler.tick(&mut world, FrameDelta::uniform(0.05));
    scheduler.tick(&mut world, FrameDelta::uniform(0.05));
    let x = world.get::<Transform>(player).unwrap().translation.x;
    assert!((x - 10.0).abs() < 1e-3);
    assert!(x <= 10.0);
    assert!(world.get::<Deactivated>(player).is_none());

    for _ in 0..22 {
        scheduler.tick(&mut world, FrameDelta::uniform(0.05));
    }

    let transform = world.get::<Transform>(player).unwrap();
    assert_eq!(transform.scale, Vec3::ZERO);
    assert!(world.get::<Deactivated>(player).is_some());
    assert_eq!(world.get::<Visibility>(player), Some(&Visibility::Hidden));
    assert!(scheduler.is_empty());

    // Out of the simulation, but ready to respond to forces again
    assert_eq!(world.get::<RigidBody>(player), Some(&RigidBody::Dynamic));
    assert!(world.get::<RigidBodyDisabled>(player).is_some());
    assert!(world.get::<ColliderDisabled>(player).is_some());
}

#[test]
fn test_portal_shrink_halfway() {
    let mut world = World::new();
    let mut scheduler = TaskScheduler::default();
    let player = world.spawn(Transform::from_xyz(10.0, 0.0, 0.0)).id();
    let timings = SequenceTimings {
        portal_approach: 0.0,
        ..Default::default()
    };

    scheduler.start(
        Clock::Scaled,
        portal_exit_sequence(player, Vec3::new(10.0, 0.0, 0.0), &timings),
    );

    scheduler.tick(&mut world, FrameDelta::uniform(0.25));
    scheduler.tick(&mut world, FrameDelta::uniform(0.25));

    let transform = world.get::<Transform>(player).unwrap();
    assert!((transform.scale.x - 0.75).abs() < 1e-5);
    assert!(world.get::<Deactivated>(player).is_none());
}

#[test]
fn test_portal_sequence_paused_with_game_time() {
    let mut world = World::new();
    let mut scheduler = TaskScheduler::default();
    let player = world.spawn(Transform::IDENTITY).id();

    scheduler.start(
        Clock::Scaled,
        portal_exit_sequence(player, Vec3::X, &SequenceTimings::default()),
    );

    let paused = FrameDelta {
        scaled: 0.0,
        unscaled: 0.1,
    };
    for _ in 0..30 {
        scheduler.tick(&mut world, paused);
    }

    assert_eq!(world.get::<Transform>(player).unwrap().translation, Vec3::ZERO);
    assert_eq!(scheduler.len(), 1);
}

// ---------------------------------------------------------------------------
// Rig validation tests
// ---------------------------------------------------------------------------

#[test]
fn test_complete_rig_passes() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let presence = RigPresence {
        physics_body: true,
        velocity: true,
        animation_target: true,
        probe_rig: true,
        sprite: true,
    };

    assert!(presence.check(entity).is_ok());
}

#[test]
fn test_missing_animator_fails() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let presence = RigPresence {
        physics_body: true,
        velocity: true,
        animation_target: false,
        probe_rig: true,
        sprite: true,
    };

    let err = presence.check(entity).unwrap_err();
    assert_eq!(err.missing, RigComponent::AnimationTarget);
    assert!(err.to_string().contains("AnimationTarget"));
}

fn rig_app() -> App {
    let mut app = App::new();
    app.add_systems(Update, super::bootstrap::validate_player_rig);
    app
}

#[test]
fn test_rig_validation_accepts_complete_player() {
    let mut app = rig_app();
    let player = app
        .world_mut()
        .spawn((
            Player,
            RigidBody::Dynamic,
            LinearVelocity::default(),
            Animator::default(),
            rig(),
            Sprite::default(),
        ))
        .id();

    app.update();

    assert!(app.world().get_entity(player).is_ok());
}

#[test]
#[should_panic(expected = "AnimationTarget")]
fn test_rig_validation_stops_app_without_animator() {
    let mut app = rig_app();
    app.world_mut().spawn((
        Player,
        RigidBody::Dynamic,
        LinearVelocity::default(),
        rig(),
        Sprite::default(),
    ));

    app.update();
}

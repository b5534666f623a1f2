//! Movement domain: player spawn and rig validation.

use avian2d::prelude::*;
use bevy::prelude::*;
use std::fmt;

use crate::movement::{GameLayer, LocomotionState, LocomotionTuning, Player, ProbeRig, TrailEffect};
use crate::sprites::{Animator, SkinProfile};

pub const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 0.8);
pub const PLAYER_SPAWN: Vec3 = Vec3::new(-11.0, -1.5, 1.0);

/// A collaborator the player cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigComponent {
    PhysicsBody,
    Velocity,
    AnimationTarget,
    ProbeRig,
    Sprite,
}

/// Player spawned without a required collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RigError {
    pub entity: Entity,
    pub missing: RigComponent,
}

impl fmt::Display for RigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "player {:?} is missing required component {:?}",
            self.entity, self.missing
        )
    }
}

impl std::error::Error for RigError {}

/// Which collaborators an entity carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct RigPresence {
    pub physics_body: bool,
    pub velocity: bool,
    pub animation_target: bool,
    pub probe_rig: bool,
    pub sprite: bool,
}

impl RigPresence {
    pub fn check(&self, entity: Entity) -> Result<(), RigError> {
        let required = [
            (self.physics_body, RigComponent::PhysicsBody),
            (self.velocity, RigComponent::Velocity),
            (self.animation_target, RigComponent::AnimationTarget),
            (self.probe_rig, RigComponent::ProbeRig),
            (self.sprite, RigComponent::Sprite),
        ];

        match required.into_iter().find(|(present, _)| !present) {
            Some((_, missing)) => Err(RigError { entity, missing }),
            None => Ok(()),
        }
    }
}

pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<LocomotionTuning>) {
    let player = commands
        .spawn((
            // Identity & Locomotion
            (
                Player,
                LocomotionState::new(tuning.move_speed),
                ProbeRig::for_body_size(PLAYER_SIZE),
                Animator::default(),
            ),
            // Rendering
            Sprite {
                color: SkinProfile::Base.tint(),
                custom_size: Some(PLAYER_SIZE),
                ..default()
            },
            Transform::from_translation(PLAYER_SPAWN),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                Friction::new(0.0),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [GameLayer::Ground, GameLayer::Climbable, GameLayer::Sensor],
                ),
            ),
        ))
        .id();

    commands.spawn((
        TrailEffect { owner: player },
        Sprite {
            color: SkinProfile::Mitochondria.tint().with_alpha(0.35),
            custom_size: Some(Vec2::new(1.2, 0.4)),
            ..default()
        },
        Transform::from_xyz(-0.5, 0.0, -0.1),
        Visibility::Hidden,
        ChildOf(player),
    ));

    info!("Spawned player {:?} at {:?}", player, PLAYER_SPAWN);
}

/// Fails the frame a player appears without its collaborators.
pub(crate) fn validate_player_rig(
    query: Query<
        (
            Entity,
            Has<RigidBody>,
            Has<LinearVelocity>,
            Has<Animator>,
            Has<ProbeRig>,
            Has<Sprite>,
        ),
        Added<Player>,
    >,
) -> Result {
    for (entity, physics_body, velocity, animation_target, probe_rig, sprite) in &query {
        RigPresence {
            physics_body,
            velocity,
            animation_target,
            probe_rig,
            sprite,
        }
        .check(entity)?;

        debug!("Player rig {:?} validated", entity);
    }

    Ok(())
}

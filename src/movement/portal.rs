//! Movement domain: the portal-exit sequence.
//!
//! On `PortalReached` the player is locked and driven through two timed
//! phases: a pull toward the portal centre, then a spin while shrinking to
//! nothing. Afterwards the entity is deactivated, never despawned.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::audio::AudioCue;
use crate::content::SequenceTimings;
use crate::core::Deactivated;
use crate::movement::body::{AvianBody, PhysicsBody};
use crate::movement::{LocomotionState, Player};
use crate::schedule::{Clock, Delay, Sequence, TaskContext, TaskScheduler, TaskStatus, TaskTick, TimedTask};
use crate::upgrades::PortalReached;

/// Lock the player in place: no input, no velocity, no physics response.
pub fn begin_portal_exit(state: &mut LocomotionState, body: &mut impl PhysicsBody) {
    state.controls_enabled = false;
    state.jump_requested = false;
    state.wall_jump_requested = false;
    body.set_velocity(Vec2::ZERO);
    body.set_kinematic(true);
}

/// Pull toward `target`, re-lerping from the current position every tick.
/// This eases out instead of moving at constant speed.
pub struct PortalApproach {
    entity: Entity,
    target: Vec3,
    duration: f32,
}

impl TimedTask for PortalApproach {
    fn step(&mut self, ctx: &mut TaskContext, tick: TaskTick) -> TaskStatus {
        let Some(mut transform) = ctx.world.get_mut::<Transform>(self.entity) else {
            return TaskStatus::Complete;
        };

        let fraction = if self.duration > 0.0 {
            (tick.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        transform.translation = transform.translation.lerp(self.target, fraction);

        if tick.elapsed >= self.duration {
            TaskStatus::Complete
        } else {
            TaskStatus::Running
        }
    }

    fn label(&self) -> &'static str {
        "portal-approach"
    }
}

/// One full turn while the scale lerps from its starting value to zero.
pub struct PortalShrink {
    entity: Entity,
    duration: f32,
    t: f32,
    original_scale: Option<Vec3>,
}

impl TimedTask for PortalShrink {
    fn step(&mut self, ctx: &mut TaskContext, tick: TaskTick) -> TaskStatus {
        let Some(mut transform) = ctx.world.get_mut::<Transform>(self.entity) else {
            return TaskStatus::Complete;
        };

        let original = *self.original_scale.get_or_insert(transform.scale);

        if self.duration > 0.0 {
            self.t += tick.delta / self.duration;
            transform.rotate_z(TAU * tick.delta / self.duration);
        } else {
            self.t = 1.0;
        }

        if self.t >= 1.0 {
            transform.scale = Vec3::ZERO;
            TaskStatus::Complete
        } else {
            transform.scale = original.lerp(Vec3::ZERO, self.t);
            TaskStatus::Running
        }
    }

    fn label(&self) -> &'static str {
        "portal-shrink"
    }
}

fn finish_portal_exit(world: &mut World, entity: Entity) {
    let Ok(mut player) = world.get_entity_mut(entity) else {
        return;
    };

    // Out of the simulation until reactivated
    player.insert((
        Deactivated,
        Visibility::Hidden,
        RigidBodyDisabled,
        ColliderDisabled,
    ));
    if let Some(mut body) = player.get_mut::<RigidBody>() {
        *body = RigidBody::Dynamic;
    }
    info!("Player {:?} left through the portal", entity);
}

/// Approach, shrink, then deactivate `entity`.
pub fn portal_exit_sequence(entity: Entity, target: Vec3, timings: &SequenceTimings) -> Sequence {
    Sequence::new("portal-exit")
        .then(PortalApproach {
            entity,
            target,
            duration: timings.portal_approach,
        })
        .then(PortalShrink {
            entity,
            duration: timings.portal_shrink,
            t: 0.0,
            original_scale: None,
        })
        .then(
            Delay::immediate(move |ctx| finish_portal_exit(ctx.world, entity))
                .named("portal-deactivate"),
        )
}

pub(crate) fn enter_portal(
    mut portal_events: MessageReader<PortalReached>,
    timings: Res<SequenceTimings>,
    mut scheduler: ResMut<TaskScheduler>,
    mut cues: MessageWriter<AudioCue>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &mut LocomotionState,
            &mut LinearVelocity,
            &mut RigidBody,
        ),
        (With<Player>, Without<Deactivated>),
    >,
) {
    for event in portal_events.read() {
        for (entity, transform, mut state, velocity, rigid_body) in &mut players {
            if !state.controls_enabled {
                continue;
            }

            let mut body = AvianBody::new(velocity, rigid_body);
            begin_portal_exit(&mut state, &mut body);
            cues.write(AudioCue::Portal);

            // Stay on the player's draw layer
            let target = event.position.truncate().extend(transform.translation.z);
            scheduler.start(
                Clock::Scaled,
                portal_exit_sequence(entity, target, &timings),
            );
            info!("Player {:?} entering portal at {:?}", entity, event.position);
        }
    }
}

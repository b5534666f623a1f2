//! Upgrades domain: pickup and end-portal trigger handling.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use std::collections::HashSet;

use crate::content::SequenceTimings;
use crate::core::Deactivated;
use crate::movement::Player;
use crate::schedule::{Clock, Delay, TaskScheduler};
use crate::upgrades::{
    Collected, EndPortal, GogliPickedUp, MitochondriaPickedUp, NucleusPickedUp, Pickup,
    PortalReached, UpgradeKind,
};

/// Order a collision pair as `(player, other)` if either side is the player.
pub fn player_contact(
    collider1: Entity,
    collider2: Entity,
    is_player: impl Fn(Entity) -> bool,
) -> Option<(Entity, Entity)> {
    if is_player(collider1) {
        Some((collider1, collider2))
    } else if is_player(collider2) {
        Some((collider2, collider1))
    } else {
        None
    }
}

/// Despawns `pickup` after `delay`. Bound to the pickup, so it dies with it.
pub fn pickup_despawn(pickup: Entity, delay: f32) -> Delay {
    Delay::new(delay, move |ctx| {
        if let Ok(entity) = ctx.world.get_entity_mut(pickup) {
            entity.despawn();
            debug!("Pickup {:?} despawned", pickup);
        }
    })
    .named("pickup-despawn")
}

pub(crate) fn detect_pickup_contacts(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    timings: Res<SequenceTimings>,
    mut scheduler: ResMut<TaskScheduler>,
    players: Query<(), (With<Player>, Without<Deactivated>)>,
    mut pickups: Query<(&Pickup, &mut Sprite), Without<Collected>>,
    mut nucleus: MessageWriter<NucleusPickedUp>,
    mut mitochondria: MessageWriter<MitochondriaPickedUp>,
    mut gogli: MessageWriter<GogliPickedUp>,
) {
    let mut collected_now = HashSet::new();

    for event in collision_events.read() {
        let Some((_, other)) =
            player_contact(event.collider1, event.collider2, |e| players.contains(e))
        else {
            continue;
        };

        if collected_now.contains(&other) {
            continue;
        }

        let Ok((pickup, mut sprite)) = pickups.get_mut(other) else {
            continue;
        };

        match pickup.kind {
            UpgradeKind::Nucleus => {
                nucleus.write(NucleusPickedUp);
            }
            UpgradeKind::Mitochondria => {
                mitochondria.write(MitochondriaPickedUp);
            }
            UpgradeKind::Gogli => {
                gogli.write(GogliPickedUp);
            }
        }

        sprite.color.set_alpha(0.0);
        commands.entity(other).insert(Collected);
        collected_now.insert(other);
        scheduler.start_owned(
            other,
            Clock::Unscaled,
            pickup_despawn(other, timings.pickup_despawn_delay),
        );

        info!("Collected {:?} pickup {:?}", pickup.kind, other);
        debug!("Pickup burst at {:?}", other);
    }
}

pub(crate) fn detect_portal_contacts(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    players: Query<(), (With<Player>, Without<Deactivated>)>,
    portals: Query<&Transform, With<EndPortal>>,
    mut reached: MessageWriter<PortalReached>,
) {
    let mut used = HashSet::new();

    for event in collision_events.read() {
        let Some((_, other)) =
            player_contact(event.collider1, event.collider2, |e| players.contains(e))
        else {
            continue;
        };

        let Ok(transform) = portals.get(other) else {
            continue;
        };

        if !used.insert(other) {
            continue;
        }

        reached.write(PortalReached {
            position: transform.translation,
        });
        commands.entity(other).despawn();
        info!("End portal {:?} reached", other);
    }
}

//! Upgrades domain: applying capability upgrades to the player.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::audio::AudioCue;
use crate::core::Deactivated;
use crate::movement::{LocomotionState, LocomotionTuning, Player, TrailEffect};
use crate::sprites::{Animator, SkinProfile};
use crate::upgrades::{GogliPickedUp, MitochondriaPickedUp, NucleusPickedUp, UpgradeKind};

/// Set the capability flags for `kind` and swap the skin profile.
///
/// Flags are only ever set, so repeating an upgrade changes nothing.
pub fn apply_upgrade(
    kind: UpgradeKind,
    state: &mut LocomotionState,
    animator: &mut Animator,
    tuning: &LocomotionTuning,
) {
    match kind {
        UpgradeKind::Nucleus => {
            state.can_jump = true;
            animator.set_profile(SkinProfile::Nucleus);
        }
        UpgradeKind::Mitochondria => {
            state.move_speed = tuning.boosted_move_speed;
            animator.set_profile(SkinProfile::Mitochondria);
        }
        UpgradeKind::Gogli => {
            state.can_climb = true;
            animator.set_profile(SkinProfile::Gogli);
        }
    }
}

/// Only active players listen. Messages with no listener are dropped.
pub(crate) fn apply_capability_upgrades(
    mut nucleus: MessageReader<NucleusPickedUp>,
    mut mitochondria: MessageReader<MitochondriaPickedUp>,
    mut gogli: MessageReader<GogliPickedUp>,
    tuning: Res<LocomotionTuning>,
    mut cues: MessageWriter<AudioCue>,
    mut players: Query<
        (Entity, &mut LocomotionState, &mut Animator),
        (With<Player>, Without<Deactivated>),
    >,
    mut trails: Query<(&TrailEffect, &mut Visibility)>,
) {
    let received: Vec<UpgradeKind> = nucleus
        .read()
        .map(|_| UpgradeKind::Nucleus)
        .chain(mitochondria.read().map(|_| UpgradeKind::Mitochondria))
        .chain(gogli.read().map(|_| UpgradeKind::Gogli))
        .collect();

    for kind in received {
        for (entity, mut state, mut animator) in &mut players {
            apply_upgrade(kind, &mut state, &mut animator, &tuning);
            cues.write(AudioCue::Upgrade);
            info!("Player {:?} upgraded: {:?}", entity, kind);

            if kind.shows_trail() {
                for (trail, mut visibility) in &mut trails {
                    if trail.owner == entity {
                        *visibility = Visibility::Inherited;
                    }
                }
            }
        }
    }
}

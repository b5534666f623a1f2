//! Movement domain: player locomotion.
//!
//! Covers contact sensing, the locomotion state machine, physics impulses,
//! animation parameters and the portal-exit sequence.

mod body;
mod bootstrap;
mod components;
#[cfg(feature = "dev-tools")]
mod dev;
mod locomotion;
mod portal;
mod resources;
mod sensors;
mod systems;

#[cfg(test)]
mod tests;

pub use body::{AvianBody, PhysicsBody};
pub use bootstrap::{PLAYER_SIZE, PLAYER_SPAWN, RigComponent, RigError, RigPresence};
pub use components::{
    ClimbableWall, Facing, GameLayer, Ground, LocomotionPhase, LocomotionState, Player, ProbeRig,
    TrailEffect,
};
pub use locomotion::{PhysicsStepOutcome, wall_detection_cooldown};
pub use portal::{begin_portal_exit, portal_exit_sequence};
pub use resources::{LocomotionInput, LocomotionTuning};
pub use sensors::ContactProbe;

use bevy::prelude::*;

use crate::core::FrameSet;
use crate::movement::bootstrap::{spawn_player, validate_player_rig};
use crate::movement::portal::enter_portal;
use crate::movement::systems::{
    apply_locomotion_input, apply_physics_step, read_input, sense_contacts,
    update_animation_params,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocomotionInput>()
            .add_systems(Startup, spawn_player)
            .add_systems(PreUpdate, validate_player_rig)
            .add_systems(Update, read_input.in_set(FrameSet::Input))
            .add_systems(Update, sense_contacts.in_set(FrameSet::Sense))
            .add_systems(
                Update,
                (enter_portal, apply_locomotion_input, update_animation_params)
                    .chain()
                    .in_set(FrameSet::Decide),
            )
            .add_systems(FixedUpdate, apply_physics_step);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, dev::draw_probe_gizmos.after(FrameSet::Sense));
    }
}

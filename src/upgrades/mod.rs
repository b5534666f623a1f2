//! Upgrades domain: organelle pickups, capability upgrades and the end portal.

mod capability;
mod components;
mod events;
mod pickups;


pub use capability::apply_upgrade;
pub use components::{Collected, EndPortal, Pickup, UpgradeKind};
pub use events::{GogliPickedUp, MitochondriaPickedUp, NucleusPickedUp, PortalReached};
pub use pickups::{pickup_despawn, player_contact};

use bevy::prelude::*;

use crate::core::FrameSet;
use crate::upgrades::capability::apply_capability_upgrades;
use crate::upgrades::pickups::{detect_pickup_contacts, detect_portal_contacts};

pub struct UpgradesPlugin;

impl Plugin for UpgradesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<NucleusPickedUp>()
            .add_message::<MitochondriaPickedUp>()
            .add_message::<GogliPickedUp>()
            .add_message::<PortalReached>()
            .add_systems(
                Update,
                (detect_pickup_contacts, detect_portal_contacts).in_set(FrameSet::Sense),
            )
            .add_systems(Update, apply_capability_upgrades.in_set(FrameSet::Decide));
    }
}

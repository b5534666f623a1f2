//! Upgrades domain: pickup and portal components.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    /// Unlocks jumping.
    Nucleus,
    /// Raises move speed and shows the trail.
    Mitochondria,
    /// Unlocks climbing and wall jumps.
    Gogli,
}

impl UpgradeKind {
    pub fn shows_trail(self) -> bool {
        matches!(self, UpgradeKind::Mitochondria)
    }
}

/// Organelle trigger volume. Fires its capability message on first contact.
#[derive(Component, Debug, Clone, Copy)]
pub struct Pickup {
    pub kind: UpgradeKind,
}

/// Pickup already taken, hidden and waiting to despawn.
#[derive(Component, Debug)]
pub struct Collected;

/// Level exit trigger.
#[derive(Component, Debug)]
pub struct EndPortal;

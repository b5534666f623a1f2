//! Upgrades domain: capability and portal messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct NucleusPickedUp;

impl Message for NucleusPickedUp {}

#[derive(Debug, Clone, Copy, Default)]
pub struct MitochondriaPickedUp;

impl Message for MitochondriaPickedUp {}

#[derive(Debug, Clone, Copy, Default)]
pub struct GogliPickedUp;

impl Message for GogliPickedUp {}

/// The player touched the end portal at `position`.
#[derive(Debug, Clone, Copy)]
pub struct PortalReached {
    pub position: Vec3,
}

impl Message for PortalReached {}

//! Movement domain: ground and wall probing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::Deactivated;
use crate::movement::{LocomotionState, Player, ProbeRig};

pub(crate) fn sense_contacts(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &ProbeRig, &mut LocomotionState), (With<Player>, Without<Deactivated>)>,
) {
    for (transform, rig, mut state) in &mut query {
        let was_touching_wall = state.is_touching_wall();
        state.sense(&spatial_query, transform.translation.truncate(), rig);

        if state.is_touching_wall() != was_touching_wall {
            trace!(
                "Wall contact: left={}, right={}",
                state.is_touching_left_wall, state.is_touching_right_wall
            );
        }
    }
}

//! Movement domain: debug drawing of the contact probes.

use bevy::prelude::*;

use crate::movement::{LocomotionState, Player, ProbeRig};

const PROBE_IDLE: Color = Color::srgb(0.9, 0.9, 0.9);
const PROBE_HIT: Color = Color::srgb(1.0, 0.3, 0.3);

fn probe_color(hit: bool) -> Color {
    if hit { PROBE_HIT } else { PROBE_IDLE }
}

pub(crate) fn draw_probe_gizmos(
    mut gizmos: Gizmos,
    query: Query<(&Transform, &ProbeRig, &LocomotionState), With<Player>>,
) {
    for (transform, rig, state) in &query {
        let origin = transform.translation.truncate();

        gizmos.circle_2d(
            origin + rig.ground_offset,
            rig.ground_radius,
            probe_color(state.is_grounded),
        );
        gizmos.circle_2d(
            origin + rig.left_wall_offset,
            rig.wall_radius,
            probe_color(state.is_touching_left_wall),
        );
        gizmos.circle_2d(
            origin + rig.right_wall_offset,
            rig.wall_radius,
            probe_color(state.is_touching_right_wall),
        );
    }
}

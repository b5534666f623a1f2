//! Core domain: camera and decoration systems.

use bevy::prelude::*;

use crate::core::{Deactivated, PIXELS_PER_UNIT, Spin};

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 2.0, 0.0),
    ));
}

pub(crate) fn spin_entities(
    time: Res<Time>,
    mut query: Query<(&Spin, &mut Transform), Without<Deactivated>>,
) {
    let dt = time.delta_secs();

    for (spin, mut transform) in &mut query {
        transform.rotate_z(spin.degrees_per_second.to_radians() * dt);
    }
}

//! Movement domain: contact probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::GameLayer;

/// Circle-overlap query against one physics layer. Absence of contact is a
/// plain `false`, never an error.
pub trait ContactProbe {
    fn overlap_circle(&self, center: Vec2, radius: f32, layer: GameLayer) -> bool;
}

impl ContactProbe for SpatialQuery<'_, '_> {
    fn overlap_circle(&self, center: Vec2, radius: f32, layer: GameLayer) -> bool {
        let filter = SpatialQueryFilter::from_mask(layer);
        !self
            .shape_intersections(&Collider::circle(radius), center, 0.0, &filter)
            .is_empty()
    }
}

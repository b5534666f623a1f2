//! Schedule domain: output sinks that interpolation tasks write into.

use bevy::prelude::*;

/// A single float living somewhere in the world.
///
/// `get` returns `None` once the target is gone, which ends the task that
/// drives it.
pub trait FloatSink: Send + Sync + 'static {
    fn get(&self, world: &World) -> Option<f32>;
    fn set(&self, world: &mut World, value: f32);
}

/// Alpha channel of an entity's sprite color.
#[derive(Debug, Clone, Copy)]
pub struct SpriteAlpha(pub Entity);

impl FloatSink for SpriteAlpha {
    fn get(&self, world: &World) -> Option<f32> {
        world.get::<Sprite>(self.0).map(|sprite| sprite.color.alpha())
    }

    fn set(&self, world: &mut World, value: f32) {
        if let Some(mut sprite) = world.get_mut::<Sprite>(self.0) {
            sprite.color.set_alpha(value);
        }
    }
}

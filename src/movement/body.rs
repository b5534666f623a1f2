//! Movement domain: the physics body seam locomotion writes through.

use avian2d::prelude::*;
use bevy::prelude::*;

/// What locomotion needs from a rigid body.
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    /// Instantaneous impulse. Player bodies are unit mass, so this is a
    /// direct change of velocity.
    fn add_impulse(&mut self, impulse: Vec2);
    fn set_kinematic(&mut self, kinematic: bool);
}

/// Avian body components borrowed from a query item.
pub struct AvianBody<'a> {
    pub velocity: Mut<'a, LinearVelocity>,
    pub rigid_body: Mut<'a, RigidBody>,
}

impl<'a> AvianBody<'a> {
    pub fn new(velocity: Mut<'a, LinearVelocity>, rigid_body: Mut<'a, RigidBody>) -> Self {
        Self {
            velocity,
            rigid_body,
        }
    }
}

impl PhysicsBody for AvianBody<'_> {
    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn add_impulse(&mut self, impulse: Vec2) {
        self.velocity.0 += impulse;
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        let body = if kinematic {
            RigidBody::Kinematic
        } else {
            RigidBody::Dynamic
        };
        self.rigid_body.set_if_neq(body);
    }
}

//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::sense_contacts;
pub(crate) use input::read_input;
pub(crate) use movement::{apply_locomotion_input, apply_physics_step, update_animation_params};

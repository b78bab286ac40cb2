//! Movement Integration
//!
//! Explicit Euler step: `position += velocity * dt` for every dynamic body.
//! Runs after input has written velocities and before collision resolution
//! corrects the new positions.

use super::components::RigidBody;
use super::system::System;
use super::transform::Transform2D;
use super::world::World;

#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        for entity in world.entities_mut() {
            let body = match entity.try_get_component::<RigidBody>() {
                Some(body) if !body.is_static => *body,
                _ => continue,
            };
            if let Some(transform) = entity.try_get_component_mut::<Transform2D>() {
                transform.translate(body.velocity * dt);
            }
        }
    }
}

//! Systems
//!
//! A system is per-frame logic that reads and writes entity components.
//! The `World` owns its systems and runs them in registration order: first
//! every `update` hook, later (once the frame is simulated) every `draw`
//! hook. Both hooks default to doing nothing, so a system only implements
//! the phase it cares about.

use super::world::World;

pub trait System {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Advance the simulation by `dt` seconds.
    fn update(&mut self, _world: &mut World, _dt: f32) {}

    /// Render the current state. Must not mutate entities.
    fn draw(&mut self, _world: &World) {}
}

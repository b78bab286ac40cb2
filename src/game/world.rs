//! Game World
//!
//! The World is the central container for all simulation state:
//! - Entity creation (ids from 1, monotonically increasing, never reused)
//! - Ordered list of systems driven once per frame
//!
//! Entities are kept in creation order. Systems rely on that order to make
//! the frame deterministic: the same scene and inputs always produce the
//! same corrections.

use log::debug;

use super::entity::{Entity, EntityId};
use super::system::System;

/// The simulation world containing all entities and the system pipeline.
pub struct World {
    entities: Vec<Entity>,
    systems: Vec<Box<dyn System>>,
    next_entity_id: u32,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            systems: Vec::new(),
            next_entity_id: 1,
        }
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Create a new entity with no components and return it for setup.
    pub fn create_entity(&mut self) -> &mut Entity {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;

        let index = self.entities.len();
        self.entities.push(Entity::new(id));
        &mut self.entities[index]
    }

    /// All entities in creation order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // =========================================================================
    // Systems
    // =========================================================================

    /// Append a system to the end of the pipeline.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        debug!("registered system #{}: {}", self.systems.len() + 1, system.name());
        self.systems.push(Box::new(system));
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Names of the registered systems, in run order.
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Run every system's update hook in registration order.
    pub fn update(&mut self, dt: f32) {
        // Systems need `&mut World`, so detach the list while they run
        let mut systems = std::mem::take(&mut self.systems);
        for system in systems.iter_mut() {
            system.update(self, dt);
        }
        // Keep anything registered during the frame after the existing ones
        systems.append(&mut self.systems);
        self.systems = systems;
    }

    /// Run every system's draw hook in registration order.
    pub fn draw(&mut self) {
        let mut systems = std::mem::take(&mut self.systems);
        for system in systems.iter_mut() {
            system.draw(self);
        }
        systems.append(&mut self.systems);
        self.systems = systems;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

//! Entities
//!
//! An entity is an identity plus the components attached to it. Ids are
//! handed out by the `World`, start at 1 and are never reused: there is no
//! deletion API, so a stored id always refers to the same entity.

use std::any::type_name;
use std::fmt;

use super::component::{Component, ComponentMap};

/// Opaque identifier of an entity inside a `World`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw numeric value of the id.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A game object: an id and its components.
pub struct Entity {
    id: EntityId,
    components: ComponentMap,
}

impl Entity {
    /// Create an entity with no components.
    /// Should only be called by `World::create_entity`.
    pub(crate) fn new(id: EntityId) -> Self {
        Self { id, components: ComponentMap::new() }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Attach a component, replacing any existing one of the same type.
    /// Returns `self` so calls can be chained.
    pub fn add_component<T: Component>(&mut self, component: T) -> &mut Self {
        self.components.insert(component);
        self
    }

    pub fn try_get_component<T: Component>(&self) -> Option<&T> {
        self.components.get::<T>()
    }

    pub fn try_get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components.get_mut::<T>()
    }

    /// Get a component the caller knows is present.
    ///
    /// # Panics
    /// Panics if the entity has no component of type `T`. Systems only call
    /// this after filtering on `has_component`, so a miss is a logic error.
    pub fn get_required_component<T: Component>(&self) -> &T {
        let id = self.id;
        match self.components.get::<T>() {
            Some(component) => component,
            None => panic!("entity {} does not have component {}", id, type_name::<T>()),
        }
    }

    /// Mutable counterpart of `get_required_component`.
    ///
    /// # Panics
    /// Panics if the entity has no component of type `T`.
    pub fn get_required_component_mut<T: Component>(&mut self) -> &mut T {
        let id = self.id;
        match self.components.get_mut::<T>() {
            Some(component) => component,
            None => panic!("entity {} does not have component {}", id, type_name::<T>()),
        }
    }

    pub fn has_component<T: Component>(&self) -> bool {
        self.components.contains::<T>()
    }

    /// Number of component types attached.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("components", &self.components.len())
            .finish()
    }
}

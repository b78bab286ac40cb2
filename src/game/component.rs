//! Component Storage
//!
//! Components are plain data attached to entities. Each entity owns a
//! `ComponentMap`: a map from the component's concrete type to one boxed
//! instance of it. Inserting a second value of the same type replaces the
//! first.
//!
//! The scene is small (tens to low thousands of entities), so a per-entity
//! map is simpler than archetype or sparse-array storage and easy to reason
//! about.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Marker for data that can be attached to an entity.
///
/// Implemented explicitly by each component type rather than blanket-implemented
/// for every `'static` type, so the set of components stays discoverable.
pub trait Component: Any {}

/// Heterogeneous map holding at most one instance per component type.
#[derive(Default)]
pub struct ComponentMap {
    data: HashMap<TypeId, Box<dyn Any>>,
}

impl ComponentMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self { data: HashMap::new() }
    }

    /// Insert a component, replacing any existing one of the same type.
    /// Returns the replaced value if there was one.
    pub fn insert<T: Component>(&mut self, component: T) -> Option<T> {
        self.data
            .insert(TypeId::of::<T>(), Box::new(component))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Get a reference to the component of type `T`.
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.data.get(&TypeId::of::<T>()).and_then(|c| c.downcast_ref::<T>())
    }

    /// Get a mutable reference to the component of type `T`.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.data.get_mut(&TypeId::of::<T>()).and_then(|c| c.downcast_mut::<T>())
    }

    /// Check if a component of type `T` is present.
    pub fn contains<T: Component>(&self) -> bool {
        self.data.contains_key(&TypeId::of::<T>())
    }

    /// Number of distinct component types held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(i32);
    impl Component for Health {}

    #[derive(Debug, PartialEq)]
    struct Name(&'static str);
    impl Component for Name {}

    #[test]
    fn test_insert_and_get() {
        let mut map = ComponentMap::new();
        assert!(map.is_empty());

        map.insert(Health(100));
        map.insert(Name("slime"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get::<Health>(), Some(&Health(100)));
        assert_eq!(map.get::<Name>(), Some(&Name("slime")));
    }

    #[test]
    fn test_insert_replaces_same_type() {
        let mut map = ComponentMap::new();

        assert!(map.insert(Health(100)).is_none());
        let old = map.insert(Health(50));

        assert_eq!(old, Some(Health(100)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get::<Health>(), Some(&Health(50)));
    }

    #[test]
    fn test_get_mut() {
        let mut map = ComponentMap::new();
        map.insert(Health(100));

        if let Some(health) = map.get_mut::<Health>() {
            health.0 -= 30;
        }

        assert_eq!(map.get::<Health>(), Some(&Health(70)));
        assert!(map.get_mut::<Name>().is_none());
        assert!(!map.contains::<Name>());
    }
}

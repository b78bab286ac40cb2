//! Collider Component

use macroquad::math::Vec2;

use super::component::Component;
use super::transform::Transform2D;
use crate::geometry::{build_polygon, CollisionShape};

/// Collision shape attached to an entity, offset and scaled relative to the
/// entity's `Transform2D`.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub shape: CollisionShape,
    pub local_position: Vec2,
    pub local_scale: Vec2,
}

impl Collider {
    pub fn new(shape: CollisionShape) -> Self {
        Self {
            shape,
            local_position: Vec2::ZERO,
            local_scale: Vec2::ONE,
        }
    }

    pub fn with_offset(mut self, local_position: Vec2) -> Self {
        self.local_position = local_position;
        self
    }

    pub fn with_scale(mut self, local_scale: Vec2) -> Self {
        self.local_scale = local_scale;
        self
    }

    /// World-space polygon for this collider under `transform`.
    /// Never cached; callers rebuild it after moving the entity.
    pub fn world_polygon(&self, transform: &Transform2D) -> Vec<Vec2> {
        build_polygon(
            &self.shape,
            self.local_position,
            self.local_scale,
            transform.position,
            transform.scale,
        )
    }
}

impl Component for Collider {}

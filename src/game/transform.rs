//! Transform Component
//!
//! World-space placement of an entity. There is no hierarchy and no
//! rotation: a collider's local offset and scale are applied on top of this
//! transform when its polygon is built.

use macroquad::math::Vec2;

use super::component::Component;

/// World position and non-uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    pub scale: Vec2,
}

impl Transform2D {
    /// Identity transform (origin, scale 1)
    pub const IDENTITY: Transform2D = Transform2D {
        position: Vec2::ZERO,
        scale: Vec2::ONE,
    };

    /// Create transform at a position with unit scale
    pub fn from_position(position: Vec2) -> Self {
        Self { position, scale: Vec2::ONE }
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Move by `delta` in world units.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform2D {}

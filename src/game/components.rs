//! Game Components
//!
//! Plain data attached to entities. Behavior lives in systems.

use macroquad::color::Color;
use macroquad::math::Vec2;

use super::component::Component;

// =============================================================================
// Physics
// =============================================================================

/// Velocity plus the static flag.
///
/// Static bodies never move: the collision system only ever corrects the
/// dynamic side of a contact. An entity with a collider but no `RigidBody`
/// is treated as static.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
    pub is_static: bool,
}

impl RigidBody {
    pub fn dynamic() -> Self {
        Self { velocity: Vec2::ZERO, is_static: false }
    }

    pub fn fixed() -> Self {
        Self { velocity: Vec2::ZERO, is_static: true }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }
}

impl Component for RigidBody {}

/// Highest valid collision layer index.
pub const MAX_COLLISION_LAYER: i32 = 31;

/// Collision filtering: which layer an entity lives on and which layers it
/// accepts contacts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionLayer {
    /// Layer index in [0, 31]. Anything else never collides.
    pub layer: i32,
    /// Bit `n` set means contacts with layer `n` are accepted
    pub mask: u32,
}

impl CollisionLayer {
    pub fn new(layer: i32, mask: u32) -> Self {
        Self { layer, mask }
    }

    fn layer_bit(&self) -> Option<u32> {
        if (0..=MAX_COLLISION_LAYER).contains(&self.layer) {
            Some(1u32 << self.layer)
        } else {
            None
        }
    }

    /// Both sides must accept each other's layer.
    pub fn can_collide_with(&self, other: &CollisionLayer) -> bool {
        match (self.layer_bit(), other.layer_bit()) {
            (Some(mine), Some(theirs)) => self.mask & theirs != 0 && other.mask & mine != 0,
            _ => false,
        }
    }
}

impl Component for CollisionLayer {}

// =============================================================================
// Control
// =============================================================================

/// Marks the entity steered by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerController {
    /// Pixels per second
    pub move_speed: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self { move_speed: 175.0 }
    }
}

impl Component for PlayerController {}

// =============================================================================
// Presentation
// =============================================================================

/// Fill color and draw order for a body's debug box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTint {
    pub color: Color,
    /// Higher draws later (on top)
    pub z_index: i32,
}

impl BodyTint {
    pub fn new(color: Color, z_index: i32) -> Self {
        Self { color, z_index }
    }
}

impl Component for BodyTint {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask_is_symmetric() {
        let player = CollisionLayer::new(1, 0b11);
        let ground = CollisionLayer::new(0, 0b10);
        let rock = CollisionLayer::new(1, 0b10);

        assert!(player.can_collide_with(&ground));
        assert!(ground.can_collide_with(&player));
        assert!(player.can_collide_with(&rock));
        assert!(rock.can_collide_with(&player));

        // Rock does not accept layer 0, so neither direction collides
        assert!(!rock.can_collide_with(&ground));
        assert!(!ground.can_collide_with(&rock));
    }

    #[test]
    fn test_one_sided_mask_does_not_collide() {
        let a = CollisionLayer::new(2, 1 << 3);
        let b = CollisionLayer::new(3, 0);
        assert!(!a.can_collide_with(&b));
        assert!(!b.can_collide_with(&a));
    }

    #[test]
    fn test_out_of_range_layer_never_collides() {
        let everything = CollisionLayer::new(0, u32::MAX);
        for layer in [-1, 32, 100] {
            let odd = CollisionLayer::new(layer, u32::MAX);
            assert!(!odd.can_collide_with(&everything));
            assert!(!everything.can_collide_with(&odd));
        }

        let top = CollisionLayer::new(31, u32::MAX);
        assert!(top.can_collide_with(&everything));
    }

    #[test]
    fn test_rigid_body_builders() {
        let body = RigidBody::dynamic().with_velocity(Vec2::new(1.0, 0.0));
        assert!(!body.is_static);
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
        assert!(RigidBody::fixed().is_static);
    }
}

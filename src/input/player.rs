//! WASD movement for the player body.

use macroquad::input::KeyCode;
use macroquad::math::Vec2;

use super::KeyboardSnapshot;
use crate::game::components::{PlayerController, RigidBody};
use crate::game::{System, World};

const MOVEMENT_KEYS: [KeyCode; 4] = [KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D];

/// Unit direction from WASD in screen space (+Y is down). Opposite keys
/// cancel; diagonals are normalized.
pub fn movement_direction(keys: &KeyboardSnapshot) -> Vec2 {
    let mut direction = Vec2::ZERO;

    if keys.is_down(KeyCode::A) { direction.x -= 1.0; }
    if keys.is_down(KeyCode::D) { direction.x += 1.0; }
    if keys.is_down(KeyCode::W) { direction.y -= 1.0; }
    if keys.is_down(KeyCode::S) { direction.y += 1.0; }

    if direction != Vec2::ZERO {
        direction = direction.normalize();
    }
    direction
}

/// Writes velocity for every dynamic body with a `PlayerController`.
#[derive(Debug, Default)]
pub struct PlayerInputSystem;

impl PlayerInputSystem {
    pub fn new() -> Self {
        Self
    }

    /// Set `velocity = direction * move_speed` on every controlled body.
    pub fn apply(&self, world: &mut World, direction: Vec2) {
        for entity in world.entities_mut() {
            let speed = match entity.try_get_component::<PlayerController>() {
                Some(controller) => controller.move_speed,
                None => continue,
            };
            if let Some(body) = entity.try_get_component_mut::<RigidBody>() {
                if !body.is_static {
                    body.velocity = direction * speed;
                }
            }
        }
    }
}

impl System for PlayerInputSystem {
    fn name(&self) -> &'static str {
        "player input"
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let keys = KeyboardSnapshot::capture(&MOVEMENT_KEYS);
        self.apply(world, movement_direction(&keys));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_direction() {
        let none = KeyboardSnapshot::new();
        assert_eq!(movement_direction(&none), Vec2::ZERO);

        let up = KeyboardSnapshot::from_keys(&[KeyCode::W]);
        assert_eq!(movement_direction(&up), Vec2::new(0.0, -1.0));

        let cancel = KeyboardSnapshot::from_keys(&[KeyCode::A, KeyCode::D]);
        assert_eq!(movement_direction(&cancel), Vec2::ZERO);

        let diagonal = movement_direction(&KeyboardSnapshot::from_keys(&[KeyCode::S, KeyCode::D]));
        assert!((diagonal.length() - 1.0).abs() < 0.0001);
        assert!(diagonal.x > 0.0 && diagonal.y > 0.0);
    }

    #[test]
    fn test_apply_sets_velocity_on_dynamic_players_only() {
        let mut world = World::new();
        world
            .create_entity()
            .add_component(PlayerController { move_speed: 100.0 })
            .add_component(RigidBody::dynamic());
        world
            .create_entity()
            .add_component(PlayerController { move_speed: 100.0 })
            .add_component(RigidBody::fixed());
        world.create_entity().add_component(RigidBody::dynamic());

        PlayerInputSystem::new().apply(&mut world, Vec2::new(1.0, 0.0));

        let velocity = |i: usize| world.entities()[i].get_required_component::<RigidBody>().velocity;
        assert_eq!(velocity(0), Vec2::new(100.0, 0.0));
        assert_eq!(velocity(1), Vec2::ZERO);
        assert_eq!(velocity(2), Vec2::ZERO);
    }
}

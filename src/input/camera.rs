//! Arrow-key camera control.
//!
//! Arrows pan (Shift doubles the speed) and C toggles following the
//! camera's target.

use macroquad::input::KeyCode;
use macroquad::math::Vec2;

use super::KeyboardSnapshot;
use crate::game::{Camera2D, CameraController, System, Transform2D, World};

const CAMERA_KEYS: [KeyCode; 7] = [
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::LeftShift,
    KeyCode::RightShift,
    KeyCode::C,
];

const FAST_PAN_MULTIPLIER: f32 = 2.0;

/// Unit pan direction from the arrow keys. Opposite keys cancel.
pub fn pan_direction(keys: &KeyboardSnapshot) -> Vec2 {
    let mut direction = Vec2::ZERO;

    if keys.is_down(KeyCode::Left) { direction.x -= 1.0; }
    if keys.is_down(KeyCode::Right) { direction.x += 1.0; }
    if keys.is_down(KeyCode::Up) { direction.y -= 1.0; }
    if keys.is_down(KeyCode::Down) { direction.y += 1.0; }

    if direction != Vec2::ZERO {
        direction = direction.normalize();
    }
    direction
}

fn speed_multiplier(keys: &KeyboardSnapshot) -> f32 {
    if keys.is_down(KeyCode::LeftShift) || keys.is_down(KeyCode::RightShift) {
        FAST_PAN_MULTIPLIER
    } else {
        1.0
    }
}

/// Moves every entity that has both `Camera2D` and `CameraController`.
#[derive(Debug, Default)]
pub struct CameraInputSystem {
    previous: KeyboardSnapshot,
}

impl CameraInputSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame of input. Stores `current` as the previous snapshot.
    pub fn apply(&mut self, world: &mut World, current: KeyboardSnapshot, dt: f32) {
        let toggle = current.just_pressed(&self.previous, KeyCode::C);
        let direction = pan_direction(&current);
        let multiplier = speed_multiplier(&current);

        for index in 0..world.entity_count() {
            let entity = &world.entities()[index];
            let (Some(mut camera), Some(mut controller)) = (
                entity.try_get_component::<Camera2D>().copied(),
                entity.try_get_component::<CameraController>().copied(),
            ) else {
                continue;
            };

            let target_position = controller
                .target()
                .and_then(|id| world.entity(id))
                .and_then(|target| target.try_get_component::<Transform2D>())
                .map(|transform| transform.position);

            if toggle {
                controller.toggle_follow();
            }
            let pan = direction * controller.move_speed * multiplier * dt;
            controller.step(&mut camera, pan, target_position);

            world.entities_mut()[index]
                .add_component(camera)
                .add_component(controller);
        }

        self.previous = current;
    }
}

impl System for CameraInputSystem {
    fn name(&self) -> &'static str {
        "camera input"
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        let current = KeyboardSnapshot::capture(&CAMERA_KEYS);
        self.apply(world, current, dt);
    }
}

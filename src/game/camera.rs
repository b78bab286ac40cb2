//! Camera Components
//!
//! The view is a translation followed by a uniform zoom:
//! `screen = (world - position) * zoom`. `position` is the world point
//! shown at the top-left of the window.
//!
//! A `CameraController` makes a camera entity respond to input and can
//! follow a rigid body. While following, the camera sits at the target's
//! position plus `follow_offset`.

use macroquad::math::{Rect, Vec2};

use super::component::Component;
use super::components::RigidBody;
use super::entity::{Entity, EntityId};
use super::transform::Transform2D;
use super::world::World;

/// Pan speed used when a scene does not give one.
pub const DEFAULT_CAMERA_SPEED: f32 = 250.0;

/// World-to-screen view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    pub position: Vec2,
    pub zoom: f32,
}

impl Camera2D {
    /// Screen space equals world space.
    pub const IDENTITY: Camera2D = Camera2D { position: Vec2::ZERO, zoom: 1.0 };

    pub fn new(position: Vec2, zoom: f32) -> Self {
        Self { position, zoom }
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        (point - self.position) * self.zoom
    }

    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        let min = self.world_to_screen(rect.point());
        Rect::new(min.x, min.y, rect.w * self.zoom, rect.h * self.zoom)
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Camera2D {}

/// Input and follow settings for a camera entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraController {
    /// Pan speed in pixels per second (doubled while Shift is held)
    pub move_speed: f32,
    target: Option<EntityId>,
    following: bool,
    follow_offset: Vec2,
}

impl CameraController {
    pub fn new(move_speed: f32) -> Self {
        Self { move_speed, target: None, following: false, follow_offset: Vec2::ZERO }
    }

    /// Start following `entity`. Only rigid bodies with a transform can be
    /// followed; returns false (and changes nothing) otherwise.
    pub fn attach_to(&mut self, entity: &Entity, follow_offset: Vec2) -> bool {
        if !entity.has_component::<RigidBody>() || !entity.has_component::<Transform2D>() {
            return false;
        }
        self.target = Some(entity.id());
        self.following = true;
        self.follow_offset = follow_offset;
        true
    }

    /// Stop following. The target is remembered so `toggle_follow` can
    /// resume it.
    pub fn detach(&mut self) {
        self.following = false;
    }

    /// Flip between following and free panning. No effect without a target.
    pub fn toggle_follow(&mut self) {
        if self.target.is_some() {
            self.following = !self.following;
        }
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn is_following(&self) -> bool {
        self.following && self.target.is_some()
    }

    pub fn follow_offset(&self) -> Vec2 {
        self.follow_offset
    }

    /// Apply one frame of movement.
    ///
    /// While following a target that still has a transform, `pan` shifts
    /// the follow offset and the camera snaps to `target + offset`.
    /// Otherwise `pan` moves the camera directly.
    pub fn step(&mut self, camera: &mut Camera2D, pan: Vec2, target_position: Option<Vec2>) {
        match target_position {
            Some(target) if self.is_following() => {
                self.follow_offset += pan;
                camera.position = target + self.follow_offset;
            }
            _ => camera.position += pan,
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(DEFAULT_CAMERA_SPEED)
    }
}

impl Component for CameraController {}

/// View of the first camera entity, or the identity view when there is none.
pub fn active_camera(world: &World) -> Camera2D {
    world
        .entities()
        .iter()
        .find_map(|e| e.try_get_component::<Camera2D>())
        .copied()
        .unwrap_or_default()
}

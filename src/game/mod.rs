//! Game Foundation Module
//!
//! A lightweight entity-component framework for a 2D isometric scene.
//!
//! Key concepts:
//! - Entity: an id plus at most one component of each type
//! - Component: plain data structs attached to entities
//! - System: per-frame logic with an update and a draw hook
//! - World: owns the entities and runs the systems in registration order
//!
//! A typical frame pipeline is camera and player input, movement, collision,
//! then the renderers. Collision relies on running after movement so that it
//! corrects the positions the bodies actually end the frame at.

pub mod entity;
pub mod component;
pub mod system;
pub mod world;
pub mod transform;
pub mod components;
pub mod collider;
pub mod camera;
pub mod movement;
pub mod collision;
pub mod renderer;

// Re-export main types
pub use entity::{Entity, EntityId};
pub use component::Component;
pub use system::System;
pub use world::World;
pub use transform::Transform2D;
pub use components::{BodyTint, CollisionLayer, PlayerController, RigidBody};
pub use collider::Collider;
pub use camera::{active_camera, Camera2D, CameraController, DEFAULT_CAMERA_SPEED};
pub use movement::MovementSystem;
pub use collision::{resolve_collisions, CollisionStats, CollisionSystem};
pub use renderer::{BodyRenderSystem, CollisionDebugRenderSystem, TileMapRenderSystem};

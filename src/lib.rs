//! Roguelike Darling: a small simulation core for 2D isometric scenes
//!
//! - `geometry`: polygon construction and SAT overlap tests
//! - `game`: entities, components, the `World` and its systems
//!   (movement, collision resolution, rendering)
//! - `tilemap`: isometric tile layers, tile collision and the palette
//! - `input`: keyboard-driven systems (camera, player, tile layer tweaks)
//! - `scene`: RON scene descriptions, validation and spawning
//!
//! The library logs through the `log` facade and installs no logger.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod geometry;
pub mod game;
pub mod tilemap;
pub mod input;
pub mod scene;

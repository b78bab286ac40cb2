//! Geometry Kernel
//!
//! Pure 2D helpers shared by the collision system and the debug renderer:
//! - Polygon construction from shape descriptors (rectangle, oval, custom)
//! - Separating Axis Theorem overlap test with minimum translation vector
//!
//! Everything here works on plain `Vec2` point lists and holds no state.
//! Degenerate input (fewer than 3 points, zero-length edges) is not an
//! error: it simply never produces a collision.

pub mod polygon;
pub mod sat;

pub use polygon::{
    build_polygon, centroid, custom, line_loop, oval, rectangle, CollisionShape, OVAL_SEGMENTS,
};
pub use sat::try_compute_mtv;

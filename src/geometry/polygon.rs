//! Polygon Construction
//!
//! Colliders and tiles describe their shape with a `CollisionShape`. Before a
//! collision test the shape is expanded into an ordered list of world-space
//! points. Rectangles and ovals are always convex; custom polygons are
//! expected to be convex with a consistent winding (either direction).

use macroquad::math::Vec2;
use std::f32::consts::TAU;

/// Number of vertices used to approximate an oval.
pub const OVAL_SEGMENTS: usize = 14;

/// Shape descriptor shared by rigid-body colliders and tile collision layers.
///
/// For colliders the sizes and points are in local units. For tile layers
/// they are relative to the layer's tile stride (see `tilemap::collision`).
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    /// Axis-aligned box of the given full size
    Rectangle { size: Vec2 },
    /// Axis-aligned ellipse of the given full size, sampled as a 14-gon
    Oval { size: Vec2 },
    /// Arbitrary convex polygon (fewer than 3 points never collides)
    Polygon { points: Vec<Vec2> },
}

impl CollisionShape {
    pub fn rectangle(width: f32, height: f32) -> Self {
        CollisionShape::Rectangle { size: Vec2::new(width, height) }
    }

    pub fn oval(width: f32, height: f32) -> Self {
        CollisionShape::Oval { size: Vec2::new(width, height) }
    }

    pub fn polygon(points: Vec<Vec2>) -> Self {
        CollisionShape::Polygon { points }
    }
}

/// Build the world polygon for a shape attached to a parent transform.
///
/// Local points are scaled by `parent_scale * local_scale` and translated to
/// `parent_position + local_position * parent_scale`.
pub fn build_polygon(
    shape: &CollisionShape,
    local_position: Vec2,
    local_scale: Vec2,
    parent_position: Vec2,
    parent_scale: Vec2,
) -> Vec<Vec2> {
    let scale = parent_scale * local_scale;
    let center = parent_position + local_position * parent_scale;

    match shape {
        CollisionShape::Rectangle { size } => rectangle(center, *size, scale),
        CollisionShape::Oval { size } => oval(center, *size, scale, OVAL_SEGMENTS),
        CollisionShape::Polygon { points } => custom(center, points, scale),
    }
}

/// Four corners of an axis-aligned box: top-left, top-right, bottom-right, bottom-left.
pub fn rectangle(center: Vec2, size: Vec2, scale: Vec2) -> Vec<Vec2> {
    let half = size * scale * 0.5;

    vec![
        Vec2::new(center.x - half.x, center.y - half.y),
        Vec2::new(center.x + half.x, center.y - half.y),
        Vec2::new(center.x + half.x, center.y + half.y),
        Vec2::new(center.x - half.x, center.y + half.y),
    ]
}

/// Ellipse sampled uniformly over [0, 2π).
pub fn oval(center: Vec2, size: Vec2, scale: Vec2, segments: usize) -> Vec<Vec2> {
    let radius = size * scale * 0.5;

    (0..segments)
        .map(|i| {
            let t = TAU * i as f32 / segments as f32;
            Vec2::new(center.x + t.cos() * radius.x, center.y + t.sin() * radius.y)
        })
        .collect()
}

/// Scale and translate user supplied points. Fewer than 3 points yields an
/// empty polygon.
pub fn custom(center: Vec2, points: &[Vec2], scale: Vec2) -> Vec<Vec2> {
    if points.len() < 3 {
        return Vec::new();
    }

    points.iter().map(|&p| center + p * scale).collect()
}

/// Arithmetic mean of the vertices (zero for an empty polygon).
pub fn centroid(polygon: &[Vec2]) -> Vec2 {
    if polygon.is_empty() {
        return Vec2::ZERO;
    }

    let total = polygon.iter().fold(Vec2::ZERO, |acc, &p| acc + p);
    total / polygon.len() as f32
}

/// Closed line loop for debug drawing: one segment per edge, the last one
/// returning to the first vertex.
pub fn line_loop(polygon: &[Vec2]) -> Vec<(Vec2, Vec2)> {
    if polygon.len() < 2 {
        return Vec::new();
    }

    (0..polygon.len())
        .map(|i| (polygon[i], polygon[(i + 1) % polygon.len()]))
        .collect()
}

//! Separating Axis Theorem
//!
//! Two convex polygons are disjoint iff some edge normal separates their
//! projections. While testing, we remember the axis with the smallest
//! penetration; that axis times the penetration depth is the minimum
//! translation vector (MTV).
//!
//! The MTV returned by `try_compute_mtv(a, b)` points from A's centroid
//! toward B's centroid, so callers separate the pair by moving A along
//! `-mtv` and/or B along `+mtv`.

use macroquad::math::Vec2;
use super::polygon::centroid;

/// Edge normals shorter than this are degenerate and are not tested.
const DEGENERATE_AXIS_LENGTH: f32 = 1.0e-6;

/// Smallest penetration found so far.
#[derive(Debug, Clone, Copy)]
struct Penetration {
    axis: Vec2,
    depth: f32,
}

/// Compute the minimum translation vector between two convex polygons.
///
/// Returns `None` when the polygons are separated, or when either one has
/// fewer than 3 vertices. Axes from A's edges are tested before B's; ties in
/// depth keep the first axis encountered.
pub fn try_compute_mtv(a: &[Vec2], b: &[Vec2]) -> Option<Vec2> {
    if a.len() < 3 || b.len() < 3 {
        return None;
    }

    let mut best = Penetration { axis: Vec2::ZERO, depth: f32::MAX };

    check_axes(a, b, &mut best)?;
    check_axes(b, a, &mut best)?;

    // Every edge was degenerate: nothing meaningful to push along
    if best.axis == Vec2::ZERO {
        return None;
    }

    let from_a_to_b = centroid(b) - centroid(a);
    let axis = if from_a_to_b.dot(best.axis) < 0.0 { -best.axis } else { best.axis };

    Some(axis * best.depth)
}

/// Test every edge normal of `edges_of`. Returns `None` as soon as one axis
/// separates the two polygons.
fn check_axes(edges_of: &[Vec2], other: &[Vec2], best: &mut Penetration) -> Option<()> {
    let count = edges_of.len();

    for i in 0..count {
        let edge = edges_of[(i + 1) % count] - edges_of[i];
        let normal = edge.perp();
        let length = normal.length();
        if length <= DEGENERATE_AXIS_LENGTH {
            continue;
        }
        let axis = normal / length;

        let (min_a, max_a) = project(axis, edges_of);
        let (min_b, max_b) = project(axis, other);

        if max_a < min_b || max_b < min_a {
            return None;
        }

        let depth = overlap(min_a, max_a, min_b, max_b);
        if depth < best.depth {
            best.depth = depth;
            best.axis = axis;
        }
    }

    Some(())
}

/// Projection interval of a polygon onto a unit axis.
fn project(axis: Vec2, polygon: &[Vec2]) -> (f32, f32) {
    let first = axis.dot(polygon[0]);
    polygon[1..].iter().fold((first, first), |(min, max), &p| {
        let value = axis.dot(p);
        (min.min(value), max.max(value))
    })
}

/// Penetration depth of two overlapping intervals.
///
/// When one interval contains the other, the shorter escape distance is
/// added so the contained shape ends up fully outside.
fn overlap(min_a: f32, max_a: f32, min_b: f32, max_b: f32) -> f32 {
    let depth = max_a.min(max_b) - min_a.max(min_b);

    let a_contains_b = min_a <= min_b && max_a >= max_b;
    let b_contains_a = min_b <= min_a && max_b >= max_a;
    if a_contains_b || b_contains_a {
        depth + (min_a - min_b).abs().min((max_a - max_b).abs())
    } else {
        depth
    }
}

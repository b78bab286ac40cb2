//! Tile Collision Layer
//!
//! Solidity grid parallel to a `TileMapLayer`. Every solid cell shares one
//! shape. Rectangle and oval sizes are fractions of the layer's stride and
//! are centred in the cell. Polygon points are in unit-cell coordinates
//! anchored at the cell's top-left corner, so (0.5, 0) is the top vertex of
//! the default diamond.

use log::warn;
use macroquad::math::Vec2;

use super::grid_cell_count;
use super::layer::TileMapLayer;
use crate::game::component::Component;
use crate::geometry::{oval, rectangle, CollisionShape, OVAL_SEGMENTS};

/// Unit diamond filling a cell. Used as the default shape and as the
/// fallback for polygons with fewer than 3 points.
pub const DIAMOND_POINTS: [Vec2; 4] = [
    Vec2::new(0.5, 0.0),
    Vec2::new(1.0, 0.5),
    Vec2::new(0.5, 1.0),
    Vec2::new(0.0, 0.5),
];

#[derive(Debug, Clone, PartialEq)]
pub struct TileCollisionLayer {
    width: i32,
    height: i32,
    /// Row-major: index = y * width + x
    solid: Vec<bool>,
    pub shape: CollisionShape,
    /// Whether the debug renderer outlines this layer
    pub debug_draw: bool,
}

impl TileCollisionLayer {
    /// Create a layer with no solid cells and the diamond shape.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            solid: vec![false; grid_cell_count(width, height)],
            shape: CollisionShape::polygon(DIAMOND_POINTS.to_vec()),
            debug_draw: true,
        }
    }

    pub fn with_shape(mut self, shape: CollisionShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Mark a cell solid or empty. Writes outside the grid are refused.
    pub fn set_solid(&mut self, x: i32, y: i32, solid: bool) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.solid[i] = solid;
                true
            }
            None => {
                warn!("collision layer: ignoring write at ({}, {}) outside {}x{}", x, y, self.width, self.height);
                false
            }
        }
    }

    /// Out-of-range cells are never solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.solid[i]).unwrap_or(false)
    }

    /// Solid cells in row-major order (y outer, x inner).
    pub fn solid_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width;
        self.solid
            .iter()
            .enumerate()
            .filter(|(_, &s)| s)
            .map(move |(i, _)| (i as i32 % width, i as i32 / width))
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    /// World polygon of cell (x, y) projected through `tiles`.
    pub fn tile_polygon(&self, tiles: &TileMapLayer, x: i32, y: i32) -> Vec<Vec2> {
        let base = tiles.cell_origin(x, y);
        let stride = tiles.tile_stride.as_vec2();

        match &self.shape {
            CollisionShape::Rectangle { size } => rectangle(base + stride * 0.5, stride * *size, Vec2::ONE),
            CollisionShape::Oval { size } => oval(base + stride * 0.5, stride * *size, Vec2::ONE, OVAL_SEGMENTS),
            CollisionShape::Polygon { points } => {
                let points: &[Vec2] = if points.len() < 3 { &DIAMOND_POINTS } else { points };
                points.iter().map(|&p| base + p * stride).collect()
            }
        }
    }

    /// Polygons of every solid cell, for debug drawing.
    pub fn solid_tile_polygons(&self, tiles: &TileMapLayer) -> Vec<Vec<Vec2>> {
        self.solid_cells().map(|(x, y)| self.tile_polygon(tiles, x, y)).collect()
    }
}

impl Component for TileCollisionLayer {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::centroid;
    use macroquad::math::IVec2;

    const EPS: f32 = 0.0001;

    fn tiles() -> TileMapLayer {
        let mut layer = TileMapLayer::new("ground", 4, 4, IVec2::new(100, 60), 0);
        layer.tile_stride = IVec2::new(80, 40);
        layer.offset = Vec2::new(200.0, 50.0);
        layer
    }

    #[test]
    fn test_solid_bounds() {
        let mut layer = TileCollisionLayer::new(3, 2);
        assert!(layer.set_solid(2, 1, true));
        assert!(layer.is_solid(2, 1));
        assert!(!layer.is_solid(1, 1));

        assert!(!layer.set_solid(3, 0, true));
        assert!(!layer.is_solid(3, 0));
        assert!(!layer.is_solid(-1, -1));
    }

    #[test]
    fn test_solid_cells_row_major() {
        let mut layer = TileCollisionLayer::new(3, 3);
        layer.set_solid(2, 0, true);
        layer.set_solid(0, 2, true);
        layer.set_solid(0, 0, true);
        layer.set_solid(1, 1, true);

        let cells: Vec<_> = layer.solid_cells().collect();
        assert_eq!(cells, vec![(0, 0), (2, 0), (1, 1), (0, 2)]);
        assert_eq!(layer.solid_count(), 4);
    }

    #[test]
    fn test_default_diamond_anchored_top_left() {
        let layer = TileCollisionLayer::new(4, 4);
        let poly = layer.tile_polygon(&tiles(), 1, 0);

        // Cell (1, 0) anchor: (200 + 40, 50 + 20)
        assert_eq!(poly.len(), 4);
        assert!((poly[0] - Vec2::new(280.0, 70.0)).length() < EPS);
        assert!((poly[1] - Vec2::new(320.0, 90.0)).length() < EPS);
        assert!((poly[3] - Vec2::new(240.0, 90.0)).length() < EPS);
    }

    #[test]
    fn test_rectangle_and_oval_centred_in_cell() {
        let rect = TileCollisionLayer::new(4, 4).with_shape(CollisionShape::rectangle(0.5, 1.0));
        let poly = rect.tile_polygon(&tiles(), 0, 0);
        assert!((centroid(&poly) - Vec2::new(240.0, 70.0)).length() < EPS);
        // Width is half the stride
        assert!((poly[1].x - poly[0].x - 40.0).abs() < EPS);
        assert!((poly[2].y - poly[1].y - 40.0).abs() < EPS);

        let round = TileCollisionLayer::new(4, 4).with_shape(CollisionShape::oval(1.0, 1.0));
        let poly = round.tile_polygon(&tiles(), 0, 0);
        assert_eq!(poly.len(), OVAL_SEGMENTS);
        assert!((poly[0] - Vec2::new(280.0, 70.0)).length() < EPS);
    }

    #[test]
    fn test_degenerate_polygon_falls_back_to_diamond() {
        let layer = TileCollisionLayer::new(4, 4).with_shape(CollisionShape::polygon(vec![Vec2::ZERO, Vec2::ONE]));
        let fallback = layer.tile_polygon(&tiles(), 2, 1);
        let diamond = TileCollisionLayer::new(4, 4).tile_polygon(&tiles(), 2, 1);
        assert_eq!(fallback, diamond);
    }

    #[test]
    fn test_solid_tile_polygons() {
        let mut layer = TileCollisionLayer::new(4, 4);
        layer.set_solid(0, 0, true);
        layer.set_solid(3, 3, true);

        let polys = layer.solid_tile_polygons(&tiles());
        assert_eq!(polys.len(), 2);
        assert!(polys.iter().all(|p| p.len() == 4));
    }
}

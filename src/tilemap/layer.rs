//! Tile Map Layer

use log::warn;
use macroquad::math::{IVec2, Vec2};

use super::{grid_cell_count, iso_cell_origin};
use crate::game::component::Component;

/// How cells are laid out on screen. Only one layout exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileRenderOrder {
    /// Diamond cells, x walks down-right, y walks down-left
    #[default]
    IsometricDiamondDownHorizontalOffset,
}

/// Dense grid of tile ids. Id 0 is an empty cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMapLayer {
    pub name: String,
    width: i32,
    height: i32,
    /// Row-major: index = y * width + x
    tiles: Vec<u32>,
    /// Size each tile is drawn at
    pub tile_size: IVec2,
    /// Spacing between neighbouring cells (may differ from the draw size)
    pub tile_stride: IVec2,
    pub offset: Vec2,
    pub z_index: i32,
    pub y_sort_enabled: bool,
    pub render_order: TileRenderOrder,
}

impl TileMapLayer {
    /// Create an empty layer. The stride starts equal to the tile size and
    /// y-sorting starts enabled.
    pub fn new(name: impl Into<String>, width: i32, height: i32, tile_size: IVec2, z_index: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            name: name.into(),
            width,
            height,
            tiles: vec![0; grid_cell_count(width, height)],
            tile_size,
            tile_stride: tile_size,
            offset: Vec2::ZERO,
            z_index,
            y_sort_enabled: true,
            render_order: TileRenderOrder::default(),
        }
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

    /// Tile id at (x, y), or `None` outside the grid.
    pub fn tile(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Set the tile id at (x, y). Writes outside the grid are refused and
    /// return false.
    pub fn set_tile(&mut self, x: i32, y: i32, tile_id: u32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.tiles[i] = tile_id;
                true
            }
            None => {
                warn!("tile layer '{}': ignoring write at ({}, {}) outside {}x{}", self.name, x, y, self.width, self.height);
                false
            }
        }
    }

    /// Top-left screen anchor of cell (x, y).
    pub fn cell_origin(&self, x: i32, y: i32) -> Vec2 {
        iso_cell_origin(x, y, self.tile_stride, self.offset)
    }

    /// Iterate non-empty cells in row-major order as (x, y, tile_id).
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32, u32)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, &id)| id != 0)
            .map(move |(i, &id)| (i as i32 % width, i as i32 / width, id))
    }
}

impl Component for TileMapLayer {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_defaults() {
        let layer = TileMapLayer::new("ground", 4, 3, IVec2::new(100, 60), 2);
        assert_eq!(layer.width(), 4);
        assert_eq!(layer.height(), 3);
        assert_eq!(layer.tile_stride, IVec2::new(100, 60));
        assert!(layer.y_sort_enabled);
        assert_eq!(layer.render_order, TileRenderOrder::IsometricDiamondDownHorizontalOffset);
        assert_eq!(layer.tile(3, 2), Some(0));
    }

    #[test]
    fn test_set_tile_bounds() {
        let mut layer = TileMapLayer::new("ground", 4, 3, IVec2::new(10, 10), 0);

        assert!(layer.set_tile(1, 2, 7));
        assert_eq!(layer.tile(1, 2), Some(7));

        assert!(!layer.set_tile(4, 0, 1));
        assert!(!layer.set_tile(0, -1, 1));
        assert_eq!(layer.tile(4, 0), None);
        assert_eq!(layer.tile(-1, 0), None);
    }

    #[test]
    fn test_occupied_cells_row_major() {
        let mut layer = TileMapLayer::new("decor", 3, 2, IVec2::new(10, 10), 0);
        layer.set_tile(2, 0, 5);
        layer.set_tile(0, 1, 4);
        layer.set_tile(1, 0, 3);

        let cells: Vec<_> = layer.occupied_cells().collect();
        assert_eq!(cells, vec![(1, 0, 3), (2, 0, 5), (0, 1, 4)]);
    }

    #[test]
    fn test_cell_origin_uses_stride_not_size() {
        let mut layer = TileMapLayer::new("ground", 4, 4, IVec2::new(100, 60), 0);
        layer.tile_stride = IVec2::new(76, 40);
        layer.offset = Vec2::new(420.0, 100.0);

        assert_eq!(layer.cell_origin(1, 0), Vec2::new(458.0, 120.0));
    }
}

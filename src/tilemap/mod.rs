//! Isometric Tile Maps
//!
//! A tile map is a set of entities, each carrying a `TileMapLayer` (the grid
//! of tile ids plus how it is projected on screen). Layers that block
//! movement also carry a `TileCollisionLayer` and a `CollisionLayer`.
//!
//! Cells use the "diamond down, horizontal offset" layout: cell (x, y) has
//! its top-left anchor at
//!
//! ```text
//! screen_x = (x - y) * stride_x / 2 + offset_x
//! screen_y = (x + y) * stride_y / 2 + offset_y
//! ```
//!
//! so increasing x walks down-right and increasing y walks down-left.

pub mod collision;
pub mod layer;
pub mod palette;

pub use collision::{TileCollisionLayer, DIAMOND_POINTS};
pub use layer::{TileMapLayer, TileRenderOrder};
pub use palette::{TileDefinition, TilePalette, TileVisual};

use macroquad::math::{IVec2, Vec2};

/// Top-left anchor of cell (x, y) for a layer with the given stride and offset.
pub fn iso_cell_origin(x: i32, y: i32, stride: IVec2, offset: Vec2) -> Vec2 {
    let half_w = stride.x as f32 * 0.5;
    let half_h = stride.y as f32 * 0.5;
    Vec2::new(
        (x - y) as f32 * half_w + offset.x,
        (x + y) as f32 * half_h + offset.y,
    )
}

/// Number of cells in a `width` x `height` grid. Negative sizes count as 0.
pub fn grid_cell_count(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize
}

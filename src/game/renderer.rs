//! Scene Renderer
//!
//! Three draw-only systems, registered after the simulation systems:
//! - `TileMapRenderSystem`: palette diamonds for every tile layer
//! - `BodyRenderSystem`: a filled box per tinted body
//! - `CollisionDebugRenderSystem`: outlines of colliders and solid tiles
//!
//! Draw order is worked out into plain command lists in world space first
//! so it can be checked without a window. The final loops project through
//! the active `Camera2D` and touch macroquad.

use macroquad::prelude::*;

use super::camera::{active_camera, Camera2D};
use super::collider::Collider;
use super::components::BodyTint;
use super::system::System;
use super::transform::Transform2D;
use super::world::World;
use crate::geometry::line_loop;
use crate::input::KeyboardSnapshot;
use crate::tilemap::{TileCollisionLayer, TileMapLayer, TilePalette, TileRenderOrder, TileVisual};

/// Sort key spacing between z-levels. Large enough that no y-sorted tile
/// of a lower layer can sort after a higher layer.
const Z_INDEX_SPACING: f32 = 100_000.0;

// =============================================================================
// Tiles
// =============================================================================

/// One tile ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDrawCommand {
    pub visual: TileVisual,
    /// Top-left corner of the tile's bounding box
    pub position: Vec2,
    pub size: IVec2,
    pub sort_key: f32,
    pub z_index: i32,
}

/// Build draw commands for every non-empty tile with a palette entry,
/// ordered by `(sort_key, z_index)`.
///
/// With y-sorting the key is the tile's screen Y plus the z offset, so tiles
/// lower on screen draw later. Without it, tiles keep their row-major order
/// within the layer.
pub fn tile_draw_commands(world: &World) -> Vec<TileDrawCommand> {
    let Some(palette) = world.entities().iter().find_map(|e| e.try_get_component::<TilePalette>()) else {
        return Vec::new();
    };

    let mut layers: Vec<&TileMapLayer> = world
        .entities()
        .iter()
        .filter_map(|e| e.try_get_component::<TileMapLayer>())
        .collect();
    layers.sort_by_key(|l| l.z_index);

    let mut commands = Vec::new();
    for layer in layers {
        push_layer_commands(layer, palette, &mut commands);
    }

    commands.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key).then(a.z_index.cmp(&b.z_index)));
    commands
}

fn push_layer_commands(layer: &TileMapLayer, palette: &TilePalette, commands: &mut Vec<TileDrawCommand>) {
    // Only layout today: cell_origin already projects it
    match layer.render_order {
        TileRenderOrder::IsometricDiamondDownHorizontalOffset => {}
    }

    let z_base = layer.z_index as f32 * Z_INDEX_SPACING;
    let mut insertion = 0;

    for (x, y, tile_id) in layer.occupied_cells() {
        let Some(definition) = palette.get(tile_id) else {
            continue;
        };

        let position = layer.cell_origin(x, y);
        let sort_key = if layer.y_sort_enabled {
            position.y + z_base
        } else {
            z_base + insertion as f32
        };

        commands.push(TileDrawCommand {
            visual: definition.visual,
            position,
            size: layer.tile_size,
            sort_key,
            z_index: layer.z_index,
        });
        insertion += 1;
    }
}

/// Flat diamond inscribed in the tile's bounding box, with an outline.
fn draw_diamond(command: &TileDrawCommand, view: &Camera2D) {
    let origin = view.world_to_screen(command.position);
    let size = command.size.as_vec2() * view.zoom;
    let top = origin + vec2(size.x * 0.5, 0.0);
    let right = origin + vec2(size.x, size.y * 0.5);
    let bottom = origin + vec2(size.x * 0.5, size.y);
    let left = origin + vec2(0.0, size.y * 0.5);

    draw_triangle(top, right, bottom, command.visual.top_color);
    draw_triangle(top, bottom, left, command.visual.top_color);

    let border = command.visual.border_color;
    draw_line(top.x, top.y, right.x, right.y, 1.0, border);
    draw_line(right.x, right.y, bottom.x, bottom.y, 1.0, border);
    draw_line(bottom.x, bottom.y, left.x, left.y, 1.0, border);
    draw_line(left.x, left.y, top.x, top.y, 1.0, border);
}

#[derive(Debug, Default)]
pub struct TileMapRenderSystem;

impl TileMapRenderSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for TileMapRenderSystem {
    fn name(&self) -> &'static str {
        "tile map render"
    }

    fn draw(&mut self, world: &World) {
        let view = active_camera(world);
        for command in tile_draw_commands(world) {
            draw_diamond(&command, &view);
        }
    }
}

// =============================================================================
// Bodies
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDrawCommand {
    pub rect: Rect,
    pub color: Color,
    pub z_index: i32,
}

/// Axis-aligned bounds of each tinted collider, ordered by z (stable).
pub fn body_draw_commands(world: &World) -> Vec<BodyDrawCommand> {
    let mut commands: Vec<BodyDrawCommand> = world
        .entities()
        .iter()
        .filter_map(|entity| {
            let tint = entity.try_get_component::<BodyTint>()?;
            let transform = entity.try_get_component::<Transform2D>()?;
            let collider = entity.try_get_component::<Collider>()?;
            let rect = bounds(&collider.world_polygon(transform))?;
            Some(BodyDrawCommand { rect, color: tint.color, z_index: tint.z_index })
        })
        .collect();

    commands.sort_by_key(|c| c.z_index);
    commands
}

fn bounds(polygon: &[Vec2]) -> Option<Rect> {
    let first = *polygon.first()?;
    let (min, max) = polygon
        .iter()
        .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
    let size = max - min;
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    Some(Rect::new(min.x, min.y, size.x, size.y))
}

#[derive(Debug, Default)]
pub struct BodyRenderSystem;

impl BodyRenderSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for BodyRenderSystem {
    fn name(&self) -> &'static str {
        "body render"
    }

    fn draw(&mut self, world: &World) {
        let view = active_camera(world);
        for command in body_draw_commands(world) {
            let r = view.rect_to_screen(command.rect);
            draw_rectangle(r.x, r.y, r.w, r.h, command.color);
        }
    }
}

// =============================================================================
// Collision debug
// =============================================================================

/// Outline color for body colliders.
const COLLIDER_DEBUG_COLOR: Color = Color::new(0.2, 0.9, 0.3, 1.0);
/// Outline color for solid tiles.
const TILE_DEBUG_COLOR: Color = Color::new(0.86, 0.12, 0.12, 1.0);

/// Every outline to draw: collider polygons first, then solid tiles.
pub fn collision_debug_segments(world: &World) -> Vec<(Vec2, Vec2, Color)> {
    let mut segments = Vec::new();

    for entity in world.entities() {
        if let (Some(transform), Some(collider)) =
            (entity.try_get_component::<Transform2D>(), entity.try_get_component::<Collider>())
        {
            let polygon = collider.world_polygon(transform);
            segments.extend(line_loop(&polygon).into_iter().map(|(a, b)| (a, b, COLLIDER_DEBUG_COLOR)));
        }

        if let (Some(grid), Some(solids)) =
            (entity.try_get_component::<TileMapLayer>(), entity.try_get_component::<TileCollisionLayer>())
        {
            if !solids.debug_draw {
                continue;
            }
            for polygon in solids.solid_tile_polygons(grid) {
                segments.extend(line_loop(&polygon).into_iter().map(|(a, b)| (a, b, TILE_DEBUG_COLOR)));
            }
        }
    }

    segments
}

const DEBUG_TOGGLE_KEY: KeyCode = KeyCode::F1;

#[derive(Debug, Default)]
pub struct CollisionDebugRenderSystem {
    pub enabled: bool,
    previous: KeyboardSnapshot,
}

impl CollisionDebugRenderSystem {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, previous: KeyboardSnapshot::new() }
    }

    /// Flip `enabled` on a fresh F1 press. Stores `current` as the previous
    /// snapshot.
    pub fn apply(&mut self, current: KeyboardSnapshot) {
        if current.just_pressed(&self.previous, DEBUG_TOGGLE_KEY) {
            self.enabled = !self.enabled;
        }
        self.previous = current;
    }
}

impl System for CollisionDebugRenderSystem {
    fn name(&self) -> &'static str {
        "collision debug render"
    }

    fn update(&mut self, _world: &mut World, _dt: f32) {
        self.apply(KeyboardSnapshot::capture(&[DEBUG_TOGGLE_KEY]));
    }

    fn draw(&mut self, world: &World) {
        if !self.enabled {
            return;
        }
        let view = active_camera(world);
        for (a, b, color) in collision_debug_segments(world) {
            let (a, b) = (view.world_to_screen(a), view.world_to_screen(b));
            draw_line(a.x, a.y, b.x, b.y, 2.0, color);
        }
    }
}

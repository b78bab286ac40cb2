//! Live tweaking of tile layers
//!
//! | Key            | Effect                                        |
//! |----------------|-----------------------------------------------|
//! | 1..9           | select the n-th layer by z-index              |
//! | I / J / K / L  | nudge the selected layer's offset (held)      |
//! | Y              | toggle y-sorting                              |
//! | + / -          | grow / shrink the draw size                   |
//! | Shift + / -    | grow / shrink the stride                      |
//! | PageUp / Down  | raise / lower the z-index                     |
//!
//! Everything except the nudge fires once per press.

use log::debug;
use macroquad::input::KeyCode;
use macroquad::math::{IVec2, Vec2};

use super::KeyboardSnapshot;
use crate::game::{System, World};
use crate::tilemap::TileMapLayer;

/// Pixels per frame while a nudge key is held.
const NUDGE_STEP: f32 = 20.0;
const SIZE_STEP: i32 = 2;
const MIN_TILE_SIZE: i32 = 8;
const MIN_TILE_STRIDE: i32 = 4;

const LAYER_KEYS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

const CONTROL_KEYS: [KeyCode; 13] = [
    KeyCode::I,
    KeyCode::J,
    KeyCode::K,
    KeyCode::L,
    KeyCode::Y,
    KeyCode::Equal,
    KeyCode::KpAdd,
    KeyCode::Minus,
    KeyCode::KpSubtract,
    KeyCode::LeftShift,
    KeyCode::RightShift,
    KeyCode::PageUp,
    KeyCode::PageDown,
];

#[derive(Debug, Default)]
pub struct TileLayerDebugInputSystem {
    previous: KeyboardSnapshot,
    /// Position in the z-sorted layer list
    selected: usize,
}

impl TileLayerDebugInputSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Apply one frame of input. Stores `current` as the previous snapshot.
    pub fn apply(&mut self, world: &mut World, current: KeyboardSnapshot) {
        let layers = layers_by_z(world);
        if layers.is_empty() {
            self.previous = current;
            return;
        }

        self.selected = self.selected.min(layers.len() - 1);
        for (n, &key) in LAYER_KEYS.iter().enumerate() {
            if n < layers.len() && current.just_pressed(&self.previous, key) {
                self.selected = n;
            }
        }

        let entity = &mut world.entities_mut()[layers[self.selected]];
        let layer = entity.get_required_component_mut::<TileMapLayer>();
        self.adjust(layer, &current);

        self.previous = current;
    }

    fn adjust(&self, layer: &mut TileMapLayer, keys: &KeyboardSnapshot) {
        let pressed = |key| keys.just_pressed(&self.previous, key);

        let mut nudge = Vec2::ZERO;
        if keys.is_down(KeyCode::J) { nudge.x -= NUDGE_STEP; }
        if keys.is_down(KeyCode::L) { nudge.x += NUDGE_STEP; }
        if keys.is_down(KeyCode::I) { nudge.y -= NUDGE_STEP; }
        if keys.is_down(KeyCode::K) { nudge.y += NUDGE_STEP; }
        layer.offset += nudge;

        if pressed(KeyCode::Y) {
            layer.y_sort_enabled = !layer.y_sort_enabled;
            debug!("layer '{}': y-sort {}", layer.name, layer.y_sort_enabled);
        }

        let shift = keys.is_down(KeyCode::LeftShift) || keys.is_down(KeyCode::RightShift);
        let grow = pressed(KeyCode::Equal) || pressed(KeyCode::KpAdd);
        let shrink = pressed(KeyCode::Minus) || pressed(KeyCode::KpSubtract);

        if grow {
            if shift {
                layer.tile_stride += IVec2::splat(SIZE_STEP);
            } else {
                layer.tile_size += IVec2::splat(SIZE_STEP);
            }
        }
        if shrink {
            if shift {
                layer.tile_stride = shrunk(layer.tile_stride, MIN_TILE_STRIDE);
            } else {
                layer.tile_size = shrunk(layer.tile_size, MIN_TILE_SIZE);
            }
        }

        if pressed(KeyCode::PageUp) {
            layer.z_index += 1;
        }
        if pressed(KeyCode::PageDown) {
            layer.z_index -= 1;
        }
    }
}

/// Shrink both axes by one step unless either would drop below `min`.
fn shrunk(size: IVec2, min: i32) -> IVec2 {
    let next = size - IVec2::splat(SIZE_STEP);
    if next.x >= min && next.y >= min { next } else { size }
}

/// Entity indices of tile layers, ordered by z-index (stable).
fn layers_by_z(world: &World) -> Vec<usize> {
    let mut layers: Vec<(usize, i32)> = world
        .entities()
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.try_get_component::<TileMapLayer>().map(|l| (i, l.z_index)))
        .collect();
    layers.sort_by_key(|&(_, z)| z);
    layers.into_iter().map(|(i, _)| i).collect()
}

impl System for TileLayerDebugInputSystem {
    fn name(&self) -> &'static str {
        "tile layer debug input"
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let tracked: Vec<KeyCode> = LAYER_KEYS.iter().chain(CONTROL_KEYS.iter()).copied().collect();
        let current = KeyboardSnapshot::capture(&tracked);
        self.apply(world, current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_layers() -> World {
        let mut world = World::new();
        world
            .create_entity()
            .add_component(TileMapLayer::new("top", 4, 4, IVec2::new(48, 24), 2));
        world
            .create_entity()
            .add_component(TileMapLayer::new("ground", 4, 4, IVec2::new(100, 60), 0));
        world
    }

    fn layer(world: &World, index: usize) -> &TileMapLayer {
        world.entities()[index].get_required_component::<TileMapLayer>()
    }

    fn press(system: &mut TileLayerDebugInputSystem, world: &mut World, keys: &[KeyCode]) {
        system.apply(world, KeyboardSnapshot::from_keys(keys));
        system.apply(world, KeyboardSnapshot::new());
    }

    #[test]
    fn test_first_layer_by_z_is_selected_by_default() {
        let mut world = world_with_layers();
        let mut system = TileLayerDebugInputSystem::new();

        press(&mut system, &mut world, &[KeyCode::Y]);

        // "ground" has the lowest z even though it was created second
        assert!(!layer(&world, 1).y_sort_enabled);
        assert!(layer(&world, 0).y_sort_enabled);
    }

    #[test]
    fn test_number_keys_select_layer() {
        let mut world = world_with_layers();
        let mut system = TileLayerDebugInputSystem::new();

        press(&mut system, &mut world, &[KeyCode::Key2]);
        assert_eq!(system.selected(), 1);
        press(&mut system, &mut world, &[KeyCode::PageUp]);
        assert_eq!(layer(&world, 0).z_index, 3);

        // Out of range selection is ignored
        press(&mut system, &mut world, &[KeyCode::Key9]);
        assert_eq!(system.selected(), 1);
    }

    #[test]
    fn test_held_keys_nudge_every_frame() {
        let mut world = world_with_layers();
        let mut system = TileLayerDebugInputSystem::new();

        let held = KeyboardSnapshot::from_keys(&[KeyCode::L, KeyCode::I]);
        system.apply(&mut world, held.clone());
        system.apply(&mut world, held);

        assert_eq!(layer(&world, 1).offset, Vec2::new(40.0, -40.0));
    }

    #[test]
    fn test_toggle_fires_once_per_press() {
        let mut world = world_with_layers();
        let mut system = TileLayerDebugInputSystem::new();

        let held = KeyboardSnapshot::from_keys(&[KeyCode::Y]);
        system.apply(&mut world, held.clone());
        system.apply(&mut world, held);

        assert!(!layer(&world, 1).y_sort_enabled);
    }

    #[test]
    fn test_size_and_stride_limits() {
        let mut world = World::new();
        world
            .create_entity()
            .add_component(TileMapLayer::new("tiny", 2, 2, IVec2::new(12, 10), 0));
        let mut system = TileLayerDebugInputSystem::new();

        press(&mut system, &mut world, &[KeyCode::Equal]);
        assert_eq!(layer(&world, 0).tile_size, IVec2::new(14, 12));
        assert_eq!(layer(&world, 0).tile_stride, IVec2::new(12, 10));

        press(&mut system, &mut world, &[KeyCode::Minus]);
        press(&mut system, &mut world, &[KeyCode::Minus]);
        assert_eq!(layer(&world, 0).tile_size, IVec2::new(10, 8));
        // 8 x 6 would be below the minimum of 8
        press(&mut system, &mut world, &[KeyCode::KpSubtract]);
        assert_eq!(layer(&world, 0).tile_size, IVec2::new(10, 8));

        press(&mut system, &mut world, &[KeyCode::LeftShift, KeyCode::Minus]);
        assert_eq!(layer(&world, 0).tile_stride, IVec2::new(10, 8));
        press(&mut system, &mut world, &[KeyCode::RightShift, KeyCode::KpAdd]);
        assert_eq!(layer(&world, 0).tile_stride, IVec2::new(12, 10));
        assert_eq!(layer(&world, 0).tile_size, IVec2::new(10, 8));
    }

    #[test]
    fn test_page_down_lowers_z() {
        let mut world = world_with_layers();
        let mut system = TileLayerDebugInputSystem::new();

        press(&mut system, &mut world, &[KeyCode::PageDown]);
        assert_eq!(layer(&world, 1).z_index, -1);
    }

    #[test]
    fn test_no_layers_is_a_no_op() {
        let mut world = World::new();
        let mut system = TileLayerDebugInputSystem::new();
        press(&mut system, &mut world, &[KeyCode::Y, KeyCode::Key1]);
        assert_eq!(system.selected(), 0);
    }
}

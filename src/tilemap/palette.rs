//! Tile Palette
//!
//! Maps tile ids to how they look. Tiles are drawn procedurally as flat
//! diamonds, so a visual is just a pair of colors.

use std::collections::HashMap;

use macroquad::color::{Color, BLACK};

use crate::game::component::Component;

/// Procedural diamond appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileVisual {
    pub top_color: Color,
    pub border_color: Color,
}

impl TileVisual {
    /// Diamond with a black outline.
    pub fn diamond(top_color: Color) -> Self {
        Self { top_color, border_color: BLACK }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileDefinition {
    pub id: u32,
    pub name: String,
    pub visual: TileVisual,
}

impl TileDefinition {
    pub fn new(id: u32, name: impl Into<String>, visual: TileVisual) -> Self {
        Self { id, name: name.into(), visual }
    }
}

/// Registry of tile definitions, shared by every layer in the scene.
#[derive(Debug, Clone, Default)]
pub struct TilePalette {
    definitions: HashMap<u32, TileDefinition>,
}

impl TilePalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one with the same id.
    pub fn register(&mut self, definition: TileDefinition) {
        self.definitions.insert(definition.id, definition);
    }

    pub fn get(&self, tile_id: u32) -> Option<&TileDefinition> {
        self.definitions.get(&tile_id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Component for TilePalette {}

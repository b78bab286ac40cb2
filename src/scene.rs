//! Scene loading
//!
//! Scenes are described in RON (Rusty Object Notation) so they can be
//! edited by hand. A description lists the tile palette, the tile layers
//! (with optional collision), the rigid bodies and an optional camera.
//! Loading validates the description; `spawn_scene` turns it into entities.
//!
//! Vectors are written as tuples: `position: (430.0, 260.0)`.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use macroquad::color::Color;
use macroquad::math::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::game::{
    BodyTint, Camera2D, CameraController, Collider, CollisionLayer, EntityId, PlayerController, RigidBody,
    Transform2D, World, DEFAULT_CAMERA_SPEED,
};
use crate::geometry::CollisionShape;
use crate::tilemap::{TileCollisionLayer, TileDefinition, TileMapLayer, TilePalette, TileVisual};

/// Built-in demo scene, compiled into the binary.
pub const DEMO_SCENE_RON: &str = include_str!("../assets/scenes/demo.ron");

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum width or height of a tile layer
    pub const MAX_LAYER_SIZE: i32 = 256;
    /// Maximum number of tile layers
    pub const MAX_TILE_LAYERS: usize = 64;
    /// Maximum number of bodies
    pub const MAX_BODIES: usize = 4096;
    /// Maximum number of palette entries
    pub const MAX_PALETTE_ENTRIES: usize = 1024;
    /// Maximum tile draw size or stride, in pixels
    pub const MAX_TILE_PIXELS: i32 = 4096;
    /// Maximum vertices in a custom polygon
    pub const MAX_POLYGON_POINTS: usize = 64;
    /// Maximum string length for names
    pub const MAX_STRING_LEN: usize = 256;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 1_000_000.0;
    /// Maximum camera zoom factor
    pub const MAX_ZOOM: f32 = 64.0;
}

/// Error type for scene loading
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::ParseError(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::SerializeError(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::ParseError(e) => write!(f, "Parse error: {}", e),
            SceneError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            SceneError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

// =============================================================================
// Description types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub palette: Vec<PaletteEntry>,
    #[serde(default)]
    pub tile_layers: Vec<TileLayerDescription>,
    #[serde(default)]
    pub bodies: Vec<BodyDescription>,
    #[serde(default)]
    pub camera: Option<CameraDescription>,
}

/// A procedural diamond tile. Id 0 is reserved for empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub id: u32,
    pub name: String,
    pub color: [u8; 3],
}

/// Shape as written in scene files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeDescription {
    Rectangle { size: [f32; 2] },
    Oval { size: [f32; 2] },
    Polygon { points: Vec<[f32; 2]> },
}

impl ShapeDescription {
    pub fn to_shape(&self) -> CollisionShape {
        match self {
            ShapeDescription::Rectangle { size } => CollisionShape::Rectangle { size: Vec2::from(*size) },
            ShapeDescription::Oval { size } => CollisionShape::Oval { size: Vec2::from(*size) },
            ShapeDescription::Polygon { points } => {
                CollisionShape::polygon(points.iter().map(|&p| Vec2::from(p)).collect())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayerDescription {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub tile_size: [i32; 2],
    /// Defaults to `tile_size`
    #[serde(default)]
    pub tile_stride: Option<[i32; 2]>,
    #[serde(default)]
    pub offset: [f32; 2],
    #[serde(default)]
    pub z_index: i32,
    #[serde(default = "default_true")]
    pub y_sort: bool,
    /// One row of ids per y. Empty leaves every cell empty.
    #[serde(default)]
    pub tiles: Vec<Vec<u32>>,
    #[serde(default)]
    pub collision: Option<TileCollisionDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileCollisionDescription {
    pub layer: i32,
    pub mask: u32,
    /// Defaults to the unit diamond
    #[serde(default)]
    pub shape: Option<ShapeDescription>,
    /// One string per row: `#` is solid, `.` is empty
    #[serde(default)]
    pub solid: Vec<String>,
    #[serde(default = "default_true")]
    pub debug_draw: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescription {
    #[serde(default)]
    pub name: String,
    pub position: [f32; 2],
    #[serde(default = "default_scale")]
    pub scale: [f32; 2],
    pub shape: ShapeDescription,
    #[serde(default)]
    pub local_position: [f32; 2],
    #[serde(default = "default_scale")]
    pub local_scale: [f32; 2],
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub velocity: [f32; 2],
    pub layer: i32,
    pub mask: u32,
    #[serde(default)]
    pub player: Option<PlayerDescription>,
    #[serde(default)]
    pub tint: Option<TintDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDescription {
    pub move_speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TintDescription {
    pub color: [u8; 3],
    #[serde(default)]
    pub z_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    /// World point at the top-left of the view
    #[serde(default)]
    pub position: [f32; 2],
    #[serde(default = "default_zoom")]
    pub zoom: f32,
    #[serde(default = "default_camera_speed")]
    pub move_speed: f32,
    /// Follow the first player body
    #[serde(default)]
    pub follow_player: bool,
    /// Camera position relative to the followed body
    #[serde(default)]
    pub follow_offset: [f32; 2],
}

fn default_zoom() -> f32 {
    1.0
}

fn default_camera_speed() -> f32 {
    DEFAULT_CAMERA_SPEED
}

fn default_true() -> bool {
    true
}

fn default_scale() -> [f32; 2] {
    [1.0, 1.0]
}

// =============================================================================
// Validation
// =============================================================================

fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn validate_vec(v: [f32; 2], context: &str, field: &str) -> Result<(), String> {
    if !is_valid_float(v[0]) || !is_valid_float(v[1]) {
        return Err(format!("{}: invalid {} ({}, {})", context, field, v[0], v[1]));
    }
    Ok(())
}

fn validate_name(name: &str, context: &str) -> Result<(), String> {
    if name.len() > limits::MAX_STRING_LEN {
        return Err(format!("{}: name too long ({} > {})",
            context, name.len(), limits::MAX_STRING_LEN));
    }
    Ok(())
}

fn validate_shape(shape: &ShapeDescription, context: &str) -> Result<(), String> {
    match shape {
        ShapeDescription::Rectangle { size } | ShapeDescription::Oval { size } => {
            validate_vec(*size, context, "shape size")
        }
        ShapeDescription::Polygon { points } => {
            if points.len() > limits::MAX_POLYGON_POINTS {
                return Err(format!("{}: too many polygon points ({} > {})",
                    context, points.len(), limits::MAX_POLYGON_POINTS));
            }
            points.iter().try_for_each(|&p| validate_vec(p, context, "polygon point"))
        }
    }
}

fn validate_pixels(v: [i32; 2], context: &str, field: &str) -> Result<(), String> {
    let valid = |n: i32| n > 0 && n <= limits::MAX_TILE_PIXELS;
    if !valid(v[0]) || !valid(v[1]) {
        return Err(format!("{}: {} ({}, {}) must be within 1..={}",
            context, field, v[0], v[1], limits::MAX_TILE_PIXELS));
    }
    Ok(())
}

fn validate_tile_layer(layer: &TileLayerDescription, index: usize) -> Result<(), String> {
    let context = format!("tile layer {} '{}'", index, layer.name);
    validate_name(&layer.name, &context)?;

    let valid_size = |n: i32| n > 0 && n <= limits::MAX_LAYER_SIZE;
    if !valid_size(layer.width) || !valid_size(layer.height) {
        return Err(format!("{}: size {}x{} must be within 1..={}",
            context, layer.width, layer.height, limits::MAX_LAYER_SIZE));
    }

    validate_pixels(layer.tile_size, &context, "tile size")?;
    if let Some(stride) = layer.tile_stride {
        validate_pixels(stride, &context, "tile stride")?;
    }
    validate_vec(layer.offset, &context, "offset")?;

    if !layer.tiles.is_empty() {
        if layer.tiles.len() != layer.height as usize {
            return Err(format!("{}: {} tile rows, expected {}",
                context, layer.tiles.len(), layer.height));
        }
        for (y, row) in layer.tiles.iter().enumerate() {
            if row.len() != layer.width as usize {
                return Err(format!("{}: tile row {} has {} cells, expected {}",
                    context, y, row.len(), layer.width));
            }
        }
    }

    if let Some(collision) = &layer.collision {
        if let Some(shape) = &collision.shape {
            validate_shape(shape, &context)?;
        }
        if collision.solid.len() != layer.height as usize {
            return Err(format!("{}: {} solid rows, expected {}",
                context, collision.solid.len(), layer.height));
        }
        for (y, row) in collision.solid.iter().enumerate() {
            if row.chars().count() != layer.width as usize {
                return Err(format!("{}: solid row {} has {} cells, expected {}",
                    context, y, row.chars().count(), layer.width));
            }
            if let Some(bad) = row.chars().find(|&c| c != '#' && c != '.') {
                return Err(format!("{}: solid row {} has unexpected '{}' (use '#' or '.')",
                    context, y, bad));
            }
        }
    }

    Ok(())
}

fn validate_body(body: &BodyDescription, index: usize) -> Result<(), String> {
    let context = format!("body {} '{}'", index, body.name);
    validate_name(&body.name, &context)?;
    validate_vec(body.position, &context, "position")?;
    validate_vec(body.scale, &context, "scale")?;
    validate_vec(body.local_position, &context, "local position")?;
    validate_vec(body.local_scale, &context, "local scale")?;
    validate_vec(body.velocity, &context, "velocity")?;
    validate_shape(&body.shape, &context)?;

    if let Some(player) = &body.player {
        if !is_valid_float(player.move_speed) || player.move_speed < 0.0 {
            return Err(format!("{}: invalid move speed {}", context, player.move_speed));
        }
    }

    Ok(())
}

fn validate_camera(camera: &CameraDescription) -> Result<(), String> {
    let context = "camera";
    validate_vec(camera.position, context, "position")?;
    validate_vec(camera.follow_offset, context, "follow offset")?;
    if !camera.zoom.is_finite() || camera.zoom <= 0.0 || camera.zoom > limits::MAX_ZOOM {
        return Err(format!("{}: zoom {} must be within (0, {}]", context, camera.zoom, limits::MAX_ZOOM));
    }
    if !is_valid_float(camera.move_speed) || camera.move_speed < 0.0 {
        return Err(format!("{}: invalid move speed {}", context, camera.move_speed));
    }
    Ok(())
}

/// Validate a scene description to prevent malicious or broken files.
///
/// Collision layer indices are not checked: a layer outside [0, 31] is
/// legal and simply never collides.
pub fn validate_scene(scene: &SceneDescription) -> Result<(), SceneError> {
    if scene.palette.len() > limits::MAX_PALETTE_ENTRIES {
        return Err(SceneError::ValidationError(format!(
            "too many palette entries ({} > {})", scene.palette.len(), limits::MAX_PALETTE_ENTRIES
        )));
    }
    for entry in &scene.palette {
        if entry.id == 0 {
            return Err(SceneError::ValidationError(format!(
                "palette entry '{}': id 0 is reserved for empty cells", entry.name
            )));
        }
        validate_name(&entry.name, &format!("palette entry {}", entry.id))
            .map_err(SceneError::ValidationError)?;
    }

    if scene.tile_layers.len() > limits::MAX_TILE_LAYERS {
        return Err(SceneError::ValidationError(format!(
            "too many tile layers ({} > {})", scene.tile_layers.len(), limits::MAX_TILE_LAYERS
        )));
    }
    for (i, layer) in scene.tile_layers.iter().enumerate() {
        validate_tile_layer(layer, i).map_err(SceneError::ValidationError)?;
    }

    if scene.bodies.len() > limits::MAX_BODIES {
        return Err(SceneError::ValidationError(format!(
            "too many bodies ({} > {})", scene.bodies.len(), limits::MAX_BODIES
        )));
    }
    for (i, body) in scene.bodies.iter().enumerate() {
        validate_body(body, i).map_err(SceneError::ValidationError)?;
    }

    if let Some(camera) = &scene.camera {
        validate_camera(camera).map_err(SceneError::ValidationError)?;
    }

    Ok(())
}

// =============================================================================
// Loading and saving
// =============================================================================

/// Load and validate a scene from a RON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneDescription, SceneError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let scene = load_scene_from_str(&contents)?;
    info!(
        "loaded scene {}: {} tile layer(s), {} body(ies)",
        path.display(),
        scene.tile_layers.len(),
        scene.bodies.len()
    );
    Ok(scene)
}

/// Load and validate a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<SceneDescription, SceneError> {
    let scene: SceneDescription = ron::from_str(s)?;
    validate_scene(&scene)?;
    Ok(scene)
}

/// Save a scene as pretty-printed RON.
pub fn save_scene<P: AsRef<Path>>(scene: &SceneDescription, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let ron_string = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, ron_string)?;
    Ok(())
}

/// The embedded demo scene.
pub fn demo_scene() -> Result<SceneDescription, SceneError> {
    load_scene_from_str(DEMO_SCENE_RON)
}

// =============================================================================
// Spawning
// =============================================================================

/// Ids of the entities created by `spawn_scene`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnedScene {
    pub palette: Option<EntityId>,
    pub tile_layers: Vec<EntityId>,
    pub bodies: Vec<EntityId>,
    /// First body with a player controller
    pub player: Option<EntityId>,
    pub camera: Option<EntityId>,
}

fn rgb(color: [u8; 3]) -> Color {
    Color::from_rgba(color[0], color[1], color[2], 255)
}

fn build_tile_layer(description: &TileLayerDescription) -> TileMapLayer {
    let mut layer = TileMapLayer::new(
        description.name.clone(),
        description.width,
        description.height,
        IVec2::from(description.tile_size),
        description.z_index,
    );
    if let Some(stride) = description.tile_stride {
        layer.tile_stride = IVec2::from(stride);
    }
    layer.offset = Vec2::from(description.offset);
    layer.y_sort_enabled = description.y_sort;

    for (y, row) in description.tiles.iter().enumerate() {
        for (x, &id) in row.iter().enumerate() {
            if id != 0 {
                layer.set_tile(x as i32, y as i32, id);
            }
        }
    }
    layer
}

fn build_collision_layer(width: i32, height: i32, description: &TileCollisionDescription) -> TileCollisionLayer {
    let mut layer = TileCollisionLayer::new(width, height);
    if let Some(shape) = &description.shape {
        layer.shape = shape.to_shape();
    }
    layer.debug_draw = description.debug_draw;

    for (y, row) in description.solid.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if c == '#' {
                layer.set_solid(x as i32, y as i32, true);
            }
        }
    }
    layer
}

/// Create entities for a validated scene description.
///
/// Order: the palette entity (if any), one entity per tile layer, one per
/// body (each in file order), then the camera.
pub fn spawn_scene(scene: &SceneDescription, world: &mut World) -> SpawnedScene {
    let mut spawned = SpawnedScene::default();

    if !scene.palette.is_empty() {
        let mut palette = TilePalette::new();
        for entry in &scene.palette {
            palette.register(TileDefinition::new(entry.id, entry.name.clone(), TileVisual::diamond(rgb(entry.color))));
        }
        spawned.palette = Some(world.create_entity().add_component(palette).id());
    }

    for description in &scene.tile_layers {
        let entity = world.create_entity();
        entity.add_component(build_tile_layer(description));
        if let Some(collision) = &description.collision {
            entity
                .add_component(build_collision_layer(description.width, description.height, collision))
                .add_component(CollisionLayer::new(collision.layer, collision.mask));
        }
        spawned.tile_layers.push(entity.id());
    }

    for description in &scene.bodies {
        let body = if description.is_static { RigidBody::fixed() } else { RigidBody::dynamic() };
        let collider = Collider::new(description.shape.to_shape())
            .with_offset(Vec2::from(description.local_position))
            .with_scale(Vec2::from(description.local_scale));

        let entity = world.create_entity();
        entity
            .add_component(Transform2D::from_position(Vec2::from(description.position))
                .with_scale(Vec2::from(description.scale)))
            .add_component(body.with_velocity(Vec2::from(description.velocity)))
            .add_component(collider)
            .add_component(CollisionLayer::new(description.layer, description.mask));

        if let Some(player) = &description.player {
            entity.add_component(PlayerController { move_speed: player.move_speed });
            if spawned.player.is_none() {
                spawned.player = Some(entity.id());
            }
        }
        if let Some(tint) = &description.tint {
            entity.add_component(BodyTint::new(rgb(tint.color), tint.z_index));
        }
        spawned.bodies.push(entity.id());
    }

    if let Some(description) = &scene.camera {
        spawned.camera = Some(spawn_camera(description, spawned.player, world));
    }

    debug!(
        "spawned scene: {} tile layer(s), {} body(ies), player {:?}, camera {:?}",
        spawned.tile_layers.len(),
        spawned.bodies.len(),
        spawned.player,
        spawned.camera
    );
    spawned
}

fn spawn_camera(description: &CameraDescription, player: Option<EntityId>, world: &mut World) -> EntityId {
    let mut camera = Camera2D::new(Vec2::from(description.position), description.zoom);
    let mut controller = CameraController::new(description.move_speed);

    if description.follow_player {
        match player.and_then(|id| world.entity(id)) {
            Some(target) => {
                let offset = Vec2::from(description.follow_offset);
                if controller.attach_to(target, offset) {
                    if let Some(transform) = target.try_get_component::<Transform2D>() {
                        camera.position = transform.position + offset;
                    }
                }
            }
            None => warn!("camera follows the player, but the scene has no player body"),
        }
    }

    world
        .create_entity()
        .add_component(camera)
        .add_component(controller)
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_SCENE: &str = r##"(
        palette: [(id: 1, name: "grass", color: (90, 170, 90))],
        tile_layers: [
            (
                name: "ground",
                width: 3,
                height: 2,
                tile_size: (40, 20),
                tiles: [[1, 0, 1], [0, 1, 0]],
                collision: Some((
                    layer: 0,
                    mask: 2,
                    solid: ["#..", "..#"],
                )),
            ),
        ],
        bodies: [
            (
                position: (10.0, 20.0),
                shape: Rectangle(size: (8.0, 6.0)),
                layer: 1,
                mask: 1,
                player: Some((move_speed: 120.0)),
            ),
            (
                position: (50.0, 20.0),
                shape: Oval(size: (10.0, 10.0)),
                is_static: true,
                layer: 1,
                mask: 1,
            ),
        ],
    )"##;

    #[test]
    fn test_parse_applies_defaults() {
        let scene = load_scene_from_str(SMALL_SCENE).unwrap();

        let layer = &scene.tile_layers[0];
        assert_eq!(layer.tile_stride, None);
        assert_eq!(layer.offset, [0.0, 0.0]);
        assert!(layer.y_sort);
        assert!(layer.collision.as_ref().unwrap().debug_draw);

        let body = &scene.bodies[0];
        assert_eq!(body.scale, [1.0, 1.0]);
        assert_eq!(body.local_scale, [1.0, 1.0]);
        assert!(!body.is_static);
        assert!(body.tint.is_none());
    }

    #[test]
    fn test_spawn_creates_entities_in_order() {
        let scene = load_scene_from_str(SMALL_SCENE).unwrap();
        let mut world = World::new();
        let spawned = spawn_scene(&scene, &mut world);

        assert_eq!(world.entity_count(), 4);
        assert_eq!(spawned.palette.map(|id| id.raw()), Some(1));
        assert_eq!(spawned.tile_layers.len(), 1);
        assert_eq!(spawned.bodies.len(), 2);
        assert_eq!(spawned.player, Some(spawned.bodies[0]));

        let ground = world.entity(spawned.tile_layers[0]).unwrap();
        let tiles = ground.get_required_component::<TileMapLayer>();
        assert_eq!(tiles.tile_stride, IVec2::new(40, 20));
        assert_eq!(tiles.tile(2, 0), Some(1));
        assert_eq!(tiles.tile(1, 0), Some(0));

        let solids = ground.get_required_component::<TileCollisionLayer>();
        assert_eq!(solids.solid_cells().collect::<Vec<_>>(), vec![(0, 0), (2, 1)]);
        assert_eq!(*ground.get_required_component::<CollisionLayer>(), CollisionLayer::new(0, 2));

        let rock = world.entity(spawned.bodies[1]).unwrap();
        assert!(rock.get_required_component::<RigidBody>().is_static);
        assert!(!rock.has_component::<PlayerController>());
    }

    #[test]
    fn test_layer_without_collision_has_no_collision_components() {
        let scene = load_scene_from_str(
            r#"(tile_layers: [(name: "decor", width: 2, height: 2, tile_size: (10, 10))])"#,
        )
        .unwrap();
        let mut world = World::new();
        let spawned = spawn_scene(&scene, &mut world);

        assert!(spawned.palette.is_none());
        let decor = world.entity(spawned.tile_layers[0]).unwrap();
        assert!(decor.has_component::<TileMapLayer>());
        assert!(!decor.has_component::<TileCollisionLayer>());
        assert!(!decor.has_component::<CollisionLayer>());
    }

    #[test]
    fn test_validation_rejects_bad_rows() {
        let scene = SMALL_SCENE.replace(r##"solid: ["#..", "..#"]"##, r##"solid: ["#..", ".#"]"##);
        match load_scene_from_str(&scene) {
            Err(SceneError::ValidationError(msg)) => assert!(msg.contains("solid row 1")),
            other => panic!("expected validation error, got {:?}", other),
        }

        let scene = SMALL_SCENE.replace(r##"solid: ["#..", "..#"]"##, r##"solid: ["#x.", "..#"]"##);
        assert!(matches!(load_scene_from_str(&scene), Err(SceneError::ValidationError(_))));

        let scene = SMALL_SCENE.replace("tiles: [[1, 0, 1], [0, 1, 0]]", "tiles: [[1, 0, 1]]");
        assert!(matches!(load_scene_from_str(&scene), Err(SceneError::ValidationError(_))));
    }

    #[test]
    fn test_validation_limits() {
        let mut scene = load_scene_from_str(SMALL_SCENE).unwrap();
        scene.tile_layers[0].width = limits::MAX_LAYER_SIZE + 1;
        assert!(matches!(validate_scene(&scene), Err(SceneError::ValidationError(_))));

        let mut scene = load_scene_from_str(SMALL_SCENE).unwrap();
        scene.bodies[0].position = [f32::NAN, 0.0];
        assert!(matches!(validate_scene(&scene), Err(SceneError::ValidationError(_))));

        let mut scene = load_scene_from_str(SMALL_SCENE).unwrap();
        scene.bodies[0].velocity = [2.0e6, 0.0];
        assert!(matches!(validate_scene(&scene), Err(SceneError::ValidationError(_))));

        let mut scene = load_scene_from_str(SMALL_SCENE).unwrap();
        let body = scene.bodies[1].clone();
        scene.bodies = vec![body; limits::MAX_BODIES + 1];
        assert!(matches!(validate_scene(&scene), Err(SceneError::ValidationError(_))));

        let mut scene = load_scene_from_str(SMALL_SCENE).unwrap();
        scene.palette[0].id = 0;
        assert!(matches!(validate_scene(&scene), Err(SceneError::ValidationError(_))));
    }

    #[test]
    fn test_camera_follows_player() {
        let scene = SMALL_SCENE.replacen(
            "bodies: [",
            "camera: Some((follow_player: true, follow_offset: (-5.0, -5.0))), bodies: [",
            1,
        );
        let scene = load_scene_from_str(&scene).unwrap();
        let camera = scene.camera.as_ref().unwrap();
        assert_eq!(camera.zoom, 1.0);
        assert_eq!(camera.move_speed, DEFAULT_CAMERA_SPEED);

        let mut world = World::new();
        let spawned = spawn_scene(&scene, &mut world);
        assert_eq!(world.entity_count(), 5);

        let entity = world.entity(spawned.camera.unwrap()).unwrap();
        let controller = entity.get_required_component::<CameraController>();
        assert_eq!(controller.target(), spawned.player);
        assert!(controller.is_following());
        assert_eq!(entity.get_required_component::<Camera2D>().position, Vec2::new(5.0, 15.0));
    }

    #[test]
    fn test_free_camera_and_missing_player() {
        let scene = load_scene_from_str(
            r#"(camera: Some((position: (30.0, 40.0), zoom: 2.0, follow_player: true)))"#,
        )
        .unwrap();
        let mut world = World::new();
        let spawned = spawn_scene(&scene, &mut world);

        let entity = world.entity(spawned.camera.unwrap()).unwrap();
        assert!(!entity.get_required_component::<CameraController>().is_following());
        assert_eq!(*entity.get_required_component::<Camera2D>(), Camera2D::new(Vec2::new(30.0, 40.0), 2.0));
    }

    #[test]
    fn test_camera_validation() {
        let mut scene = load_scene_from_str(SMALL_SCENE).unwrap();
        scene.camera = Some(CameraDescription {
            position: [0.0, 0.0],
            zoom: 0.0,
            move_speed: DEFAULT_CAMERA_SPEED,
            follow_player: false,
            follow_offset: [0.0, 0.0],
        });
        assert!(matches!(validate_scene(&scene), Err(SceneError::ValidationError(_))));

        if let Some(camera) = scene.camera.as_mut() {
            camera.zoom = 1.0;
            camera.move_speed = -1.0;
        }
        assert!(matches!(validate_scene(&scene), Err(SceneError::ValidationError(_))));
    }

    #[test]
    fn test_out_of_range_collision_layer_is_accepted() {
        let mut scene = load_scene_from_str(SMALL_SCENE).unwrap();
        scene.bodies[0].layer = 40;
        assert!(validate_scene(&scene).is_ok());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(load_scene_from_str("(bodies: [(position: )])"), Err(SceneError::ParseError(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let scene = load_scene_from_str(SMALL_SCENE).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.ron");

        save_scene(&scene, &path).unwrap();
        let loaded = load_scene(&path).unwrap();
        assert_eq!(loaded, scene);

        let missing = load_scene(dir.path().join("missing.ron"));
        assert!(matches!(missing, Err(SceneError::IoError(_))));
    }

    #[test]
    fn test_demo_scene() {
        let scene = demo_scene().unwrap();
        assert_eq!(scene.palette.len(), 5);
        assert_eq!(scene.tile_layers.len(), 3);
        assert_eq!(scene.bodies.len(), 2);

        let mut world = World::new();
        let spawned = spawn_scene(&scene, &mut world);
        assert!(spawned.player.is_some());

        // Camera centres the player in a 1280x720 view
        let camera = world.entity(spawned.camera.unwrap()).unwrap();
        assert!(camera.get_required_component::<CameraController>().is_following());
        assert_eq!(camera.get_required_component::<Camera2D>().position, Vec2::new(-210.0, -100.0));

        let ground = world.entity(spawned.tile_layers[0]).unwrap();
        let tiles = ground.get_required_component::<TileMapLayer>();
        assert_eq!(tiles.tile_stride, IVec2::new(75, 40));
        assert_eq!(tiles.tile(4, 0), Some(2));

        let solids = ground.get_required_component::<TileCollisionLayer>();
        // Border, centre bar and diagonal
        assert!(solids.is_solid(0, 5));
        assert!(solids.is_solid(15, 15));
        assert!(solids.is_solid(7, 8));
        assert!(solids.is_solid(5, 5));
        assert!(!solids.is_solid(2, 2));
        assert!(!solids.is_solid(12, 8));
    }
}

//! Roguelike Darling: isometric collision demo
//!
//! Opens a window, loads `assets/scenes/demo.ron` (falling back to the copy
//! built into the binary) and runs the frame pipeline: camera and player
//! input, movement, collision, then the renderers.

use macroquad::prelude::*;
use roguelike_darling::game::{
    BodyRenderSystem, CollisionDebugRenderSystem, CollisionSystem, MovementSystem, TileMapRenderSystem, World,
};
use roguelike_darling::input::{CameraInputSystem, PlayerInputSystem, TileLayerDebugInputSystem};
use roguelike_darling::scene::{demo_scene, load_scene, spawn_scene, SceneDescription};
use roguelike_darling::VERSION;

const SCENE_PATH: &str = "assets/scenes/demo.ron";

const HUD_TEXT: &[&str] = &[
    "Isometric TileMap Demo",
    "Arrow keys: Move camera",
    "Shift + Arrows: Faster camera",
    "C: Toggle camera follow",
    "W/A/S/D: Move playable rigid body",
    "1..9: Select layer by Z order",
    "I/J/K/L: Nudge selected layer offset",
    "Y: Toggle Y sort (selected layer)",
    "+/-: Change selected layer draw tile size",
    "Shift + +/-: Change selected layer tile stride",
    "PageUp/PageDown: Change selected layer Z index",
    "F1: Toggle collision debug",
    "Esc: Exit",
];

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Roguelike Darling v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Scene file from disk, or the embedded demo if it can't be read.
fn load_startup_scene() -> Option<SceneDescription> {
    match load_scene(SCENE_PATH) {
        Ok(scene) => return Some(scene),
        Err(e) => eprintln!("Failed to load {}: {}, using built-in demo", SCENE_PATH, e),
    }
    match demo_scene() {
        Ok(scene) => Some(scene),
        Err(e) => {
            eprintln!("Built-in demo scene is invalid: {}", e);
            None
        }
    }
}

fn draw_hud(world: &World) {
    let mut y = 24.0;
    for line in HUD_TEXT {
        draw_text(line, 16.0, y, 18.0, WHITE);
        y += 18.0;
    }
    draw_text(
        &format!("{} entities, {} FPS", world.entity_count(), get_fps()),
        16.0,
        y + 8.0,
        16.0,
        Color::from_rgba(160, 165, 180, 255),
    );
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    println!("=== Roguelike Darling v{} ===", VERSION);

    let mut world = World::new();
    if let Some(scene) = load_startup_scene() {
        let spawned = spawn_scene(&scene, &mut world);
        println!(
            "Spawned {} tile layer(s) and {} body(ies)",
            spawned.tile_layers.len(),
            spawned.bodies.len()
        );
    }

    world.add_system(CameraInputSystem::new());
    world.add_system(PlayerInputSystem::new());
    world.add_system(TileLayerDebugInputSystem::new());
    world.add_system(MovementSystem::new());
    world.add_system(CollisionSystem::new());
    world.add_system(TileMapRenderSystem::new());
    world.add_system(BodyRenderSystem::new());
    world.add_system(CollisionDebugRenderSystem::new(true));

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        world.update(get_frame_time());

        clear_background(Color::from_rgba(32, 34, 46, 255));
        world.draw();
        draw_hud(&world);

        next_frame().await;
    }
}

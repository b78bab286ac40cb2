//! Collision System
//!
//! Discrete SAT collision between rigid bodies, and between rigid bodies and
//! tile collision layers. Runs once per frame after movement integration:
//!
//! 1. Collect bodies: entities with Transform2D, Collider and CollisionLayer.
//!    A missing RigidBody means the body is static.
//! 2. Collect tile layers: entities with TileMapLayer, TileCollisionLayer and
//!    CollisionLayer.
//! 3. Body vs body, every pair i < j in entity order whose layers accept
//!    each other. Two dynamic bodies split the correction evenly and keep
//!    their velocities. A dynamic body hitting a static one takes the whole
//!    correction and stops.
//! 4. Body vs tiles, for every dynamic body and compatible tile layer.
//!    Solid cells are visited row by row and the body's polygon is rebuilt
//!    after each correction, so later cells see the corrected position.
//!    Any hit on a layer zeroes the body's velocity.
//!
//! There is no broad phase and no swept test: fast bodies can tunnel.

use log::trace;
use macroquad::math::Vec2;

use super::collider::Collider;
use super::components::{CollisionLayer, RigidBody};
use super::entity::Entity;
use super::system::System;
use super::transform::Transform2D;
use super::world::World;
use crate::geometry::try_compute_mtv;
use crate::tilemap::{TileCollisionLayer, TileMapLayer};

/// Contacts resolved during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Body pairs that overlapped
    pub body_contacts: usize,
    /// Solid tile cells that overlapped a body
    pub tile_contacts: usize,
}

/// Working copy of a body's mutable state while the passes run.
#[derive(Debug, Clone, Copy)]
struct BodyEntry {
    /// Position in `World::entities()`
    index: usize,
    transform: Transform2D,
    body: Option<RigidBody>,
    layer: CollisionLayer,
}

impl BodyEntry {
    fn is_dynamic(&self) -> bool {
        matches!(self.body, Some(body) if !body.is_static)
    }

    fn polygon(&self, entities: &[Entity]) -> Vec<Vec2> {
        entities[self.index]
            .get_required_component::<Collider>()
            .world_polygon(&self.transform)
    }

    fn stop(&mut self) {
        if let Some(body) = self.body.as_mut() {
            body.velocity = Vec2::ZERO;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TileEntry {
    index: usize,
    layer: CollisionLayer,
}

/// Run one full collision pass over the world.
pub fn resolve_collisions(world: &mut World) -> CollisionStats {
    let mut bodies = collect_bodies(world.entities());
    let tiles = collect_tile_layers(world.entities());
    let mut stats = CollisionStats::default();

    resolve_body_pairs(world.entities(), &mut bodies, &mut stats);
    resolve_body_tiles(world.entities(), &mut bodies, &tiles, &mut stats);

    write_back(world, &bodies);
    stats
}

fn collect_bodies(entities: &[Entity]) -> Vec<BodyEntry> {
    entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.has_component::<Collider>())
        .filter_map(|(index, e)| {
            let transform = e.try_get_component::<Transform2D>()?;
            let layer = e.try_get_component::<CollisionLayer>()?;
            Some(BodyEntry {
                index,
                transform: *transform,
                body: e.try_get_component::<RigidBody>().copied(),
                layer: *layer,
            })
        })
        .collect()
}

fn collect_tile_layers(entities: &[Entity]) -> Vec<TileEntry> {
    entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.has_component::<TileMapLayer>() && e.has_component::<TileCollisionLayer>())
        .filter_map(|(index, e)| {
            let layer = e.try_get_component::<CollisionLayer>()?;
            Some(TileEntry { index, layer: *layer })
        })
        .collect()
}

fn resolve_body_pairs(entities: &[Entity], bodies: &mut [BodyEntry], stats: &mut CollisionStats) {
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (head, tail) = bodies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            if !a.layer.can_collide_with(&b.layer) {
                continue;
            }

            let a_dynamic = a.is_dynamic();
            let b_dynamic = b.is_dynamic();
            if !a_dynamic && !b_dynamic {
                continue;
            }

            let Some(mtv) = try_compute_mtv(&a.polygon(entities), &b.polygon(entities)) else {
                continue;
            };

            stats.body_contacts += 1;
            trace!(
                "body contact {} <-> {}: mtv ({:.2}, {:.2})",
                entities[a.index].id(),
                entities[b.index].id(),
                mtv.x,
                mtv.y
            );

            if a_dynamic && b_dynamic {
                let half = mtv * 0.5;
                a.transform.translate(-half);
                b.transform.translate(half);
            } else if a_dynamic {
                a.transform.translate(-mtv);
                a.stop();
            } else {
                b.transform.translate(mtv);
                b.stop();
            }
        }
    }
}

fn resolve_body_tiles(
    entities: &[Entity],
    bodies: &mut [BodyEntry],
    tiles: &[TileEntry],
    stats: &mut CollisionStats,
) {
    for body in bodies.iter_mut().filter(|b| b.is_dynamic()) {
        for tile in tiles {
            if !body.layer.can_collide_with(&tile.layer) {
                continue;
            }

            let tile_entity = &entities[tile.index];
            let grid = tile_entity.get_required_component::<TileMapLayer>();
            let solids = tile_entity.get_required_component::<TileCollisionLayer>();

            let hits = resolve_against_layer(entities, body, grid, solids);
            if hits > 0 {
                trace!(
                    "entity {} hit {} cell(s) on tile layer '{}'",
                    entities[body.index].id(),
                    hits,
                    grid.name
                );
                stats.tile_contacts += hits;
                body.stop();
            }
        }
    }
}

/// Push `body` out of every solid cell it overlaps. Returns the hit count.
fn resolve_against_layer(
    entities: &[Entity],
    body: &mut BodyEntry,
    grid: &TileMapLayer,
    solids: &TileCollisionLayer,
) -> usize {
    let mut hits = 0;
    let mut polygon = body.polygon(entities);

    for (x, y) in solids.solid_cells() {
        let cell = solids.tile_polygon(grid, x, y);
        let Some(mtv) = try_compute_mtv(&polygon, &cell) else {
            continue;
        };

        body.transform.translate(-mtv);
        polygon = body.polygon(entities);
        hits += 1;
    }

    hits
}

fn write_back(world: &mut World, bodies: &[BodyEntry]) {
    let entities = world.entities_mut();
    for entry in bodies {
        let entity = &mut entities[entry.index];
        *entity.get_required_component_mut::<Transform2D>() = entry.transform;
        if let Some(body) = entry.body {
            *entity.get_required_component_mut::<RigidBody>() = body;
        }
    }
}

/// Resolves overlaps each frame. Register after movement and before
/// anything that draws positions.
#[derive(Debug, Default)]
pub struct CollisionSystem {
    last_stats: CollisionStats,
}

impl CollisionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contacts resolved during the most recent update.
    pub fn last_stats(&self) -> CollisionStats {
        self.last_stats
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        self.last_stats = resolve_collisions(world);
        if self.last_stats != CollisionStats::default() {
            trace!(
                "collision pass: {} body contact(s), {} tile contact(s)",
                self.last_stats.body_contacts,
                self.last_stats.tile_contacts
            );
        }
    }
}

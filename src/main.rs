//! Arena Collision Demo
//!
//! Builds a small combat scene and exercises the full pipeline: broad
//! phase, narrow phase, attack shapes, and the template cache. Pass a
//! path to a JSON shape-template file to load it into the cache first.

use std::collections::HashMap;
use std::fs::File;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use arena_collision::collision::shapes;
use arena_collision::{
    collision, AttackShapeCache, Collider, PositionSource, SpatialSystem, Vec2,
    DEFAULT_CELL_SIZE, VERSION,
};
use arena_collision::collision::{LAYER_ALL, LAYER_ENEMY, LAYER_PLAYER};

/// Minimal component store for the demo.
struct DemoStore {
    positions: HashMap<u32, Vec2>,
}

impl PositionSource<u32> for DemoStore {
    fn for_each_positioned<F: FnMut(u32, Vec2)>(&self, mut f: F) {
        for (&entity, &pos) in &self.positions {
            f(entity, pos);
        }
    }

    fn position_of(&self, entity: u32) -> Option<Vec2> {
        self.positions.get(&entity).copied()
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Arena Collision v{}", VERSION);

    let cache = AttackShapeCache::new();
    if let Some(path) = std::env::args().nth(1) {
        let file = File::open(&path)
            .with_context(|| format!("opening shape template file {path}"))?;
        let count = cache
            .load_json(file)
            .with_context(|| format!("loading shape templates from {path}"))?;
        info!("Loaded {} shape templates from {}", count, path);
    }

    demo_scene(&cache);
    Ok(())
}

/// Demo scene: one player at (10, 10) in a field of scattered enemies.
fn demo_scene(cache: &AttackShapeCache) {
    info!("=== Starting Demo Scene ===");

    // Scatter enemies deterministically on a skewed lattice.
    let mut store = DemoStore {
        positions: HashMap::new(),
    };
    for i in 0..64u32 {
        let x = ((i * 37) % 120) as f32 - 20.0;
        let y = ((i * 53) % 120) as f32 - 20.0;
        store.positions.insert(i, Vec2::new(x, y));
    }

    let system: SpatialSystem<u32> = SpatialSystem::new(DEFAULT_CELL_SIZE);
    system.rebuild(&store);
    info!(
        "Indexed {} enemies across {} cells",
        system.len(),
        system.cell_count()
    );

    let player_pos = Vec2::new(10.0, 10.0);

    // Melee swing along +x.
    let swing = shapes::melee_sweep(player_pos, Vec2::RIGHT, 15.0, 3.0, LAYER_PLAYER, LAYER_ENEMY);
    let reach = shapes::MELEE_LEAD + 15.0 + 3.0;
    let candidates = system.query_radius_exact(player_pos, reach, &store);
    let hits = confirm_hits(&swing, &candidates, &store);
    info!(
        "Melee swing: {} broad-phase candidates, {} confirmed hits",
        candidates.len(),
        hits.len()
    );

    // Cone blast facing up-right.
    let blast = shapes::cone(
        player_pos,
        std::f32::consts::FRAC_PI_4,
        0.6,
        25.0,
        10,
        LAYER_PLAYER,
        LAYER_ENEMY,
    );
    let candidates = system.query_radius_exact(player_pos, 25.0, &store);
    let hits = confirm_hits(&blast, &candidates, &store);
    info!("Cone blast: {} confirmed hits", hits.len());

    // Ring shockwave: hits the band, spares the eye.
    let (outer, inner) = shapes::ring(player_pos, 30.0, 10.0, LAYER_PLAYER, LAYER_ENEMY);
    let in_band = system
        .query_radius_exact(player_pos, 30.0, &store)
        .into_iter()
        .filter(|&e| {
            let target = enemy_collider(store.positions[&e]);
            shapes::test_ring(&target, &outer, &inner)
        })
        .count();
    info!("Ring shockwave: {} enemies in the band", in_band);

    // Cached template (falls back to a default circle if absent).
    let slash = cache.instantiate("wide-slash", player_pos, 0.0, LAYER_PLAYER, LAYER_ENEMY);
    let candidates = system.query_radius_exact(player_pos, 20.0, &store);
    let hits = confirm_hits(&slash, &candidates, &store);
    info!("Cached slash: {} confirmed hits", hits.len());

    // Slide along a terrain wall.
    let wall = shapes::terrain(Vec2::new(20.0, 0.0), 10.0, 40.0);
    let body = shapes::character(Vec2::new(19.5, 10.0), 1.0, LAYER_PLAYER);
    if collision::test(&body, &wall) {
        let normal = collision::collision_normal(&body, &wall);
        let velocity = Vec2::new(3.0, 1.0);
        let slide = collision::slide_vector(velocity, normal);
        info!("Wall contact: normal {}, velocity {} slides to {}", normal, velocity, slide);
    }

    info!("=== Demo Complete ===");
}

fn enemy_collider(pos: Vec2) -> Collider {
    Collider::circle(pos, 1.0, LAYER_ENEMY, LAYER_ALL)
}

/// Narrow-phase confirmation over broad-phase candidates.
fn confirm_hits(attack: &Collider, candidates: &[u32], store: &DemoStore) -> Vec<u32> {
    candidates
        .iter()
        .copied()
        .filter(|e| {
            store
                .position_of(*e)
                .is_some_and(|pos| collision::test(attack, &enemy_collider(pos)))
        })
        .collect()
}

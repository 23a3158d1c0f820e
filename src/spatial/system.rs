//! Spatial System
//!
//! Owns the shared spatial index and joins broad-phase results against
//! live positions from the external component store. The grid sits
//! behind a reader/writer lock: queries (possibly from background
//! threads) run concurrently, mutations serialize against them.
//!
//! Incremental maintenance is the primary path: `update` is O(1) and a
//! no-op while an entity stays in its cell. `rebuild` discards and
//! reindexes everything and is meant for initialization or bulk
//! structural changes, not the per-tick loop.

use std::hash::Hash;
use std::sync::RwLock;

use tracing::debug;

use crate::core::vec2::Vec2;
use super::grid::SpatialGrid;

/// External component store interface: who has a position, and where.
pub trait PositionSource<E> {
    /// Visit every entity carrying a position.
    fn for_each_positioned<F: FnMut(E, Vec2)>(&self, f: F);

    /// Current position of one entity, if it has one.
    fn position_of(&self, entity: E) -> Option<Vec2>;
}

/// Shared spatial index over the component store's positioned entities.
///
/// Lock poisoning is fatal by design: a panic while the index was
/// mid-mutation leaves it untrustworthy, and continuing would trade a
/// crash for silent false negatives.
#[derive(Debug)]
pub struct SpatialSystem<E> {
    grid: RwLock<SpatialGrid<E>>,
}

impl<E: Copy + Eq + Hash> SpatialSystem<E> {
    /// Empty system with the given grid cell size.
    pub fn new(cell_size: f32) -> Self {
        Self {
            grid: RwLock::new(SpatialGrid::new(cell_size)),
        }
    }

    /// Index a new entity at a position.
    pub fn insert(&self, entity: E, pos: Vec2) {
        self.grid
            .write()
            .expect("spatial grid lock poisoned")
            .insert(entity, pos);
    }

    /// Move an entity. The per-move primary path: O(1), and a no-op while
    /// the entity stays inside its current cell.
    pub fn update(&self, entity: E, pos: Vec2) {
        self.grid
            .write()
            .expect("spatial grid lock poisoned")
            .update(entity, pos);
    }

    /// Drop an entity from the index.
    pub fn remove(&self, entity: E) {
        self.grid
            .write()
            .expect("spatial grid lock poisoned")
            .remove(entity);
    }

    /// Discard the index and reinsert every positioned entity from the
    /// store. O(entities): use for initialization or after bulk
    /// structural changes; prefer [`SpatialSystem::update`] per tick.
    pub fn rebuild<S: PositionSource<E>>(&self, store: &S) {
        let mut grid = self.grid.write().expect("spatial grid lock poisoned");
        grid.clear();
        let mut count = 0usize;
        store.for_each_positioned(|entity, pos| {
            grid.insert(entity, pos);
            count += 1;
        });
        debug!(entities = count, "rebuilt spatial index");
    }

    /// Broad-phase radius query: cell-bounded, over-inclusive near cell
    /// boundaries.
    pub fn query_radius(&self, center: Vec2, radius: f32) -> Vec<E> {
        self.grid
            .read()
            .expect("spatial grid lock poisoned")
            .query_radius(center, radius)
    }

    /// Exact radius query: the broad phase joined against live store
    /// positions and filtered by true distance. Entities that lost their
    /// position since indexing are excluded.
    pub fn query_radius_exact<S: PositionSource<E>>(
        &self,
        center: Vec2,
        radius: f32,
        store: &S,
    ) -> Vec<E> {
        self.grid
            .read()
            .expect("spatial grid lock poisoned")
            .query_radius_filtered(center, radius, |entity| store.position_of(entity))
    }

    /// Every indexed entity in cells overlapping the rectangle.
    pub fn query_bounds(&self, min: Vec2, max: Vec2) -> Vec<E> {
        self.grid
            .read()
            .expect("spatial grid lock poisoned")
            .query_bounds(min, max)
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize {
        self.grid.read().expect("spatial grid lock poisoned").len()
    }

    /// True when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.grid.read().expect("spatial grid lock poisoned").is_empty()
    }

    /// Number of occupied grid cells.
    pub fn cell_count(&self) -> usize {
        self.grid
            .read()
            .expect("spatial grid lock poisoned")
            .cell_count()
    }
}

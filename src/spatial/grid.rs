//! Uniform Spatial Hash Grid
//!
//! World space is divided into equal square cells keyed by signed integer
//! coordinates; each cell holds the entities whose position falls inside
//! it. Proximity queries scan only the cells overlapping the query
//! region, keeping broad-phase cost proportional to local density rather
//! than total entity count.
//!
//! The grid knows nothing about shapes or layers: it indexes bare entity
//! identifiers at point positions. Narrow-phase confirmation is the
//! caller's job.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::core::vec2::Vec2;

/// Uniform hash grid over a generic entity identifier.
///
/// Invariants: an entity appears in at most one cell at a time, and empty
/// cells are pruned eagerly. A reverse entity-to-cell map keeps `update`
/// and `remove` O(1).
///
/// Pick a cell size of roughly 2-4x the typical query radius; much
/// smaller cells inflate the scanned cell count, much larger ones inflate
/// the per-cell candidate lists.
#[derive(Debug, Clone)]
pub struct SpatialGrid<E> {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<E>>,
    entity_cell: HashMap<E, (i32, i32)>,
}

impl<E: Copy + Eq + Hash> SpatialGrid<E> {
    /// Empty grid with the given cell size.
    ///
    /// # Panics
    /// When `cell_size` is not a positive finite number; that is a
    /// construction bug, not a runtime condition.
    pub fn new(cell_size: f32) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "spatial grid cell size must be positive and finite"
        );
        Self {
            cell_size,
            cells: HashMap::new(),
            entity_cell: HashMap::new(),
        }
    }

    /// Cell size this grid was built with.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell coordinate containing a world position.
    ///
    /// Floors toward negative infinity: with cell size 10, coordinate
    /// -0.1 maps to cell -1 and -10.1 maps to cell -2. Truncation toward
    /// zero would merge cells -1 and 0 and mis-bin every negative-axis
    /// entity.
    #[inline]
    pub fn cell_coord(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    /// Insert an entity at a position, replacing any previous entry for
    /// the same entity.
    pub fn insert(&mut self, entity: E, pos: Vec2) {
        let cell = self.cell_coord(pos);
        if let Some(prev) = self.entity_cell.get(&entity).copied() {
            if prev == cell {
                return;
            }
            self.remove_from_cell(entity, prev);
        }
        self.cells.entry(cell).or_default().push(entity);
        self.entity_cell.insert(entity, cell);
    }

    /// Move an entity to a new position. No-op when the target cell is
    /// unchanged, otherwise remove-then-insert.
    pub fn update(&mut self, entity: E, pos: Vec2) {
        self.insert(entity, pos);
    }

    /// Remove an entity from the index. Unknown entities are ignored.
    pub fn remove(&mut self, entity: E) {
        if let Some(cell) = self.entity_cell.remove(&entity) {
            self.remove_from_cell(entity, cell);
        }
    }

    /// Drop every entity and cell.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.entity_cell.clear();
    }

    fn remove_from_cell(&mut self, entity: E, cell: (i32, i32)) {
        if let Some(list) = self.cells.get_mut(&cell) {
            list.retain(|e| *e != entity);
            // Eager pruning keeps the cell map proportional to occupancy.
            if list.is_empty() {
                self.cells.remove(&cell);
            }
        }
    }

    /// Broad-phase radius query: every entity in any cell overlapping the
    /// query circle's bounding square. Over-inclusive near cell
    /// boundaries; each entity is returned at most once.
    ///
    /// `radius` must be finite and non-negative; the grid does not
    /// sanitize caller input.
    pub fn query_radius(&self, center: Vec2, radius: f32) -> Vec<E> {
        let min = self.cell_coord(center - Vec2::new(radius, radius));
        let max = self.cell_coord(center + Vec2::new(radius, radius));
        self.scan_cells(min, max)
    }

    /// Radius query filtered by true squared distance through an external
    /// position lookup. Entities the lookup cannot resolve are excluded.
    pub fn query_radius_filtered<F>(&self, center: Vec2, radius: f32, position_of: F) -> Vec<E>
    where
        F: Fn(E) -> Option<Vec2>,
    {
        let radius_sq = radius * radius;
        self.query_radius(center, radius)
            .into_iter()
            .filter(|&e| {
                position_of(e)
                    .map(|pos| pos.distance_squared(center) <= radius_sq)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Every entity in cells overlapping the rectangle from `min` to
    /// `max`.
    pub fn query_bounds(&self, min: Vec2, max: Vec2) -> Vec<E> {
        self.scan_cells(self.cell_coord(min), self.cell_coord(max))
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize {
        self.entity_cell.len()
    }

    /// True when no entities are indexed.
    pub fn is_empty(&self) -> bool {
        self.entity_cell.is_empty()
    }

    /// Scan a cell rectangle, deduplicating across cells with a seen-set.
    fn scan_cells(&self, min_cell: (i32, i32), max_cell: (i32, i32)) -> Vec<E> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for cx in min_cell.0..=max_cell.0 {
            for cy in min_cell.1..=max_cell.1 {
                if let Some(list) = self.cells.get(&(cx, cy)) {
                    for &entity in list {
                        if seen.insert(entity) {
                            out.push(entity);
                        }
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_cell_coord_floors_toward_negative_infinity() {
        let grid: SpatialGrid<u32> = SpatialGrid::new(10.0);
        assert_eq!(grid.cell_coord(Vec2::new(0.0, 0.0)), (0, 0));
        assert_eq!(grid.cell_coord(Vec2::new(9.9, 9.9)), (0, 0));
        assert_eq!(grid.cell_coord(Vec2::new(10.0, 0.0)), (1, 0));
        assert_eq!(grid.cell_coord(Vec2::new(-5.0, 0.0)), (-1, 0));
        assert_eq!(grid.cell_coord(Vec2::new(-0.1, 0.0)), (-1, 0));
        assert_eq!(grid.cell_coord(Vec2::new(-10.1, 0.0)), (-2, 0));
    }

    #[test]
    #[should_panic(expected = "cell size")]
    fn test_zero_cell_size_panics() {
        let _ = SpatialGrid::<u32>::new(0.0);
    }

    #[test]
    fn test_insert_query_round_trip() {
        let mut grid = SpatialGrid::new(10.0);
        grid.insert(1u32, Vec2::new(5.0, 5.0));

        assert!(grid.query_radius(Vec2::new(5.0, 5.0), 1.0).contains(&1));

        // Move far away: gone from the old neighborhood, present at the new.
        grid.update(1, Vec2::new(500.0, 500.0));
        assert!(!grid.query_radius(Vec2::new(5.0, 5.0), 1.0).contains(&1));
        assert!(grid.query_radius(Vec2::new(500.0, 500.0), 1.0).contains(&1));
    }

    #[test]
    fn test_update_same_cell_is_noop() {
        let mut grid = SpatialGrid::new(10.0);
        grid.insert(1u32, Vec2::new(1.0, 1.0));
        grid.update(1, Vec2::new(2.0, 2.0));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.cell_count(), 1);
        assert!(grid.query_radius(Vec2::new(2.0, 2.0), 1.0).contains(&1));
    }

    #[test]
    fn test_remove_prunes_empty_cells() {
        let mut grid = SpatialGrid::new(10.0);
        grid.insert(1u32, Vec2::new(5.0, 5.0));
        grid.insert(2u32, Vec2::new(6.0, 6.0));
        grid.insert(3u32, Vec2::new(25.0, 25.0));
        assert_eq!(grid.cell_count(), 2);

        grid.remove(3);
        assert_eq!(grid.cell_count(), 1);
        grid.remove(1);
        grid.remove(2);
        assert_eq!(grid.cell_count(), 0);
        assert!(grid.is_empty());

        // Removing an unknown entity is fine.
        grid.remove(42);
    }

    #[test]
    fn test_entity_in_one_cell_at_a_time() {
        let mut grid = SpatialGrid::new(10.0);
        grid.insert(1u32, Vec2::new(5.0, 5.0));
        grid.insert(1u32, Vec2::new(25.0, 25.0));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.cell_count(), 1);
        assert!(!grid.query_radius(Vec2::new(5.0, 5.0), 1.0).contains(&1));
    }

    #[test]
    fn test_query_deduplicates() {
        let mut grid = SpatialGrid::new(10.0);
        grid.insert(1u32, Vec2::new(5.0, 5.0));
        // A radius spanning many cells still reports the entity once.
        let hits = grid.query_radius(Vec2::new(5.0, 5.0), 50.0);
        assert_eq!(hits.iter().filter(|&&e| e == 1).count(), 1);
    }

    #[test]
    fn test_query_radius_is_broad() {
        let mut grid = SpatialGrid::new(10.0);
        // Same cell as the query point but outside the radius: the broad
        // query over-reports it, the filtered query does not.
        grid.insert(1u32, Vec2::new(9.0, 9.0));
        let broad = grid.query_radius(Vec2::new(1.0, 1.0), 2.0);
        assert!(broad.contains(&1));

        let exact = grid.query_radius_filtered(Vec2::new(1.0, 1.0), 2.0, |_| {
            Some(Vec2::new(9.0, 9.0))
        });
        assert!(!exact.contains(&1));
    }

    #[test]
    fn test_query_radius_filtered_drops_unresolvable() {
        let mut grid = SpatialGrid::new(10.0);
        grid.insert(1u32, Vec2::new(1.0, 1.0));
        let hits = grid.query_radius_filtered(Vec2::new(1.0, 1.0), 5.0, |_| None);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_query_bounds() {
        let mut grid = SpatialGrid::new(10.0);
        grid.insert(1u32, Vec2::new(5.0, 5.0));
        grid.insert(2u32, Vec2::new(35.0, 5.0));
        grid.insert(3u32, Vec2::new(-15.0, -15.0));

        let hits = grid.query_bounds(Vec2::new(-20.0, -20.0), Vec2::new(10.0, 10.0));
        assert!(hits.contains(&1));
        assert!(!hits.contains(&2));
        assert!(hits.contains(&3));
    }

    #[test]
    fn test_negative_coordinates_round_trip() {
        let mut grid = SpatialGrid::new(10.0);
        grid.insert(1u32, Vec2::new(-0.1, -0.1));
        // A query centered just across the axis must still reach cell -1.
        assert!(grid.query_radius(Vec2::new(0.5, 0.5), 1.0).contains(&1));
    }

    #[test]
    fn test_clear() {
        let mut grid = SpatialGrid::new(10.0);
        for i in 0..10u32 {
            grid.insert(i, Vec2::new(i as f32 * 7.0, 0.0));
        }
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.cell_count(), 0);
    }

    #[test]
    fn test_filtered_query_matches_brute_force() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut grid = SpatialGrid::new(8.0);
        let mut positions = HashMap::new();

        for id in 0..200u32 {
            let pos = Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
            grid.insert(id, pos);
            positions.insert(id, pos);
        }

        let center = Vec2::new(12.0, -3.0);
        let radius = 25.0;
        let mut hits = grid.query_radius_filtered(center, radius, |e| positions.get(&e).copied());
        let mut expected: Vec<u32> = positions
            .iter()
            .filter(|(_, p)| p.distance_squared(center) <= radius * radius)
            .map(|(id, _)| *id)
            .collect();
        hits.sort_unstable();
        expected.sort_unstable();
        assert_eq!(hits, expected);
    }

    proptest! {
        // Power-of-two cell size keeps the division exact, so the floor
        // invariant can be asserted without a float tolerance.
        #[test]
        fn prop_cell_coord_bounds_position(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
        ) {
            let grid: SpatialGrid<u32> = SpatialGrid::new(8.0);
            let (cx, cy) = grid.cell_coord(Vec2::new(x, y));
            prop_assert!(cx as f32 * 8.0 <= x && x < (cx + 1) as f32 * 8.0);
            prop_assert!(cy as f32 * 8.0 <= y && y < (cy + 1) as f32 * 8.0);
        }

        #[test]
        fn prop_inserted_entity_is_found_at_its_position(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            r in 0.1f32..50.0,
        ) {
            let mut grid = SpatialGrid::new(8.0);
            grid.insert(1u32, Vec2::new(x, y));
            prop_assert!(grid.query_radius(Vec2::new(x, y), r).contains(&1));
        }
    }
}

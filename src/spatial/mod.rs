//! Spatial Module
//!
//! Uniform-grid broad phase: the hash grid itself plus the shared,
//! lock-guarded system that keeps it in sync with the component store.

pub mod grid;
pub mod system;

// Re-export key types
pub use grid::SpatialGrid;
pub use system::{PositionSource, SpatialSystem};

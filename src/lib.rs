//! # Arena Collision
//!
//! Real-time 2D collision core: shape intersection with layer-masked
//! filtering, attack-hitbox construction, and a uniform-grid broad phase.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ARENA COLLISION                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Math primitives                        │
//! │  └── vec2.rs       - f32 2D vector                          │
//! │                                                             │
//! │  collision/        - Narrow phase                           │
//! │  ├── layer.rs      - 32-bit layer/mask taxonomy             │
//! │  ├── collider.rs   - Shape-tagged collider record           │
//! │  ├── intersect.rs  - Pairwise tests, normals, sliding       │
//! │  ├── shapes.rs     - Attack-shape factory and presets       │
//! │  └── cache.rs      - Named shape-template registry          │
//! │                                                             │
//! │  spatial/          - Broad phase                            │
//! │  ├── grid.rs       - Uniform hash grid                      │
//! │  └── system.rs     - Shared index + exact queries           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage Model
//!
//! The crate is a synchronous library driven from the simulation loop:
//! pairwise tests for melee hits and triggers go through
//! [`collision::test`], "who is near X" questions go through the
//! [`spatial::SpatialSystem`] broad phase and are confirmed by the narrow
//! phase. The only structures safe to touch from other threads are the
//! spatial system and the shape cache, both behind reader/writer locks.
//!
//! Negative answers are values, not errors: a layer mismatch, a disabled
//! collider, a degenerate polygon, and an unknown shape name all resolve
//! to `false`, an empty list, or a fallback collider.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod collision;
pub mod spatial;

// Re-export commonly used types
pub use crate::core::Vec2;
pub use collision::{can_interact, collision_normal, slide_vector, test, Collider, Layer, Shape};
pub use collision::{AttackShape, AttackShapeCache, SpriteGeometry};
pub use spatial::{PositionSource, SpatialGrid, SpatialSystem};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default grid cell size, sized for arena characters with query radii in
/// the 8-16 unit range (2-4x the typical query radius works well).
pub const DEFAULT_CELL_SIZE: f32 = 32.0;

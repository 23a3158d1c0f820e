//! Collision Module
//!
//! The collider data model and everything that tests it.
//!
//! ## Module Structure
//!
//! - `layer`: bit-flag categories and interaction masks
//! - `collider`: shape-tagged geometry record
//! - `intersect`: pairwise narrow-phase tests, normals, sliding
//! - `shapes`: attack-shape builders and world-object presets
//! - `cache`: named shape-template registry

pub mod layer;
pub mod collider;
pub mod intersect;
pub mod shapes;
pub mod cache;

// Re-export key types
pub use layer::{
    Layer, LAYER_ALL, LAYER_ENEMY, LAYER_ENVIRONMENT, LAYER_ETHEREAL, LAYER_INTERACTIVE,
    LAYER_NONE, LAYER_PLAYER, LAYER_PROJECTILE, LAYER_TERRAIN, LAYER_TRIGGER,
};
pub use collider::{can_interact, BoundingCircle, Collider, Shape};
pub use intersect::{collision_normal, slide_vector, test};
pub use cache::{AttackShape, AttackShapeCache, ShapeFileError, SpriteGeometry};

//! Collision Layers
//!
//! 32-bit flag categories for collider filtering. Each category is an
//! independent bit; combine with bitwise OR.

/// Bit-flag set identifying collider categories.
/// A collider carries one `layer` (what it is) and one `mask`
/// (what it reacts to).
pub type Layer = u32;

/// No categories.
pub const LAYER_NONE: Layer = 0;

/// Player-controlled characters.
pub const LAYER_PLAYER: Layer = 1 << 0;

/// Hostile NPCs.
pub const LAYER_ENEMY: Layer = 1 << 1;

/// Projectiles in flight.
pub const LAYER_PROJECTILE: Layer = 1 << 2;

/// Solid world geometry.
pub const LAYER_TERRAIN: Layer = 1 << 3;

/// Destructible or decorative world objects.
pub const LAYER_ENVIRONMENT: Layer = 1 << 4;

/// Non-blocking props that only stop projectiles.
pub const LAYER_ETHEREAL: Layer = 1 << 5;

/// Objects the player can use or pick up.
pub const LAYER_INTERACTIVE: Layer = 1 << 6;

/// Trigger volumes (zone transitions, pressure plates).
pub const LAYER_TRIGGER: Layer = 1 << 7;

/// Every category.
pub const LAYER_ALL: Layer = u32::MAX;

//! Core math primitives.
//!
//! Shared geometry building blocks used by both the narrow phase and the
//! spatial index.

pub mod vec2;

// Re-export core types
pub use vec2::Vec2;

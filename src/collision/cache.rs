//! Attack Shape Cache
//!
//! Named shape templates registered once and instantiated as positioned
//! colliders on demand. The cache is an explicitly owned value: construct
//! it at startup and hand references to whichever systems need it. It is
//! never ambient global state.
//!
//! Reads vastly outnumber writes (templates are registered during load,
//! instantiated every attack), so the registry sits behind a
//! reader/writer lock.

use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::vec2::Vec2;
use super::collider::Collider;
use super::layer::Layer;

/// Radius of the fallback collider returned when instantiation cannot
/// resolve a usable template.
pub const FALLBACK_RADIUS: f32 = 4.0;

/// Named attack-shape template: a local-space vertex list plus optional
/// display dimensions. Immutable once registered; instantiation copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackShape {
    /// Registry name.
    pub name: String,
    /// Local-space vertex loop.
    pub vertices: Vec<Vec2>,
    /// Optional template width, carried for tooling.
    #[serde(default)]
    pub width: Option<f32>,
    /// Optional template height, carried for tooling.
    #[serde(default)]
    pub height: Option<f32>,
}

/// Errors from loading shape-template files.
///
/// Ordinary negative results (unknown name, empty template) are not
/// errors anywhere in this module; only malformed input files are.
#[derive(Debug, Error)]
pub enum ShapeFileError {
    /// The template source could not be read.
    #[error("failed to read shape templates: {0}")]
    Io(#[from] std::io::Error),

    /// The template source is not a valid JSON template array.
    #[error("failed to parse shape templates: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Geometry extractor for sprite images, implemented by the asset
/// pipeline. An empty hull signals "no extractable geometry"; callers
/// fall back to the bounding box.
///
/// Extraction tuning (alpha threshold, hull simplification epsilon)
/// belongs to the implementor; this crate consumes the results as-is.
pub trait SpriteGeometry {
    /// Ordered convex-hull vertices of the sprite silhouette, centered on
    /// the sprite's local origin. Empty when nothing is extractable.
    fn extract_convex_hull(&self, sprite: &str) -> Vec<Vec2>;

    /// Width and height of the sprite's opaque bounding box.
    fn extract_bounding_box(&self, sprite: &str) -> (f32, f32);
}

/// Thread-safe name → template registry with positioned-instance
/// construction.
#[derive(Debug, Default)]
pub struct AttackShapeCache {
    shapes: RwLock<HashMap<String, Arc<AttackShape>>>,
}

impl AttackShapeCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under its own name, replacing any previous
    /// template with that name.
    pub fn register(&self, template: AttackShape) {
        let name = template.name.clone();
        let mut shapes = self.shapes.write().expect("attack shape cache lock poisoned");
        if shapes.insert(name.clone(), Arc::new(template)).is_some() {
            debug!(name = %name, "replaced attack shape template");
        }
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Option<Arc<AttackShape>> {
        self.shapes
            .read()
            .expect("attack shape cache lock poisoned")
            .get(name)
            .cloned()
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.shapes.read().expect("attack shape cache lock poisoned").len()
    }

    /// True when no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a positioned collider from a named template, rotating the
    /// template's local vertices by `rotation` radians and translating to
    /// `position`.
    ///
    /// An unknown name or a template without vertices yields a small
    /// default circle instead of failing; success does not imply the
    /// named shape was found.
    pub fn instantiate(
        &self,
        name: &str,
        position: Vec2,
        rotation: f32,
        layer: Layer,
        mask: Layer,
    ) -> Collider {
        match self.get(name) {
            Some(template) if !template.vertices.is_empty() => {
                let vertices = template
                    .vertices
                    .iter()
                    .map(|v| v.rotate(rotation))
                    .collect();
                Collider::polygon(position, vertices, layer, mask)
            }
            Some(_) => {
                warn!(name = %name, "attack shape template has no vertices, using fallback circle");
                Collider::circle(position, FALLBACK_RADIUS, layer, mask)
            }
            None => {
                warn!(name = %name, "unknown attack shape, using fallback circle");
                Collider::circle(position, FALLBACK_RADIUS, layer, mask)
            }
        }
    }

    /// Register a template extracted from a sprite image. An empty convex
    /// hull falls back to the sprite's bounding-box rectangle.
    pub fn register_sprite<G: SpriteGeometry>(&self, name: &str, sprite: &str, extractor: &G) {
        let hull = extractor.extract_convex_hull(sprite);
        let (vertices, width, height) = if hull.is_empty() {
            let (w, h) = extractor.extract_bounding_box(sprite);
            debug!(name = %name, sprite = %sprite, "no hull geometry, using bounding box");
            let half_w = w * 0.5;
            let half_h = h * 0.5;
            (
                vec![
                    Vec2::new(-half_w, -half_h),
                    Vec2::new(half_w, -half_h),
                    Vec2::new(half_w, half_h),
                    Vec2::new(-half_w, half_h),
                ],
                Some(w),
                Some(h),
            )
        } else {
            (hull, None, None)
        };

        self.register(AttackShape {
            name: name.to_string(),
            vertices,
            width,
            height,
        });
    }

    /// Load a JSON array of templates, registering each. Returns the
    /// number registered.
    pub fn load_json<R: Read>(&self, reader: R) -> Result<usize, ShapeFileError> {
        let templates: Vec<AttackShape> = serde_json::from_reader(reader)?;
        let count = templates.len();
        for template in templates {
            self.register(template);
        }
        Ok(count)
    }
}

//! Collider Data Model
//!
//! Shape-tagged collision geometry plus layer/mask filtering state.
//! Colliders are plain values: the engine holds no ownership and no
//! internal synchronization. The owning store mutates them in place
//! through the translation-only operations below.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use super::layer::Layer;

/// Collision shape payload.
///
/// Each variant carries only the fields that are meaningful for it, so a
/// capsule endpoint can never be read off a circle. Shape kind and polygon
/// vertex lists are fixed at construction; only translations mutate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Disc around `center`.
    Circle {
        /// World-space center.
        center: Vec2,
        /// Disc radius (>= 0).
        radius: f32,
    },
    /// Line segment from `start` to `end` thickened by `radius`.
    Capsule {
        /// World-space segment start.
        start: Vec2,
        /// World-space segment end.
        end: Vec2,
        /// Thickening radius (>= 0).
        radius: f32,
    },
    /// Axis-aligned box with `min` as its minimum corner.
    Aabb {
        /// World-space minimum corner.
        min: Vec2,
        /// Box width (>= 0).
        width: f32,
        /// Box height (>= 0).
        height: f32,
    },
    /// Convex polygon with local-frame vertices translated by `origin`.
    Polygon {
        /// World-space translation applied to every vertex.
        origin: Vec2,
        /// Local-frame vertex loop. Fewer than 3 vertices is a degenerate
        /// shape that fails every test.
        vertices: Vec<Vec2>,
    },
}

impl Shape {
    /// True for a polygon with fewer than 3 vertices. Degenerate shapes
    /// fail every intersection test without being an error.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Shape::Polygon { vertices, .. } if vertices.len() < 3)
    }

    /// Conservative bounding circle.
    ///
    /// Polygon bounds are origin-relative (max vertex distance from the
    /// origin, not from the area centroid), so off-center hulls get a
    /// loose bound.
    pub fn bounding_circle(&self) -> BoundingCircle {
        match self {
            Shape::Circle { center, radius } => BoundingCircle {
                center: *center,
                radius: *radius,
            },
            Shape::Capsule { start, end, radius } => BoundingCircle {
                center: (*start + *end).scale(0.5),
                radius: start.distance(*end) * 0.5 + radius,
            },
            Shape::Aabb { min, width, height } => BoundingCircle {
                center: *min + Vec2::new(width * 0.5, height * 0.5),
                radius: Vec2::new(width * 0.5, height * 0.5).length(),
            },
            Shape::Polygon { origin, vertices } => BoundingCircle {
                center: *origin,
                radius: vertices.iter().map(|v| v.length()).fold(0.0, f32::max),
            },
        }
    }
}

/// Bounding circle of a shape, used for broad reduction of shape pairs
/// the narrow phase has no dedicated test for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    /// Circle center.
    pub center: Vec2,
    /// Circle radius.
    pub radius: f32,
}

/// A collision volume with layer/mask interaction state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Geometry payload.
    pub shape: Shape,
    /// Category this collider belongs to.
    pub layer: Layer,
    /// Categories this collider is willing to interact with.
    pub mask: Layer,
    /// Disabled colliders never match anything.
    pub enabled: bool,
}

impl Collider {
    /// Circle collider.
    pub fn circle(center: Vec2, radius: f32, layer: Layer, mask: Layer) -> Self {
        Self {
            shape: Shape::Circle { center, radius },
            layer,
            mask,
            enabled: true,
        }
    }

    /// Capsule collider between two world points.
    pub fn capsule(start: Vec2, end: Vec2, radius: f32, layer: Layer, mask: Layer) -> Self {
        Self {
            shape: Shape::Capsule { start, end, radius },
            layer,
            mask,
            enabled: true,
        }
    }

    /// Axis-aligned box collider; `min` is the minimum corner.
    pub fn aabb(min: Vec2, width: f32, height: f32, layer: Layer, mask: Layer) -> Self {
        Self {
            shape: Shape::Aabb { min, width, height },
            layer,
            mask,
            enabled: true,
        }
    }

    /// Polygon collider from local-frame vertices translated by `origin`.
    pub fn polygon(origin: Vec2, vertices: Vec<Vec2>, layer: Layer, mask: Layer) -> Self {
        Self {
            shape: Shape::Polygon { origin, vertices },
            layer,
            mask,
            enabled: true,
        }
    }

    /// Reference point of the shape: circle center, capsule start,
    /// box minimum corner, polygon origin.
    pub fn position(&self) -> Vec2 {
        match &self.shape {
            Shape::Circle { center, .. } => *center,
            Shape::Capsule { start, .. } => *start,
            Shape::Aabb { min, .. } => *min,
            Shape::Polygon { origin, .. } => *origin,
        }
    }

    /// Move the shape so its reference point lands on `pos`.
    /// Translation only: a capsule keeps its segment offset, a polygon
    /// keeps its vertex list.
    pub fn set_position(&mut self, pos: Vec2) {
        match &mut self.shape {
            Shape::Circle { center, .. } => *center = pos,
            Shape::Capsule { start, end, .. } => {
                let delta = *end - *start;
                *start = pos;
                *end = pos + delta;
            }
            Shape::Aabb { min, .. } => *min = pos,
            Shape::Polygon { origin, .. } => *origin = pos,
        }
    }

    /// Reposition a capsule's endpoints. Has no effect on other shapes.
    pub fn set_segment(&mut self, new_start: Vec2, new_end: Vec2) {
        if let Shape::Capsule { start, end, .. } = &mut self.shape {
            *start = new_start;
            *end = new_end;
        }
    }

    /// Conservative bounding circle for this collider's shape.
    pub fn bounding_circle(&self) -> BoundingCircle {
        self.shape.bounding_circle()
    }
}

/// Layer/mask interaction predicate.
///
/// Both colliders must be enabled, and at least one side must mask the
/// other's layer. The OR is asymmetric on purpose: a trigger volume can
/// detect a player without the player masking the trigger back.
#[inline]
pub fn can_interact(a: &Collider, b: &Collider) -> bool {
    if !a.enabled || !b.enabled {
        return false;
    }
    (a.layer & b.mask) != 0 || (b.layer & a.mask) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::layer::*;

    #[test]
    fn test_can_interact_asymmetric_or() {
        let trigger = Collider::aabb(Vec2::ZERO, 4.0, 4.0, LAYER_TRIGGER, LAYER_PLAYER);
        let player = Collider::circle(Vec2::ZERO, 1.0, LAYER_PLAYER, LAYER_TERRAIN);

        // Player does not mask triggers, but the trigger masks players.
        assert!(can_interact(&trigger, &player));
        assert!(can_interact(&player, &trigger));
    }

    #[test]
    fn test_can_interact_no_shared_mask() {
        let projectile = Collider::circle(Vec2::ZERO, 0.5, LAYER_PROJECTILE, LAYER_ENEMY);
        let terrain = Collider::aabb(Vec2::ZERO, 10.0, 10.0, LAYER_TERRAIN, LAYER_PLAYER | LAYER_ENEMY);

        // Neither layer is in the other's mask.
        assert!(!can_interact(&projectile, &terrain));
    }

    #[test]
    fn test_can_interact_disabled() {
        let mut a = Collider::circle(Vec2::ZERO, 1.0, LAYER_PLAYER, LAYER_ALL);
        let b = Collider::circle(Vec2::ZERO, 1.0, LAYER_ENEMY, LAYER_ALL);
        assert!(can_interact(&a, &b));

        a.enabled = false;
        assert!(!can_interact(&a, &b));
        assert!(!can_interact(&b, &a));
    }

    #[test]
    fn test_set_position_translates_capsule() {
        let mut c = Collider::capsule(
            Vec2::new(1.0, 1.0),
            Vec2::new(5.0, 1.0),
            0.5,
            LAYER_PROJECTILE,
            LAYER_ALL,
        );
        c.set_position(Vec2::new(10.0, 2.0));
        match c.shape {
            Shape::Capsule { start, end, .. } => {
                assert_eq!(start, Vec2::new(10.0, 2.0));
                assert_eq!(end, Vec2::new(14.0, 2.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_bounding_circle_aabb() {
        let c = Collider::aabb(Vec2::ZERO, 6.0, 8.0, LAYER_TERRAIN, LAYER_ALL);
        let b = c.bounding_circle();
        assert_eq!(b.center, Vec2::new(3.0, 4.0));
        assert!((b.radius - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounding_circle_capsule() {
        let c = Collider::capsule(
            Vec2::new(-2.0, 0.0),
            Vec2::new(2.0, 0.0),
            1.0,
            LAYER_PROJECTILE,
            LAYER_ALL,
        );
        let b = c.bounding_circle();
        assert_eq!(b.center, Vec2::ZERO);
        assert!((b.radius - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounding_circle_polygon_is_origin_relative() {
        let c = Collider::polygon(
            Vec2::new(10.0, 0.0),
            vec![Vec2::new(3.0, 0.0), Vec2::new(0.0, 4.0), Vec2::new(-1.0, -1.0)],
            LAYER_ENEMY,
            LAYER_ALL,
        );
        let b = c.bounding_circle();
        assert_eq!(b.center, Vec2::new(10.0, 0.0));
        assert!((b.radius - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_polygon() {
        let empty = Shape::Polygon {
            origin: Vec2::ZERO,
            vertices: vec![],
        };
        let pair = Shape::Polygon {
            origin: Vec2::ZERO,
            vertices: vec![Vec2::ZERO, Vec2::RIGHT],
        };
        let tri = Shape::Polygon {
            origin: Vec2::ZERO,
            vertices: vec![Vec2::ZERO, Vec2::RIGHT, Vec2::UP],
        };
        assert!(empty.is_degenerate());
        assert!(pair.is_degenerate());
        assert!(!tri.is_degenerate());
        assert!(!Shape::Circle { center: Vec2::ZERO, radius: 0.0 }.is_degenerate());
    }
}

//! Attack Shape Factory
//!
//! Builders that turn semantic combat parameters (swing direction, weapon
//! length, blast radius) into pre-configured colliders, plus the fixed
//! layer/mask presets for world objects. All builders are pure: they
//! allocate and return, nothing else.

use crate::core::vec2::Vec2;
use super::collider::Collider;
use super::intersect;
use super::layer::{
    Layer, LAYER_ALL, LAYER_ENEMY, LAYER_ENVIRONMENT, LAYER_ETHEREAL, LAYER_INTERACTIVE,
    LAYER_NONE, LAYER_PLAYER, LAYER_PROJECTILE, LAYER_TERRAIN, LAYER_TRIGGER,
};

/// Forward offset of a melee sweep's start point from the wielder anchor,
/// so the swing volume clears the wielder's own body.
pub const MELEE_LEAD: f32 = 2.0;

/// Cone attack: a polygon fan anchored at the origin vertex, spanning
/// `half_angle` radians to each side of `direction` at `range`, with
/// `segments` arc subdivisions (at least 1).
pub fn cone(
    origin: Vec2,
    direction: f32,
    half_angle: f32,
    range: f32,
    segments: u32,
    layer: Layer,
    mask: Layer,
) -> Collider {
    let segments = segments.max(1);
    let mut vertices = Vec::with_capacity(segments as usize + 2);
    vertices.push(Vec2::ZERO);
    for i in 0..=segments {
        let angle = direction - half_angle + (2.0 * half_angle) * (i as f32 / segments as f32);
        vertices.push(Vec2::from_angle(angle) * range);
    }
    Collider::polygon(origin, vertices, layer, mask)
}

/// Circular area-of-effect attack.
pub fn circle_aoe(center: Vec2, radius: f32, layer: Layer, mask: Layer) -> Collider {
    Collider::circle(center, radius, layer, mask)
}

/// Line/beam attack: a capsule from `origin` along `direction` for
/// `range`, with radius `width / 2`.
pub fn line(origin: Vec2, direction: Vec2, range: f32, width: f32, layer: Layer, mask: Layer) -> Collider {
    let end = origin + direction.normalize() * range;
    Collider::capsule(origin, end, width * 0.5, layer, mask)
}

/// Ring (annulus) attack as an `(outer, inner)` circle pair.
///
/// The inner circle is built with `mask = LAYER_NONE` so it never
/// interacts on its own; it only serves as the exclusion zone for
/// [`test_ring`].
pub fn ring(
    center: Vec2,
    outer_radius: f32,
    inner_radius: f32,
    layer: Layer,
    mask: Layer,
) -> (Collider, Collider) {
    let outer = Collider::circle(center, outer_radius, layer, mask);
    let inner = Collider::circle(center, inner_radius, layer, LAYER_NONE);
    (outer, inner)
}

/// Ring hit test: the target intersects the outer circle but not the
/// inner exclusion zone.
///
/// Pure and reentrant: the inner geometry is probed through a local copy
/// carrying the outer's layer/mask/enabled state, so a shared inner
/// collider is never mutated.
pub fn test_ring(target: &Collider, outer: &Collider, inner: &Collider) -> bool {
    if !intersect::test(target, outer) {
        return false;
    }
    let probe = Collider {
        shape: inner.shape.clone(),
        layer: outer.layer,
        mask: outer.mask,
        enabled: outer.enabled,
    };
    !intersect::test(target, &probe)
}

/// Swept volume of a projectile between its last and current positions,
/// as a capsule with the projectile's radius. Approximates continuous
/// collision for fast-moving bodies.
pub fn projectile_sweep(last: Vec2, current: Vec2, radius: f32, layer: Layer, mask: Layer) -> Collider {
    Collider::capsule(last, current, radius, layer, mask)
}

/// Melee weapon sweep: a capsule starting [`MELEE_LEAD`] ahead of the
/// wielder anchor and extending `weapon_length` further along the swing
/// direction, with radius `width / 2`.
pub fn melee_sweep(
    anchor: Vec2,
    direction: Vec2,
    weapon_length: f32,
    width: f32,
    layer: Layer,
    mask: Layer,
) -> Collider {
    let dir = direction.normalize();
    let start = anchor + dir * MELEE_LEAD;
    let end = start + dir * weapon_length;
    Collider::capsule(start, end, width * 0.5, layer, mask)
}

/// Character body collider. Masks the world and other characters, but not
/// ethereal props.
pub fn character(center: Vec2, radius: f32, layer: Layer) -> Collider {
    Collider::circle(
        center,
        radius,
        layer,
        LAYER_PLAYER
            | LAYER_ENEMY
            | LAYER_TERRAIN
            | LAYER_ENVIRONMENT
            | LAYER_INTERACTIVE
            | LAYER_TRIGGER,
    )
}

/// Solid terrain block. Terrain stops everything.
pub fn terrain(min: Vec2, width: f32, height: f32) -> Collider {
    Collider::aabb(min, width, height, LAYER_TERRAIN, LAYER_ALL)
}

/// Solid world prop (crates, pillars).
pub fn blocking_prop(center: Vec2, radius: f32) -> Collider {
    Collider::circle(center, radius, LAYER_ENVIRONMENT, LAYER_ALL)
}

/// Non-blocking prop that only stops projectiles (bushes, wisps).
pub fn ethereal_prop(center: Vec2, radius: f32) -> Collider {
    Collider::circle(center, radius, LAYER_ETHEREAL, LAYER_PROJECTILE)
}

/// Trigger volume. Detects characters through its own mask; characters do
/// not need to mask triggers back.
pub fn trigger_zone(min: Vec2, width: f32, height: f32) -> Collider {
    Collider::aabb(min, width, height, LAYER_TRIGGER, LAYER_PLAYER | LAYER_ENEMY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::collider::Shape;

    fn probe(at: Vec2) -> Collider {
        Collider::circle(at, 0.0, LAYER_PLAYER, LAYER_ALL)
    }

    #[test]
    fn test_cone_vertex_layout() {
        let c = cone(Vec2::ZERO, 0.0, 0.5, 10.0, 8, LAYER_PROJECTILE, LAYER_ENEMY);
        match &c.shape {
            Shape::Polygon { origin, vertices } => {
                assert_eq!(*origin, Vec2::ZERO);
                // Apex plus segments + 1 arc points.
                assert_eq!(vertices.len(), 10);
                assert_eq!(vertices[0], Vec2::ZERO);
                for v in &vertices[1..] {
                    assert!((v.length() - 10.0).abs() < 1e-4);
                }
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_cone_hits_along_direction_only() {
        let c = cone(Vec2::ZERO, 0.0, 0.4, 10.0, 8, LAYER_PROJECTILE, LAYER_PLAYER);
        // In front, inside the fan.
        assert!(intersect::test(&probe(Vec2::new(5.0, 0.0)), &c));
        // Behind the apex.
        assert!(!intersect::test(&probe(Vec2::new(-5.0, 0.0)), &c));
        // In front but outside the half-angle.
        assert!(!intersect::test(&probe(Vec2::new(5.0, 5.0)), &c));
    }

    #[test]
    fn test_line_capsule_geometry() {
        let l = line(Vec2::ZERO, Vec2::new(0.0, 3.0), 12.0, 2.0, LAYER_PROJECTILE, LAYER_ENEMY);
        match l.shape {
            Shape::Capsule { start, end, radius } => {
                assert_eq!(start, Vec2::ZERO);
                assert!((end.y - 12.0).abs() < 1e-5);
                assert!(end.x.abs() < 1e-5);
                assert!((radius - 1.0).abs() < 1e-6);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_ring_membership() {
        let (outer, inner) = ring(Vec2::ZERO, 30.0, 10.0, LAYER_PROJECTILE, LAYER_ALL);

        // Inside the band.
        assert!(test_ring(&probe(Vec2::new(20.0, 0.0)), &outer, &inner));
        // Inside the hole.
        assert!(!test_ring(&probe(Vec2::new(5.0, 0.0)), &outer, &inner));
        // Beyond the outer edge.
        assert!(!test_ring(&probe(Vec2::new(40.0, 0.0)), &outer, &inner));
    }

    #[test]
    fn test_ring_inner_is_inert_on_its_own() {
        let (_, inner) = ring(Vec2::ZERO, 30.0, 10.0, LAYER_PROJECTILE, LAYER_ALL);
        assert_eq!(inner.mask, LAYER_NONE);
        // The inner circle alone interacts with nothing that doesn't mask
        // projectiles.
        let target = Collider::circle(Vec2::ZERO, 1.0, LAYER_PLAYER, LAYER_TERRAIN);
        assert!(!intersect::test(&target, &inner));
    }

    #[test]
    fn test_ring_does_not_mutate_inputs() {
        let (outer, inner) = ring(Vec2::ZERO, 30.0, 10.0, LAYER_PROJECTILE, LAYER_ALL);
        let inner_before = inner.clone();
        let _ = test_ring(&probe(Vec2::new(20.0, 0.0)), &outer, &inner);
        let _ = test_ring(&probe(Vec2::new(5.0, 0.0)), &outer, &inner);
        assert_eq!(inner, inner_before);
    }

    #[test]
    fn test_projectile_sweep_covers_path() {
        let sweep = projectile_sweep(
            Vec2::ZERO,
            Vec2::new(30.0, 0.0),
            0.5,
            LAYER_PROJECTILE,
            LAYER_ALL,
        );
        // A body the projectile passed through this tick.
        assert!(intersect::test(&probe(Vec2::new(15.0, 0.0)), &sweep));
        assert!(!intersect::test(&probe(Vec2::new(15.0, 5.0)), &sweep));
    }

    #[test]
    fn test_melee_sweep_leads_from_anchor() {
        let anchor = Vec2::new(10.0, 10.0);
        let swing = melee_sweep(anchor, Vec2::RIGHT, 15.0, 3.0, LAYER_PLAYER, LAYER_ENEMY);

        match &swing.shape {
            Shape::Capsule { start, end, radius } => {
                // The start point is offset forward, not on the anchor.
                assert!(start.distance(anchor) > 0.0);
                assert!((start.x - (10.0 + MELEE_LEAD)).abs() < 1e-5);
                assert!((end.x - (10.0 + MELEE_LEAD + 15.0)).abs() < 1e-5);
                assert!((radius - 1.5).abs() < 1e-6);
            }
            _ => unreachable!(),
        }

        // An enemy standing inside the swept volume is hit.
        let enemy = Collider::circle(Vec2::new(20.0, 10.5), 1.0, LAYER_ENEMY, LAYER_ALL);
        assert!(intersect::test(&swing, &enemy));

        // An enemy behind the wielder is not.
        let behind = Collider::circle(Vec2::new(5.0, 10.0), 1.0, LAYER_ENEMY, LAYER_ALL);
        assert!(!intersect::test(&swing, &behind));
    }

    #[test]
    fn test_preset_layer_masks() {
        let t = terrain(Vec2::ZERO, 10.0, 10.0);
        assert_eq!(t.layer, LAYER_TERRAIN);
        assert_eq!(t.mask, LAYER_ALL);

        let e = ethereal_prop(Vec2::ZERO, 2.0);
        assert_eq!(e.layer, LAYER_ETHEREAL);
        assert_eq!(e.mask, LAYER_PROJECTILE);

        // A walking player passes through an ethereal prop...
        let player = character(Vec2::ZERO, 1.0, LAYER_PLAYER);
        assert!(!intersect::test(&player, &e));
        // ...but a projectile does not.
        let bolt = Collider::circle(Vec2::ZERO, 0.3, LAYER_PROJECTILE, LAYER_ENEMY);
        assert!(intersect::test(&bolt, &e));
    }

    #[test]
    fn test_trigger_detects_without_reverse_mask() {
        let zone = trigger_zone(Vec2::new(-2.0, -2.0), 4.0, 4.0);
        // Character masks triggers, but even a collider that doesn't mask
        // them back is still detected via the asymmetric OR.
        let oblivious = Collider::circle(Vec2::ZERO, 0.5, LAYER_ENEMY, LAYER_TERRAIN);
        assert!(intersect::test(&zone, &oblivious));
    }
}

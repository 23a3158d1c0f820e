//! Intersection Engine
//!
//! Pairwise narrow-phase tests dispatched by shape kind, plus collision
//! normal derivation and sliding-vector computation.
//!
//! Negative results are ordinary values here: layer mismatches, disabled
//! colliders, and degenerate polygons all resolve to `false`, never to an
//! error.

use tracing::debug;

use crate::core::vec2::Vec2;
use super::collider::{can_interact, Collider, Shape};

/// Test two colliders for intersection.
///
/// Returns false immediately when the layer/mask predicate fails or when
/// either shape is a degenerate polygon. Shape pairs without a dedicated
/// test (capsule vs aabb, capsule vs polygon, aabb vs polygon) reduce to bounding
/// circles.
pub fn test(a: &Collider, b: &Collider) -> bool {
    if !can_interact(a, b) {
        return false;
    }
    if a.shape.is_degenerate() || b.shape.is_degenerate() {
        debug!("intersection test against degenerate polygon, failing");
        return false;
    }
    shapes_intersect(&a.shape, &b.shape)
}

/// Shape-kind dispatch. Mirrored pairs swap and delegate.
fn shapes_intersect(a: &Shape, b: &Shape) -> bool {
    use Shape::*;
    match (a, b) {
        (Circle { center: c1, radius: r1 }, Circle { center: c2, radius: r2 }) => {
            circle_circle(*c1, *r1, *c2, *r2)
        }
        (Circle { center, radius }, Aabb { min, width, height }) => {
            circle_aabb(*center, *radius, *min, *width, *height)
        }
        (Aabb { .. }, Circle { .. }) => shapes_intersect(b, a),
        (Circle { center, radius }, Capsule { start, end, radius: cap_radius }) => {
            circle_capsule(*center, *radius, *start, *end, *cap_radius)
        }
        (Capsule { .. }, Circle { .. }) => shapes_intersect(b, a),
        (
            Capsule { start: a1, end: a2, radius: ra },
            Capsule { start: b1, end: b2, radius: rb },
        ) => capsule_capsule(*a1, *a2, *ra, *b1, *b2, *rb),
        (
            Aabb { min: min1, width: w1, height: h1 },
            Aabb { min: min2, width: w2, height: h2 },
        ) => aabb_aabb(*min1, *w1, *h1, *min2, *w2, *h2),
        (Circle { center, radius }, Polygon { origin, vertices }) => {
            circle_polygon(*center, *radius, *origin, vertices)
        }
        (Polygon { .. }, Circle { .. }) => shapes_intersect(b, a),
        (
            Polygon { origin: o1, vertices: v1 },
            Polygon { origin: o2, vertices: v2 },
        ) => polygon_polygon(*o1, v1, *o2, v2),
        // No dedicated test for this pair: bounding-circle reduction.
        _ => {
            let ba = a.bounding_circle();
            let bb = b.bounding_circle();
            circle_circle(ba.center, ba.radius, bb.center, bb.radius)
        }
    }
}

/// Circle vs circle: boundary inclusive, so touching counts as colliding.
#[inline]
pub fn circle_circle(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let combined = r1 + r2;
    c1.distance_squared(c2) <= combined * combined
}

/// Circle vs axis-aligned box: clamp the center to the box extents and
/// compare the squared distance to the closest point.
#[inline]
pub fn circle_aabb(center: Vec2, radius: f32, min: Vec2, width: f32, height: f32) -> bool {
    let closest = Vec2::new(
        center.x.clamp(min.x, min.x + width),
        center.y.clamp(min.y, min.y + height),
    );
    closest.distance_squared(center) <= radius * radius
}

/// Circle vs capsule: distance from the center to the capsule segment
/// against the sum of radii.
#[inline]
pub fn circle_capsule(center: Vec2, radius: f32, start: Vec2, end: Vec2, cap_radius: f32) -> bool {
    let closest = closest_point_on_segment(center, start, end);
    let combined = radius + cap_radius;
    closest.distance_squared(center) <= combined * combined
}

/// Capsule vs capsule, approximated as the minimum of the four
/// endpoint-to-other-segment distances.
///
/// Sufficient for thin capsules; a pure crossing configuration where both
/// segments pass between the other's endpoints can under-report the true
/// segment-segment distance.
pub fn capsule_capsule(a1: Vec2, a2: Vec2, ra: f32, b1: Vec2, b2: Vec2, rb: f32) -> bool {
    let combined = ra + rb;
    let combined_sq = combined * combined;

    let d1 = closest_point_on_segment(a1, b1, b2).distance_squared(a1);
    let d2 = closest_point_on_segment(a2, b1, b2).distance_squared(a2);
    let d3 = closest_point_on_segment(b1, a1, a2).distance_squared(b1);
    let d4 = closest_point_on_segment(b2, a1, a2).distance_squared(b2);

    d1.min(d2).min(d3).min(d4) <= combined_sq
}

/// AABB vs AABB: 1-D overlap on both axes. Exact edge contact counts as
/// touching.
#[inline]
pub fn aabb_aabb(min1: Vec2, w1: f32, h1: f32, min2: Vec2, w2: f32, h2: f32) -> bool {
    !(min1.x > min2.x + w2
        || min1.x + w1 < min2.x
        || min1.y > min2.y + h2
        || min1.y + h1 < min2.y)
}

/// Circle vs polygon: true when the center is inside the polygon or any
/// edge passes within the circle's radius.
pub fn circle_polygon(center: Vec2, radius: f32, origin: Vec2, vertices: &[Vec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let world: Vec<Vec2> = vertices.iter().map(|v| origin + *v).collect();
    if point_in_polygon(center, &world) {
        return true;
    }
    let radius_sq = radius * radius;
    let mut j = world.len() - 1;
    for i in 0..world.len() {
        let closest = closest_point_on_segment(center, world[j], world[i]);
        if closest.distance_squared(center) <= radius_sq {
            return true;
        }
        j = i;
    }
    false
}

/// Polygon vs polygon, tested as vertex containment in either direction.
///
/// Not a separating-axis test: a pure edge-crossing configuration where no
/// vertex of either polygon lies inside the other is reported as a miss.
/// The attack-shape library is tuned around this profile, so the
/// approximation is kept.
pub fn polygon_polygon(o1: Vec2, v1: &[Vec2], o2: Vec2, v2: &[Vec2]) -> bool {
    if v1.len() < 3 || v2.len() < 3 {
        return false;
    }
    let world1: Vec<Vec2> = v1.iter().map(|v| o1 + *v).collect();
    let world2: Vec<Vec2> = v2.iter().map(|v| o2 + *v).collect();

    world1.iter().any(|p| point_in_polygon(*p, &world2))
        || world2.iter().any(|p| point_in_polygon(*p, &world1))
}

/// Closest point to `point` on the segment from `start` to `end`.
/// A zero-length segment behaves as its start point.
#[inline]
pub fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
    let seg = end - start;
    let len_sq = seg.length_squared();
    if len_sq == 0.0 {
        return start;
    }
    let t = ((point - start).dot(seg) / len_sq).clamp(0.0, 1.0);
    start + seg.scale(t)
}

/// Ray-cast point-in-polygon test over a world-space vertex loop.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Collision normal between two intersecting colliders, pointing from `b`
/// toward `a`.
///
/// Defined for circle vs circle and circle vs aabb (either order). Every other
/// pair returns the zero vector, which callers must treat as "no normal
/// available", not as a direction. Coincident circle centers also yield
/// zero.
pub fn collision_normal(a: &Collider, b: &Collider) -> Vec2 {
    use Shape::*;
    match (&a.shape, &b.shape) {
        (Circle { center: ca, .. }, Circle { center: cb, .. }) => (*ca - *cb).normalize(),
        (Circle { center, .. }, Aabb { min, width, height }) => {
            circle_aabb_normal(*center, *min, *width, *height)
        }
        (Aabb { min, width, height }, Circle { center, .. }) => {
            -circle_aabb_normal(*center, *min, *width, *height)
        }
        _ => Vec2::ZERO,
    }
}

/// Normal for a circle against a box: from the clamped closest point
/// toward the circle center. A center inside the box is pushed outward
/// along the nearest edge.
fn circle_aabb_normal(center: Vec2, min: Vec2, width: f32, height: f32) -> Vec2 {
    let max = min + Vec2::new(width, height);
    let closest = Vec2::new(center.x.clamp(min.x, max.x), center.y.clamp(min.y, max.y));

    if closest != center {
        return (center - closest).normalize();
    }

    // Center inside the box: nearest edge wins.
    let left = center.x - min.x;
    let right = max.x - center.x;
    let bottom = center.y - min.y;
    let top = max.y - center.y;
    let nearest = left.min(right).min(bottom).min(top);

    if nearest == left {
        -Vec2::RIGHT
    } else if nearest == right {
        Vec2::RIGHT
    } else if nearest == bottom {
        -Vec2::UP
    } else {
        Vec2::UP
    }
}

/// Remove the velocity component along `normal`, leaving the tangential
/// sliding component: `v - (v·n)n`.
///
/// A zero normal returns the velocity unchanged (no surface to slide
/// along). `normal` is expected to be unit length.
#[inline]
pub fn slide_vector(velocity: Vec2, normal: Vec2) -> Vec2 {
    if normal == Vec2::ZERO {
        return velocity;
    }
    velocity - normal.scale(velocity.dot(normal))
}

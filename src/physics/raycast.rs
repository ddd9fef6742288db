//! Ray intersection tests against shape boundaries.
//!
//! Rays are `origin + direction * t` for `t > 0`; distances are reported in
//! units of `direction`'s length. A zero direction never hits anything.

use glam::Vec2;

use crate::geometry2d::{perp_dot, perpendicular};

use super::contact::RayHit;

/// Below this magnitude of `perp_dot(ray, segment)` the two are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-4;

/// Keep the normal facing against the ray direction.
#[inline]
fn face_origin(normal: Vec2, direction: Vec2) -> Vec2 {
    if normal.dot(direction) > 0.0 {
        -normal
    } else {
        normal
    }
}

/// Pick the nearer of two optional hits.
#[inline]
fn nearer(best: Option<RayHit>, candidate: Option<RayHit>) -> Option<RayHit> {
    match (best, candidate) {
        (Some(b), Some(c)) if c.distance < b.distance => Some(c),
        (None, c) => c,
        (b, _) => b,
    }
}

/// First intersection of a ray with a disk boundary.
///
/// A ray starting inside the disk hits the boundary on its way out.
pub fn ray_disk(origin: Vec2, direction: Vec2, center: Vec2, radius: f32) -> Option<RayHit> {
    let a = direction.dot(direction);
    if a == 0.0 {
        return None;
    }

    let to_origin = origin - center;
    let b = 2.0 * direction.dot(to_origin);
    let c = to_origin.dot(to_origin) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let inv_2a = 1.0 / (2.0 * a);
    let t1 = (-b - sqrt_d) * inv_2a;
    let t2 = (-b + sqrt_d) * inv_2a;
    let t = if t1 > 0.0 {
        t1
    } else if t2 > 0.0 {
        t2
    } else {
        return None;
    };

    let position = origin + direction * t;
    Some(RayHit {
        position,
        normal: face_origin((position - center).normalize_or(-direction), direction),
        distance: t,
    })
}

/// Intersection of a ray with the open segment `segment1..segment2`.
pub fn ray_segment(
    origin: Vec2,
    direction: Vec2,
    segment1: Vec2,
    segment2: Vec2,
) -> Option<RayHit> {
    let segment_direction = segment2 - segment1;
    let denom = perp_dot(direction, segment_direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = perp_dot(segment1 - origin, segment_direction) / denom;
    if t <= 0.0 {
        return None;
    }

    let u = perp_dot(origin - segment1, direction) / -denom;
    if u <= 0.0 || u >= 1.0 {
        return None;
    }

    Some(RayHit {
        position: origin + direction * t,
        normal: face_origin(perpendicular(segment_direction).normalize(), direction),
        distance: t,
    })
}

/// Nearest intersection of a ray with a capsule: its two end disks and two side segments.
pub fn ray_capsule(origin: Vec2, direction: Vec2, a: Vec2, b: Vec2, radius: f32) -> Option<RayHit> {
    let side = perpendicular((b - a).normalize_or(Vec2::Y)) * radius;

    [
        ray_disk(origin, direction, a, radius),
        ray_disk(origin, direction, b, radius),
        ray_segment(origin, direction, a + side, b + side),
        ray_segment(origin, direction, a - side, b - side),
    ]
    .into_iter()
    .fold(None, nearer)
}

/// Nearest intersection of a ray with any edge of a polygon.
pub fn ray_polygon(origin: Vec2, direction: Vec2, polygon: &[Vec2]) -> Option<RayHit> {
    let n = polygon.len();
    (0..n)
        .map(|i| ray_segment(origin, direction, polygon[i], polygon[(i + 1) % n]))
        .fold(None, nearer)
}

//! Narrowphase collision detection: analytic disk/capsule tests and SAT for polygons.
//!
//! Every test reports the contact from shape 1's side: the normal points away
//! from shape 2, so moving shape 1 by `normal * depth` separates the pair.

use glam::Vec2;

use crate::geometry2d::{
    is_point_inside_polygon, nearest_point_on_line_segment, nearest_point_on_polygon_boundary,
    nearest_point_on_polygon_edge, nearest_point_pair_between_line_segments, perpendicular,
};

use super::collider::{capsule_body_rectangle, WorldShape};
use super::contact::ContactInfo;

/// Squared segment distance treated as an intersection in the capsule-capsule test.
const SEGMENT_INTERSECTION_EPSILON: f32 = 1e-12;

/// Normal used when two centers coincide and no direction can be derived.
const FALLBACK_NORMAL: Vec2 = Vec2::Y;

/// Detect a collision between two world-space shapes.
pub fn detect_collision(shape1: &WorldShape, shape2: &WorldShape) -> Option<ContactInfo> {
    use WorldShape::*;

    match (*shape1, *shape2) {
        (
            Disk {
                center: c1,
                radius: r1,
            },
            Disk {
                center: c2,
                radius: r2,
            },
        ) => disk_disk(c1, r1, c2, r2),
        (Disk { center, radius: r1 }, Capsule { a, b, radius: r2 }) => {
            disk_capsule(center, r1, a, b, r2)
        }
        (Disk { center, radius }, Polygon { points, .. }) => disk_polygon(center, radius, points),
        (
            Capsule {
                a: a1,
                b: b1,
                radius: r1,
            },
            Capsule {
                a: a2,
                b: b2,
                radius: r2,
            },
        ) => capsule_capsule(a1, b1, r1, a2, b2, r2),
        (Capsule { a, b, radius }, Polygon { points, normals }) => {
            capsule_polygon(a, b, radius, points, normals)
        }
        (
            Polygon {
                points: p1,
                normals: n1,
            },
            Polygon {
                points: p2,
                normals: n2,
            },
        ) => polygon_polygon(p1, n1, p2, n2),
        (Capsule { .. } | Polygon { .. }, _) => {
            detect_collision(shape2, shape1).map(|info| info.mirrored())
        }
    }
}

/// Disk vs disk.
pub fn disk_disk(center1: Vec2, radius1: f32, center2: Vec2, radius2: f32) -> Option<ContactInfo> {
    let diff = center1 - center2;
    let length_sq = diff.length_squared();
    let r = radius1 + radius2;
    if length_sq >= r * r {
        return None;
    }

    let length = length_sq.sqrt();
    let normal = if length > 0.0 {
        diff / length
    } else {
        FALLBACK_NORMAL
    };
    Some(ContactInfo {
        normal,
        depth: r - length,
        point: center2 + normal * radius2,
    })
}

/// Disk vs capsule with core segment `a2..b2`.
pub fn disk_capsule(
    center1: Vec2,
    radius1: f32,
    a2: Vec2,
    b2: Vec2,
    radius2: f32,
) -> Option<ContactInfo> {
    let nearest = nearest_point_on_line_segment(center1, a2, b2);
    let mut info = disk_disk(center1, radius1, nearest, radius2)?;
    if info.normal == FALLBACK_NORMAL && center1 == nearest {
        // Center on the core segment: push out sideways.
        let side = perpendicular((b2 - a2).normalize_or(Vec2::Y));
        info.normal = side;
        info.point = nearest + side * radius2;
    }
    Some(info)
}

/// Disk vs convex or concave polygon boundary.
///
/// A center inside the polygon always collides; the normal then points from
/// the center to the nearest boundary point.
pub fn disk_polygon(center: Vec2, radius: f32, polygon: &[Vec2]) -> Option<ContactInfo> {
    let (nearest, edge) = nearest_point_on_polygon_edge(center, polygon);
    let diff = center - nearest;
    let length_sq = diff.length_squared();

    if is_point_inside_polygon(center, polygon) {
        let length = length_sq.sqrt();
        let normal = if length > 0.0 {
            -diff / length
        } else {
            edge_normal(polygon, edge)
        };
        return Some(ContactInfo {
            normal,
            depth: length + radius,
            point: nearest,
        });
    }

    if length_sq >= radius * radius {
        return None;
    }

    let length = length_sq.sqrt();
    let normal = if length > 0.0 {
        diff / length
    } else {
        edge_normal(polygon, edge)
    };
    Some(ContactInfo {
        normal,
        depth: radius - length,
        point: nearest,
    })
}

/// Outward normal of a counter-clockwise polygon edge.
fn edge_normal(polygon: &[Vec2], edge: usize) -> Vec2 {
    let n = polygon.len();
    perpendicular(polygon[edge] - polygon[(edge + 1) % n]).normalize_or(FALLBACK_NORMAL)
}

/// Capsule vs capsule.
///
/// Crossing core segments are separated by moving whichever end of capsule 1
/// is closer to capsule 2's core segment.
pub fn capsule_capsule(
    a1: Vec2,
    b1: Vec2,
    radius1: f32,
    a2: Vec2,
    b2: Vec2,
    radius2: f32,
) -> Option<ContactInfo> {
    let (p1, p2) = nearest_point_pair_between_line_segments(a1, b1, a2, b2);
    let diff = p1 - p2;
    let length_sq = diff.length_squared();
    let r = radius1 + radius2;
    if length_sq >= r * r {
        return None;
    }

    if length_sq <= SEGMENT_INTERSECTION_EPSILON {
        let nearest_a = nearest_point_on_line_segment(a1, a2, b2);
        let nearest_b = nearest_point_on_line_segment(b1, a2, b2);
        let diff_a = a1 - nearest_a;
        let diff_b = b1 - nearest_b;
        let (diff, nearest) = if diff_a.length_squared() <= diff_b.length_squared() {
            (diff_a, nearest_a)
        } else {
            (diff_b, nearest_b)
        };

        let distance = diff.length();
        let normal = if distance > 0.0 {
            -diff / distance
        } else {
            perpendicular((b2 - a2).normalize_or(Vec2::Y))
        };
        return Some(ContactInfo {
            normal,
            depth: distance + r,
            point: nearest,
        });
    }

    let length = length_sq.sqrt();
    let normal = diff / length;
    Some(ContactInfo {
        normal,
        depth: r - length,
        point: p2 + normal * radius2,
    })
}

/// Capsule vs polygon.
///
/// Approximated by the deepest of three sub-tests: a disk at each end point and
/// the rectangle between them.
pub fn capsule_polygon(
    a: Vec2,
    b: Vec2,
    radius: f32,
    polygon: &[Vec2],
    normals: &[Vec2],
) -> Option<ContactInfo> {
    let (rectangle, rectangle_normals) = capsule_body_rectangle(a, b, radius);

    [
        disk_polygon(a, radius, polygon),
        disk_polygon(b, radius, polygon),
        polygon_polygon(&rectangle, &rectangle_normals, polygon, normals),
    ]
    .into_iter()
    .flatten()
    .fold(None, |best: Option<ContactInfo>, candidate| match best {
        Some(best) if best.depth >= candidate.depth => Some(best),
        _ => Some(candidate),
    })
}

#[derive(Debug, Clone, Copy)]
struct ProjectionRange {
    min: f32,
    max: f32,
}

impl ProjectionRange {
    fn of(polygon: &[Vec2], axis: Vec2) -> Self {
        polygon.iter().fold(
            Self {
                min: f32::MAX,
                max: -f32::MAX,
            },
            |range, p| {
                let d = p.dot(axis);
                Self {
                    min: range.min.min(d),
                    max: range.max.max(d),
                }
            },
        )
    }

    #[inline]
    fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && self.max >= other.min
    }

    #[inline]
    fn overlap(&self, other: &Self) -> f32 {
        (self.max.min(other.max) - self.min.max(other.min)).max(0.0)
    }
}

/// Best axis found so far by the SAT scan.
struct SatCandidate {
    normal: Vec2,
    depth: f32,
}

/// Project both polygons on `axis`. Returns `false` if the axis separates them.
///
/// `owner` is the polygon the axis belongs to; `other` the one it is tested
/// against. The candidate normal is kept pointing away from polygon 2.
fn test_axis(
    owner: &[Vec2],
    other: &[Vec2],
    axis: Vec2,
    owner_is_polygon1: bool,
    best: &mut SatCandidate,
) -> bool {
    let range_owner = ProjectionRange::of(owner, axis);
    let range_other = ProjectionRange::of(other, axis);
    if !range_owner.overlaps(&range_other) {
        return false;
    }

    let overlap = range_owner.overlap(&range_other);
    if overlap < best.depth {
        best.depth = overlap;
        best.normal = axis;

        let (range1, range2) = if owner_is_polygon1 {
            (range_owner, range_other)
        } else {
            (range_other, range_owner)
        };
        if range1.min < range2.min && range1.max > range2.min {
            best.normal = -axis;
        }
    }
    true
}

/// Approximate contact point: displace polygon 1 out of polygon 2, then take
/// the closest vertex-to-boundary match in either direction.
fn polygon_contact_point(polygon1: &[Vec2], polygon2: &[Vec2], offset: Vec2) -> Vec2 {
    let mut best_dist = f32::MAX;
    let mut contact = Vec2::ZERO;

    for p1 in polygon1 {
        let moved = *p1 + offset;
        let nearest = nearest_point_on_polygon_boundary(moved, polygon2);
        let d = moved.distance_squared(nearest);
        if d < best_dist {
            best_dist = d;
            contact = nearest;
        }
    }

    for p2 in polygon2 {
        let moved = *p2 - offset;
        let nearest = nearest_point_on_polygon_boundary(moved, polygon1);
        let d = moved.distance_squared(nearest);
        if d < best_dist {
            best_dist = d;
            contact = nearest + offset;
        }
    }

    contact
}

/// Polygon vs polygon using the Separating Axis Theorem over both polygons'
/// edge normals.
pub fn polygon_polygon(
    polygon1: &[Vec2],
    normals1: &[Vec2],
    polygon2: &[Vec2],
    normals2: &[Vec2],
) -> Option<ContactInfo> {
    let mut axes_tested = 0;
    polygon_polygon_counted(polygon1, normals1, polygon2, normals2, &mut axes_tested)
}

/// [`polygon_polygon`] that also counts how many axes were projected.
pub fn polygon_polygon_counted(
    polygon1: &[Vec2],
    normals1: &[Vec2],
    polygon2: &[Vec2],
    normals2: &[Vec2],
    axes_tested: &mut usize,
) -> Option<ContactInfo> {
    let mut best = SatCandidate {
        normal: FALLBACK_NORMAL,
        depth: f32::MAX,
    };

    for axis in normals1 {
        *axes_tested += 1;
        if !test_axis(polygon1, polygon2, *axis, true, &mut best) {
            return None;
        }
    }
    for axis in normals2 {
        *axes_tested += 1;
        if !test_axis(polygon2, polygon1, *axis, false, &mut best) {
            return None;
        }
    }

    let point = polygon_contact_point(polygon1, polygon2, best.normal * best.depth);
    Some(ContactInfo {
        normal: best.normal,
        depth: best.depth,
        point,
    })
}

//! 2D vector, segment, and polygon helpers shared by colliders and queries.
//!
//! A polygon is an ordered slice of points that is implicitly closed: edge `i`
//! connects vertex `i` to vertex `(i + 1) % n`.

#[cfg(feature = "triangulation")]
mod triangulation;

#[cfg(feature = "triangulation")]
pub use triangulation::{triangulate_polygon, triangulate_polygons};

use glam::Vec2;

/// Owned polygon boundary.
pub type Polygon = Vec<Vec2>;

/// List of polygon boundaries (e.g. an outer boundary followed by holes).
pub type PolygonList = Vec<Polygon>;

/// Determinant below which two segments are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-4;

/// 2D cross product: `a.x * b.y - a.y * b.x`.
#[inline]
pub fn perp_dot(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// The vector rotated 90 degrees counter-clockwise: `(-v.y, v.x)`.
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Rotate `v` counter-clockwise by `angle` radians.
#[inline]
pub fn rotate_counter_clockwise(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

#[inline]
fn orient(point: Vec2, line1: Vec2, line2: Vec2) -> f64 {
    robust::orient2d(
        robust::Coord {
            x: point.x,
            y: point.y,
        },
        robust::Coord {
            x: line1.x,
            y: line1.y,
        },
        robust::Coord {
            x: line2.x,
            y: line2.y,
        },
    )
}

/// Exact test whether `point` lies strictly left of the directed line `line1 -> line2`.
pub fn is_point_left_of_line(point: Vec2, line1: Vec2, line2: Vec2) -> bool {
    orient(point, line1, line2) > 0.0
}

/// Exact test whether `point` lies strictly right of the directed line `line1 -> line2`.
pub fn is_point_right_of_line(point: Vec2, line1: Vec2, line2: Vec2) -> bool {
    orient(point, line1, line2) < 0.0
}

/// Twice the signed area of a polygon (positive for counter-clockwise order).
pub fn signed_area_doubled(polygon: &[Vec2]) -> f32 {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let p0 = polygon[i];
            let p1 = polygon[(i + 1) % n];
            p0.x * p1.y - p1.x * p0.y
        })
        .sum()
}

/// Whether the polygon's points are in clockwise order.
///
/// # Panics
///
/// Panics if the polygon has fewer than 3 points.
pub fn is_clockwise(polygon: &[Vec2]) -> bool {
    assert!(
        polygon.len() > 2,
        "winding is undefined for {} points",
        polygon.len()
    );
    signed_area_doubled(polygon) < 0.0
}

/// Even-odd crossing test.
///
/// Points exactly on an edge may be reported either inside or outside.
pub fn is_point_inside_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Even-odd containment over several boundaries at once, so holes count as outside.
pub fn is_point_inside_polygons(point: Vec2, polygons: &[Polygon]) -> bool {
    polygons
        .iter()
        .filter(|polygon| is_point_inside_polygon(point, polygon))
        .count()
        % 2
        == 1
}

/// Project `p` onto the segment `a..b`, clamped to the segment's endpoints.
pub fn nearest_point_on_line_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let length_sq = a.distance_squared(b);
    if length_sq == 0.0 {
        return a;
    }

    let t = (p - a).dot(b - a) / length_sq;
    if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        a.lerp(b, t)
    }
}

/// Nearest point on the polygon boundary, plus the index of the edge it lies on.
pub fn nearest_point_on_polygon_edge(point: Vec2, polygon: &[Vec2]) -> (Vec2, usize) {
    let n = polygon.len();
    let mut best_dist = f32::MAX;
    let mut best = (Vec2::ZERO, 0);

    for i in 0..n {
        let nearest = nearest_point_on_line_segment(point, polygon[i], polygon[(i + 1) % n]);
        let dist = point.distance_squared(nearest);
        if dist < best_dist {
            best_dist = dist;
            best = (nearest, i);
        }
    }
    best
}

/// Nearest point on the polygon boundary (minimum over all edges).
pub fn nearest_point_on_polygon_boundary(point: Vec2, polygon: &[Vec2]) -> Vec2 {
    nearest_point_on_polygon_edge(point, polygon).0
}

#[inline]
fn ratio(num: f32, denom: f32) -> f32 {
    if denom > 0.0 {
        (num / denom).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Closest pair of points between segments `a1..b1` and `a2..b2`.
///
/// Returns `(point on segment 1, point on segment 2)`. Near-parallel segments
/// project segment 2's start onto segment 1 and re-derive the other parameter.
pub fn nearest_point_pair_between_line_segments(
    a1: Vec2,
    b1: Vec2,
    a2: Vec2,
    b2: Vec2,
) -> (Vec2, Vec2) {
    let r = a2 - a1;
    let u = b1 - a1;
    let v = b2 - a2;

    let ru = r.dot(u);
    let rv = r.dot(v);
    let uu = u.dot(u);
    let uv = u.dot(v);
    let vv = v.dot(v);
    let det = uu * vv - uv * uv;

    let (s, t) = if det < PARALLEL_EPSILON {
        (ratio(ru, uu), 0.0)
    } else {
        (
            ((ru * vv - rv * uv) / det).clamp(0.0, 1.0),
            ((ru * uv - rv * uu) / det).clamp(0.0, 1.0),
        )
    };

    let s_final = ratio(t * uv + ru, uu);
    let t_final = ratio(s * uv - rv, vv);

    (a1 + u * s_final, a2 + v * t_final)
}

/// Average of the polygon's vertices.
pub fn polygon_center(polygon: &[Vec2]) -> Vec2 {
    if polygon.is_empty() {
        return Vec2::ZERO;
    }
    polygon.iter().copied().sum::<Vec2>() / polygon.len() as f32
}

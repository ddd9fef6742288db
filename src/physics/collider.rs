//! Collider mass data and world-space geometry.

use glam::Vec2;

use crate::ecs::components::physics::{Collider, PolygonCollider};
use crate::geometry2d::{perp_dot, perpendicular, rotate_counter_clockwise};

/// World-space geometry of a collider at a given body pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape<'a> {
    Disk {
        center: Vec2,
        radius: f32,
    },
    /// Core segment `a..b` swept by `radius`.
    Capsule {
        a: Vec2,
        b: Vec2,
        radius: f32,
    },
    Polygon {
        points: &'a [Vec2],
        normals: &'a [Vec2],
    },
}

/// End points of a capsule's core segment, `(bottom, top)` in local Y.
#[inline]
pub fn capsule_endpoints(position: Vec2, angle: f32, height: f32) -> (Vec2, Vec2) {
    let half_offset = rotate_counter_clockwise(Vec2::new(0.0, 0.5 * height), angle);
    (position - half_offset, position + half_offset)
}

/// Corners of the rectangle spanned by a capsule's core segment and its
/// radius, with matching outward normals. Counter-clockwise.
pub fn capsule_body_rectangle(a: Vec2, b: Vec2, radius: f32) -> ([Vec2; 4], [Vec2; 4]) {
    let dir = (b - a).normalize_or(Vec2::Y);
    let side = perpendicular(dir);
    let offset = side * radius;
    (
        [a - offset, b - offset, b + offset, a + offset],
        [-side, dir, side, -dir],
    )
}

impl Collider {
    /// Mass and moment of inertia about the local origin for the given density.
    ///
    /// Polygons must be wound counter-clockwise with their center of mass at the
    /// local origin; the returned inertia is wrong otherwise.
    ///
    /// # Panics
    ///
    /// Panics if a polygon has zero signed area, or if the resulting mass or
    /// inertia is not positive (e.g. a hand-built `Collider::Capsule` with a
    /// negative height, or a zero radius).
    pub fn compute_mass_data(&self, density: f32) -> (f32, f32) {
        let (mass, moment_of_inertia) = match self {
            Collider::Disk { radius } => {
                let radius_sq = radius * radius;
                let mass = density * std::f32::consts::PI * radius_sq;
                (mass, mass * 0.5 * radius_sq)
            }
            Collider::Capsule { radius, height } => {
                let radius_sq = radius * radius;
                let width = 2.0 * radius;
                let height_sq = height * height;

                let mass_rectangle = density * width * height;
                let mass_disk = density * std::f32::consts::PI * radius_sq;

                let moi_rectangle = mass_rectangle * (width * width + height_sq) / 12.0;
                let moi_half_disks = mass_disk * (radius_sq / 2.0 + height_sq / 4.0);
                (mass_rectangle + mass_disk, moi_rectangle + moi_half_disks)
            }
            Collider::Polygon(polygon) => polygon.compute_mass_data(density),
        };
        assert!(
            mass > 0.0 && moment_of_inertia > 0.0,
            "collider mass data must be positive, got mass {mass} and inertia {moment_of_inertia}"
        );
        (mass, moment_of_inertia)
    }

    /// Refresh cached world-space geometry. Only polygons keep a cache.
    #[inline]
    pub fn update_world_geometry(&mut self, position: Vec2, angle: f32) {
        if let Collider::Polygon(polygon) = self {
            polygon.compute_world_points(position, angle);
        }
    }

    /// World-space view of this collider. Polygons use their cached world points.
    pub fn world_shape(&self, position: Vec2, angle: f32) -> WorldShape<'_> {
        match self {
            Collider::Disk { radius } => WorldShape::Disk {
                center: position,
                radius: *radius,
            },
            Collider::Capsule { radius, height } => {
                let (a, b) = capsule_endpoints(position, angle, *height);
                WorldShape::Capsule {
                    a,
                    b,
                    radius: *radius,
                }
            }
            Collider::Polygon(polygon) => WorldShape::Polygon {
                points: &polygon.world_points,
                normals: &polygon.world_normals,
            },
        }
    }
}

impl PolygonCollider {
    fn compute_mass_data(&self, density: f32) -> (f32, f32) {
        let n = self.points.len();
        let mut total_cross = 0.0;
        let mut moment_numerator = 0.0;

        for i in 0..n {
            let p1 = self.points[i];
            let p2 = self.points[(i + 1) % n];
            let d = perp_dot(p1, p2);
            total_cross += d;
            moment_numerator += d * (p1.dot(p1) + p1.dot(p2) + p2.dot(p2));
        }

        assert!(
            total_cross != 0.0,
            "polygon mass is undefined for zero signed area"
        );

        let mass = density * total_cross * 0.5;
        (mass, mass * moment_numerator / (6.0 * total_cross))
    }

    /// Recompute the world-space points and normals from a body pose.
    pub fn compute_world_points(&mut self, translation: Vec2, rotation: f32) {
        let (s, c) = rotation.sin_cos();
        let rotate = |v: Vec2| Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c);

        for (world, local) in self.world_points.iter_mut().zip(&self.points) {
            *world = translation + rotate(*local);
        }
        for (world, local) in self.world_normals.iter_mut().zip(&self.normals) {
            *world = rotate(*local);
        }
    }

    /// Write the world-space points for a body pose into `out`, leaving the
    /// cache untouched.
    pub fn world_points_at(&self, translation: Vec2, rotation: f32, out: &mut Vec<Vec2>) {
        out.clear();
        out.extend(
            self.points
                .iter()
                .map(|p| translation + rotate_counter_clockwise(*p, rotation)),
        );
    }
}

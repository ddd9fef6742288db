//! Debug drawing of colliders and contacts.

use glam::{Vec2, Vec3, Vec4};

use crate::ecs::components::physics::{Collider, RigidBody, RigidBodyType};
use crate::geometry2d::rotate_counter_clockwise;

use super::collider::capsule_endpoints;

/// Depth at which shapes are drawn.
const SHAPE_Z: f32 = 0.01;
/// Depth at which contacts are drawn, above the shapes.
const CONTACT_Z: f32 = 0.15;
/// Radius of the marker circles at polygon vertices.
const VERTEX_MARKER_RADIUS: f32 = 0.1;
/// Radius of the marker circles at contact points.
const CONTACT_MARKER_RADIUS: f32 = 0.25;

const CONTACT_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// Category a debug primitive belongs to; sinks may filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugCategory {
    /// Collider outlines.
    Physics,
    /// Contact points and normals from the last step.
    Contacts,
}

/// Sink for debug primitives, implemented by the host's debug renderer.
pub trait DebugDraw {
    fn draw_line(&mut self, category: DebugCategory, from: Vec3, to: Vec3, color: Vec4);

    fn draw_circle(
        &mut self,
        category: DebugCategory,
        center: Vec3,
        radius: f32,
        normal: Vec3,
        color: Vec4,
    );

    fn is_enabled(&self, _category: DebugCategory) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub category: DebugCategory,
    pub from: Vec3,
    pub to: Vec3,
    pub color: Vec4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugCircle {
    pub category: DebugCategory,
    pub center: Vec3,
    pub radius: f32,
    pub normal: Vec3,
    pub color: Vec4,
}

/// A [`DebugDraw`] sink that records primitives for later rendering.
#[derive(Debug, Default, Clone)]
pub struct DebugBuffer {
    pub lines: Vec<DebugLine>,
    pub circles: Vec<DebugCircle>,
}

impl DebugBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.circles.clear();
    }
}

impl DebugDraw for DebugBuffer {
    fn draw_line(&mut self, category: DebugCategory, from: Vec3, to: Vec3, color: Vec4) {
        self.lines.push(DebugLine {
            category,
            from,
            to,
            color,
        });
    }

    fn draw_circle(
        &mut self,
        category: DebugCategory,
        center: Vec3,
        radius: f32,
        normal: Vec3,
        color: Vec4,
    ) {
        self.circles.push(DebugCircle {
            category,
            center,
            radius,
            normal,
            color,
        });
    }
}

/// Outline color per body type.
pub fn body_type_color(body_type: RigidBodyType) -> Vec4 {
    match body_type {
        RigidBodyType::Static => Vec4::new(0.0, 1.0, 0.0, 1.0),
        RigidBodyType::Dynamic => Vec4::new(1.0, 0.0, 1.0, 1.0),
        RigidBodyType::Kinematic => Vec4::new(1.0, 0.0, 0.0, 1.0),
    }
}

/// Draw one collider at its body's current pose.
pub fn draw_collider(sink: &mut impl DebugDraw, rb: &RigidBody, collider: &Collider) {
    let category = DebugCategory::Physics;
    let color = body_type_color(rb.body_type);
    let at = |p: Vec2| p.extend(SHAPE_Z);

    match collider {
        Collider::Disk { radius } => {
            sink.draw_circle(category, at(rb.position), *radius, Vec3::Z, color);
            let spoke = rotate_counter_clockwise(Vec2::new(*radius, 0.0), rb.angle);
            sink.draw_line(category, at(rb.position), at(rb.position + spoke), color);
        }
        Collider::Capsule { radius, height } => {
            let (p1, p2) = capsule_endpoints(rb.position, rb.angle, *height);
            let side = rotate_counter_clockwise(Vec2::new(*radius, 0.0), rb.angle);
            sink.draw_circle(category, at(p1), *radius, Vec3::Z, color);
            sink.draw_circle(category, at(p2), *radius, Vec3::Z, color);
            sink.draw_line(category, at(p1 - side), at(p2 - side), color);
            sink.draw_line(category, at(p1 + side), at(p2 + side), color);
        }
        Collider::Polygon(polygon) => {
            let points = polygon.local_points();
            let n = points.len();
            let world = |i: usize| rb.position + rotate_counter_clockwise(points[i % n], rb.angle);
            for i in 0..n {
                sink.draw_circle(
                    category,
                    at(world(i)),
                    VERTEX_MARKER_RADIUS,
                    Vec3::Z,
                    color,
                );
                sink.draw_line(category, at(world(i)), at(world(i + 1)), color);
            }
        }
    }
}

/// Draw the contacts a body registered during the last step.
pub fn draw_contacts(sink: &mut impl DebugDraw, rb: &RigidBody) {
    let category = DebugCategory::Contacts;
    for collision in rb.collisions() {
        let point = collision.contact_point.extend(CONTACT_Z);
        sink.draw_circle(
            category,
            point,
            CONTACT_MARKER_RADIUS,
            Vec3::Z,
            CONTACT_COLOR,
        );
        sink.draw_line(
            category,
            point,
            (collision.contact_point + collision.normal).extend(CONTACT_Z),
            CONTACT_COLOR,
        );
    }
}

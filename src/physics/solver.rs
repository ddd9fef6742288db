//! Contact resolution: positional correction followed by one velocity impulse.

use crate::ecs::components::physics::{Collider, RigidBody, RigidBodyType};
use crate::geometry2d::perpendicular;

use super::contact::{CollisionData, ContactInfo};

/// Push two overlapping bodies apart and exchange a contact impulse.
///
/// `contact.normal` must point away from body 2. Only dynamic bodies move; a
/// pair without any dynamic body is left untouched. Polygon colliders get
/// their world geometry refreshed right after displacement so later pairs in
/// the same pass see the corrected pose.
pub fn resolve_collision(
    contact: &ContactInfo,
    body1: &mut RigidBody,
    collider1: &mut Collider,
    body2: &mut RigidBody,
    collider2: &mut Collider,
) {
    let dynamic1 = body1.body_type == RigidBodyType::Dynamic;
    let dynamic2 = body2.body_type == RigidBodyType::Dynamic;
    if !dynamic1 && !dynamic2 {
        return;
    }

    let m1 = body1.inv_mass();
    let m2 = body2.inv_mass();
    let total_inv_mass = m1 + m2;
    if total_inv_mass <= 0.0 {
        return;
    }

    // Positional correction, split by inverse mass.
    let dist = contact.normal * (contact.depth / total_inv_mass);
    if dynamic1 {
        body1.position += dist * m1;
        collider1.update_world_geometry(body1.position, body1.angle);
    }
    if dynamic2 {
        body2.position -= dist * m2;
        collider2.update_world_geometry(body2.position, body2.angle);
    }

    let perp1 = perpendicular(contact.point - body1.position);
    let perp2 = perpendicular(contact.point - body2.position);

    let v1 = body1.linear_velocity + perp1 * body1.angular_velocity;
    let v2 = body2.linear_velocity + perp2 * body2.angular_velocity;

    let restitution = body1.restitution.min(body2.restitution);
    let perp_dot1 = perp1.dot(contact.normal);
    let perp_dot2 = perp2.dot(contact.normal);
    let inertia_factor1 = perp_dot1 * perp_dot1 * body1.inv_moment_of_inertia();
    let inertia_factor2 = perp_dot2 * perp_dot2 * body2.inv_moment_of_inertia();

    let normal_velocity = (v1 - v2).dot(contact.normal);
    let j = -(1.0 + restitution) * normal_velocity
        / (total_inv_mass + inertia_factor1 + inertia_factor2);

    body1.apply_linear_impulse(contact.normal * j);
    body1.apply_angular_impulse(j * perp_dot1);
    body2.apply_linear_impulse(contact.normal * -j);
    body2.apply_angular_impulse(-j * perp_dot2);
}

/// Store a collision in both bodies' per-step lists, each from its own side.
///
/// Static bodies never store collisions; kinematic ones do, so game code can
/// run its own response.
pub fn register_collision(collision: CollisionData, body1: &mut RigidBody, body2: &mut RigidBody) {
    if body1.body_type != RigidBodyType::Static {
        body1.collisions.push(collision);
    }
    if body2.body_type != RigidBodyType::Static {
        body2.collisions.push(collision.mirrored());
    }
}

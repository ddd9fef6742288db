//! Per-step passes over all rigid bodies.

use glam::Vec2;

use crate::ecs::components::physics::{Collider, RigidBody, RigidBodyType};
use crate::ecs::components::transform::{GlobalTransform, Transform};

/// Recompute cached world geometry (polygon points/normals) from each body's pose.
pub fn update_world_geometry(world: &mut hecs::World) {
    for (_, (rb, collider)) in world.query_mut::<(&RigidBody, &mut Collider)>() {
        collider.update_world_geometry(rb.position, rb.angle);
    }
}

/// Apply gravity as a force (`gravity * mass`) to all dynamic bodies.
pub fn apply_gravity(world: &mut hecs::World, gravity: Vec2) {
    if gravity == Vec2::ZERO {
        return;
    }
    for (_, rb) in world.query_mut::<&mut RigidBody>() {
        if rb.body_type == RigidBodyType::Dynamic && rb.inv_mass > 0.0 {
            rb.add_force(gravity / rb.inv_mass);
        }
    }
}

/// Semi-implicit Euler step for every non-static body.
///
/// The pose before the step is kept as the previous pose for interpolation.
/// Forces and torque only change the velocities of dynamic bodies; kinematic
/// bodies move purely by their velocity.
pub fn integrate(world: &mut hecs::World, dt: f32) {
    for (_, rb) in world.query_mut::<&mut RigidBody>() {
        if rb.body_type == RigidBodyType::Static {
            continue;
        }
        integrate_body(rb, dt);
    }
}

fn integrate_body(rb: &mut RigidBody, dt: f32) {
    rb.previous_position = rb.position;
    rb.previous_angle = rb.angle;

    if rb.body_type == RigidBodyType::Dynamic {
        rb.linear_velocity += rb.force * rb.inv_mass * dt;
        if rb.rotation_enabled {
            rb.angular_velocity += rb.torque * rb.inv_moment_of_inertia * dt;
        }
    }

    rb.position += rb.linear_velocity * dt;
    if rb.rotation_enabled {
        rb.angle += rb.angular_velocity * dt;
    }
}

/// Clear force and torque accumulators on all rigid bodies.
pub fn clear_forces(world: &mut hecs::World) {
    for (_, rb) in world.query_mut::<&mut RigidBody>() {
        rb.force = Vec2::ZERO;
        rb.torque = 0.0;
    }
}

/// Drop the collisions registered during earlier steps.
pub fn clear_collisions(world: &mut hecs::World) {
    for (_, rb) in world.query_mut::<&mut RigidBody>() {
        rb.collisions.clear();
    }
}

/// Write interpolated body poses to transforms.
///
/// `alpha` blends linearly between the previous and current fixed-step pose
/// (angle included). Static bodies are not written. `GlobalTransform` is
/// refreshed for every entity that has one.
pub fn sync_transforms(world: &mut hecs::World, alpha: f32) {
    for (_, (rb, transform)) in world.query_mut::<(&RigidBody, &mut Transform)>() {
        if rb.body_type == RigidBodyType::Static {
            continue;
        }
        transform.set_translation_2d(rb.previous_position.lerp(rb.position, alpha));
        transform.set_rotation_2d(rb.previous_angle + (rb.angle - rb.previous_angle) * alpha);
    }

    for (_, (transform, global)) in world.query_mut::<(&Transform, &mut GlobalTransform)>() {
        global.0 = transform.to_matrix();
    }
}

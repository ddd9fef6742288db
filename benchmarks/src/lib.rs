//! Shared setup helpers for rein2d benchmarks.
//!
//! ## Running
//!
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- narrowphase

use glam::Vec2;
use rein2d::ecs::components::physics::{Collider, RigidBody, RigidBodyType};
use rein2d::ecs::components::transform::Transform;
use rein2d::physics::{PhysicsConfig, PhysicsWorld};

fn spawn(world: &mut hecs::World, rb: RigidBody, collider: Collider) -> hecs::Entity {
    world.spawn((Transform::from_position_2d(rb.position()), rb, collider))
}

/// Square polygon points (counter-clockwise) centered on the origin.
pub fn square_points(half: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
}

/// Outward normals matching [`square_points`].
pub fn square_normals() -> Vec<Vec2> {
    vec![-Vec2::Y, Vec2::X, Vec2::Y, -Vec2::X]
}

/// Square points translated to `center`.
pub fn square_at(center: Vec2, half: f32) -> Vec<Vec2> {
    square_points(half).into_iter().map(|p| p + center).collect()
}

/// `n` dynamic disks in a grid with spacing 1.5 so neighbours overlap.
pub fn setup_disk_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = (n as f32).sqrt().ceil() as usize;

    for i in 0..n {
        let pos = Vec2::new((i % cols) as f32 * 1.5, (i / cols) as f32 * 1.5);
        let collider = Collider::Disk { radius: 1.0 };
        let rb = RigidBody::new_dynamic(&collider).with_position(pos);
        spawn(&mut world, rb, collider);
    }
    world
}

/// Static ground box plus `n` dynamic bodies cycling through disks, capsules
/// and boxes above it.
pub fn setup_scene(n: usize) -> (hecs::World, PhysicsWorld) {
    let mut world = hecs::World::new();
    let physics = PhysicsWorld::new(PhysicsConfig {
        gravity: Vec2::new(0.0, -9.81),
        ..Default::default()
    })
    .expect("default timestep is valid");

    let width = (n as f32).sqrt().ceil() * 1.2 + 4.0;
    let ground = Collider::rectangle(width, 1.0).expect("ground dimensions are positive");
    spawn(
        &mut world,
        RigidBody::new_static().with_position(Vec2::new(0.0, -0.5)),
        ground,
    );

    let cols = (n as f32).sqrt().ceil() as usize;
    for i in 0..n {
        let pos = Vec2::new(
            ((i % cols) as f32 - cols as f32 * 0.5) * 1.2,
            1.0 + (i / cols) as f32 * 1.2,
        );
        let collider = match i % 3 {
            0 => Collider::Disk { radius: 0.5 },
            1 => Collider::Capsule {
                radius: 0.25,
                height: 0.5,
            },
            _ => Collider::rectangle(0.8, 0.8).expect("box dimensions are positive"),
        };
        let rb = RigidBody::new(RigidBodyType::Dynamic, &collider, 1.0, 0.2)
            .expect("density is positive")
            .with_position(pos)
            .with_rotation_enabled(true);
        spawn(&mut world, rb, collider);
    }

    (world, physics)
}

/// `n` static bodies spread along the x axis for query benchmarks.
pub fn setup_query_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    for i in 0..n {
        let pos = Vec2::new(i as f32 * 3.0, (i % 5) as f32 - 2.0);
        let collider = match i % 3 {
            0 => Collider::Disk { radius: 1.0 },
            1 => Collider::Capsule {
                radius: 0.5,
                height: 1.0,
            },
            _ => Collider::rectangle(1.5, 1.5).expect("box dimensions are positive"),
        };
        spawn(&mut world, RigidBody::new_static().with_position(pos), collider);
    }
    world
}

//! rein2d: fixed-timestep 2D rigid body physics on hecs.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **geometry2d** - Vector, segment and polygon helpers; polygon triangulation (feature = "triangulation")
//! 2. **ecs** - Components: `RigidBody`, `Collider`, `Transform`
//! 3. **physics** - Fixed-step world, narrowphase, impulse solver, spatial queries, debug drawing
//!
//! ```no_run
//! use rein2d::{Collider, PhysicsConfig, PhysicsWorld, RigidBody};
//! use rein2d::glam::Vec2;
//!
//! let mut world = hecs::World::new();
//! let mut physics = PhysicsWorld::new(PhysicsConfig {
//!     gravity: Vec2::new(0.0, -9.81),
//!     ..Default::default()
//! })?;
//!
//! let ball = Collider::disk(0.5)?;
//! world.spawn((RigidBody::new_dynamic(&ball).with_position(Vec2::new(0.0, 5.0)), ball));
//! world.spawn((RigidBody::new_static(), Collider::rectangle(10.0, 1.0)?));
//!
//! physics.update(&mut world, 1.0 / 60.0);
//! # Ok::<(), rein2d::PhysicsError>(())
//! ```

pub mod ecs;
pub mod error;
pub mod geometry2d;
pub mod physics;

pub use ecs::prelude::*;
pub use error::PhysicsError;
pub use physics::contact::{CollisionData, RaycastResult};
pub use physics::debug::{DebugCategory, DebugDraw};
pub use physics::{PhysicsConfig, PhysicsWorld};

// Re-export glam and hecs for convenience
pub use glam;
pub use hecs;

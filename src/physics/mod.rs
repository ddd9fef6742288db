//! Fixed-timestep 2D rigid body physics.
//!
//! # Architecture
//!
//! [`PhysicsWorld::update`] accumulates frame time and runs zero or more fixed
//! steps. Each step:
//!
//! 1. Refresh polygon world geometry
//! 2. Apply forces (gravity)
//! 3. Integrate velocities, then positions (semi-implicit Euler)
//! 4. Refresh polygon world geometry
//! 5. All-pairs narrowphase; every contact is resolved and registered immediately
//! 6. Clear force accumulators
//!
//! After stepping, transforms receive the pose interpolated between the last
//! two steps.
//!
//! Contacts are resolved one pair at a time, so later pairs see the
//! corrections of earlier ones. Pairs are visited per shape type (disks, then
//! capsules, then polygons as the first body) and in ascending entity id, which
//! keeps results reproducible for the same scene.

pub mod collider;
pub mod contact;
pub mod debug;
pub mod narrowphase;
pub mod raycast;
pub mod rigid_body;
pub mod solver;

use glam::Vec2;

use crate::ecs::components::physics::{Collider, RigidBody, RigidBodyType};
use crate::error::PhysicsError;

use self::collider::capsule_endpoints;
use self::contact::{CollisionData, RayHit, RaycastResult};
use self::debug::{DebugCategory, DebugDraw};
use self::narrowphase::detect_collision;

/// Number of catch-up steps in a single update above which a warning is logged.
const CATCH_UP_WARNING_STEPS: u32 = 8;

/// Configuration for the physics simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Gravity acceleration. Default: (0, 0).
    pub gravity: Vec2,
    /// Fixed timestep for physics updates in seconds. Default: 1/60.
    pub fixed_timestep: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::ZERO,
            fixed_timestep: 1.0 / 60.0,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(PhysicsError::InvalidTimestep(self.fixed_timestep));
        }
        Ok(())
    }
}

/// The main physics world managing simulation state.
///
/// Bodies live in a [`hecs::World`] as `(RigidBody, Collider)` pairs, with an
/// optional `Transform` that receives the interpolated pose.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    accumulator: f64,
    has_executed_step: bool,
    step_count: u64,
}

impl PhysicsWorld {
    /// Create a new physics world with the given configuration.
    pub fn new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self {
            config,
            accumulator: 0.0,
            has_executed_step: false,
            step_count: 0,
        })
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn fixed_delta_time(&self) -> f64 {
        self.config.fixed_timestep
    }

    /// Whether the last [`update`](Self::update) call ran at least one fixed step.
    pub fn has_executed_step(&self) -> bool {
        self.has_executed_step
    }

    /// Total number of fixed steps run so far.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Advance the simulation by `delta_time` seconds of real time.
    ///
    /// Runs as many fixed steps as fit in the accumulated time, then writes the
    /// interpolated pose of every moving body to its `Transform`. Collisions
    /// from the previous update are cleared only when a step is about to run.
    /// Clamping large frame times is the caller's job.
    pub fn update(&mut self, world: &mut hecs::World, delta_time: f64) {
        let fixed = self.config.fixed_timestep;
        self.has_executed_step = false;

        if delta_time.is_finite() && delta_time > 0.0 {
            self.accumulator += delta_time;
        } else if delta_time != 0.0 {
            tracing::warn!("ignoring invalid physics delta time {}", delta_time);
        }

        if self.accumulator >= fixed {
            rigid_body::clear_collisions(world);
        }

        let mut steps = 0u32;
        while self.accumulator >= fixed {
            self.fixed_step(world, fixed as f32);
            self.accumulator -= fixed;
            steps += 1;
        }

        if steps >= CATCH_UP_WARNING_STEPS {
            tracing::warn!(
                "physics ran {} catch-up steps in one update (delta time {:.4}s)",
                steps,
                delta_time
            );
        } else if steps > 1 {
            tracing::debug!("physics ran {} catch-up steps", steps);
        }
        self.has_executed_step = steps > 0;

        let alpha = (self.accumulator / fixed) as f32;
        rigid_body::sync_transforms(world, alpha);
    }

    fn fixed_step(&mut self, world: &mut hecs::World, dt: f32) {
        rigid_body::update_world_geometry(world);
        rigid_body::apply_gravity(world, self.config.gravity);
        rigid_body::integrate(world, dt);
        rigid_body::update_world_geometry(world);
        let (bodies, contacts) = resolve_collisions(world);
        rigid_body::clear_forces(world);

        tracing::trace!(
            "physics step {}: {} bodies, {} contacts",
            self.step_count,
            bodies,
            contacts
        );
        self.step_count += 1;
    }

    /// All entities whose collider overlaps the disk at `position` with `radius`.
    ///
    /// Results are grouped by shape type (disks, then capsules, then polygons)
    /// and in ascending entity id within each group.
    pub fn get_all_objects_in_range(
        &self,
        world: &hecs::World,
        position: Vec2,
        radius: f32,
    ) -> Vec<hecs::Entity> {
        let mut query = world.query::<(&RigidBody, &Collider)>();
        let mut scratch = Vec::new();

        sorted_by_shape(query.iter().collect())
            .into_iter()
            .filter(|(_, (rb, collider))| match collider {
                Collider::Disk { radius: r } => {
                    narrowphase::disk_disk(position, radius, rb.position, *r).is_some()
                }
                Collider::Capsule { radius: r, height } => {
                    let (a, b) = capsule_endpoints(rb.position, rb.angle, *height);
                    narrowphase::disk_capsule(position, radius, a, b, *r).is_some()
                }
                Collider::Polygon(polygon) => {
                    polygon.world_points_at(rb.position, rb.angle, &mut scratch);
                    narrowphase::disk_polygon(position, radius, &scratch).is_some()
                }
            })
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Nearest body hit by the ray `origin + direction * t`, `t > 0`.
    pub fn raycast_get_nearest(
        &self,
        world: &hecs::World,
        origin: Vec2,
        direction: Vec2,
    ) -> Option<RaycastResult> {
        self.raycast_get_all(world, origin, direction)
            .into_iter()
            .next()
    }

    /// Every body hit by the ray, nearest first. Equal distances keep the
    /// shape-type then entity id order of [`get_all_objects_in_range`](Self::get_all_objects_in_range).
    pub fn raycast_get_all(
        &self,
        world: &hecs::World,
        origin: Vec2,
        direction: Vec2,
    ) -> Vec<RaycastResult> {
        let mut query = world.query::<(&RigidBody, &Collider)>();
        let mut scratch = Vec::new();

        let mut results: Vec<RaycastResult> = sorted_by_shape(query.iter().collect())
            .into_iter()
            .filter_map(|(entity, (rb, collider))| {
                raycast_body(origin, direction, rb, collider, &mut scratch)
                    .map(|hit| RaycastResult::new(entity, hit))
            })
            .collect();
        // Stable sort: equal distances keep the query order.
        results.sort_by(RaycastResult::cmp_distance);
        results
    }

    /// Draw every collider and the contacts registered during the last step.
    pub fn draw_debug(&self, world: &hecs::World, sink: &mut impl DebugDraw) {
        let draw_shapes = sink.is_enabled(DebugCategory::Physics);
        let draw_contacts = sink.is_enabled(DebugCategory::Contacts);
        if !draw_shapes && !draw_contacts {
            return;
        }

        let mut query = world.query::<(&RigidBody, &Collider)>();
        for (_, (rb, collider)) in sorted_by_id(query.iter().collect()) {
            if draw_shapes {
                debug::draw_collider(sink, rb, collider);
            }
            if draw_contacts {
                debug::draw_contacts(sink, rb);
            }
        }
    }
}

fn sorted_by_id<T>(mut items: Vec<(hecs::Entity, T)>) -> Vec<(hecs::Entity, T)> {
    items.sort_by_key(|(entity, _)| entity.id());
    items
}

/// Query order: shape type first, then entity id.
fn sorted_by_shape<'a>(
    mut items: Vec<(hecs::Entity, (&'a RigidBody, &'a Collider))>,
) -> Vec<(hecs::Entity, (&'a RigidBody, &'a Collider))> {
    items.sort_by_key(|(entity, (_, collider))| (shape_rank(collider), entity.id()));
    items
}

fn raycast_body(
    origin: Vec2,
    direction: Vec2,
    rb: &RigidBody,
    collider: &Collider,
    scratch: &mut Vec<Vec2>,
) -> Option<RayHit> {
    match collider {
        Collider::Disk { radius } => raycast::ray_disk(origin, direction, rb.position, *radius),
        Collider::Capsule { radius, height } => {
            let (a, b) = capsule_endpoints(rb.position, rb.angle, *height);
            raycast::ray_capsule(origin, direction, a, b, *radius)
        }
        Collider::Polygon(polygon) => {
            polygon.world_points_at(rb.position, rb.angle, scratch);
            raycast::ray_polygon(origin, direction, scratch)
        }
    }
}

/// Order in which shape types are visited as the first body of a pair.
fn shape_rank(collider: &Collider) -> u8 {
    match collider {
        Collider::Disk { .. } => 0,
        Collider::Capsule { .. } => 1,
        Collider::Polygon(_) => 2,
    }
}

fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Detect, resolve and register all contacts of one fixed step.
///
/// Returns the number of bodies and contacts.
fn resolve_collisions(world: &mut hecs::World) -> (usize, usize) {
    let mut bodies: Vec<(hecs::Entity, (&mut RigidBody, &mut Collider))> = world
        .query_mut::<(&mut RigidBody, &mut Collider)>()
        .into_iter()
        .collect();
    bodies.sort_by_key(|(entity, _)| entity.id());

    let ranks: Vec<u8> = bodies
        .iter()
        .map(|(_, (_, collider))| shape_rank(collider))
        .collect();

    // Each unordered pair once: the lower shape rank goes first, same-type
    // pairs go in ascending entity id.
    let mut pairs = Vec::new();
    for first_rank in 0..3u8 {
        for i in (0..bodies.len()).filter(|&i| ranks[i] == first_rank) {
            for second_rank in first_rank..3u8 {
                pairs.extend(
                    (0..bodies.len())
                        .filter(|&j| ranks[j] == second_rank && (second_rank > first_rank || j > i))
                        .map(|j| (i, j)),
                );
            }
        }
    }

    let mut contacts = 0;
    for (i, j) in pairs {
        let ((entity1, (rb1, c1)), (entity2, (rb2, c2))) = pair_mut(&mut bodies, i, j);
        if rb1.body_type == RigidBodyType::Static && rb2.body_type == RigidBodyType::Static {
            continue;
        }

        let shape1 = c1.world_shape(rb1.position, rb1.angle);
        let shape2 = c2.world_shape(rb2.position, rb2.angle);
        let Some(info) = detect_collision(&shape1, &shape2) else {
            continue;
        };

        solver::resolve_collision(&info, rb1, c1, rb2, c2);
        solver::register_collision(CollisionData::new(*entity1, *entity2, info), rb1, rb2);
        tracing::debug!(
            "resolved contact {:?} -> {:?}, depth {}",
            entity1,
            entity2,
            info.depth
        );
        contacts += 1;
    }

    (bodies.len(), contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::transform::Transform;
    use glam::Vec3;

    const STEP: f64 = 1.0 / 60.0;

    fn physics_with_gravity(gravity: Vec2) -> PhysicsWorld {
        PhysicsWorld::new(PhysicsConfig {
            gravity,
            fixed_timestep: STEP,
        })
        .unwrap()
    }

    fn spawn(world: &mut hecs::World, rb: RigidBody, collider: Collider) -> hecs::Entity {
        let transform = Transform::from_position_2d(rb.position());
        world.spawn((transform, rb, collider))
    }

    /// A small mixed scene: ground box, a few falling shapes of every type.
    fn build_scene(world: &mut hecs::World) -> Vec<hecs::Entity> {
        let ground = Collider::rectangle(20.0, 1.0).unwrap();
        let mut entities = vec![spawn(
            world,
            RigidBody::new_static().with_position(Vec2::new(0.0, -0.5)),
            ground,
        )];

        for i in 0..3 {
            let disk = Collider::disk(0.5).unwrap();
            let rb = RigidBody::new(RigidBodyType::Dynamic, &disk, 1.0, 0.3)
                .unwrap()
                .with_position(Vec2::new(-2.0 + i as f32 * 0.6, 2.0 + i as f32 * 1.1))
                .with_rotation_enabled(true);
            entities.push(spawn(world, rb, disk));
        }

        let capsule = Collider::capsule(0.3, 1.0).unwrap();
        let rb = RigidBody::new_dynamic(&capsule)
            .with_restitution(0.2)
            .with_position(Vec2::new(1.0, 3.0))
            .with_rotation(0.4)
            .with_rotation_enabled(true);
        entities.push(spawn(world, rb, capsule));

        let crate_box = Collider::rectangle(1.0, 1.0).unwrap();
        let rb = RigidBody::new(RigidBodyType::Dynamic, &crate_box, 2.0, 0.1)
            .unwrap()
            .with_position(Vec2::new(0.7, 5.0))
            .with_rotation(0.2)
            .with_rotation_enabled(true);
        entities.push(spawn(world, rb, crate_box));

        entities
    }

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, Vec2::ZERO);
        assert!((config.fixed_timestep - 1.0 / 60.0).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_timestep_rejected() {
        for fixed_timestep in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = PhysicsWorld::new(PhysicsConfig {
                gravity: Vec2::ZERO,
                fixed_timestep,
            });
            assert!(
                matches!(result, Err(PhysicsError::InvalidTimestep(_))),
                "timestep {fixed_timestep} should be rejected"
            );
        }
    }

    #[test]
    fn test_disk_drops_onto_static_disk() {
        let mut world = hecs::World::new();
        let mut physics = physics_with_gravity(Vec2::new(0.0, -10.0));

        let ball_collider = Collider::disk(1.0).unwrap();
        let ball = RigidBody::new(RigidBodyType::Dynamic, &ball_collider, 1.0, 0.5)
            .unwrap()
            .with_position(Vec2::new(0.0, 10.0));
        let ball = spawn(&mut world, ball, ball_collider);
        let floor = spawn(
            &mut world,
            RigidBody::new_static(),
            Collider::disk(1.0).unwrap(),
        );

        let mut hit = None;
        for _ in 0..600 {
            physics.update(&mut world, STEP);
            let rb = world.get::<&RigidBody>(ball).unwrap();
            if let Some(collision) = rb.collisions().first() {
                hit = Some((*collision, rb.linear_velocity()));
                break;
            }
        }

        let (collision, velocity) = hit.expect("ball never touched the floor");
        assert_eq!(collision.entity1, ball);
        assert_eq!(collision.entity2, floor);
        assert!(collision.depth > 0.0, "depth = {}", collision.depth);
        assert!(
            (collision.normal - Vec2::Y).length() < 1e-4,
            "normal = {:?}",
            collision.normal
        );
        assert!(velocity.y >= 0.0, "ball should bounce, v = {velocity:?}");
        assert!(world.get::<&RigidBody>(floor).unwrap().collisions().is_empty());
    }

    #[test]
    fn test_free_fall_matches_semi_implicit_euler() {
        let mut world = hecs::World::new();
        let mut physics = physics_with_gravity(Vec2::new(0.0, -10.0));
        let collider = Collider::disk(0.5).unwrap();
        let e = spawn(&mut world, RigidBody::new_dynamic(&collider), collider);

        for _ in 0..60 {
            physics.update(&mut world, STEP);
        }

        let rb = world.get::<&RigidBody>(e).unwrap();
        let h = STEP as f32;
        // y_n = -g h^2 n (n + 1) / 2
        let expected = -10.0 * h * h * 60.0 * 61.0 / 2.0;
        assert!(
            (rb.position().y - expected).abs() < 1e-3,
            "y = {}, expected {}",
            rb.position().y,
            expected
        );
        assert!((rb.linear_velocity().y + 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_gravity_by_default() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let collider = Collider::disk(0.5).unwrap();
        let e = spawn(
            &mut world,
            RigidBody::new_dynamic(&collider).with_position(Vec2::new(1.0, 1.0)),
            collider,
        );

        for _ in 0..30 {
            physics.update(&mut world, STEP);
        }

        assert_eq!(world.get::<&RigidBody>(e).unwrap().position(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_set_gravity() {
        let mut physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        physics.set_gravity(Vec2::new(0.0, -9.81));
        assert_eq!(physics.gravity(), Vec2::new(0.0, -9.81));
        assert_eq!(physics.fixed_delta_time(), 1.0 / 60.0);
    }

    #[test]
    fn test_determinism() {
        let frame_times = [STEP, 0.5 * STEP, 2.3 * STEP, STEP, 0.1 * STEP, 3.0 * STEP];

        let run = || {
            let mut world = hecs::World::new();
            let mut physics = physics_with_gravity(Vec2::new(0.0, -9.81));
            let entities = build_scene(&mut world);
            for i in 0..200 {
                physics.update(&mut world, frame_times[i % frame_times.len()]);
            }
            entities
                .iter()
                .map(|e| {
                    let rb = world.get::<&RigidBody>(*e).unwrap();
                    (rb.position(), rb.rotation(), rb.linear_velocity())
                })
                .collect::<Vec<_>>()
        };

        let first = run();
        let second = run();
        assert_eq!(first, second);
    }

    #[test]
    fn test_static_bodies_never_move() {
        let mut world = hecs::World::new();
        let mut physics = physics_with_gravity(Vec2::new(0.0, -9.81));
        let entities = build_scene(&mut world);
        let ground = entities[0];
        let (position, rotation) = {
            let rb = world.get::<&RigidBody>(ground).unwrap();
            (rb.position(), rb.rotation())
        };

        let mut touched = false;
        for _ in 0..300 {
            physics.update(&mut world, STEP);
            let rb = world.get::<&RigidBody>(ground).unwrap();
            assert_eq!(rb.position(), position);
            assert_eq!(rb.rotation(), rotation);
            assert_eq!(rb.linear_velocity(), Vec2::ZERO);
            assert_eq!(rb.angular_velocity(), 0.0);
            assert!(rb.collisions().is_empty());

            touched |= entities[1..].iter().any(|e| {
                world
                    .get::<&RigidBody>(*e)
                    .unwrap()
                    .collisions()
                    .iter()
                    .any(|c| c.entity2 == ground)
            });
        }
        assert!(touched, "nothing ever landed on the ground");
    }

    #[test]
    fn test_bodies_rest_on_ground() {
        let mut world = hecs::World::new();
        let mut physics = physics_with_gravity(Vec2::new(0.0, -9.81));
        let entities = build_scene(&mut world);
        // Contacts have no friction, so walls keep bodies from sliding off the ends.
        for x in [-6.0, 6.0] {
            spawn(
                &mut world,
                RigidBody::new_static().with_position(Vec2::new(x, 4.5)),
                Collider::rectangle(1.0, 10.0).unwrap(),
            );
        }

        for _ in 0..600 {
            physics.update(&mut world, STEP);
        }

        for e in &entities[1..] {
            let position = world.get::<&RigidBody>(*e).unwrap().position();
            assert!(
                position.y > -0.5,
                "body {e:?} fell through the ground: {position:?}"
            );
            assert!(
                position.x.abs() < 5.5,
                "body {e:?} left the walled area: {position:?}"
            );
        }
    }

    #[test]
    fn test_transform_interpolation() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let collider = Collider::disk(0.5).unwrap();
        let e = world.spawn((
            Transform::from_position(Vec3::new(0.0, 0.0, 3.0)),
            RigidBody::new_kinematic(&collider).with_linear_velocity(Vec2::new(1.0, 0.0)),
            collider,
        ));

        physics.update(&mut world, 1.5 * STEP);
        assert!(physics.has_executed_step());
        {
            let transform = world.get::<&Transform>(e).unwrap();
            let expected = 0.5 * STEP as f32;
            assert!(
                (transform.position.x - expected).abs() < 1e-5,
                "x = {}, expected {}",
                transform.position.x,
                expected
            );
            assert_eq!(transform.position.z, 3.0);
        }

        physics.update(&mut world, 0.25 * STEP);
        assert!(!physics.has_executed_step());
        let transform = world.get::<&Transform>(e).unwrap();
        let expected = 0.75 * STEP as f32;
        assert!((transform.position.x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_catch_up_steps() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        physics.update(&mut world, 3.5 * STEP);
        assert_eq!(physics.step_count(), 3);
        physics.update(&mut world, 0.6 * STEP);
        assert_eq!(physics.step_count(), 4);
        physics.update(&mut world, -1.0);
        assert_eq!(physics.step_count(), 4);
        assert!(!physics.has_executed_step());
    }

    #[test]
    fn test_collisions_survive_updates_without_steps() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let collider = Collider::disk(1.0).unwrap();
        let a = spawn(&mut world, RigidBody::new_dynamic(&collider), collider.clone());
        spawn(
            &mut world,
            RigidBody::new_dynamic(&collider).with_position(Vec2::new(1.5, 0.0)),
            collider,
        );

        physics.update(&mut world, STEP);
        assert_eq!(world.get::<&RigidBody>(a).unwrap().collisions().len(), 1);

        physics.update(&mut world, 0.1 * STEP);
        assert_eq!(world.get::<&RigidBody>(a).unwrap().collisions().len(), 1);
    }

    #[test]
    fn test_kinematic_registers_but_does_not_resolve_against_static() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let collider = Collider::disk(1.0).unwrap();
        let mover = spawn(
            &mut world,
            RigidBody::new_kinematic(&collider).with_linear_velocity(Vec2::new(1.0, 0.0)),
            collider,
        );
        let wall = spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(1.5, 0.0)),
            Collider::rectangle(1.0, 4.0).unwrap(),
        );

        physics.update(&mut world, STEP);

        let rb = world.get::<&RigidBody>(mover).unwrap();
        assert_eq!(rb.collisions().len(), 1);
        assert_eq!(rb.collisions()[0].entity2, wall);
        assert_eq!(rb.linear_velocity(), Vec2::new(1.0, 0.0));
        let expected_x = STEP as f32;
        assert!((rb.position().x - expected_x).abs() < 1e-6);
    }

    #[test]
    fn test_raycast_queries() {
        let mut world = hecs::World::new();
        let physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let disk = spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(5.0, 0.0)),
            Collider::disk(1.0).unwrap(),
        );
        let wall = spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(10.0, 0.0)),
            Collider::rectangle(2.0, 2.0).unwrap(),
        );
        let capsule = spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(-4.0, 0.0)),
            Collider::capsule(0.5, 2.0).unwrap(),
        );

        let nearest = physics
            .raycast_get_nearest(&world, Vec2::ZERO, Vec2::X)
            .expect("ray should hit the disk");
        assert_eq!(nearest.hit_entity, disk);
        assert!((nearest.ray_distance - 4.0).abs() < 1e-4);
        assert!((nearest.hit_position - Vec2::new(4.0, 0.0)).length() < 1e-4);
        assert!((nearest.normal + Vec2::X).length() < 1e-4);

        let all = physics.raycast_get_all(&world, Vec2::ZERO, Vec2::X);
        let hit_entities: Vec<_> = all.iter().map(|r| r.hit_entity).collect();
        assert_eq!(hit_entities, vec![disk, wall]);
        assert!((all[1].ray_distance - 9.0).abs() < 1e-4);
        assert!(all.iter().all(RaycastResult::is_valid));

        let behind = physics.raycast_get_nearest(&world, Vec2::ZERO, -Vec2::X).unwrap();
        assert_eq!(behind.hit_entity, capsule);
        assert!((behind.ray_distance - 3.5).abs() < 1e-4);

        assert!(physics.raycast_get_nearest(&world, Vec2::ZERO, Vec2::Y).is_none());
        assert!(physics.raycast_get_all(&world, Vec2::ZERO, Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_range_query() {
        let mut world = hecs::World::new();
        let physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let near_disk = spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(2.0, 0.0)),
            Collider::disk(0.5).unwrap(),
        );
        spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(10.0, 0.0)),
            Collider::disk(0.5).unwrap(),
        );
        // Rotated so its core lies along X, 2.3 below the query center.
        let capsule = spawn(
            &mut world,
            RigidBody::new_static()
                .with_position(Vec2::new(0.0, -2.3))
                .with_rotation(std::f32::consts::FRAC_PI_2),
            Collider::capsule(0.5, 4.0).unwrap(),
        );
        let polygon = spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(-2.5, 0.0)),
            Collider::rectangle(2.0, 2.0).unwrap(),
        );

        let found = physics.get_all_objects_in_range(&world, Vec2::ZERO, 2.0);
        assert_eq!(found, vec![near_disk, capsule, polygon]);

        assert!(physics
            .get_all_objects_in_range(&world, Vec2::new(0.0, 50.0), 1.0)
            .is_empty());
    }

    #[test]
    fn test_range_query_groups_by_shape() {
        let mut world = hecs::World::new();
        let physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let polygon = spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(-1.0, 0.0)),
            Collider::rectangle(1.0, 1.0).unwrap(),
        );
        let capsule = spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(0.0, 1.0)),
            Collider::capsule(0.25, 0.5).unwrap(),
        );
        let disk = spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(1.0, 0.0)),
            Collider::disk(0.5).unwrap(),
        );

        let found = physics.get_all_objects_in_range(&world, Vec2::ZERO, 1.0);
        assert_eq!(found, vec![disk, capsule, polygon]);
    }

    #[test]
    fn test_draw_debug() {
        let mut world = hecs::World::new();
        let physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        spawn(
            &mut world,
            RigidBody::new_static(),
            Collider::disk(1.0).unwrap(),
        );
        spawn(
            &mut world,
            RigidBody::new_static().with_position(Vec2::new(5.0, 0.0)),
            Collider::rectangle(1.0, 1.0).unwrap(),
        );

        let mut buffer = debug::DebugBuffer::new();
        physics.draw_debug(&world, &mut buffer);
        assert_eq!(buffer.circles.len(), 1 + 4);
        assert_eq!(buffer.lines.len(), 1 + 4);
    }
}

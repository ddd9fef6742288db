//! Physics components for ECS entities.

use glam::Vec2;

use crate::error::{ensure_positive, PhysicsError};
use crate::geometry2d::{perp_dot, perpendicular, signed_area_doubled};
use crate::physics::contact::CollisionData;

/// Rigid body type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RigidBodyType {
    /// Immovable, as if it had infinite mass.
    Static,
    /// Affected by forces and collisions.
    Dynamic,
    /// Moves purely according to its velocity; ignores forces and impulses.
    Kinematic,
}

/// Rigid body component.
///
/// Holds the simulated pose (current and previous fixed step, for render
/// interpolation), velocities, accumulated force/torque, and the collisions
/// registered against this body during the last fixed step.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub(crate) body_type: RigidBodyType,
    pub(crate) inv_mass: f32,
    pub(crate) inv_moment_of_inertia: f32,
    pub(crate) restitution: f32,

    pub(crate) previous_position: Vec2,
    pub(crate) position: Vec2,
    pub(crate) previous_angle: f32,
    pub(crate) angle: f32,
    pub(crate) linear_velocity: Vec2,
    pub(crate) angular_velocity: f32,
    pub(crate) rotation_enabled: bool,
    pub(crate) force: Vec2,
    pub(crate) torque: f32,

    pub(crate) collisions: Vec<CollisionData>,
}

impl RigidBody {
    /// Create a body whose mass data is computed from `collider` and `density`.
    ///
    /// Static bodies skip the mass computation and always have zero inverse
    /// mass. `restitution` is clamped to `[0, 1]`.
    pub fn new(
        body_type: RigidBodyType,
        collider: &Collider,
        density: f32,
        restitution: f32,
    ) -> Result<Self, PhysicsError> {
        let (mass, moment_of_inertia) = if body_type == RigidBodyType::Static {
            (0.0, 0.0)
        } else {
            collider.compute_mass_data(ensure_positive("density", density)?)
        };
        Ok(Self::from_mass_data(
            body_type,
            mass,
            moment_of_inertia,
            restitution,
        ))
    }

    /// Dynamic body with unit density and full restitution.
    pub fn new_dynamic(collider: &Collider) -> Self {
        let (mass, moment_of_inertia) = collider.compute_mass_data(1.0);
        Self::from_mass_data(RigidBodyType::Dynamic, mass, moment_of_inertia, 1.0)
    }

    /// Kinematic body with unit density and full restitution.
    ///
    /// Kinematic bodies keep their mass data: it still weighs into how contact
    /// impulses are shared with the dynamic body they touch.
    pub fn new_kinematic(collider: &Collider) -> Self {
        let (mass, moment_of_inertia) = collider.compute_mass_data(1.0);
        Self::from_mass_data(RigidBodyType::Kinematic, mass, moment_of_inertia, 1.0)
    }

    /// Static body with full restitution.
    pub fn new_static() -> Self {
        Self::from_mass_data(RigidBodyType::Static, 0.0, 0.0, 1.0)
    }

    fn from_mass_data(
        body_type: RigidBodyType,
        mass: f32,
        moment_of_inertia: f32,
        restitution: f32,
    ) -> Self {
        Self {
            body_type,
            inv_mass: if mass == 0.0 { 0.0 } else { 1.0 / mass },
            inv_moment_of_inertia: if moment_of_inertia == 0.0 {
                0.0
            } else {
                1.0 / moment_of_inertia
            },
            restitution: restitution.clamp(0.0, 1.0),
            previous_position: Vec2::ZERO,
            position: Vec2::ZERO,
            previous_angle: 0.0,
            angle: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            rotation_enabled: false,
            force: Vec2::ZERO,
            torque: 0.0,
            collisions: Vec::new(),
        }
    }

    /// Builder: place the body (previous pose included).
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position, false);
        self
    }

    /// Builder: rotate the body (previous pose included).
    pub fn with_rotation(mut self, angle: f32) -> Self {
        self.set_rotation(angle, false);
        self
    }

    pub fn with_rotation_enabled(mut self, enabled: bool) -> Self {
        self.rotation_enabled = enabled;
        self
    }

    pub fn with_linear_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    pub fn body_type(&self) -> RigidBodyType {
        self.body_type
    }

    /// Inverse mass; always 0 for static bodies.
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        if self.body_type == RigidBodyType::Static {
            0.0
        } else {
            self.inv_mass
        }
    }

    /// Inverse moment of inertia; 0 while rotation is disabled.
    #[inline]
    pub fn inv_moment_of_inertia(&self) -> f32 {
        if self.rotation_enabled {
            self.inv_moment_of_inertia
        } else {
            0.0
        }
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn previous_position(&self) -> Vec2 {
        self.previous_position
    }

    /// Rotation angle in radians (counter-clockwise).
    pub fn rotation(&self) -> f32 {
        self.angle
    }

    pub fn previous_rotation(&self) -> f32 {
        self.previous_angle
    }

    pub fn linear_velocity(&self) -> Vec2 {
        self.linear_velocity
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn torque(&self) -> f32 {
        self.torque
    }

    pub fn is_rotation_enabled(&self) -> bool {
        self.rotation_enabled
    }

    /// Collisions registered against this body during the last fixed step,
    /// each seen from this body's side (`entity1` is this body's entity).
    pub fn collisions(&self) -> &[CollisionData] {
        &self.collisions
    }

    /// Move the body. With `interpolate == false` the previous pose is reset
    /// too, so the rendered transform snaps instead of sliding.
    pub fn set_position(&mut self, position: Vec2, interpolate: bool) {
        self.position = position;
        if !interpolate {
            self.previous_position = position;
        }
    }

    /// Rotate the body; see [`RigidBody::set_position`] for `interpolate`.
    pub fn set_rotation(&mut self, angle: f32, interpolate: bool) {
        self.angle = angle;
        if !interpolate {
            self.previous_angle = angle;
        }
    }

    pub fn set_linear_velocity(&mut self, velocity: Vec2) {
        self.linear_velocity = velocity;
    }

    pub fn set_angular_velocity(&mut self, velocity: f32) {
        self.angular_velocity = velocity;
    }

    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.rotation_enabled = enabled;
    }

    /// Accumulate a force for the next step. Ignored unless dynamic.
    pub fn add_force(&mut self, force: Vec2) {
        if self.body_type == RigidBodyType::Dynamic {
            self.force += force;
        }
    }

    /// Accumulate a torque for the next step. Ignored unless dynamic.
    pub fn add_torque(&mut self, torque: f32) {
        if self.body_type == RigidBodyType::Dynamic {
            self.torque += torque;
        }
    }

    /// Accumulate a force applied at a world-space point, producing torque
    /// about the body's center of mass.
    pub fn add_force_at_position(&mut self, force: Vec2, world_position: Vec2) {
        self.add_force(force);
        self.add_torque(perp_dot(world_position - self.position, force));
    }

    pub fn apply_linear_impulse(&mut self, impulse: Vec2) {
        if self.body_type == RigidBodyType::Dynamic {
            self.linear_velocity += impulse * self.inv_mass;
        }
    }

    pub fn apply_angular_impulse(&mut self, impulse: f32) {
        if self.body_type == RigidBodyType::Dynamic && self.rotation_enabled {
            self.angular_velocity += impulse * self.inv_moment_of_inertia;
        }
    }
}

/// Convex polygon collider.
///
/// Local points are relative to the body's center of mass and must be in
/// counter-clockwise order. The world-space points and normals are a cache that
/// the physics world refreshes from the body pose every fixed step.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCollider {
    pub(crate) points: Vec<Vec2>,
    pub(crate) normals: Vec<Vec2>,
    pub(crate) world_points: Vec<Vec2>,
    pub(crate) world_normals: Vec<Vec2>,
}

impl PolygonCollider {
    /// Build a polygon collider from counter-clockwise local points.
    ///
    /// The local origin is assumed to be the polygon's center of mass; mass and
    /// inertia are wrong otherwise.
    pub fn new(points: Vec<Vec2>) -> Result<Self, PhysicsError> {
        if points.len() < 3 {
            return Err(PhysicsError::TooFewPoints(points.len()));
        }
        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(PhysicsError::InvalidDimension {
                name: "polygon point",
                value: if p.x.is_finite() { p.y } else { p.x },
            });
        }

        let area = signed_area_doubled(&points);
        if area.abs() <= f32::EPSILON {
            return Err(PhysicsError::DegeneratePolygon);
        }
        if area < 0.0 {
            return Err(PhysicsError::ClockwiseWinding);
        }

        let n = points.len();
        let normals = (0..n)
            .map(|i| {
                perpendicular(points[i] - points[(i + 1) % n])
                    .try_normalize()
                    .ok_or(PhysicsError::DegenerateEdge(i))
            })
            .collect::<Result<Vec<Vec2>, _>>()?;

        Ok(Self {
            world_points: points.clone(),
            world_normals: normals.clone(),
            points,
            normals,
        })
    }

    pub fn local_points(&self) -> &[Vec2] {
        &self.points
    }

    /// Outward edge normals; normal `i` belongs to edge `i -> i + 1`.
    pub fn local_normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn world_points(&self) -> &[Vec2] {
        &self.world_points
    }

    pub fn world_normals(&self) -> &[Vec2] {
        &self.world_normals
    }
}

/// Collision shape component.
#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    /// Disk centered on the body position.
    Disk { radius: f32 },
    /// Stadium whose core segment of length `height` runs along the body's local Y axis.
    Capsule { radius: f32, height: f32 },
    Polygon(PolygonCollider),
}

impl Collider {
    pub fn disk(radius: f32) -> Result<Self, PhysicsError> {
        Ok(Self::Disk {
            radius: ensure_positive("radius", radius)?,
        })
    }

    pub fn capsule(radius: f32, height: f32) -> Result<Self, PhysicsError> {
        Ok(Self::Capsule {
            radius: ensure_positive("radius", radius)?,
            height: ensure_positive("height", height)?,
        })
    }

    pub fn polygon(points: Vec<Vec2>) -> Result<Self, PhysicsError> {
        PolygonCollider::new(points).map(Self::Polygon)
    }

    /// Axis-aligned (in local space) rectangle centered on the body.
    pub fn rectangle(width: f32, height: f32) -> Result<Self, PhysicsError> {
        let hw = ensure_positive("width", width)? * 0.5;
        let hh = ensure_positive("height", height)? * 0.5;
        Self::polygon(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    pub fn as_polygon(&self) -> Option<&PolygonCollider> {
        match self {
            Self::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut PolygonCollider> {
        match self {
            Self::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }
}

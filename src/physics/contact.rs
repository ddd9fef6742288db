//! Contact and raycast result data structures.

use std::cmp::Ordering;

use glam::Vec2;

/// Raw result of a narrow-phase test between two shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactInfo {
    /// Unit normal pointing away from shape 2, i.e. the direction in which
    /// shape 1 has to move to resolve the overlap.
    pub normal: Vec2,
    /// Penetration depth.
    pub depth: f32,
    /// Approximate contact point in world space.
    pub point: Vec2,
}

impl ContactInfo {
    /// The same contact seen from shape 2.
    pub fn mirrored(&self) -> Self {
        Self {
            normal: -self.normal,
            ..*self
        }
    }
}

/// A collision registered between two entities during a fixed step.
///
/// Every non-static body stores its own copy with `entity1` set to itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionData {
    pub entity1: hecs::Entity,
    pub entity2: hecs::Entity,
    /// Unit normal at the contact, pointing away from `entity2`'s body.
    pub normal: Vec2,
    /// Penetration depth before the bodies were pushed apart.
    pub depth: f32,
    /// Approximate contact point in world space.
    pub contact_point: Vec2,
}

impl CollisionData {
    pub fn new(entity1: hecs::Entity, entity2: hecs::Entity, info: ContactInfo) -> Self {
        Self {
            entity1,
            entity2,
            normal: info.normal,
            depth: info.depth,
            contact_point: info.point,
        }
    }

    /// The same collision from `entity2`'s point of view.
    pub fn mirrored(&self) -> Self {
        Self {
            entity1: self.entity2,
            entity2: self.entity1,
            normal: -self.normal,
            ..*self
        }
    }

    pub fn info(&self) -> ContactInfo {
        ContactInfo {
            normal: self.normal,
            depth: self.depth,
            point: self.contact_point,
        }
    }
}

/// A ray's first intersection with one shape boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub position: Vec2,
    /// Boundary normal at the hit, facing the ray origin.
    pub normal: Vec2,
    /// Ray parameter of the hit, in units of the direction vector's length.
    pub distance: f32,
}

/// Result of a raycast query against the physics world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastResult {
    pub hit_entity: hecs::Entity,
    pub hit_position: Vec2,
    pub normal: Vec2,
    /// Distance travelled until the point of impact; `<= 0` marks an invalid result.
    pub ray_distance: f32,
}

impl RaycastResult {
    pub fn new(hit_entity: hecs::Entity, hit: RayHit) -> Self {
        Self {
            hit_entity,
            hit_position: hit.position,
            normal: hit.normal,
            ray_distance: hit.distance,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.ray_distance > 0.0
    }

    /// Order by distance; valid results always sort before invalid ones.
    pub fn cmp_distance(&self, other: &Self) -> Ordering {
        match (self.is_valid(), other.is_valid()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => self.ray_distance.total_cmp(&other.ray_distance),
        }
    }
}

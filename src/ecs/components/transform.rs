//! Transform components for ECS entities.

use glam::{Mat4, Quat, Vec2, Vec3};

/// Local-space transform. Stores position, rotation, and scale separately.
///
/// 2D physics only touches the x/y components of `position` and a rotation
/// about the z axis; `position.z` (draw order / depth) is left as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform on the z = 0 plane.
    pub fn from_position_2d(position: Vec2) -> Self {
        Self::from_position(position.extend(0.0))
    }

    /// Convert to a 4x4 matrix (translation * rotation * scale).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// The x/y part of the translation.
    pub fn translation_2d(&self) -> Vec2 {
        self.position.truncate()
    }

    /// Set the x/y part of the translation, keeping z.
    pub fn set_translation_2d(&mut self, translation: Vec2) {
        self.position.x = translation.x;
        self.position.y = translation.y;
    }

    /// Replace the rotation with a rotation of `angle` radians about +Z.
    pub fn set_rotation_2d(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_z(angle);
    }

    /// Angle of the rotation about +Z, in radians.
    ///
    /// Only meaningful when the rotation is a pure z-axis rotation.
    pub fn rotation_2d(&self) -> f32 {
        let (axis, angle) = self.rotation.to_axis_angle();
        if axis.z < 0.0 {
            -angle
        } else {
            angle
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// World-space transform matrix.
#[derive(Debug, Clone, Copy)]
pub struct GlobalTransform(pub Mat4);

impl Default for GlobalTransform {
    fn default() -> Self {
        Self(Mat4::IDENTITY)
    }
}

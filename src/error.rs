//! Error types for collider construction and world configuration.

use thiserror::Error;

/// Errors raised when building colliders, bodies, or the physics world.
///
/// These cover inputs that would otherwise turn into NaN or infinite mass data
/// deep inside the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("polygon collider needs at least 3 points, got {0}")]
    TooFewPoints(usize),

    #[error("polygon collider has zero area")]
    DegeneratePolygon,

    #[error("polygon collider edge {0} has zero length")]
    DegenerateEdge(usize),

    #[error("polygon collider points must be in counter-clockwise order")]
    ClockwiseWinding,

    #[error("{name} must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("fixed timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

/// Check that a shape dimension or density is usable.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<f32, PhysicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidDimension { name, value })
    }
}

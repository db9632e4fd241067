//! Error types.

use thiserror::Error;

use crate::math::Vec3;

/// Errors raised while constructing geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The three points of a triangle are collinear or coincide.
    #[error("degenerate triangle: points {points:?} are collinear")]
    DegenerateTriangle { points: [Vec3; 3] },
}

/// Errors raised before a render starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The requested raster has no pixels or an unusable aspect ratio.
    #[error("invalid viewport: width {width} with aspect ratio {ratio}")]
    InvalidViewport { width: u32, ratio: f64 },

    /// The image plane must sit a positive, finite distance ahead of the eye.
    #[error("invalid focal distance {focal_distance}: must be positive and finite")]
    InvalidFocalDistance { focal_distance: f64 },

    /// A horizontal or vertical field of view outside `(0, pi)` radians.
    #[error("invalid field of view {fov} rad: must lie strictly between 0 and pi")]
    InvalidFieldOfView { fov: f64 },
}

//! A CPU ray-tracing renderer.
//!
//! Scenes are built from triangles, quads and boxes. Rendering casts one
//! ray per pixel from a perspective camera, keeps the nearest surface hit
//! and paints it flat, outlining edges and corners. Rows are traced in
//! parallel.
//!
//! # Quick Start
//!
//! ```no_run
//! use rustray::prelude::*;
//!
//! let engine = Engine::new();
//! engine.add(Cube::new(2.0, 1.0, 3.0)?);
//! engine.reposition_camera(|frame| frame.translate(Vec3::I * -5.0));
//! let image = engine.render(512, 1.0)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod engine;
pub mod error;
pub mod frame;
pub mod math;
pub mod render;
pub mod shape;
#[cfg(feature = "viewer")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Camera, Viewport};
pub use engine::Engine;
pub use error::{GeometryError, RenderError};
pub use frame::Frame;
pub use render::RenderConfig;
pub use shape::{Cube, EntityId, HitKind, Intersection, Quad, Shape, SurfaceColors, Triangle};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use rustray::prelude::*;
/// ```
pub mod prelude {
    // Camera & world
    pub use crate::camera::Camera;
    pub use crate::engine::Engine;
    pub use crate::frame::Frame;
    pub use crate::render::RenderConfig;

    // Shapes
    pub use crate::shape::{Cube, Quad, Shape, SurfaceColors, Triangle};

    // Math
    pub use crate::math::{Degrees, Line, Plane, Radians, Vec3};

    // Colors
    pub use crate::colors::{self, Color};

    // Errors
    pub use crate::error::{GeometryError, RenderError};
}

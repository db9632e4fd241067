//! Geometry kernel: vectors, angles, lines and planes.
//!
//! Every type here is a `Copy` value and every operation returns a new
//! value.

pub mod angle;
pub mod line;
pub mod plane;
pub mod vec2;
pub mod vec3;

pub use angle::{Degrees, Radians};
pub use line::{Line, PlaneHit};
pub use plane::Plane;
pub use vec2::Vec2;
pub use vec3::Vec3;

//! Renderable solids and ray intersection.
//!
//! The scene is made of a closed set of shapes: [`Triangle`], [`Quad`]
//! (two triangles sharing a diagonal) and [`Cube`] (six quads). [`Shape`]
//! wraps them so the renderer can intersect any of them with one call.
//!
//! All transforms are pure: `translate` and `rotate` return a new shape
//! with a fresh [`EntityId`].

mod cube;
mod quad;
mod triangle;

pub use cube::Cube;
pub use quad::Quad;
pub use triangle::{Triangle, EDGE_TOLERANCE};

use std::fmt;

use uuid::Uuid;

use crate::colors::{self, Color};
use crate::math::{Line, Radians, Vec3};

/// Identity of a renderable, assigned when the value is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where on a surface a ray landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    /// Strictly inside the surface.
    Inside,
    /// Within [`EDGE_TOLERANCE`] of one edge.
    Edge,
    /// Within [`EDGE_TOLERANCE`] of two edges, i.e. next to a vertex.
    Corner,
}

impl HitKind {
    pub fn is_boundary(self) -> bool {
        matches!(self, HitKind::Edge | HitKind::Corner)
    }
}

/// The result of a ray-surface test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Vec3,
    /// Distance from the ray origin, negative when the hit is behind it.
    pub signed_distance: f64,
    pub color: Color,
    pub kind: HitKind,
}

/// Colors a surface is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceColors {
    pub fill: Color,
    /// Used for [`HitKind::Edge`] and [`HitKind::Corner`] hits when set.
    pub edge: Option<Color>,
}

impl SurfaceColors {
    pub const fn solid(fill: Color) -> Self {
        Self { fill, edge: None }
    }

    pub const fn outlined(fill: Color, edge: Color) -> Self {
        Self {
            fill,
            edge: Some(edge),
        }
    }

    pub fn resolve(&self, kind: HitKind) -> Color {
        match self.edge {
            Some(edge) if kind.is_boundary() => edge,
            _ => self.fill,
        }
    }
}

impl Default for SurfaceColors {
    fn default() -> Self {
        Self::solid(colors::FILL)
    }
}

/// Any renderable solid.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Triangle(Triangle),
    Quad(Quad),
    Cube(Cube),
}

impl Shape {
    pub fn id(&self) -> EntityId {
        match self {
            Shape::Triangle(triangle) => triangle.id(),
            Shape::Quad(quad) => quad.id(),
            Shape::Cube(cube) => cube.id(),
        }
    }

    #[inline]
    pub fn intersect(&self, ray: &Line) -> Option<Intersection> {
        match self {
            Shape::Triangle(triangle) => triangle.intersect(ray),
            Shape::Quad(quad) => quad.intersect(ray),
            Shape::Cube(cube) => cube.intersect(ray),
        }
    }

    pub fn translate(&self, delta: Vec3) -> Self {
        match self {
            Shape::Triangle(triangle) => Shape::Triangle(triangle.translate(delta)),
            Shape::Quad(quad) => Shape::Quad(quad.translate(delta)),
            Shape::Cube(cube) => Shape::Cube(cube.translate(delta)),
        }
    }

    pub fn rotate(&self, axis: &Line, angle: Radians) -> Self {
        match self {
            Shape::Triangle(triangle) => Shape::Triangle(triangle.rotate(axis, angle)),
            Shape::Quad(quad) => Shape::Quad(quad.rotate(axis, angle)),
            Shape::Cube(cube) => Shape::Cube(cube.rotate(axis, angle)),
        }
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Quad> for Shape {
    fn from(quad: Quad) -> Self {
        Shape::Quad(quad)
    }
}

impl From<Cube> for Shape {
    fn from(cube: Cube) -> Self {
        Shape::Cube(cube)
    }
}

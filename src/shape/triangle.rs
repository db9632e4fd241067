//! Ray-triangle intersection with barycentric edge classification.
//!
//! A hit on the supporting plane is projected into a 2D basis lying in
//! that plane and solved for barycentric coordinates `(u, v, w)`. The
//! inverse of the 3x3 system
//!
//! ```text
//! | x0 x1 x2 |   | u |   | px |
//! | y0 y1 y2 | * | v | = | py |
//! |  1  1  1 |   | w |   |  1 |
//! ```
//!
//! only depends on the vertices, so it is computed once per triangle and
//! each intersection costs three dot products.

use crate::error::GeometryError;
use crate::math::{Line, Plane, Radians, Vec2, Vec3};

use super::{EntityId, HitKind, Intersection, SurfaceColors};

/// Barycentric coordinates within this distance of zero count as lying on
/// an edge.
pub const EDGE_TOLERANCE: f64 = 3e-3;

/// Lower bound on `sin` of the angle between two sides.
const COLLINEAR_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    id: EntityId,
    points: [Vec3; 3],
    plane: Plane,
    projection: Projection,
    colors: SurfaceColors,
}

/// In-plane basis and the precomputed barycentric solve.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Projection {
    x_axis: Vec3,
    y_axis: Vec3,
    /// Rows of the inverted matrix built from the projected vertices;
    /// `weights[n] . (px, py, 1)` is the coordinate of vertex `n`.
    weights: [Vec3; 3],
}

impl Projection {
    fn new(points: &[Vec3; 3], normal: Vec3) -> Self {
        let x_axis = (points[0] - points[1]).normalize();
        // Normal x in-plane vector stays in the plane, orthogonal to both.
        let y_axis = x_axis.cross(normal).normalize();

        let [a, b, c] = points.map(|p| Vec2::new(p.dot(x_axis), p.dot(y_axis)));
        let det = (b - a).perp_dot(c - a);

        let row = |p: Vec2, q: Vec2| Vec3::new(p.y - q.y, q.x - p.x, p.perp_dot(q)) / det;
        Self {
            x_axis,
            y_axis,
            weights: [row(b, c), row(c, a), row(a, b)],
        }
    }

    fn barycentric(&self, point: Vec3) -> [f64; 3] {
        let p = Vec3::new(point.dot(self.x_axis), point.dot(self.y_axis), 1.0);
        self.weights.map(|w| w.dot(p))
    }
}

impl Triangle {
    /// Builds a triangle, rejecting collinear or coincident points.
    pub fn new(
        p0: Vec3,
        p1: Vec3,
        p2: Vec3,
        colors: SurfaceColors,
    ) -> Result<Self, GeometryError> {
        let side01 = (p0 - p1).normalize();
        let side02 = (p0 - p2).normalize();
        if side01.cross(side02).magnitude() < COLLINEAR_EPSILON {
            return Err(GeometryError::DegenerateTriangle {
                points: [p0, p1, p2],
            });
        }
        Ok(Self::from_points([p0, p1, p2], colors))
    }

    /// Recomputes plane and projection; the points must not be collinear.
    fn from_points(points: [Vec3; 3], colors: SurfaceColors) -> Self {
        let normal = (points[0] - points[1])
            .normalize()
            .cross((points[0] - points[2]).normalize());
        let plane = Plane::new(points[0], normal);

        Self {
            id: EntityId::new(),
            points,
            plane,
            projection: Projection::new(&points, plane.normal()),
            colors,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn points(&self) -> [Vec3; 3] {
        self.points
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn colors(&self) -> SurfaceColors {
        self.colors
    }

    pub fn translate(&self, delta: Vec3) -> Self {
        Self::from_points(self.points.map(|p| p + delta), self.colors)
    }

    pub fn rotate(&self, axis: &Line, angle: Radians) -> Self {
        Self::from_points(self.points.map(|p| p.rotate(axis, angle)), self.colors)
    }

    /// Intersects the ray with the triangle.
    ///
    /// Returns `None` when the ray is parallel to the triangle or crosses
    /// its plane outside the edge band.
    pub fn intersect(&self, ray: &Line) -> Option<Intersection> {
        let hit = ray.intersect_plane(&self.plane)?;
        let kind = classify(self.projection.barycentric(hit.point))?;

        let distance = (hit.point - ray.origin()).magnitude();
        Some(Intersection {
            point: hit.point,
            signed_distance: if hit.t < 0.0 { -distance } else { distance },
            color: self.colors.resolve(kind),
            kind,
        })
    }
}

fn classify(barycentric: [f64; 3]) -> Option<HitKind> {
    let mut kind = HitKind::Inside;
    for coord in barycentric {
        if coord.abs() <= EDGE_TOLERANCE {
            kind = match kind {
                HitKind::Inside => HitKind::Edge,
                _ => HitKind::Corner,
            };
        } else if coord < 0.0 {
            return None;
        }
    }
    Some(kind)
}

use super::plane::Plane;
use super::vec3::Vec3;

/// Rays closer than this to parallel with a plane are treated as missing it.
pub const PARALLEL_EPSILON: f64 = 1e-12;

/// An infinite line through `origin`, oriented along a unit `direction`.
///
/// Used both as a ray (camera rays, where the sign of the line parameter
/// tells front from back) and as a rotation axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    origin: Vec3,
    direction: Vec3,
}

/// Where a line crosses a plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneHit {
    pub point: Vec3,
    /// Line parameter of the hit: `point = origin + t * direction`.
    /// Negative when the plane lies behind the origin.
    pub t: f64,
}

impl Line {
    /// The direction is normalized on construction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }

    pub fn translate(&self, delta: Vec3) -> Self {
        Self {
            origin: self.origin + delta,
            direction: self.direction,
        }
    }

    /// Intersects the line with a plane.
    ///
    /// Returns `None` when the line is parallel to the plane (including a
    /// line lying inside it).
    pub fn intersect_plane(&self, plane: &Plane) -> Option<PlaneHit> {
        let normal = plane.normal();
        let denom = normal.dot(self.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (plane.point() - self.origin).dot(normal) / denom;
        Some(PlaneHit {
            point: self.at(t),
            t,
        })
    }
}

use super::angle::Radians;
use super::line::Line;
use super::vec3::Vec3;

/// A plane through `point` with a unit `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// The normal is normalized on construction.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn translate(&self, delta: Vec3) -> Self {
        Self {
            point: self.point + delta,
            normal: self.normal,
        }
    }

    /// Rotates the anchor point around `axis`; the normal turns with it.
    pub fn rotate(&self, axis: &Line, angle: Radians) -> Self {
        // Normals are directions, so they rotate around a parallel axis through the origin.
        let direction_axis = Line::new(Vec3::ZERO, axis.direction());
        Self {
            point: self.point.rotate(axis, angle),
            normal: self.normal.rotate(&direction_axis, angle).normalize(),
        }
    }
}

//! Moving reference frames.
//!
//! A [`Frame`] is a right-handed orthonormal basis `(i, j, k)` anchored at
//! an origin. The camera reads it as: `i` forward, `j` left, `k` up.

use crate::math::{Line, Radians, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub i: Vec3,
    pub j: Vec3,
    pub k: Vec3,
    pub origin: Vec3,
}

impl Default for Frame {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Frame {
    /// The global axes at the global origin.
    pub const ZERO: Self = Self {
        i: Vec3::I,
        j: Vec3::J,
        k: Vec3::K,
        origin: Vec3::ZERO,
    };

    /// Moves the origin by `delta`; the axes are unchanged.
    pub fn translate(&self, delta: Vec3) -> Self {
        Self {
            origin: self.origin + delta,
            ..*self
        }
    }

    /// Rotates the whole frame as a rigid body around `axis`.
    ///
    /// The origin orbits the axis line; the basis vectors turn by the same
    /// angle around the axis direction.
    pub fn rotate(&self, axis: &Line, angle: Radians) -> Self {
        let direction_axis = Line::new(Vec3::ZERO, axis.direction());
        Self {
            i: self.i.rotate(&direction_axis, angle),
            j: self.j.rotate(&direction_axis, angle),
            k: self.k.rotate(&direction_axis, angle),
            origin: self.origin.rotate(axis, angle),
        }
    }
}

use std::ops::Sub;

/// A point in a 2D basis, such as a triangle's in-plane projection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The z component of the 3D cross product of two in-plane vectors.
    pub fn perp_dot(&self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

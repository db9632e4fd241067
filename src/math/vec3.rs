use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};

use super::angle::Radians;
use super::line::Line;

/// Added to a zero magnitude before dividing, so normalizing never yields NaN.
pub const EPSILON: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector along the global X axis.
    pub const I: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along the global Y axis.
    pub const J: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along the global Z axis.
    pub const K: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// A zero vector stays zero: the denominator is padded with [`EPSILON`]
    /// instead of failing, so callers can normalize unconditionally.
    pub fn normalize(&self) -> Self {
        let mut magnitude = self.magnitude();
        if magnitude == 0.0 {
            magnitude += EPSILON;
        }
        self.scale(1.0 / magnitude)
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Rotates this point by `angle` around an arbitrary `axis` line.
    ///
    /// The axis does not have to pass through the origin: the point is
    /// shifted so the axis does, rotated with Rodrigues' formula, and
    /// shifted back. Positive angles follow the right-hand rule around the
    /// axis direction.
    pub fn rotate(&self, axis: &Line, angle: Radians) -> Self {
        let k = axis.direction();
        let relative = *self - axis.origin();
        let (sin, cos) = angle.sin_cos();

        let rotated = relative * cos + k.cross(relative) * sin + k * (k.dot(relative) * (1.0 - cos));
        rotated + axis.origin()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Iterates over the components in X, Y, Z order.
    pub fn iter(&self) -> impl Iterator<Item = f64> {
        self.to_array().into_iter()
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Scalar multiplication of a vector.
impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

/// Scalar division of a vector.
impl Div<f64> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

/// Negation of a vector.
impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::angle::Degrees;
    use approx::assert_abs_diff_eq;

    fn rotate_about(v: Vec3, axis: Vec3, degrees: f64) -> Vec3 {
        v.rotate(&Line::new(Vec3::ZERO, axis), Degrees(degrees).into())
    }

    #[test]
    fn rotation_follows_right_hand_rule_on_every_axis() {
        // (rotated, axis, expected after +90 degrees)
        let cases = [
            (Vec3::I, Vec3::K, Vec3::J),
            (Vec3::J, Vec3::K, -Vec3::I),
            (Vec3::J, Vec3::I, Vec3::K),
            (Vec3::K, Vec3::I, -Vec3::J),
            (Vec3::K, Vec3::J, Vec3::I),
            (Vec3::I, Vec3::J, -Vec3::K),
        ];

        for (v, axis, expected) in cases {
            assert_abs_diff_eq!(rotate_about(v, axis, 90.0), expected, epsilon = 1e-9);
            assert_abs_diff_eq!(rotate_about(v, axis, -90.0), -expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn rotation_about_j_by_negative_quarter_turn_lands_on_k() {
        assert_abs_diff_eq!(rotate_about(Vec3::I, Vec3::J, -90.0), Vec3::K, epsilon = 1e-2);
    }

    #[test]
    fn rotation_about_offset_axis() {
        // Axis parallel to K through (1, 0, 0): the origin swings to (1, -1, 0).
        let axis = Line::new(Vec3::I, Vec3::K);
        let rotated = Vec3::ZERO.rotate(&axis, Degrees(90.0).into());
        assert_abs_diff_eq!(rotated, Vec3::new(1.0, -1.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn point_on_axis_is_fixed() {
        let axis = Line::new(Vec3::new(2.0, 3.0, 4.0), Vec3::new(1.0, 1.0, 0.0));
        let on_axis = Vec3::new(3.0, 4.0, 4.0);
        assert_abs_diff_eq!(on_axis.rotate(&axis, Radians(1.234)), on_axis, epsilon = 1e-9);
    }

    #[test]
    fn normalize_zero_vector_stays_zero() {
        let n = Vec3::ZERO.normalize();
        assert_eq!(n, Vec3::ZERO);
        assert!(n.iter().all(f64::is_finite));
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = Vec3::new(3.0, -4.0, 12.0).normalize();
        assert_abs_diff_eq!(n.magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cross_of_basis_vectors() {
        assert_eq!(Vec3::I.cross(Vec3::J), Vec3::K);
        assert_eq!(Vec3::J.cross(Vec3::K), Vec3::I);
        assert_eq!(Vec3::K.cross(Vec3::I), Vec3::J);
    }

    #[test]
    fn iter_yields_components_in_order() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
    }
}

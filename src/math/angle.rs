//! Angle units.
//!
//! Angles never travel as bare `f64` through the public API: rotations and
//! fields of view take [`Radians`], and [`Degrees`] converts into them.

use std::f64::consts::PI;
use std::ops::{Div, Mul, Neg};

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Radians(pub f64);

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Degrees(pub f64);

impl Radians {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn sin_cos(self) -> (f64, f64) {
        self.0.sin_cos()
    }

    pub fn tan(self) -> f64 {
        self.0.tan()
    }

    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0 * 180.0 / PI)
    }
}

impl Degrees {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_radians(self) -> Radians {
        Radians(self.0 * PI / 180.0)
    }
}

impl From<Degrees> for Radians {
    fn from(degrees: Degrees) -> Self {
        degrees.to_radians()
    }
}

impl From<Radians> for Degrees {
    fn from(radians: Radians) -> Self {
        radians.to_degrees()
    }
}

impl Neg for Radians {
    type Output = Radians;

    fn neg(self) -> Self::Output {
        Radians(-self.0)
    }
}

impl Mul<f64> for Radians {
    type Output = Radians;

    fn mul(self, rhs: f64) -> Self::Output {
        Radians(self.0 * rhs)
    }
}

impl Div<f64> for Radians {
    type Output = Radians;

    fn div(self, rhs: f64) -> Self::Output {
        Radians(self.0 / rhs)
    }
}

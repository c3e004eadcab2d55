//! Immutable 2D vector
//!
//! Apart from [`Vector2D::set`], no method changes the receiver: every
//! operation returns a new vector. Each arithmetic operation comes in a
//! vector (component-wise) and a scalar (broadcast) flavour.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{HALF_PI, TWO_PI};
use crate::error::DodgeError;
use crate::platform::RandomSource;

/// A 2D vector of `f64` components
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Overwrite both components in place
    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    #[inline]
    fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn add_vector(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn add_scalar(self, s: f64) -> Self {
        Self::new(self.x + s, self.y + s)
    }

    pub fn sub_vector(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn sub_scalar(self, s: f64) -> Self {
        Self::new(self.x - s, self.y - s)
    }

    pub fn mul_vector(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    pub fn mul_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    /// Component-wise division; fails if either component of `other` is zero
    pub fn div_vector(self, other: Self) -> Result<Self, DodgeError> {
        if other.x == 0.0 || other.y == 0.0 {
            return Err(DodgeError::DivisionByZero {
                what: "Vector2D::div_vector",
            });
        }
        Ok(Self::new(self.x / other.x, self.y / other.y))
    }

    pub fn div_scalar(self, s: f64) -> Result<Self, DodgeError> {
        if s == 0.0 {
            return Err(DodgeError::DivisionByZero {
                what: "Vector2D::div_scalar",
            });
        }
        Ok(Self::new(self.x / s, self.y / s))
    }

    pub fn dot(self, other: Self) -> f64 {
        self.as_dvec2().dot(other.as_dvec2())
    }

    /// Z component of the 3D cross product of the two vectors
    pub fn cross(self, other: Self) -> f64 {
        self.as_dvec2().perp_dot(other.as_dvec2())
    }

    /// Squared magnitude
    pub fn squared(self) -> f64 {
        self.as_dvec2().length_squared()
    }

    pub fn magnitude(self) -> f64 {
        self.as_dvec2().length()
    }

    pub fn distance(self, other: Self) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// `x / y`
    pub fn ratio(self) -> Result<f64, DodgeError> {
        if self.y == 0.0 {
            return Err(DodgeError::DivisionByZero {
                what: "Vector2D::ratio",
            });
        }
        Ok(self.x / self.y)
    }

    /// Rescale to exactly `max` if longer than `max`
    pub fn limit(self, max: f64) -> Self {
        let msq = self.squared();
        if msq > max * max {
            self.mul_scalar(max / msq.sqrt())
        } else {
            self
        }
    }

    /// Same direction, new length. A zero vector stays zero.
    pub fn set_magnitude(self, new_mag: f64) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x * new_mag / mag, self.y * new_mag / mag)
    }

    /// Unit vector in the same direction. A zero vector stays zero.
    pub fn normalize(self) -> Self {
        self.set_magnitude(1.0)
    }

    pub fn is_normalized(self) -> bool {
        (self.magnitude() - 1.0).abs() <= 1e-12
    }

    /// Angle to the x axis, in radians
    pub fn heading(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Angle to the y axis, in radians
    pub fn y_heading(self) -> f64 {
        HALF_PI - self.heading()
    }

    pub fn from_angle(theta: f64, len: f64) -> Self {
        let v = DVec2::from_angle(theta) * len;
        Self::new(v.x, v.y)
    }

    /// Unsigned angle between two vectors, in radians
    pub fn angle_between(self, other: Self) -> Result<f64, DodgeError> {
        let denom = self.magnitude() * other.magnitude();
        if denom == 0.0 {
            return Err(DodgeError::DivisionByZero {
                what: "Vector2D::angle_between",
            });
        }
        Ok((self.dot(other) / denom).clamp(-1.0, 1.0).acos())
    }

    /// Rotate counter-clockwise by `angle` radians
    pub fn rotate(self, angle: f64) -> Self {
        let v = DVec2::from_angle(angle).rotate(self.as_dvec2());
        Self::new(v.x, v.y)
    }

    /// Linear interpolation: `self + (other - self) * amt`
    pub fn lerp(self, other: Self, amt: f64) -> Self {
        self.add_vector(other.sub_vector(self).mul_scalar(amt))
    }

    /// Reflect off a surface with unit normal `normal`
    pub fn reflect(self, normal: Self) -> Self {
        self.sub_vector(normal.mul_scalar(normal.dot(self) * 2.0))
    }

    /// Random unit vector
    pub fn random_unit(rng: &mut impl RandomSource) -> Self {
        let theta = rng.float_range(-TWO_PI, TWO_PI);
        Self::new(theta.cos(), theta.sin())
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn from_array(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for DVec2 {
    fn from(v: Vector2D) -> Self {
        v.as_dvec2()
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl Add for Vector2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.add_vector(rhs)
    }
}

impl Sub for Vector2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.sub_vector(rhs)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.mul_scalar(rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

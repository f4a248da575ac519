//! Immutable 2D vector value and degree-based trigonometry helpers.

use glam::Vec2;
use std::f32::consts::TAU;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D vector. Every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector(Vec2);

impl Vector {
    pub const ZERO: Vector = Vector(Vec2::ZERO);

    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(self) -> f32 {
        self.0.x
    }

    pub fn y(self) -> f32 {
        self.0.y
    }

    /// Componentwise sum
    pub fn plus(self, other: Vector) -> Vector {
        Self(self.0 + other.0)
    }

    /// Componentwise difference
    pub fn minus(self, other: Vector) -> Vector {
        Self(self.0 - other.0)
    }

    /// Scale both components by `factor`
    pub fn times(self, factor: f32) -> Vector {
        Self(self.0 * factor)
    }

    /// Unit vector in the same direction, or the zero vector when the
    /// length is zero.
    pub fn normalize(self) -> Vector {
        Self(self.0.normalize_or_zero())
    }

    pub fn length(self) -> f32 {
        self.0.length()
    }

    pub fn distance(self, other: Vector) -> f32 {
        self.0.distance(other.0)
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    pub fn with_x(self, x: f32) -> Vector {
        Self::new(x, self.0.y)
    }

    pub fn with_y(self, y: f32) -> Vector {
        Self::new(self.0.x, y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        v.0
    }
}

impl From<(f32, f32)> for Vector {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.minus(rhs)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        self.times(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Self(-self.0)
    }
}

/// Convert degrees to radians
pub fn radians(deg: f32) -> f32 {
    deg / 360.0 * TAU
}

/// Sine of an angle given in degrees
pub fn sin(deg: f32) -> f32 {
    radians(deg).sin()
}

/// Cosine of an angle given in degrees
pub fn cos(deg: f32) -> f32 {
    radians(deg).cos()
}

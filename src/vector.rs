/*
 * Vector Module
 *
 * This module defines the Vec2 value type used for positions, headings and
 * steering forces. All operations are pure and return new values; nothing
 * here holds shared mutable state.
 */

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn distance(&self, other: Vec2) -> f32 {
        (*self - other).magnitude()
    }

    // Rescale to exactly `max` when longer, leave shorter vectors untouched.
    // The zero vector passes through unchanged rather than producing NaN.
    pub fn clamp_magnitude(&self, max: f32) -> Self {
        let mag = self.magnitude();
        if mag > max && mag > 0.0 {
            *self * (max / mag)
        } else {
            *self
        }
    }

    // Rescale to the given length, preserving direction. A zero vector has
    // no direction to preserve and stays zero.
    pub fn with_magnitude(&self, target: f32) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            *self * (target / mag)
        } else {
            Self::ZERO
        }
    }

    pub fn rotate(&self, angle_radians: f32) -> Self {
        let (sin, cos) = angle_radians.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    // Heading in radians, used by the external renderer for orientation.
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    // Component-wise mean. Calling this on an empty slice is a caller bug:
    // the force rules guard for emptiness before averaging. Debug builds
    // assert; release builds fall back to the zero vector.
    pub fn average(vectors: &[Vec2]) -> Self {
        debug_assert!(!vectors.is_empty(), "average of empty vector slice");
        if vectors.is_empty() {
            return Self::ZERO;
        }
        let sum = vectors.iter().fold(Self::ZERO, |acc, v| acc + *v);
        sum * (1.0 / vectors.len() as f32)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Vec2) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f32) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

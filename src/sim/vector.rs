//! 2D vector value type
//!
//! Allocating operations return a fresh value; `*_in_place` operations mutate
//! and return `&mut Self` so calls can be chained. Math is delegated to
//! `glam::Vec2`, which the rest of the crate converts to freely.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub const fn xy(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Component-wise sum as a new vector
    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        (self.as_vec2() + other.as_vec2()).into()
    }

    /// `self - other` as a new vector
    #[inline]
    pub fn subtract(&self, other: &Self) -> Self {
        (self.as_vec2() - other.as_vec2()).into()
    }

    #[inline]
    pub fn squared_distance(&self, other: &Self) -> f32 {
        self.as_vec2().distance_squared(other.as_vec2())
    }

    #[inline]
    pub fn distance(&self, other: &Self) -> f32 {
        self.as_vec2().distance(other.as_vec2())
    }

    #[inline]
    pub fn squared_magnitude(&self) -> f32 {
        self.as_vec2().length_squared()
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.as_vec2().length()
    }

    /// Scale each axis; a missing `scalar_y` reuses `scalar_x`
    pub fn scale_by(&mut self, scalar_x: f32, scalar_y: Option<f32>) -> &mut Self {
        self.x *= scalar_x;
        self.y *= scalar_y.unwrap_or(scalar_x);
        self
    }

    pub fn add_in_place(&mut self, other: &Self) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    pub fn set_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Unit vector in the same direction, or zero for a zero vector
    #[inline]
    pub fn normalized_or_zero(&self) -> Self {
        self.as_vec2().normalize_or_zero().into()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vec2> for Vector2D {
    #[inline]
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vector2D> for Vec2 {
    #[inline]
    fn from(v: Vector2D) -> Self {
        v.as_vec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocating_ops_leave_operands_untouched() {
        let a = Vector2D::xy(1.0, 2.0);
        let b = Vector2D::xy(3.0, -1.0);

        assert_eq!(a.add(&b), Vector2D::xy(4.0, 1.0));
        assert_eq!(a.subtract(&b), Vector2D::xy(-2.0, 3.0));
        assert_eq!(a, Vector2D::xy(1.0, 2.0));
        assert_eq!(b, Vector2D::xy(3.0, -1.0));
    }

    #[test]
    fn test_distance_and_magnitude() {
        let a = Vector2D::xy(0.0, 0.0);
        let b = Vector2D::xy(3.0, 4.0);

        assert_eq!(a.squared_distance(&b), 25.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
        assert_eq!(b.squared_magnitude(), 25.0);
        assert!((b.magnitude() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_in_place_ops_chain() {
        let mut v = Vector2D::xy(1.0, 1.0);
        v.scale_by(2.0, None)
            .add_in_place(&Vector2D::xy(1.0, 0.0))
            .scale_by(1.0, Some(-1.0));
        assert_eq!(v, Vector2D::xy(3.0, -2.0));

        v.set_to(0.5, 0.25);
        assert_eq!(v, Vector2D::xy(0.5, 0.25));
    }

    #[test]
    fn test_copy_is_independent() {
        let a = Vector2D::xy(1.0, 2.0);
        let mut b = a;
        b.add_in_place(&a);
        assert_eq!(a, Vector2D::xy(1.0, 2.0));
        assert_eq!(b, Vector2D::xy(2.0, 4.0));
    }

    #[test]
    fn test_nan_propagates() {
        let mut v = Vector2D::xy(f32::NAN, 1.0);
        v.scale_by(2.0, None);
        assert!(v.x.is_nan());
        assert!(!v.is_finite());
    }
}

//! Hitbox shapes and overlap tests
//!
//! A hitbox is always relative to its owner's position: the shape is centred
//! on `pos + offset`. Only rectangle pairs have an overlap rule; any pair
//! involving a circle returns `CollisionError::UnsupportedShapePair` so the
//! caller sees the gap instead of a silent miss.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::vector::Vector2D;

/// Shape kind, used for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Rectangle => f.write_str("rectangle"),
            ShapeKind::Circle => f.write_str("circle"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollisionError {
    #[error("unsupported shape pair: {a} x {b}")]
    UnsupportedShapePair { a: ShapeKind, b: ShapeKind },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Hitbox {
    Rectangle { offset: Vector2D, w: f32, h: f32 },
    Circle { offset: Vector2D, r: f32 },
}

impl Hitbox {
    /// Rectangle centred on its owner
    pub fn rect(w: f32, h: f32) -> Self {
        Hitbox::Rectangle {
            offset: Vector2D::zero(),
            w,
            h,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Hitbox::Rectangle { .. } => ShapeKind::Rectangle,
            Hitbox::Circle { .. } => ShapeKind::Circle,
        }
    }

    pub fn offset(&self) -> Vector2D {
        match self {
            Hitbox::Rectangle { offset, .. } | Hitbox::Circle { offset, .. } => *offset,
        }
    }

    /// Full height of the shape (diameter for circles)
    pub fn height(&self) -> f32 {
        match self {
            Hitbox::Rectangle { h, .. } => *h,
            Hitbox::Circle { r, .. } => 2.0 * r,
        }
    }

    /// Full width of the shape (diameter for circles)
    pub fn width(&self) -> f32 {
        match self {
            Hitbox::Rectangle { w, .. } => *w,
            Hitbox::Circle { r, .. } => 2.0 * r,
        }
    }

    /// World-space centre for an owner at `pos`
    #[inline]
    pub fn center(&self, pos: &Vector2D) -> Vector2D {
        pos.add(&self.offset())
    }

    /// World-space y of the top edge (y grows downward)
    #[inline]
    pub fn top(&self, pos: &Vector2D) -> f32 {
        self.center(pos).y - self.height() / 2.0
    }
}

/// Axis-aligned box test. Touching edges count as overlapping.
///
/// Both hitboxes must be rectangles; other shapes are treated by their
/// bounding extents, so callers should go through [`is_colliding`].
pub fn rect_overlap(pos_a: &Vector2D, a: &Hitbox, pos_b: &Vector2D, b: &Hitbox) -> bool {
    let ca = a.center(pos_a);
    let cb = b.center(pos_b);
    let (half_wa, half_ha) = (a.width() / 2.0, a.height() / 2.0);
    let (half_wb, half_hb) = (b.width() / 2.0, b.height() / 2.0);

    let separated_x = ca.x + half_wa < cb.x - half_wb || cb.x + half_wb < ca.x - half_wa;
    let separated_y = ca.y + half_ha < cb.y - half_hb || cb.y + half_hb < ca.y - half_ha;

    !(separated_x || separated_y)
}

/// Shape-dispatching overlap test
pub fn is_colliding(
    pos_a: &Vector2D,
    a: &Hitbox,
    pos_b: &Vector2D,
    b: &Hitbox,
) -> Result<bool, CollisionError> {
    match (a, b) {
        (Hitbox::Rectangle { .. }, Hitbox::Rectangle { .. }) => {
            Ok(rect_overlap(pos_a, a, pos_b, b))
        }
        _ => Err(CollisionError::UnsupportedShapePair {
            a: a.kind(),
            b: b.kind(),
        }),
    }
}

/// Penetration depth along each axis for two overlapping rectangles
pub fn rect_penetration(pos_a: &Vector2D, a: &Hitbox, pos_b: &Vector2D, b: &Hitbox) -> Vector2D {
    let ca = a.center(pos_a);
    let cb = b.center(pos_b);
    let overlap_x = (a.width() + b.width()) / 2.0 - (ca.x - cb.x).abs();
    let overlap_y = (a.height() + b.height()) / 2.0 - (ca.y - cb.y).abs();
    Vector2D::xy(overlap_x.max(0.0), overlap_y.max(0.0))
}

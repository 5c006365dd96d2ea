//! Axis-aligned collision detection
//!
//! Everything in the playfield collides as a box in screen space (y grows
//! downward). Edges that merely touch do not count as a collision.

use glam::Vec2;

/// Axis-aligned bounding box in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Box from its top-left corner and size
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.x + size.x, min.y, min.y + size.y)
    }
}

/// Check whether two boxes overlap
///
/// True iff no separating axis exists: `a` extends past `b` on both sides of
/// both axes.
pub fn collides(a: &Aabb, b: &Aabb) -> bool {
    a.right > b.left && a.left < b.right && a.bottom > b.top && a.top < b.bottom
}

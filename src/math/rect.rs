//! 2D axis-aligned rectangle

use crate::core::types::Vec2;

/// Axis-aligned rectangle defined by its top-left corner and size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Create rect from top-left corner and size
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Create rect from scalar components
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    /// Corners in registration order: top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.position,
            Vec2::new(max.x, self.position.y),
            Vec2::new(self.position.x, max.y),
            max,
        ]
    }

    /// Check if point is inside the rect (edges included)
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.position.x && p.x <= max.x &&
        p.y >= self.position.y && p.y <= max.y
    }

    /// Check if two rects overlap (touching edges count)
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.position.x <= b_max.x && a_max.x >= other.position.x &&
        self.position.y <= b_max.y && a_max.y >= other.position.y
    }
}

//! Axis-aligned bounding boxes
//!
//! Every collidable entity reports one of these. Overlap is strict: boxes that
//! only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Negative sizes are clamped to zero
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Box of `size` centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True iff the boxes overlap with positive area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0.0
            && self.h > 0.0
            && other.w > 0.0
            && other.h > 0.0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Shrink by `dx`/`dy` on each side, never below zero size
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        let w = (self.w - 2.0 * dx).max(0.0);
        let h = (self.h - 2.0 * dy).max(0.0);
        // Keep the box centred when clamping kicks in
        let cx = self.x + self.w / 2.0;
        let cy = self.y + self.h / 2.0;
        Rect::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

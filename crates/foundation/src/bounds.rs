use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Axis-aligned screen rectangle in pixels (y grows downward).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl ScreenRect {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        ScreenRect { min, max }
    }

    /// Rectangle at `(left, top)` with the given size.
    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        ScreenRect {
            min: [left, top],
            max: [left + width, top + height],
        }
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }

    /// Position of `p` relative to the rectangle, `(0,0)` top-left to `(1,1)`
    /// bottom-right. Not clamped.
    pub fn fraction_of(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - self.min[0]) / self.width(),
            (p.y - self.min[1]) / self.height(),
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        )
    }
}

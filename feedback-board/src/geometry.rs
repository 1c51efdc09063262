//! Viewport geometry primitives for zone hit-testing

use serde::{Deserialize, Serialize};

/// A point in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Absolute horizontal distance to another point
    pub fn dx(&self, other: Point) -> f64 {
        (self.x - other.x).abs()
    }

    /// Absolute vertical distance to another point
    pub fn dy(&self, other: Point) -> f64 {
        (self.y - other.y).abs()
    }
}

/// An axis-aligned rectangle in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from origin and size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Point-in-rect containment. Edges are half-open: the left/top edge is
    /// inside, the right/bottom edge belongs to the next rect over.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

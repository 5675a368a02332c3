//! Bounding boxes and courtyard snapping shared by all series.

use serde::Serialize;

use crate::config::Config;
use crate::kicad::{Layer, Point, Rect};

/// Axis-aligned box in footprint coordinates (Y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    /// Minimum X (mm).
    pub left: f64,
    /// Minimum Y (mm).
    pub top: f64,
    /// Maximum X (mm).
    pub right: f64,
    /// Maximum Y (mm).
    pub bottom: f64,
}

impl BoundingBox {
    /// Creates a box from its edges.
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box centred on `center` with the given full size.
    #[must_use]
    pub fn around(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        )
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Grows every edge outward by `by`.
    #[must_use]
    pub fn expanded(self, by: f64) -> Self {
        Self::new(
            self.left - by,
            self.top - by,
            self.right + by,
            self.bottom + by,
        )
    }

    /// Rounds every edge to the nearest multiple of `grid`.
    #[must_use]
    pub fn snapped(self, grid: f64) -> Self {
        Self::new(
            round_to_base(self.left, grid),
            round_to_base(self.top, grid),
            round_to_base(self.right, grid),
            round_to_base(self.bottom, grid),
        )
    }

    /// Horizontal size.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical size.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Top-left and bottom-right corners.
    #[must_use]
    pub const fn corners(&self) -> (Point, Point) {
        (
            Point::new(self.left, self.top),
            Point::new(self.right, self.bottom),
        )
    }
}

/// Rounds `value` to the nearest multiple of `base`, ties to even.
///
/// A zero base returns the value unchanged.
#[must_use]
pub fn round_to_base(value: f64, base: f64) -> f64 {
    if base == 0.0 {
        return value;
    }
    (value / base).round_ties_even() * base
}

/// Courtyard for a connector: the part outline grown by the connector
/// courtyard offset and snapped to the courtyard grid.
#[must_use]
pub fn connector_courtyard(outline: BoundingBox, config: &Config) -> BoundingBox {
    outline
        .expanded(config.courtyard_offset.connector)
        .snapped(config.courtyard_grid)
}

/// Courtyard rectangle primitive.
#[must_use]
pub fn courtyard_rect(courtyard: &BoundingBox, config: &Config) -> Rect {
    let (start, end) = courtyard.corners();
    Rect::new(
        start,
        end,
        Layer::FrontCourtyard,
        config.courtyard_line_width,
    )
}

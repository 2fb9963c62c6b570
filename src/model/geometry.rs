//! Shape placement in EMU.

use serde::{Deserialize, Serialize};

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Position and extent of a shape, in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    /// Left offset
    pub x: i64,
    /// Top offset
    pub y: i64,
    /// Width (never negative)
    pub width: i64,
    /// Height (never negative)
    pub height: i64,
}

impl Transform {
    /// Create a transform; negative extents are clamped to zero.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Area in EMU².
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// Center point.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Slide dimensions in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSize {
    /// Slide width
    pub width: i64,
    /// Slide height
    pub height: i64,
}

impl Default for SlideSize {
    /// 16:9 widescreen (13.333in x 7.5in).
    fn default() -> Self {
        Self {
            width: 12_192_000,
            height: 6_858_000,
        }
    }
}

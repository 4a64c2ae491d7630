#![forbid(unsafe_code)]

//! Geometric primitives for the track surface.
//!
//! All values are CSS pixels in viewport space (`clientX`/`clientY` space),
//! so they are floating point and may be negative.

use core::fmt;

/// Bounding box of the track surface in viewport coordinates.
///
/// Mirrors the fields of a DOM `DOMRect`. Hosts must query it live at every
/// event: scrolling or layout can move the surface mid-gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientRect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl ClientRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Check if a viewport point lies inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Translate a horizontal viewport coordinate into track-local space.
    ///
    /// No clamping: the result is negative left of the track and exceeds
    /// `width` right of it.
    #[inline]
    pub fn local_position(&self, client_x: f64) -> Position {
        Position::new(client_x - self.left)
    }
}

/// Track-local coordinate of a gesture event.
///
/// The track is one-dimensional, so `y` is always `0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Offset from the track's left edge in CSS pixels.
    pub x: f64,
    /// Always `0`.
    pub y: f64,
}

impl Position {
    /// Create a position at horizontal offset `x`.
    #[inline]
    pub const fn new(x: f64) -> Self {
        Self { x, y: 0.0 }
    }
}

/// Active sub-range expressed as fractions of the track length.
///
/// Both ends are expected in `[0, 1]` with `min <= max`. Neither is
/// enforced here; the owning slider keeps them consistent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Percentages {
    pub min: f64,
    pub max: f64,
}

impl Percentages {
    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Style of the highlighted region between `min` and `max`.
    #[must_use]
    pub fn active_track_style(&self) -> ActiveTrackStyle {
        ActiveTrackStyle {
            left: CssPercent::from_fraction(self.min),
            width: CssPercent::from_fraction(self.max - self.min),
        }
    }
}

/// A CSS percentage length such as `20%`.
///
/// Stored as the percentage value (fraction times 100). Formatting rounds to
/// six decimal places so float noise like `49.99999999999999` prints as `50%`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CssPercent(pub f64);

impl CssPercent {
    const PRECISION: f64 = 1_000_000.0;

    /// Convert a fraction of the track length (`0.25`) into a percentage (`25%`).
    #[inline]
    pub fn from_fraction(fraction: f64) -> Self {
        Self(fraction * 100.0)
    }

    /// The percentage value, without the `%` sign.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    fn rounded(self) -> f64 {
        let rounded = (self.0 * Self::PRECISION).round() / Self::PRECISION;
        // Collapse -0 so an empty range prints as `0%`.
        if rounded == 0.0 { 0.0 } else { rounded }
    }
}

impl fmt::Display for CssPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.rounded())
    }
}

/// Inline style of the active region.
///
/// A pure function of [`Percentages`]; recompute it every render.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveTrackStyle {
    pub left: CssPercent,
    pub width: CssPercent,
}

impl ActiveTrackStyle {
    /// Render as an inline CSS declaration list.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("left: {}; width: {};", self.left, self.width)
    }
}

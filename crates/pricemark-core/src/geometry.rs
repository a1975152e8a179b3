//! Screen-space geometry.
//!
//! All values are pixels from the top-left of the chart area.
//! X increases to the right, Y increases downward.

/// A point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Point {
    fn from(pos: (f32, f32)) -> Self {
        Self::new(pos.0, pos.1)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_y(self) -> f32 {
        self.y + self.height / 2.0
    }

    #[must_use]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Rounded rectangle with uniform corner radii.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RRect {
    pub rect: Rect,
    pub rx: f32,
    pub ry: f32,
}

impl RRect {
    #[must_use]
    pub const fn new(rect: Rect, rx: f32, ry: f32) -> Self {
        Self { rect, rx, ry }
    }

    /// A pill: corner radius is half the height.
    #[must_use]
    pub fn pill(rect: Rect) -> Self {
        let r = rect.height / 2.0;
        Self::new(rect, r, r)
    }

    /// Shrink by `amount` in total, `amount / 2` on each side.
    ///
    /// Used to keep a stroke of width `amount` inside the original bounds.
    #[must_use]
    pub fn inset(self, amount: f32) -> Self {
        let half = amount / 2.0;
        Self {
            rect: Rect::new(
                self.rect.x + half,
                self.rect.y + half,
                (self.rect.width - amount).max(0.0),
                (self.rect.height - amount).max(0.0),
            ),
            rx: (self.rx - half).max(0.0),
            ry: (self.ry - half).max(0.0),
        }
    }
}

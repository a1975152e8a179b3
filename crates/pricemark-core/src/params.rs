//! Per-frame price-to-pixel mapping.
//!
//! [`DrawParams`] is the single source of truth for converting a price into
//! a vertical pixel offset inside the candle region. It is produced by the
//! host chart every frame and never cached across frames.

/// Parameters supplied by the host chart for one draw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawParams {
    /// Height of the candle drawing region in pixels (excludes volume).
    pub candle_region_height: f32,
    /// Lowest visible price.
    pub min_price: f32,
    /// Highest visible price.
    pub max_price: f32,
    /// Full chart width in pixels, including the y-axis gutter.
    pub chart_width: f32,
    /// Width of the y-axis label gutter at the right edge.
    pub y_axis_width: f32,
}

impl DrawParams {
    #[must_use]
    pub const fn new(
        candle_region_height: f32,
        min_price: f32,
        max_price: f32,
        chart_width: f32,
        y_axis_width: f32,
    ) -> Self {
        Self {
            candle_region_height,
            min_price,
            max_price,
            chart_width,
            y_axis_width,
        }
    }

    /// Visible price span, or `1.0` when the span is zero.
    #[must_use]
    pub fn price_range(&self) -> f32 {
        let range = self.max_price - self.min_price;
        if range == 0.0 {
            1.0
        } else {
            range
        }
    }

    /// Whether `price` is finite and inside `[min_price, max_price]`.
    #[must_use]
    pub fn contains(&self, price: f32) -> bool {
        price.is_finite() && price >= self.min_price && price <= self.max_price
    }

    /// Pixel Y of `price` inside the candle region. Higher prices map to smaller Y.
    #[must_use]
    pub fn price_to_y(&self, price: f32) -> f32 {
        self.candle_region_height
            - ((price - self.min_price) / self.price_range()) * self.candle_region_height
    }

    /// Inverse of [`price_to_y`](Self::price_to_y).
    #[must_use]
    pub fn y_to_price(&self, y: f32) -> f32 {
        if self.candle_region_height <= 0.0 {
            return self.min_price;
        }
        self.min_price + self.price_range() * (self.candle_region_height - y) / self.candle_region_height
    }
}

/// Inclusive price interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceRange {
    pub min: f32,
    pub max: f32,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A degenerate range covering a single price.
    #[must_use]
    pub const fn point(price: f32) -> Self {
        Self::new(price, price)
    }

    /// Smallest range covering both.
    #[must_use]
    pub fn union(self, other: PriceRange) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn contains(self, price: f32) -> bool {
        price >= self.min && price <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(min: f32, max: f32) -> DrawParams {
        DrawParams::new(400.0, min, max, 360.0, 60.0)
    }

    #[test]
    fn test_price_to_y_linear() {
        let p = params(90.0, 110.0);
        assert!((p.price_to_y(110.0) - 0.0).abs() < 1e-4);
        assert!((p.price_to_y(90.0) - 400.0).abs() < 1e-4);
        assert!((p.price_to_y(100.0) - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_range_uses_unit_fallback() {
        let p = params(100.0, 100.0);
        assert_eq!(p.price_range(), 1.0);
        let y = p.price_to_y(100.0);
        assert!(y.is_finite());
        assert_eq!(y, 400.0);
    }

    #[test]
    fn test_contains_rejects_non_finite_and_out_of_range() {
        let p = params(90.0, 110.0);
        assert!(p.contains(90.0));
        assert!(p.contains(110.0));
        assert!(!p.contains(89.99));
        assert!(!p.contains(f32::NAN));
        assert!(!p.contains(f32::INFINITY));
    }

    #[test]
    fn test_y_to_price_roundtrip() {
        let p = params(90.0, 110.0);
        let y = p.price_to_y(103.5);
        assert!((p.y_to_price(y) - 103.5).abs() < 1e-3);
    }

    #[test]
    fn test_price_range_union() {
        let r = PriceRange::point(100.0).union(PriceRange::point(95.0));
        assert_eq!(r, PriceRange::new(95.0, 100.0));
        assert!(r.contains(97.0));
        assert!(!r.contains(101.0));
    }
}

//! A single price marker.

use std::fmt;
use std::rc::Rc;

use log::{debug, trace};
use pricemark_config::LayoutConfig;
use pricemark_core::{Color, DrawParams, IndicatorKey, PriceRange};
use pricemark_render::{
    BlendMode, BuildParagraph, Canvas, FontWeight, LineMetrics, Paint, Paragraph, Path,
    TextSegment,
};

use crate::draw::{self, BubbleText, ConnectorGeometry};
use crate::style::{IndicatorStyle, SharedPaints};
use crate::types::IndicatorTypeConfig;

/// Injected price formatter: `(price, currency, compact) -> text`.
pub type FormatPrice = Rc<dyn Fn(f32, &str, bool) -> String>;

/// Chart-wide settings every indicator is built with.
#[derive(Clone)]
pub struct ChartContext {
    pub layout: LayoutConfig,
    /// Maximum width handed to text layout.
    pub layout_width: f32,
    pub is_dark_mode: bool,
    pub background_color: Color,
    pub currency: String,
    pub compact_prices: bool,
    pub build_paragraph: BuildParagraph,
    pub format_price: FormatPrice,
}

impl fmt::Debug for ChartContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartContext")
            .field("layout", &self.layout)
            .field("layout_width", &self.layout_width)
            .field("is_dark_mode", &self.is_dark_mode)
            .field("background_color", &self.background_color)
            .field("currency", &self.currency)
            .field("compact_prices", &self.compact_prices)
            .finish_non_exhaustive()
    }
}

struct TextCache {
    label: Box<dyn Paragraph>,
    value: Box<dyn Paragraph>,
    label_metrics: LineMetrics,
    value_metrics: LineMetrics,
    bubble_width: f32,
}

/// One live marker: its price, its paints and its laid-out text.
pub struct Indicator {
    key: IndicatorKey,
    price: Option<f32>,
    style: IndicatorStyle,
    text: Option<TextCache>,
    layout: LayoutConfig,
    layout_width: f32,
    is_dark_mode: bool,
    currency: String,
    compact_prices: bool,
    build_paragraph: BuildParagraph,
    format_price: FormatPrice,
}

impl fmt::Debug for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indicator")
            .field("key", &self.key)
            .field("price", &self.price)
            .field("bubble_width", &self.bubble_width())
            .field("is_dark_mode", &self.is_dark_mode)
            .finish_non_exhaustive()
    }
}

impl Indicator {
    /// Create an indicator with no price yet.
    pub fn new(key: IndicatorKey, ty: IndicatorTypeConfig, context: &ChartContext) -> Self {
        debug!("Creating {} indicator", key);
        Self {
            key,
            price: None,
            style: IndicatorStyle::new(ty, context.background_color, &context.layout),
            text: None,
            layout: context.layout,
            layout_width: context.layout_width,
            is_dark_mode: context.is_dark_mode,
            currency: context.currency.clone(),
            compact_prices: context.compact_prices,
            build_paragraph: Rc::clone(&context.build_paragraph),
            format_price: Rc::clone(&context.format_price),
        }
    }

    pub fn key(&self) -> IndicatorKey {
        self.key
    }

    pub fn price(&self) -> Option<f32> {
        self.price
    }

    pub fn style(&self) -> &IndicatorStyle {
        &self.style
    }

    pub fn should_adjust_y_axis(&self) -> bool {
        self.style.ty().should_adjust_y_axis
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }

    /// Whether label and value text are laid out and ready to draw.
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Set the price and rebuild the cached text.
    pub fn update_price(&mut self, price: Option<f32>, foreground: &mut Paint) {
        self.price = price;
        self.refresh_text(foreground);
    }

    /// Label width + gap + value width + both paddings, 0 without text.
    pub fn bubble_width(&self) -> f32 {
        self.text.as_ref().map_or(0.0, |t| t.bubble_width)
    }

    /// The price as a one-point range, `None` when unset or not finite.
    pub fn min_max_in_range(&self) -> Option<PriceRange> {
        self.price.filter(|p| p.is_finite()).map(PriceRange::point)
    }

    /// Pixel Y of the price when the indicator is drawable this frame.
    pub fn price_y(&self, params: &DrawParams) -> Option<f32> {
        let price = self.price?;
        if self.text.is_none() || !params.contains(price) {
            return None;
        }
        Some(params.price_to_y(price))
    }

    /// Draw the connector line, then the bubble.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        canvas: &mut dyn Canvas,
        path: &mut Path,
        params: &DrawParams,
        y: f32,
        bubble_width: f32,
        max_bubble_width: f32,
        paints: &mut SharedPaints,
    ) {
        if self.price_y(params).is_none() {
            return;
        }
        self.draw_line(canvas, path, params, y, bubble_width, max_bubble_width);
        self.draw_bubble(canvas, y, bubble_width, paints);
    }

    /// Draw only the connector from the bubble at `y` to the price.
    pub fn draw_line(
        &mut self,
        canvas: &mut dyn Canvas,
        path: &mut Path,
        params: &DrawParams,
        y: f32,
        bubble_width: f32,
        max_bubble_width: f32,
    ) {
        let Some(price_y) = self.price_y(params) else {
            return;
        };
        let ty = self.style.ty();
        let geometry = ConnectorGeometry {
            bubble_x: ty.bubble_margin_left,
            bubble_y: y,
            bubble_width,
            max_bubble_width,
            price_y,
            chart_width: params.chart_width,
            y_axis_width: params.y_axis_width,
        };
        let chart_end_x = draw::build_connector(path, &geometry, &self.layout, ty.line_corner_radius);
        draw::stroke_connector(canvas, path, &mut self.style, chart_end_x, &self.layout);
    }

    /// Draw only the bubble centered at `y`.
    pub fn draw_bubble(
        &self,
        canvas: &mut dyn Canvas,
        y: f32,
        bubble_width: f32,
        paints: &mut SharedPaints,
    ) {
        let (Some(_), Some(cache)) = (self.price, self.text.as_ref()) else {
            return;
        };
        let text = BubbleText {
            label: cache.label.as_ref(),
            label_metrics: cache.label_metrics,
            value: cache.value.as_ref(),
            value_metrics: cache.value_metrics,
        };
        draw::draw_bubble(
            canvas,
            y,
            bubble_width,
            &self.style,
            self.is_dark_mode,
            &text,
            paints,
            &self.layout,
        );
    }

    /// Switch theme and rebuild the drop shadows for `background`.
    pub fn set_color_mode(&mut self, is_dark_mode: bool, background: Color) {
        self.is_dark_mode = is_dark_mode;
        self.style.set_background(background, &self.layout);
    }

    /// Swap the text backend and re-lay out the text.
    pub fn set_build_paragraph(&mut self, build_paragraph: BuildParagraph, foreground: &mut Paint) {
        self.build_paragraph = build_paragraph;
        self.refresh_text(foreground);
    }

    /// Rebuild label and value paragraphs for the current price.
    pub fn refresh_text(&mut self, foreground: &mut Paint) {
        self.text = None;
        let Some(price) = self.price else {
            return;
        };

        let ty = self.style.ty();
        let value_text = (self.format_price)(price, &self.currency, self.compact_prices);
        foreground.blend_mode = BlendMode::Src;
        let foreground: &Paint = foreground;

        let build = |text: &str| {
            (self.build_paragraph)(&TextSegment {
                text,
                color: ty.color,
                weight: FontWeight::Bold,
                foreground,
            })
        };
        let (Some(mut label), Some(mut value)) = (build(&ty.label), build(&value_text)) else {
            trace!("{}: paragraph builder unavailable", self.key);
            return;
        };

        label.layout(self.layout_width);
        value.layout(self.layout_width);
        let (Some(label_metrics), Some(value_metrics)) = (label.line_metrics(), value.line_metrics())
        else {
            trace!("{}: text produced no line metrics", self.key);
            return;
        };

        let bubble_width = label_metrics.width
            + ty.label_price_gap
            + value_metrics.width
            + ty.bubble_padding_horizontal * 2.0;

        self.text = Some(TextCache {
            label,
            value,
            label_metrics,
            value_metrics,
            bubble_width,
        });
    }

    /// Release the style's resources. Consumes the indicator.
    pub fn dispose(mut self) {
        debug!("Disposing {} indicator", self.key);
        self.text = None;
        self.style.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricemark_config::Config;
    use pricemark_render::{monospace_builder, MonospaceParagraph, RecordingCanvas};

    use crate::types::IndicatorTypeTable;

    fn context(build_paragraph: BuildParagraph) -> ChartContext {
        ChartContext {
            layout: LayoutConfig::default(),
            layout_width: 400.0,
            is_dark_mode: false,
            background_color: Color::BLACK,
            currency: "USD".to_string(),
            compact_prices: true,
            build_paragraph,
            format_price: Rc::new(|price: f32, _: &str, _: bool| format!("${:.2}", price)),
        }
    }

    fn indicator(key: IndicatorKey, build_paragraph: BuildParagraph) -> Indicator {
        let table = IndicatorTypeTable::from_config(&Config::default()).unwrap();
        Indicator::new(key, table.get(key).clone(), &context(build_paragraph))
    }

    fn params() -> DrawParams {
        DrawParams::new(400.0, 90.0, 110.0, 400.0, 60.0)
    }

    #[test]
    fn test_bubble_width_from_text_metrics() {
        let mut ind = indicator(IndicatorKey::StopLoss, monospace_builder(7.0, 13.0));
        let mut fg = Paint::new();
        assert_eq!(ind.bubble_width(), 0.0);

        ind.update_price(Some(101.0), &mut fg);
        // "SL" = 14, "$101.00" = 49, gap 3, padding 2 * 6
        assert_eq!(ind.bubble_width(), 14.0 + 3.0 + 49.0 + 12.0);
        assert_eq!(fg.blend_mode, BlendMode::Src);
        assert_eq!(ind.min_max_in_range(), Some(PriceRange::point(101.0)));
    }

    #[test]
    fn test_null_price_clears_cache() {
        let mut ind = indicator(IndicatorKey::TakeProfit, monospace_builder(7.0, 13.0));
        let mut fg = Paint::new();
        ind.update_price(Some(100.0), &mut fg);
        assert!(ind.has_text());

        ind.update_price(None, &mut fg);
        assert!(!ind.has_text());
        assert_eq!(ind.bubble_width(), 0.0);
        assert_eq!(ind.min_max_in_range(), None);

        let mut canvas = RecordingCanvas::new();
        let mut path = Path::new();
        let mut paints = SharedPaints::new(&LayoutConfig::default());
        ind.draw(&mut canvas, &mut path, &params(), 200.0, 50.0, 50.0, &mut paints);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_unavailable_builder_degrades_quietly() {
        let none: BuildParagraph = Rc::new(|_: &TextSegment<'_>| -> Option<Box<dyn Paragraph>> { None });
        let mut ind = indicator(IndicatorKey::Liquidation, none);
        let mut fg = Paint::new();
        ind.update_price(Some(100.0), &mut fg);
        assert_eq!(ind.price(), Some(100.0));
        assert!(!ind.has_text());
        assert_eq!(ind.bubble_width(), 0.0);
        assert_eq!(ind.price_y(&params()), None);
    }

    #[test]
    fn test_missing_metrics_degrades_quietly() {
        let empty: BuildParagraph = Rc::new(|_: &TextSegment<'_>| {
            Some(Box::new(MonospaceParagraph::new("", 7.0, 13.0)) as Box<dyn Paragraph>)
        });
        let mut ind = indicator(IndicatorKey::Liquidation, empty);
        ind.update_price(Some(100.0), &mut Paint::new());
        assert!(!ind.has_text());
    }

    #[test]
    fn test_set_build_paragraph_rebuilds_text() {
        let none: BuildParagraph = Rc::new(|_: &TextSegment<'_>| -> Option<Box<dyn Paragraph>> { None });
        let mut ind = indicator(IndicatorKey::TakeProfit, none);
        let mut fg = Paint::new();
        ind.update_price(Some(100.0), &mut fg);
        assert!(!ind.has_text());

        ind.set_build_paragraph(monospace_builder(7.0, 13.0), &mut fg);
        assert!(ind.has_text());
    }

    #[test]
    fn test_out_of_range_draws_nothing() {
        let mut ind = indicator(IndicatorKey::TakeProfit, monospace_builder(7.0, 13.0));
        ind.update_price(Some(120.0), &mut Paint::new());

        let mut canvas = RecordingCanvas::new();
        let mut path = Path::new();
        ind.draw_line(&mut canvas, &mut path, &params(), 0.0, 50.0, 50.0);
        assert!(canvas.is_empty());
        assert_eq!(ind.price_y(&params()), None);
    }

    #[test]
    fn test_draw_line_then_bubble() {
        let mut ind = indicator(IndicatorKey::TakeProfit, monospace_builder(7.0, 13.0));
        ind.update_price(Some(100.0), &mut Paint::new());
        let width = ind.bubble_width();

        let mut canvas = RecordingCanvas::new();
        let mut path = Path::new();
        let mut paints = SharedPaints::new(&LayoutConfig::default());
        ind.draw(&mut canvas, &mut path, &params(), 200.0, width, width, &mut paints);

        assert_eq!(canvas.paths().count(), 1);
        assert_eq!(canvas.rrects().count(), 1);
        assert_eq!(canvas.len(), 4);
    }

    #[test]
    fn test_color_mode_switches_bubble_layers() {
        let mut ind = indicator(IndicatorKey::StopLoss, monospace_builder(7.0, 13.0));
        ind.update_price(Some(100.0), &mut Paint::new());
        ind.set_color_mode(true, Color::from_hex("#0B0E11").unwrap());
        assert!(ind.is_dark_mode());

        let mut canvas = RecordingCanvas::new();
        let mut paints = SharedPaints::new(&LayoutConfig::default());
        ind.draw_bubble(&mut canvas, 120.0, ind.bubble_width(), &mut paints);
        assert_eq!(canvas.rrects().count(), 4);
    }

    #[test]
    fn test_nan_price_is_live_but_not_drawable() {
        let mut ind = indicator(IndicatorKey::StopLoss, monospace_builder(7.0, 13.0));
        ind.update_price(Some(f32::NAN), &mut Paint::new());
        assert!(ind.price().is_some());
        assert_eq!(ind.min_max_in_range(), None);
        assert_eq!(ind.price_y(&params()), None);
    }
}

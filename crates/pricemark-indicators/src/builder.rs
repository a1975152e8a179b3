//! Owns every marker, keeps them in sync with data and drives drawing.

use log::debug;
use pricemark_config::{Config, ConfigError};
use pricemark_core::{Color, DrawParams, IndicatorKey, PriceRange};
use pricemark_render::{BuildParagraph, Canvas, Path};

use crate::indicator::{ChartContext, FormatPrice, Indicator};
use crate::layout::{self, IndicatorPosition};
use crate::snapshot::PriceSnapshot;
use crate::style::SharedPaints;
use crate::types::IndicatorTypeTable;

/// Verbs in one connector: move, cubic, line.
const DRAW_PATH_CAPACITY: usize = 3;

/// The overlay engine: one optional [`Indicator`] per [`IndicatorKey`].
///
/// Draw in two passes so every line sits under every bubble:
///
/// ```ignore
/// let positions = builder.draw_lines(&mut canvas, &params);
/// builder.draw_bubbles(&mut canvas, &positions);
/// ```
#[derive(Debug)]
pub struct IndicatorBuilder {
    context: ChartContext,
    types: IndicatorTypeTable,
    indicators: [Option<Indicator>; IndicatorKey::COUNT],
    paints: SharedPaints,
    draw_path: Path,
    disposed: bool,
}

impl IndicatorBuilder {
    /// Create a builder, with live indicators for every price in `initial`.
    pub fn new(
        context: ChartContext,
        types: IndicatorTypeTable,
        initial: Option<&PriceSnapshot>,
    ) -> Self {
        let mut builder = Self {
            paints: SharedPaints::new(&context.layout),
            context,
            types,
            indicators: std::array::from_fn(|_| None),
            draw_path: Path::with_capacity(DRAW_PATH_CAPACITY),
            disposed: false,
        };
        if initial.is_some() {
            builder.update_data(initial);
        }
        builder
    }

    /// Create a builder from configuration with no live indicators.
    pub fn from_config(
        config: &Config,
        layout_width: f32,
        build_paragraph: BuildParagraph,
        format_price: FormatPrice,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let types = IndicatorTypeTable::from_config(config)?;
        let context = ChartContext {
            layout: config.layout,
            layout_width,
            is_dark_mode: config.general.dark_mode,
            background_color: config.background_color(),
            currency: config.general.currency.clone(),
            compact_prices: config.general.compact_prices,
            build_paragraph,
            format_price,
        };
        Ok(Self::new(context, types, None))
    }

    /// Sync live indicators with `data`. `None` removes every indicator.
    pub fn update_data(&mut self, data: Option<&PriceSnapshot>) {
        for key in IndicatorKey::ALL {
            let price = data.and_then(|d| d.get(key));
            let slot = &mut self.indicators[key.index()];

            match (slot.take(), price) {
                (None, None) => {}
                (None, Some(price)) => {
                    let mut indicator =
                        Indicator::new(key, self.types.get(key).clone(), &self.context);
                    indicator.update_price(Some(price), &mut self.paints.foreground);
                    *slot = Some(indicator);
                }
                (Some(indicator), None) => indicator.dispose(),
                (Some(mut indicator), Some(price)) => {
                    if !same_price(indicator.price(), price) {
                        indicator.update_price(Some(price), &mut self.paints.foreground);
                    } else if !indicator.has_text() {
                        indicator.refresh_text(&mut self.paints.foreground);
                    }
                    *slot = Some(indicator);
                }
            }
        }
    }

    /// Combined range of the indicators that widen the y-axis.
    pub fn get_min_max_for_range(&self) -> Option<PriceRange> {
        self.live()
            .filter(|indicator| indicator.should_adjust_y_axis())
            .filter_map(Indicator::min_max_in_range)
            .reduce(PriceRange::union)
    }

    /// Resolved positions of every drawable indicator, top to bottom.
    pub fn calculate_positions(&self, params: &DrawParams) -> Vec<IndicatorPosition> {
        let mut positions: Vec<IndicatorPosition> = self
            .live()
            .filter_map(|indicator| {
                let price_y = indicator.price_y(params)?;
                let price = indicator.price()?;
                Some(IndicatorPosition::new(
                    indicator.key(),
                    price,
                    price_y,
                    indicator.bubble_width(),
                ))
            })
            .collect();
        layout::resolve_overlaps(&mut positions, self.min_center_distance());
        positions
    }

    /// Draw every connector line and return the positions for [`draw_bubbles`](Self::draw_bubbles).
    pub fn draw_lines(&mut self, canvas: &mut dyn Canvas, params: &DrawParams) -> Vec<IndicatorPosition> {
        debug_assert!(!self.disposed, "draw_lines called after dispose");
        let positions = self.calculate_positions(params);
        let max_bubble_width = layout::max_bubble_width(&positions);

        for position in &positions {
            if let Some(indicator) = self.indicators[position.key.index()].as_mut() {
                indicator.draw_line(
                    canvas,
                    &mut self.draw_path,
                    params,
                    position.bubble_y,
                    position.bubble_width,
                    max_bubble_width,
                );
            }
            self.draw_path.reset();
        }
        positions
    }

    /// Draw the bubbles for positions returned by [`draw_lines`](Self::draw_lines).
    pub fn draw_bubbles(&mut self, canvas: &mut dyn Canvas, positions: &[IndicatorPosition]) {
        debug_assert!(!self.disposed, "draw_bubbles called after dispose");
        for position in positions {
            if let Some(indicator) = self.indicators[position.key.index()].as_ref() {
                indicator.draw_bubble(canvas, position.bubble_y, position.bubble_width, &mut self.paints);
            }
        }
    }

    /// Lines, then bubbles.
    pub fn draw_all(&mut self, canvas: &mut dyn Canvas, params: &DrawParams) -> Vec<IndicatorPosition> {
        let positions = self.draw_lines(canvas, params);
        self.draw_bubbles(canvas, &positions);
        positions
    }

    /// Switch theme for every live indicator and rebuild their text.
    pub fn set_color_mode(&mut self, is_dark_mode: bool, background: Color) {
        self.context.is_dark_mode = is_dark_mode;
        self.context.background_color = background;
        for indicator in self.indicators.iter_mut().flatten() {
            indicator.set_color_mode(is_dark_mode, background);
            indicator.refresh_text(&mut self.paints.foreground);
        }
    }

    /// Swap the text backend for every live indicator.
    pub fn set_build_paragraph(&mut self, build_paragraph: BuildParagraph) {
        for indicator in self.indicators.iter_mut().flatten() {
            indicator.set_build_paragraph(build_paragraph.clone(), &mut self.paints.foreground);
        }
        self.context.build_paragraph = build_paragraph;
    }

    /// Dispose every indicator and the shared scratch resources.
    pub fn dispose(&mut self) {
        debug_assert!(!self.disposed, "indicator builder disposed twice");
        if self.disposed {
            return;
        }
        for slot in &mut self.indicators {
            if let Some(indicator) = slot.take() {
                indicator.dispose();
            }
        }
        self.draw_path.reset();
        self.paints.release();
        self.disposed = true;
        debug!("Indicator builder disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of live indicators.
    pub fn active_count(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn indicator(&self, key: IndicatorKey) -> Option<&Indicator> {
        self.indicators[key.index()].as_ref()
    }

    pub fn min_center_distance(&self) -> f32 {
        self.context.layout.min_center_distance()
    }

    pub fn context(&self) -> &ChartContext {
        &self.context
    }

    fn live(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.iter().flatten()
    }
}

impl Drop for IndicatorBuilder {
    fn drop(&mut self) {
        if !self.disposed {
            self.dispose();
        }
    }
}

/// Price equality for diffing; NaN matches NaN.
fn same_price(current: Option<f32>, next: f32) -> bool {
    match current {
        Some(current) => current == next || (current.is_nan() && next.is_nan()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use pricemark_render::{
        monospace_builder, MonospaceParagraph, Paragraph, PathEffect, RecordingCanvas, TextSegment,
    };

    fn builder_with(build_paragraph: BuildParagraph) -> IndicatorBuilder {
        IndicatorBuilder::from_config(
            &Config::default(),
            400.0,
            build_paragraph,
            Rc::new(|price: f32, _: &str, _: bool| format!("{:.2}", price)),
        )
        .unwrap()
    }

    fn builder() -> IndicatorBuilder {
        builder_with(monospace_builder(7.0, 13.0))
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut b = builder();
        assert!(b.is_empty());

        b.update_data(Some(&PriceSnapshot::new().with(IndicatorKey::StopLoss, 95.0)));
        assert_eq!(b.active_count(), 1);
        assert!(b.indicator(IndicatorKey::StopLoss).is_some());

        b.update_data(Some(&PriceSnapshot::new().with(IndicatorKey::StopLoss, 96.0)));
        assert_eq!(b.indicator(IndicatorKey::StopLoss).unwrap().price(), Some(96.0));

        b.update_data(Some(&PriceSnapshot::new()));
        assert!(b.is_empty());
    }

    #[test]
    fn test_initial_snapshot_creates_and_prices() {
        let snapshot = PriceSnapshot::new()
            .with(IndicatorKey::Liquidation, 80.0)
            .with(IndicatorKey::TakeProfit, 120.0);
        let table = IndicatorTypeTable::from_config(&Config::default()).unwrap();
        let context = builder().context().clone();
        let b = IndicatorBuilder::new(context, table, Some(&snapshot));
        assert_eq!(b.active_count(), 2);
        assert_eq!(b.indicator(IndicatorKey::TakeProfit).unwrap().price(), Some(120.0));
    }

    #[test]
    fn test_unchanged_price_skips_relayout() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&calls);
        let build: BuildParagraph = Rc::new(move |segment: &TextSegment<'_>| {
            counter.set(counter.get() + 1);
            Some(Box::new(MonospaceParagraph::new(segment.text, 7.0, 13.0)) as Box<dyn Paragraph>)
        });
        let mut b = builder_with(build);
        let snapshot = PriceSnapshot::new().with(IndicatorKey::TakeProfit, 101.3);

        b.update_data(Some(&snapshot));
        assert_eq!(calls.get(), 2);
        b.update_data(Some(&snapshot));
        assert_eq!(calls.get(), 2);
        b.update_data(Some(&snapshot.with(IndicatorKey::TakeProfit, 101.4)));
        assert_eq!(calls.get(), 4);

        let nan = PriceSnapshot::new().with(IndicatorKey::TakeProfit, f32::NAN);
        b.update_data(Some(&nan));
        assert_eq!(calls.get(), 6);
        b.update_data(Some(&nan));
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn test_unchanged_price_retries_missing_text() {
        let fonts_ready = Rc::new(Cell::new(false));
        let ready = Rc::clone(&fonts_ready);
        let build: BuildParagraph = Rc::new(move |segment: &TextSegment<'_>| -> Option<Box<dyn Paragraph>> {
            if !ready.get() {
                return None;
            }
            Some(Box::new(MonospaceParagraph::new(segment.text, 7.0, 13.0)) as Box<dyn Paragraph>)
        });
        let mut b = builder_with(build);
        let snapshot = PriceSnapshot::new().with(IndicatorKey::StopLoss, 100.0);
        let params = DrawParams::new(400.0, 90.0, 110.0, 400.0, 60.0);

        b.update_data(Some(&snapshot));
        assert!(!b.indicator(IndicatorKey::StopLoss).unwrap().has_text());
        assert!(b.calculate_positions(&params).is_empty());

        fonts_ready.set(true);
        b.update_data(Some(&snapshot));
        assert!(b.indicator(IndicatorKey::StopLoss).unwrap().has_text());
        assert_eq!(b.calculate_positions(&params).len(), 1);
    }

    #[test]
    fn test_min_max_only_from_adjusting_kinds() {
        let mut config = Config::default();
        config.indicators.liquidation = Some(pricemark_config::IndicatorOverride {
            should_adjust_y_axis: Some(false),
            ..Default::default()
        });
        let mut b = IndicatorBuilder::from_config(
            &config,
            400.0,
            monospace_builder(7.0, 13.0),
            Rc::new(|price: f32, _: &str, _: bool| price.to_string()),
        )
        .unwrap();
        assert_eq!(b.get_min_max_for_range(), None);

        b.update_data(Some(
            &PriceSnapshot::new()
                .with(IndicatorKey::Liquidation, 50.0)
                .with(IndicatorKey::StopLoss, 90.0)
                .with(IndicatorKey::TakeProfit, 130.0),
        ));
        assert_eq!(b.get_min_max_for_range(), Some(PriceRange::new(90.0, 130.0)));

        b.update_data(Some(&PriceSnapshot::new().with(IndicatorKey::Liquidation, 50.0)));
        assert_eq!(b.get_min_max_for_range(), None);
    }

    #[test]
    fn test_set_color_mode_reaches_live_indicators() {
        let mut b = builder();
        b.update_data(Some(&PriceSnapshot::new().with(IndicatorKey::StopLoss, 100.0)));
        b.set_color_mode(true, Color::from_hex("#0B0E11").unwrap());
        assert!(b.indicator(IndicatorKey::StopLoss).unwrap().is_dark_mode());
        assert!(b.context().is_dark_mode);

        let params = DrawParams::new(400.0, 90.0, 110.0, 400.0, 60.0);
        let mut canvas = RecordingCanvas::new();
        b.draw_all(&mut canvas, &params);
        assert_eq!(canvas.rrects().count(), 4);
    }

    #[test]
    fn test_set_build_paragraph_recovers_text() {
        let none: BuildParagraph = Rc::new(|_: &TextSegment<'_>| -> Option<Box<dyn Paragraph>> { None });
        let mut b = builder_with(none);
        b.update_data(Some(&PriceSnapshot::new().with(IndicatorKey::StopLoss, 100.0)));
        let params = DrawParams::new(400.0, 90.0, 110.0, 400.0, 60.0);
        assert!(b.calculate_positions(&params).is_empty());

        b.set_build_paragraph(monospace_builder(7.0, 13.0));
        assert_eq!(b.calculate_positions(&params).len(), 1);
    }

    #[test]
    fn test_dispose_drops_everything() {
        let mut b = builder();
        b.update_data(Some(
            &PriceSnapshot::new()
                .with(IndicatorKey::StopLoss, 100.0)
                .with(IndicatorKey::TakeProfit, 105.0),
        ));
        let params = DrawParams::new(400.0, 90.0, 110.0, 400.0, 60.0);
        b.draw_all(&mut RecordingCanvas::new(), &params);
        b.paints.stroke.path_effect = Some(PathEffect::Corner { radius: 4.0 });

        b.dispose();
        assert!(b.is_disposed());
        assert!(b.is_empty());
        assert!(b.draw_path.is_empty());
        assert_eq!(b.paints.stroke.path_effect, None);
        assert_eq!(b.paints.stroke.stroke_width, b.context().layout.stroke_width);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "disposed twice")]
    fn test_double_dispose_panics_in_debug() {
        let mut b = builder();
        b.dispose();
        b.dispose();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "after dispose")]
    fn test_draw_after_dispose_panics_in_debug() {
        let mut b = builder();
        b.dispose();
        let mut canvas = RecordingCanvas::new();
        b.draw_lines(&mut canvas, &DrawParams::new(400.0, 90.0, 110.0, 400.0, 60.0));
    }

    #[test]
    fn test_same_price() {
        assert!(!same_price(None, 1.0));
        assert!(same_price(Some(1.0), 1.0));
        assert!(!same_price(Some(1.0), 1.5));
        assert!(same_price(Some(f32::NAN), f32::NAN));
        assert!(!same_price(Some(f32::NAN), 1.0));
    }
}

//! Connector-line and bubble drawing for a single marker.

use pricemark_config::LayoutConfig;
use pricemark_core::{Color, Point, RRect, Rect};
use pricemark_render::{Canvas, LineMetrics, Paragraph, Path, Shader, TileMode};

use crate::style::{IndicatorStyle, SharedPaints};

/// Distances at or below this are treated as zero.
pub const EPSILON: f32 = 1e-3;

/// Where a connector starts and where it has to land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorGeometry {
    /// Left edge of the bubble.
    pub bubble_x: f32,
    /// Resolved bubble center Y.
    pub bubble_y: f32,
    pub bubble_width: f32,
    /// Widest bubble drawn this frame.
    pub max_bubble_width: f32,
    /// Pixel Y of the marker's price.
    pub price_y: f32,
    pub chart_width: f32,
    pub y_axis_width: f32,
}

impl ConnectorGeometry {
    /// X where connectors end and the fade reaches zero.
    pub fn chart_end_x(&self, layout: &LayoutConfig) -> f32 {
        self.chart_width - (self.y_axis_width + layout.y_axis_fade_width_offset)
    }

    pub fn bubble_right(&self) -> f32 {
        self.bubble_x + self.bubble_width
    }
}

/// Fill `path` with the connector from the bubble's right edge to the chart end.
///
/// Returns the chart end X.
pub fn build_connector(
    path: &mut Path,
    g: &ConnectorGeometry,
    layout: &LayoutConfig,
    line_corner_radius: f32,
) -> f32 {
    let chart_end_x = g.chart_end_x(layout);
    let right = g.bubble_right();
    let horizontal_reach = chart_end_x - right;
    let vertical_distance = (g.price_y - g.bubble_y).abs();

    path.reset();
    path.move_to(right, g.bubble_y);

    if horizontal_reach <= EPSILON {
        path.line_to(chart_end_x, g.price_y);
        return chart_end_x;
    }
    if vertical_distance <= EPSILON {
        path.line_to(chart_end_x, g.bubble_y);
        return chart_end_x;
    }

    // Bend past the bubble by the padding or the spare width, whichever is larger,
    // capped by the corner radius and the reach.
    let spare = (g.max_bubble_width - g.bubble_width).max(0.0);
    let anchor_reach = layout
        .line_curve_right_padding
        .max(spare)
        .min(line_corner_radius.min(horizontal_reach));

    if anchor_reach <= EPSILON {
        path.line_to(chart_end_x, g.price_y);
        return chart_end_x;
    }

    let anchor_x = right + anchor_reach;
    let third = anchor_reach / 3.0;
    path.cubic_to(
        right + third,
        g.bubble_y,
        right + third * 2.0,
        g.price_y,
        anchor_x,
        g.price_y,
    );
    if anchor_x < chart_end_x {
        path.line_to(chart_end_x, g.price_y);
    }
    chart_end_x
}

/// Stroke a built connector: glow first, then the faded main line.
pub fn stroke_connector(
    canvas: &mut dyn Canvas,
    path: &Path,
    style: &mut IndicatorStyle,
    chart_end_x: f32,
    layout: &LayoutConfig,
) {
    let corner_effect = style.ensure_corner_effect(layout.corner_radius);
    let color = style.ty().color;

    if let Some(glow) = style.line_glow_paint_mut() {
        glow.path_effect = corner_effect;
        canvas.draw_path(path, glow);
    }

    let fade = Shader::linear_gradient(
        Point::new(chart_end_x - layout.line_fade_distance, 0.0),
        Point::new(chart_end_x, 0.0),
        [color, Color::TRANSPARENT],
        TileMode::Clamp,
    );
    let line = style.line_paint_mut();
    line.path_effect = corner_effect;
    line.shader = Some(fade);
    canvas.draw_path(path, line);
    line.shader = None;
}

/// Laid-out label and value text for one bubble.
pub struct BubbleText<'a> {
    pub label: &'a dyn Paragraph,
    pub label_metrics: LineMetrics,
    pub value: &'a dyn Paragraph,
    pub value_metrics: LineMetrics,
}

/// Draw the pill at center `y` with its label and value.
#[allow(clippy::too_many_arguments)]
pub fn draw_bubble(
    canvas: &mut dyn Canvas,
    y: f32,
    bubble_width: f32,
    style: &IndicatorStyle,
    is_dark_mode: bool,
    text: &BubbleText<'_>,
    paints: &mut SharedPaints,
    layout: &LayoutConfig,
) {
    let ty = style.ty();
    let height = layout.bubble_height;
    let bubble_y = y - height / 2.0;
    let rrect = RRect::pill(Rect::new(ty.bubble_margin_left, bubble_y, bubble_width, height));

    if is_dark_mode {
        canvas.draw_rrect(&rrect, style.bottom_shadow_paint());
        canvas.draw_rrect(&rrect, style.top_shadow_paint());
    }

    paints.fill.set_color(ty.color);
    paints.fill.set_alpha(ty.fill_alpha);
    canvas.draw_rrect(&rrect, &paints.fill);

    if is_dark_mode {
        paints.stroke.stroke_width = layout.stroke_width;
        paints.stroke.set_color(ty.color);
        paints.stroke.set_alpha(ty.stroke_alpha);
        canvas.draw_rrect(&rrect.inset(layout.stroke_width), &paints.stroke);
    }

    let text_height = text.label_metrics.height.max(text.value_metrics.height);
    let text_y = bubble_y + (height - text_height) / 2.0;
    let label_x = ty.bubble_margin_left + ty.bubble_padding_horizontal;
    let value_x = label_x + text.label_metrics.width + ty.label_price_gap;

    canvas.draw_paragraph(text.label, label_x, text_y);
    canvas.draw_paragraph(text.value, value_x, text_y);
}

//! Resolved paints for one marker, plus the paints shared by all markers.

use pricemark_config::LayoutConfig;
use pricemark_core::Color;
use pricemark_render::{BlendMode, BlurStyle, ImageFilter, MaskFilter, Paint, PaintStyle, PathEffect};

use crate::types::IndicatorTypeConfig;

/// Paint objects owned by a single [`Indicator`](crate::Indicator).
#[derive(Debug)]
pub struct IndicatorStyle {
    ty: IndicatorTypeConfig,
    line_paint: Paint,
    line_glow_paint: Option<Paint>,
    top_shadow_paint: Paint,
    bottom_shadow_paint: Paint,
    corner_effect: Option<PathEffect>,
    current_corner_radius: f32,
    corner_effect_builds: u32,
    released: bool,
}

impl IndicatorStyle {
    pub fn new(ty: IndicatorTypeConfig, background: Color, layout: &LayoutConfig) -> Self {
        let mut line_paint = Paint::stroke(ty.color, ty.line_width);
        line_paint.set_alpha(ty.line_alpha);

        let line_glow_paint = (ty.line_glow_intensity > 0.0).then(|| {
            let mut glow = Paint::stroke(ty.color, ty.line_width);
            glow.set_alpha(ty.line_glow_intensity);
            glow.mask_filter = Some(MaskFilter::Blur {
                style: BlurStyle::Normal,
                sigma: layout.glow_blur_sigma,
                respect_ctm: true,
            });
            glow
        });

        Self {
            top_shadow_paint: shadow_paint(background, -layout.shadow_offset, layout),
            bottom_shadow_paint: shadow_paint(background, layout.shadow_offset, layout),
            ty,
            line_paint,
            line_glow_paint,
            corner_effect: None,
            current_corner_radius: 0.0,
            corner_effect_builds: 0,
            released: false,
        }
    }

    pub fn ty(&self) -> &IndicatorTypeConfig {
        &self.ty
    }

    pub fn line_paint(&self) -> &Paint {
        &self.line_paint
    }

    pub(crate) fn line_paint_mut(&mut self) -> &mut Paint {
        &mut self.line_paint
    }

    pub fn line_glow_paint(&self) -> Option<&Paint> {
        self.line_glow_paint.as_ref()
    }

    pub(crate) fn line_glow_paint_mut(&mut self) -> Option<&mut Paint> {
        self.line_glow_paint.as_mut()
    }

    pub fn top_shadow_paint(&self) -> &Paint {
        &self.top_shadow_paint
    }

    pub fn bottom_shadow_paint(&self) -> &Paint {
        &self.bottom_shadow_paint
    }

    /// Rebuild both drop shadows for a new background color.
    pub fn set_background(&mut self, background: Color, layout: &LayoutConfig) {
        self.top_shadow_paint = shadow_paint(background, -layout.shadow_offset, layout);
        self.bottom_shadow_paint = shadow_paint(background, layout.shadow_offset, layout);
    }

    /// Corner-rounding effect for `radius`, rebuilt only when the radius changes.
    ///
    /// A radius of zero (or less) drops the cached effect.
    pub fn ensure_corner_effect(&mut self, radius: f32) -> Option<PathEffect> {
        if !(radius > 0.0) {
            self.corner_effect = None;
            self.current_corner_radius = 0.0;
            return None;
        }
        if self.corner_effect.is_none() || self.current_corner_radius != radius {
            self.corner_effect = Some(PathEffect::Corner { radius });
            self.current_corner_radius = radius;
            self.corner_effect_builds += 1;
        }
        self.corner_effect
    }

    /// How many times the corner effect has been (re)built.
    pub fn corner_effect_builds(&self) -> u32 {
        self.corner_effect_builds
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Drop every owned effect. Must run once per style.
    pub fn release(&mut self) {
        debug_assert!(!self.released, "indicator style released twice");
        self.line_paint.shader = None;
        self.line_paint.path_effect = None;
        self.line_glow_paint = None;
        self.top_shadow_paint.image_filter = None;
        self.bottom_shadow_paint.image_filter = None;
        self.corner_effect = None;
        self.current_corner_radius = 0.0;
        self.released = true;
    }
}

fn shadow_paint(background: Color, dy: f32, layout: &LayoutConfig) -> Paint {
    let mut paint = Paint::new();
    paint.anti_alias = true;
    paint.set_color(background);
    paint.set_alpha(layout.shadow_alpha);
    paint.image_filter = Some(ImageFilter::DropShadow {
        dx: 0.0,
        dy,
        sigma_x: layout.shadow_blur,
        sigma_y: layout.shadow_blur,
        color: background,
    });
    paint
}

/// Paints lent to every indicator's bubble draw.
#[derive(Debug, Clone)]
pub struct SharedPaints {
    /// Text foreground.
    pub foreground: Paint,
    /// Bubble fill.
    pub fill: Paint,
    /// Dark-mode inset bubble stroke.
    pub stroke: Paint,
}

impl SharedPaints {
    pub fn new(layout: &LayoutConfig) -> Self {
        let mut foreground = Paint::new();
        foreground.anti_alias = true;
        foreground.blend_mode = BlendMode::Src;

        let mut fill = Paint::new();
        fill.anti_alias = true;
        fill.blend_mode = BlendMode::Src;

        let mut stroke = Paint::new();
        stroke.anti_alias = true;
        stroke.style = PaintStyle::Stroke;
        stroke.stroke_width = layout.stroke_width;

        Self {
            foreground,
            fill,
            stroke,
        }
    }

    /// Clear per-frame effects in place.
    pub fn release(&mut self) {
        self.foreground.clear_effects();
        self.fill.clear_effects();
        self.stroke.clear_effects();
    }
}

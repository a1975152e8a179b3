//! Paint descriptors handed to the host canvas.
//!
//! A [`Paint`] is a plain value: the host maps it onto whatever native paint
//! object its backend uses. Optional effects (shader, path effect, image and
//! mask filters) are owned by the paint and released with it.

use pricemark_core::{Color, Point};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Replace destination.
    Src,
    #[default]
    SrcOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileMode {
    #[default]
    Clamp,
    Repeat,
    Mirror,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurStyle {
    #[default]
    Normal,
    Solid,
    Outer,
    Inner,
}

/// Color source applied instead of the flat paint color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shader {
    /// Two-stop linear gradient between `start` and `end`.
    LinearGradient {
        start: Point,
        end: Point,
        colors: [Color; 2],
        tile_mode: TileMode,
    },
}

impl Shader {
    #[must_use]
    pub fn linear_gradient(start: Point, end: Point, colors: [Color; 2], tile_mode: TileMode) -> Self {
        Shader::LinearGradient {
            start,
            end,
            colors,
            tile_mode,
        }
    }
}

/// Geometry modifier applied to a path before stroking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathEffect {
    /// Round every sharp corner with the given radius.
    Corner { radius: f32 },
}

/// Post-processing filter applied to what a paint draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageFilter {
    DropShadow {
        dx: f32,
        dy: f32,
        sigma_x: f32,
        sigma_y: f32,
        color: Color,
    },
}

/// Coverage filter applied to the shape mask.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaskFilter {
    Blur {
        style: BlurStyle,
        sigma: f32,
        respect_ctm: bool,
    },
}

/// How a shape is filled or stroked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub stroke_cap: StrokeCap,
    pub stroke_join: StrokeJoin,
    pub anti_alias: bool,
    pub blend_mode: BlendMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shader: Option<Shader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_effect: Option<PathEffect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_filter: Option<ImageFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_filter: Option<MaskFilter>,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            anti_alias: false,
            blend_mode: BlendMode::SrcOver,
            shader: None,
            path_effect: None,
            image_filter: None,
            mask_filter: None,
        }
    }
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anti-aliased round-capped stroke paint.
    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: width,
            stroke_cap: StrokeCap::Round,
            stroke_join: StrokeJoin::Round,
            anti_alias: true,
            ..Self::default()
        }
    }

    /// Replace only the alpha channel of the current color.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.color = self.color.with_alpha(alpha);
    }

    /// Set the color, keeping nothing of the previous one.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Drop every attached effect, keeping color and stroke settings.
    pub fn clear_effects(&mut self) {
        self.shader = None;
        self.path_effect = None;
        self.image_filter = None;
        self.mask_filter = None;
    }
}

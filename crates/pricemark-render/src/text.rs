//! Text layout boundary.
//!
//! The engine never shapes text. It asks an injected [`BuildParagraph`]
//! function for an opaque [`Paragraph`], lays it out and reads back the first
//! line's metrics. A builder returning `None` (fonts not loaded yet) is a
//! normal transient state.

use std::rc::Rc;

use pricemark_core::Color;
use serde::Serialize;

use crate::paint::Paint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Regular,
    Semibold,
    Bold,
}

/// Measured size of one laid-out line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LineMetrics {
    pub width: f32,
    pub height: f32,
}

/// Input to a paragraph builder.
#[derive(Debug, Clone, Copy)]
pub struct TextSegment<'a> {
    pub text: &'a str,
    pub color: Color,
    pub weight: FontWeight,
    pub foreground: &'a Paint,
}

/// A shaped block of text owned by the host's text backend.
pub trait Paragraph {
    /// Lay the text out for the given maximum line width.
    fn layout(&mut self, max_width: f32);

    /// Metrics of the first line, `None` before layout or when nothing was laid out.
    fn line_metrics(&self) -> Option<LineMetrics>;

    /// Source text, for hosts and display lists.
    fn text(&self) -> &str;
}

/// Injected text-layout backend.
pub type BuildParagraph = Rc<dyn Fn(&TextSegment<'_>) -> Option<Box<dyn Paragraph>>>;

/// A paragraph with a fixed advance per character and a single line.
///
/// Useful for headless hosts (display-list export, tests) where no font
/// backend exists.
#[derive(Debug, Clone, PartialEq)]
pub struct MonospaceParagraph {
    text: String,
    advance: f32,
    line_height: f32,
    metrics: Option<LineMetrics>,
}

impl MonospaceParagraph {
    pub fn new(text: impl Into<String>, advance: f32, line_height: f32) -> Self {
        Self {
            text: text.into(),
            advance,
            line_height,
            metrics: None,
        }
    }
}

impl Paragraph for MonospaceParagraph {
    fn layout(&mut self, max_width: f32) {
        if self.text.is_empty() {
            self.metrics = None;
            return;
        }
        let natural = self.text.chars().count() as f32 * self.advance;
        self.metrics = Some(LineMetrics {
            width: natural.min(max_width.max(0.0)),
            height: self.line_height,
        });
    }

    fn line_metrics(&self) -> Option<LineMetrics> {
        self.metrics
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// A [`BuildParagraph`] producing [`MonospaceParagraph`]s.
pub fn monospace_builder(advance: f32, line_height: f32) -> BuildParagraph {
    Rc::new(move |segment: &TextSegment<'_>| {
        Some(Box::new(MonospaceParagraph::new(segment.text, advance, line_height)) as Box<dyn Paragraph>)
    })
}

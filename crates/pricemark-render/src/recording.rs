//! Display-list canvas.

use pricemark_core::RRect;
use serde::Serialize;

use crate::canvas::Canvas;
use crate::paint::Paint;
use crate::path::{Path, PathVerb};
use crate::text::{LineMetrics, Paragraph};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    #[serde(rename = "rrect")]
    RRect {
        rrect: RRect,
        paint: Paint,
    },
    Path {
        verbs: Vec<PathVerb>,
        paint: Paint,
    },
    Paragraph {
        text: String,
        x: f32,
        y: f32,
        metrics: Option<LineMetrics>,
    },
}

/// A [`Canvas`] that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded paths, in draw order.
    pub fn paths(&self) -> impl Iterator<Item = (&[PathVerb], &Paint)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Path { verbs, paint } => Some((verbs.as_slice(), paint)),
            _ => None,
        })
    }

    /// Recorded rounded rectangles, in draw order.
    pub fn rrects(&self) -> impl Iterator<Item = (&RRect, &Paint)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::RRect { rrect, paint } => Some((rrect, paint)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn draw_rrect(&mut self, rrect: &RRect, paint: &Paint) {
        self.commands.push(DrawCommand::RRect {
            rrect: *rrect,
            paint: paint.clone(),
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.commands.push(DrawCommand::Path {
            verbs: path.verbs().to_vec(),
            paint: paint.clone(),
        });
    }

    fn draw_paragraph(&mut self, paragraph: &dyn Paragraph, x: f32, y: f32) {
        self.commands.push(DrawCommand::Paragraph {
            text: paragraph.text().to_string(),
            x,
            y,
            metrics: paragraph.line_metrics(),
        });
    }
}

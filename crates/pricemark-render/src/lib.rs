//! Drawing-surface boundary for pricemark.
//!
//! The overlay engine draws through the [`Canvas`] trait using plain paint,
//! path and text descriptors defined here. Hosts implement `Canvas` and
//! [`Paragraph`] on top of their own 2D backend.

pub mod canvas;
pub mod paint;
pub mod path;
pub mod recording;
pub mod text;

pub use canvas::Canvas;
pub use paint::{
    BlendMode, BlurStyle, ImageFilter, MaskFilter, Paint, PaintStyle, PathEffect, Shader,
    StrokeCap, StrokeJoin, TileMode,
};
pub use path::{Path, PathVerb};
pub use recording::{DrawCommand, RecordingCanvas};
pub use text::{
    monospace_builder, BuildParagraph, FontWeight, LineMetrics, MonospaceParagraph, Paragraph,
    TextSegment,
};

//! Traits for host drawing surfaces.
//!
//! This module defines the [`Canvas`] trait which provides the interface the
//! overlay engine draws through. The engine never rasterizes anything itself;
//! every primitive ends up as one of these three calls.

use pricemark_core::RRect;

use crate::paint::Paint;
use crate::path::Path;
use crate::text::Paragraph;

/// A host drawing surface.
///
/// Implementations forward to a real 2D backend (Skia, a GPU tessellator,
/// a display list). Calls are issued in paint order: later calls draw above
/// earlier ones.
///
/// # Example
///
/// ```ignore
/// impl Canvas for SkiaCanvas {
///     fn draw_rrect(&mut self, rrect: &RRect, paint: &Paint) {
///         self.inner.draw_rrect(to_sk_rrect(rrect), &self.paints.resolve(paint));
///     }
///     // ...
/// }
/// ```
pub trait Canvas {
    /// Fill or stroke a rounded rectangle, depending on `paint.style`.
    fn draw_rrect(&mut self, rrect: &RRect, paint: &Paint);

    /// Stroke or fill a path, honoring the paint's shader, path effect and filters.
    fn draw_path(&mut self, path: &Path, paint: &Paint);

    /// Paint a laid-out paragraph with its top-left corner at `(x, y)`.
    fn draw_paragraph(&mut self, paragraph: &dyn Paragraph, x: f32, y: f32);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn draw_rrect(&mut self, rrect: &RRect, paint: &Paint) {
        (**self).draw_rrect(rrect, paint);
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        (**self).draw_path(path, paint);
    }

    fn draw_paragraph(&mut self, paragraph: &dyn Paragraph, x: f32, y: f32) {
        (**self).draw_paragraph(paragraph, x, y);
    }
}

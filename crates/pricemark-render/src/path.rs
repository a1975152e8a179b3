//! Reusable vector path.

use pricemark_core::Point;
use serde::Serialize;

/// One path command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verb", rename_all = "snake_case")]
pub enum PathVerb {
    MoveTo { to: Point },
    LineTo { to: Point },
    CubicTo { c1: Point, c2: Point, to: Point },
}

impl PathVerb {
    /// End point of the segment.
    pub fn end(&self) -> Point {
        match *self {
            PathVerb::MoveTo { to } | PathVerb::LineTo { to } | PathVerb::CubicTo { to, .. } => to,
        }
    }
}

/// A sequence of move/line/cubic commands.
///
/// [`reset`](Path::reset) keeps the verb buffer's capacity, so a scratch path
/// reused every frame stops allocating once it has seen its largest shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    verbs: Vec<PathVerb>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            verbs: Vec::with_capacity(capacity),
        }
    }

    /// Remove all verbs without releasing storage.
    pub fn reset(&mut self) {
        self.verbs.clear();
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.verbs.push(PathVerb::MoveTo {
            to: Point::new(x, y),
        });
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.verbs.push(PathVerb::LineTo {
            to: Point::new(x, y),
        });
        self
    }

    pub fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> &mut Self {
        self.verbs.push(PathVerb::CubicTo {
            c1: Point::new(x1, y1),
            c2: Point::new(x2, y2),
            to: Point::new(x3, y3),
        });
        self
    }

    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.verbs.last().map(PathVerb::end)
    }

    /// Rightmost x reached by any end point or control point.
    pub fn max_x(&self) -> Option<f32> {
        self.verbs
            .iter()
            .flat_map(|verb| match *verb {
                PathVerb::MoveTo { to } | PathVerb::LineTo { to } => [to.x, to.x, to.x],
                PathVerb::CubicTo { c1, c2, to } => [c1.x, c2.x, to.x],
            })
            .reduce(f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_reset_keeps_capacity() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0)
            .cubic_to(1.0, 0.0, 2.0, 5.0, 3.0, 5.0)
            .line_to(10.0, 5.0);
        assert_eq!(path.verbs().len(), 3);
        assert_eq!(path.last_point(), Some(Point::new(10.0, 5.0)));
        assert_eq!(path.max_x(), Some(10.0));

        let capacity = path.verbs.capacity();
        path.reset();
        assert!(path.is_empty());
        assert_eq!(path.verbs.capacity(), capacity);
        assert_eq!(path.last_point(), None);
    }
}

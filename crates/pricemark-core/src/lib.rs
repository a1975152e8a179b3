//! Core types for the pricemark overlay engine.
//!
//! This crate provides fundamental value types with no external dependencies:
//! - `Color` - RGBA color with hex parsing
//! - `Point`, `Rect`, `RRect` - screen-space geometry in pixels
//! - `DrawParams` - the per-frame price-to-pixel mapping
//! - `PriceRange` - min/max aggregation used for auto-scaling
//! - `IndicatorKey` - the closed set of marker kinds

pub mod color;
pub mod geometry;
pub mod key;
pub mod params;

pub use color::{Color, ColorParseError};
pub use geometry::{Point, RRect, Rect};
pub use key::IndicatorKey;
pub use params::{DrawParams, PriceRange};

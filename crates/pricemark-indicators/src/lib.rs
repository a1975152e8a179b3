//! Price-marker overlay engine.
//!
//! Draws liquidation, stop-loss and take-profit markers over a price chart:
//! a pill-shaped bubble per marker, stacked without overlap in price order,
//! with a connector line curving to the marker's exact price and fading out
//! before the y-axis.

pub mod builder;
pub mod draw;
pub mod indicator;
pub mod layout;
pub mod snapshot;
pub mod style;
pub mod types;

pub use builder::IndicatorBuilder;
pub use indicator::{ChartContext, FormatPrice, Indicator};
pub use layout::{resolve_overlaps, IndicatorPosition};
pub use pricemark_core::IndicatorKey;
pub use snapshot::PriceSnapshot;
pub use style::{IndicatorStyle, SharedPaints};
pub use types::{IndicatorTypeConfig, IndicatorTypeTable};

//! Marker kinds.

use std::fmt;

/// The fixed set of price markers drawn over the chart.
///
/// Declaration order is the sort priority used to break exact Y ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndicatorKey {
    Liquidation,
    StopLoss,
    TakeProfit,
}

impl IndicatorKey {
    pub const COUNT: usize = 3;

    pub const ALL: [IndicatorKey; Self::COUNT] = [
        IndicatorKey::Liquidation,
        IndicatorKey::StopLoss,
        IndicatorKey::TakeProfit,
    ];

    /// Dense index into per-key arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            IndicatorKey::Liquidation => 0,
            IndicatorKey::StopLoss => 1,
            IndicatorKey::TakeProfit => 2,
        }
    }

    /// Tie-break rank when two markers map to the same pixel row.
    #[must_use]
    pub const fn sort_priority(self) -> u8 {
        self.index() as u8
    }

    /// Stable snake_case name, also used as the config section name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IndicatorKey::Liquidation => "liquidation",
            IndicatorKey::StopLoss => "stop_loss",
            IndicatorKey::TakeProfit => "take_profit",
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Price-by-key input snapshot.

use pricemark_core::IndicatorKey;
use serde::{Deserialize, Serialize};

/// Current price per marker key. `None` hides that marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSnapshot {
    pub liquidation: Option<f32>,
    pub stop_loss: Option<f32>,
    pub take_profit: Option<f32>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: IndicatorKey) -> Option<f32> {
        match key {
            IndicatorKey::Liquidation => self.liquidation,
            IndicatorKey::StopLoss => self.stop_loss,
            IndicatorKey::TakeProfit => self.take_profit,
        }
    }

    pub fn set(&mut self, key: IndicatorKey, price: Option<f32>) {
        let slot = match key {
            IndicatorKey::Liquidation => &mut self.liquidation,
            IndicatorKey::StopLoss => &mut self.stop_loss,
            IndicatorKey::TakeProfit => &mut self.take_profit,
        };
        *slot = price;
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: IndicatorKey, price: f32) -> Self {
        self.set(key, Some(price));
        self
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether every key is `None`.
    pub fn is_empty(&self) -> bool {
        IndicatorKey::ALL.iter().all(|k| self.get(*k).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_clear() {
        let mut snapshot = PriceSnapshot::new().with(IndicatorKey::StopLoss, 95.5);
        assert_eq!(snapshot.get(IndicatorKey::StopLoss), Some(95.5));
        assert_eq!(snapshot.get(IndicatorKey::TakeProfit), None);
        assert!(!snapshot.is_empty());

        snapshot.set(IndicatorKey::StopLoss, None);
        assert!(snapshot.is_empty());

        snapshot.set(IndicatorKey::Liquidation, Some(80.0));
        snapshot.clear();
        assert_eq!(snapshot, PriceSnapshot::default());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let snapshot: PriceSnapshot =
            serde_json::from_str(r#"{ "take_profit": 120.25, "liquidation": null }"#).unwrap();
        assert_eq!(snapshot.take_profit, Some(120.25));
        assert_eq!(snapshot.liquidation, None);
        assert_eq!(snapshot.stop_loss, None);
    }
}

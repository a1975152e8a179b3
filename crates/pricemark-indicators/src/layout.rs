//! Vertical placement of bubbles.
//!
//! Positions are sorted top to bottom by the Y of their price, then walked
//! once: any bubble closer than the minimum center distance to the bubble
//! above it (already resolved) is pushed down to exactly that distance.
//! The pass keeps price order, guarantees the spacing and needs no iteration.

use std::cmp::Ordering;

use pricemark_core::IndicatorKey;
use serde::Serialize;

/// One marker's placement for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorPosition {
    pub key: IndicatorKey,
    pub price: f32,
    /// Pixel Y of the price.
    pub price_y: f32,
    /// Resolved bubble center Y, at or below `price_y`.
    pub bubble_y: f32,
    pub bubble_width: f32,
    pub sort_priority: u8,
}

impl IndicatorPosition {
    pub fn new(key: IndicatorKey, price: f32, price_y: f32, bubble_width: f32) -> Self {
        Self {
            key,
            price,
            price_y,
            bubble_y: price_y,
            bubble_width,
            sort_priority: key.sort_priority(),
        }
    }

    /// How far overlap resolution moved the bubble.
    pub fn displacement(&self) -> f32 {
        self.bubble_y - self.price_y
    }
}

fn compare(a: &IndicatorPosition, b: &IndicatorPosition) -> Ordering {
    a.price_y
        .total_cmp(&b.price_y)
        .then(a.sort_priority.cmp(&b.sort_priority))
}

/// Sort by ascending price Y; exact ties fall back to sort priority.
pub fn sort_positions(positions: &mut [IndicatorPosition]) {
    positions.sort_by(compare);
}

/// Sort, then push overlapping bubbles down in a single pass.
pub fn resolve_overlaps(positions: &mut [IndicatorPosition], min_center_distance: f32) {
    sort_positions(positions);
    for i in 1..positions.len() {
        let min_allowed = positions[i - 1].bubble_y + min_center_distance;
        if positions[i].bubble_y < min_allowed {
            positions[i].bubble_y = min_allowed;
        }
    }
}

/// Widest bubble among `positions`, 0 when empty.
pub fn max_bubble_width(positions: &[IndicatorPosition]) -> f32 {
    positions
        .iter()
        .map(|p| p.bubble_width)
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(key: IndicatorKey, price_y: f32) -> IndicatorPosition {
        IndicatorPosition::new(key, 0.0, price_y, 40.0)
    }

    #[test]
    fn test_far_apart_positions_stay_put() {
        let mut positions = vec![
            pos(IndicatorKey::Liquidation, 300.0),
            pos(IndicatorKey::TakeProfit, 50.0),
            pos(IndicatorKey::StopLoss, 150.0),
        ];
        resolve_overlaps(&mut positions, 24.0);
        let keys: Vec<_> = positions.iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            vec![IndicatorKey::TakeProfit, IndicatorKey::StopLoss, IndicatorKey::Liquidation]
        );
        assert!(positions.iter().all(|p| p.displacement() == 0.0));
    }

    #[test]
    fn test_push_down_cascades() {
        let mut positions = vec![
            pos(IndicatorKey::Liquidation, 110.0),
            pos(IndicatorKey::StopLoss, 105.0),
            pos(IndicatorKey::TakeProfit, 100.0),
        ];
        resolve_overlaps(&mut positions, 24.0);
        let ys: Vec<_> = positions.iter().map(|p| p.bubble_y).collect();
        assert_eq!(ys, vec![100.0, 124.0, 148.0]);
        assert_eq!(positions[2].key, IndicatorKey::Liquidation);
        assert_eq!(positions[2].displacement(), 38.0);
    }

    #[test]
    fn test_exact_tie_uses_priority() {
        let mut positions = vec![
            pos(IndicatorKey::TakeProfit, 200.0),
            pos(IndicatorKey::Liquidation, 200.0),
            pos(IndicatorKey::StopLoss, 200.0),
        ];
        resolve_overlaps(&mut positions, 24.0);
        let keys: Vec<_> = positions.iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            vec![IndicatorKey::Liquidation, IndicatorKey::StopLoss, IndicatorKey::TakeProfit]
        );
        assert_eq!(positions[2].bubble_y, 248.0);
    }

    #[test]
    fn test_min_separation_holds_for_dense_inputs() {
        for seed in 0..200u32 {
            let ys = [
                (seed * 7 % 31) as f32,
                (seed * 13 % 29) as f32,
                (seed * 3 % 17) as f32,
            ];
            let mut positions: Vec<_> = IndicatorKey::ALL
                .iter()
                .zip(ys)
                .map(|(k, y)| pos(*k, y))
                .collect();
            resolve_overlaps(&mut positions, 24.0);
            for pair in positions.windows(2) {
                assert!(pair[1].bubble_y - pair[0].bubble_y >= 24.0 - 1e-4);
                assert!(pair[0].price_y <= pair[1].price_y);
            }
        }
    }

    #[test]
    fn test_max_bubble_width() {
        assert_eq!(max_bubble_width(&[]), 0.0);
        let mut a = pos(IndicatorKey::StopLoss, 0.0);
        a.bubble_width = 64.0;
        let b = pos(IndicatorKey::TakeProfit, 0.0);
        assert_eq!(max_bubble_width(&[a, b]), 64.0);
    }
}

//! Per-kind marker appearance, resolved once from configuration.

use pricemark_config::{Config, ConfigError, IndicatorConfig};
use pricemark_core::{Color, IndicatorKey};

/// Immutable appearance of one marker kind.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTypeConfig {
    pub color: Color,
    pub label: String,
    pub fill_alpha: f32,
    pub stroke_alpha: f32,
    pub line_alpha: f32,
    pub line_corner_radius: f32,
    pub line_width: f32,
    pub line_glow_intensity: f32,
    pub glow_intensity: f32,
    pub inner_highlight_alpha: f32,
    pub shadow_blur_radius: f32,
    pub bubble_margin_left: f32,
    pub bubble_padding_horizontal: f32,
    pub label_price_gap: f32,
    pub should_adjust_y_axis: bool,
}

impl IndicatorTypeConfig {
    /// Parse a config-file entry into typed values.
    pub fn resolve(key: IndicatorKey, config: &IndicatorConfig) -> Result<Self, ConfigError> {
        let color = Color::from_hex(&config.color).map_err(|source| ConfigError::InvalidColor {
            field: format!("indicators.{}.color", key.as_str()),
            source,
        })?;

        Ok(Self {
            color,
            label: config.label.clone(),
            fill_alpha: config.fill_alpha,
            stroke_alpha: config.stroke_alpha,
            line_alpha: config.line_alpha,
            line_corner_radius: config.line_corner_radius,
            line_width: config.line_width,
            line_glow_intensity: config.line_glow_intensity,
            glow_intensity: config.glow_intensity,
            inner_highlight_alpha: config.inner_highlight_alpha,
            shadow_blur_radius: config.shadow_blur_radius,
            bubble_margin_left: config.bubble_margin_left,
            bubble_padding_horizontal: config.bubble_padding_horizontal,
            label_price_gap: config.label_price_gap,
            should_adjust_y_axis: config.should_adjust_y_axis,
        })
    }
}

/// One [`IndicatorTypeConfig`] per [`IndicatorKey`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTypeTable {
    types: [IndicatorTypeConfig; IndicatorKey::COUNT],
}

impl IndicatorTypeTable {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let resolve = |key: IndicatorKey| IndicatorTypeConfig::resolve(key, &config.indicator(key));
        Ok(Self {
            types: [
                resolve(IndicatorKey::Liquidation)?,
                resolve(IndicatorKey::StopLoss)?,
                resolve(IndicatorKey::TakeProfit)?,
            ],
        })
    }

    pub fn get(&self, key: IndicatorKey) -> &IndicatorTypeConfig {
        &self.types[key.index()]
    }

    /// Replace one kind's appearance.
    pub fn set(&mut self, key: IndicatorKey, type_config: IndicatorTypeConfig) {
        self.types[key.index()] = type_config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricemark_config::IndicatorOverride;

    #[test]
    fn test_table_from_default_config() {
        let table = IndicatorTypeTable::from_config(&Config::default()).unwrap();
        assert_eq!(table.get(IndicatorKey::Liquidation).label, "LIQ");
        assert_eq!(table.get(IndicatorKey::StopLoss).label, "SL");
        assert_eq!(table.get(IndicatorKey::TakeProfit).label, "TP");
        assert_eq!(table.get(IndicatorKey::StopLoss).color, Color::from_hex("#FFA500").unwrap());
        assert!(table.get(IndicatorKey::TakeProfit).should_adjust_y_axis);
    }

    #[test]
    fn test_bad_color_names_the_field() {
        let mut config = Config::default();
        config.indicators.take_profit = Some(IndicatorOverride {
            color: Some("green".to_string()),
            ..Default::default()
        });
        match IndicatorTypeTable::from_config(&config) {
            Err(ConfigError::InvalidColor { field, .. }) => {
                assert_eq!(field, "indicators.take_profit.color")
            }
            other => panic!("expected InvalidColor, got {:?}", other),
        }
    }
}

//! Configuration management for pricemark.
//!
//! Loads configuration from TOML files with support for per-kind indicator
//! appearance overrides layered on top of shared defaults.

use pricemark_core::{Color, ColorParseError, IndicatorKey};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Invalid color for {field}: {source}")]
    InvalidColor {
        field: String,
        #[source]
        source: ColorParseError,
    },
    #[error("Invalid layout value {field} = {value}: must be positive")]
    InvalidLayout { field: &'static str, value: f32 },
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub layout: LayoutConfig,
    pub indicators: IndicatorsConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./pricemark.toml`
    /// 2. `~/.config/pricemark/config.toml`
    ///
    /// Returns default config if no file found.
    pub fn load_default() -> Self {
        match Self::load(Self::default_path()) {
            Ok(config) => return config,
            Err(e) => log::debug!("No usable ./pricemark.toml: {}", e),
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("pricemark").join("config.toml");
            match Self::load(&config_path) {
                Ok(config) => return config,
                Err(e) => log::debug!("No usable {}: {}", config_path.display(), e),
            }
        }

        log::debug!("Using built-in pricemark configuration");
        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("pricemark.toml")
    }

    /// Check colors parse and layout sizes are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_color("general.background_color", &self.general.background_color)?;
        self.layout.validate()?;
        for key in IndicatorKey::ALL {
            let resolved = self.indicator(key);
            parse_color(&format!("indicators.{}.color", key.as_str()), &resolved.color)?;
        }
        Ok(())
    }

    /// Get the resolved appearance for a marker kind.
    /// Falls back to the shared defaults plus built-in label/color.
    pub fn indicator(&self, key: IndicatorKey) -> IndicatorConfig {
        let base = self.indicators.default.merge(&builtin_override(key));
        match self.indicators.override_for(key) {
            Some(custom) => base.merge(custom),
            None => base,
        }
    }

    /// Background color parsed, or black if the string is malformed.
    pub fn background_color(&self) -> Color {
        Color::from_hex(&self.general.background_color).unwrap_or(Color::BLACK)
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, ConfigError> {
    Color::from_hex(value).map_err(|source| ConfigError::InvalidColor {
        field: field.to_string(),
        source,
    })
}

/// Built-in label and color for each marker kind.
fn builtin_override(key: IndicatorKey) -> IndicatorOverride {
    let (label, color) = match key {
        IndicatorKey::Liquidation => ("LIQ", "#FF4D4F"),
        IndicatorKey::StopLoss => ("SL", "#FFA500"),
        IndicatorKey::TakeProfit => ("TP", "#3ECF8E"),
    };
    IndicatorOverride {
        label: Some(label.to_string()),
        color: Some(color.to_string()),
        ..Default::default()
    }
}

/// General display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Currency code handed to the price formatter.
    pub currency: String,
    /// Ask the formatter for compact notation.
    pub compact_prices: bool,
    /// Start in dark mode.
    pub dark_mode: bool,
    /// Chart background, used for the dark-mode bubble shadows.
    pub background_color: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            compact_prices: true,
            dark_mode: false,
            background_color: "#000000".to_string(),
        }
    }
}

/// Fixed sizing constants shared by every marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Bubble (pill) height in pixels.
    pub bubble_height: f32,
    /// Minimum gap between two stacked bubbles.
    pub bubble_spacing: f32,
    /// Minimum horizontal reach of the connector curve.
    pub line_curve_right_padding: f32,
    /// Distance over which the connector fades out before the y-axis.
    pub line_fade_distance: f32,
    /// Added to the y-axis gutter width to find where lines end.
    pub y_axis_fade_width_offset: f32,
    /// Width of the inset bubble stroke (dark mode).
    pub stroke_width: f32,
    /// Blur sigma of the optional line glow.
    pub glow_blur_sigma: f32,
    /// Vertical offset of the two dark-mode drop shadows.
    pub shadow_offset: f32,
    /// Blur of the dark-mode drop shadows.
    pub shadow_blur: f32,
    /// Opacity of the dark-mode shadow paints.
    pub shadow_alpha: f32,
    /// Corner-rounding radius applied to connector paths, 0 disables it.
    pub corner_radius: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bubble_height: 18.0,
            bubble_spacing: 6.0,
            line_curve_right_padding: 24.0,
            line_fade_distance: 80.0,
            y_axis_fade_width_offset: -40.0,
            stroke_width: 1.0,
            glow_blur_sigma: 6.0,
            shadow_offset: 4.0,
            shadow_blur: 5.0,
            shadow_alpha: 0.48,
            corner_radius: 0.0,
        }
    }
}

impl LayoutConfig {
    /// Minimum center-to-center distance between resolved bubbles.
    pub fn min_center_distance(&self) -> f32 {
        self.bubble_height + self.bubble_spacing
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("layout.bubble_height", self.bubble_height),
            ("layout.line_fade_distance", self.line_fade_distance),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidLayout { field, value });
            }
        }
        if self.bubble_spacing < 0.0 || !self.bubble_spacing.is_finite() {
            return Err(ConfigError::InvalidLayout {
                field: "layout.bubble_spacing",
                value: self.bubble_spacing,
            });
        }
        Ok(())
    }
}

/// Indicator appearance: shared defaults plus per-kind partial overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorsConfig {
    pub default: IndicatorConfig,
    pub liquidation: Option<IndicatorOverride>,
    pub stop_loss: Option<IndicatorOverride>,
    pub take_profit: Option<IndicatorOverride>,
}

impl IndicatorsConfig {
    fn override_for(&self, key: IndicatorKey) -> Option<&IndicatorOverride> {
        match key {
            IndicatorKey::Liquidation => self.liquidation.as_ref(),
            IndicatorKey::StopLoss => self.stop_loss.as_ref(),
            IndicatorKey::TakeProfit => self.take_profit.as_ref(),
        }
    }
}

/// Appearance of one marker kind (full config with all fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Hex color of the bubble, text and line.
    pub color: String,
    /// Short label drawn before the price.
    pub label: String,
    pub fill_alpha: f32,
    pub stroke_alpha: f32,
    pub line_alpha: f32,
    /// Upper bound on the connector curve reach.
    pub line_corner_radius: f32,
    pub line_width: f32,
    /// Opacity of the blurred glow under the line, 0 disables it.
    pub line_glow_intensity: f32,
    pub glow_intensity: f32,
    pub inner_highlight_alpha: f32,
    pub shadow_blur_radius: f32,
    /// Left edge of the bubble.
    pub bubble_margin_left: f32,
    pub bubble_padding_horizontal: f32,
    /// Gap between label and price text.
    pub label_price_gap: f32,
    /// Whether this kind widens the chart's auto-scaled price range.
    pub should_adjust_y_axis: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            color: "#FFFFFF".to_string(),
            label: String::new(),
            fill_alpha: 0.24,
            stroke_alpha: 0.15,
            line_alpha: 0.4,
            line_corner_radius: 44.0,
            line_width: 1.0,
            line_glow_intensity: 0.0,
            glow_intensity: 0.0,
            inner_highlight_alpha: 0.0,
            shadow_blur_radius: 3.0,
            bubble_margin_left: 8.0,
            bubble_padding_horizontal: 6.0,
            label_price_gap: 3.0,
            should_adjust_y_axis: true,
        }
    }
}

impl IndicatorConfig {
    /// Merge with an override, using override values where present.
    pub fn merge(&self, o: &IndicatorOverride) -> Self {
        Self {
            color: o.color.clone().unwrap_or_else(|| self.color.clone()),
            label: o.label.clone().unwrap_or_else(|| self.label.clone()),
            fill_alpha: o.fill_alpha.unwrap_or(self.fill_alpha),
            stroke_alpha: o.stroke_alpha.unwrap_or(self.stroke_alpha),
            line_alpha: o.line_alpha.unwrap_or(self.line_alpha),
            line_corner_radius: o.line_corner_radius.unwrap_or(self.line_corner_radius),
            line_width: o.line_width.unwrap_or(self.line_width),
            line_glow_intensity: o.line_glow_intensity.unwrap_or(self.line_glow_intensity),
            glow_intensity: o.glow_intensity.unwrap_or(self.glow_intensity),
            inner_highlight_alpha: o.inner_highlight_alpha.unwrap_or(self.inner_highlight_alpha),
            shadow_blur_radius: o.shadow_blur_radius.unwrap_or(self.shadow_blur_radius),
            bubble_margin_left: o.bubble_margin_left.unwrap_or(self.bubble_margin_left),
            bubble_padding_horizontal: o
                .bubble_padding_horizontal
                .unwrap_or(self.bubble_padding_horizontal),
            label_price_gap: o.label_price_gap.unwrap_or(self.label_price_gap),
            should_adjust_y_axis: o.should_adjust_y_axis.unwrap_or(self.should_adjust_y_axis),
        }
    }
}

/// Indicator appearance override (all fields optional for partial overrides).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorOverride {
    pub color: Option<String>,
    pub label: Option<String>,
    pub fill_alpha: Option<f32>,
    pub stroke_alpha: Option<f32>,
    pub line_alpha: Option<f32>,
    pub line_corner_radius: Option<f32>,
    pub line_width: Option<f32>,
    pub line_glow_intensity: Option<f32>,
    pub glow_intensity: Option<f32>,
    pub inner_highlight_alpha: Option<f32>,
    pub shadow_blur_radius: Option<f32>,
    pub bubble_margin_left: Option<f32>,
    pub bubble_padding_horizontal: Option<f32>,
    pub label_price_gap: Option<f32>,
    pub should_adjust_y_axis: Option<bool>,
}

//! Tool settings module.
//!
//! Handles loading, validating, and merging `folio.toml`. Settings are layered:
//! stock defaults are overridden by the user file, key by key. The file only
//! controls *where* the portfolio JSON comes from and the interaction timings;
//! the portfolio content itself lives in the JSON sources (see [`crate::loader`]).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # JSON documents to load, in merge order (later overrides earlier).
//! sources = ["config/config.json", "config/manifest.json", "config/portfolio.json"]
//!
//! [carousel]
//! interval_ms = 5000          # Auto-advance period
//! swipe_threshold_px = 50.0   # Horizontal displacement a swipe must exceed
//!
//! [viewport]
//! resize_debounce_ms = 250    # Quiet period before a resize is handled
//! scroll_throttle_ms = 100    # Minimum spacing between scroll handler runs
//! reveal_delay_ms = 1000      # First scroll-reveal pass after startup
//! ```
//!
//! ## Partial Configuration
//!
//! Settings files are sparse; override just the values you want:
//!
//! ```toml
//! # Single-document site
//! sources = ["config.json"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool settings loaded from `folio.toml`.
///
/// All fields have sensible defaults. User files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// JSON documents to retrieve, relative to the site root, in merge order.
    pub sources: Vec<String>,
    /// Carousel timing and gesture settings.
    pub carousel: CarouselConfig,
    /// Resize/scroll rate limiting.
    pub viewport: ViewportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                "config/config.json".to_string(),
                "config/manifest.json".to_string(),
                "config/portfolio.json".to_string(),
            ],
            carousel: CarouselConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validate settings are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::Validation("sources must not be empty".into()));
        }
        if self.sources.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "sources must not contain empty locations".into(),
            ));
        }
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.interval_ms must be non-zero".into(),
            ));
        }
        let threshold = self.carousel.swipe_threshold_px;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::Validation(
                "carousel.swipe_threshold_px must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Carousel timing and gesture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Auto-advance period in milliseconds.
    pub interval_ms: u64,
    /// A touch gesture must move further than this (horizontally) to count.
    pub swipe_threshold_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            swipe_threshold_px: 50.0,
        }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Rate limits for window resize and scroll handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    pub resize_debounce_ms: u64,
    pub scroll_throttle_ms: u64,
    /// Delay before the first scroll-reveal pass runs on its own.
    pub reveal_delay_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 250,
            scroll_throttle_ms: 100,
            reveal_delay_ms: 1000,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default settings as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(AppConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load settings from the site's own `folio.toml`.
///
/// A missing file yields the stock defaults; an unreadable or invalid one
/// is an error.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    read_config_file(path)
}

/// Load settings from a file that must exist (an explicit `--config`).
pub fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `folio.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# JSON documents to load, relative to the site root, in merge order.
# Top-level keys of later documents replace those of earlier ones.
# A document that is a bare JSON list is taken as the portfolio.
sources = ["config/config.json", "config/manifest.json", "config/portfolio.json"]

# ---------------------------------------------------------------------------
# Carousel
# ---------------------------------------------------------------------------
[carousel]
# Auto-advance period in milliseconds. Only armed with two or more slides.
interval_ms = 5000

# A touch gesture must move further than this many pixels horizontally
# to switch slides.
swipe_threshold_px = 50.0

# ---------------------------------------------------------------------------
# Viewport handlers
# ---------------------------------------------------------------------------
[viewport]
# Quiet period after the last resize event before it is handled.
resize_debounce_ms = 250

# Minimum spacing between two runs of the scroll handler.
scroll_throttle_ms = 100

# The scroll-reveal pass also runs once on its own after this delay.
reveal_delay_ms = 1000
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_uses_three_sources() {
        let config = AppConfig::default();
        assert_eq!(config.sources.len(), 3);
        assert_eq!(config.sources[2], "config/portfolio.json");
    }

    #[test]
    fn default_carousel_timings() {
        let config = AppConfig::default();
        assert_eq!(config.carousel.interval(), Duration::from_millis(5000));
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
        assert_eq!(config.viewport.resize_debounce_ms, 250);
        assert_eq!(config.viewport.scroll_throttle_ms, 100);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[carousel]
interval_ms = 3000
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.carousel.interval_ms, 3000);
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
        assert_eq!(config.sources, AppConfig::default().sources);
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: AppConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("folio.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("folio.toml");
        fs::write(
            &path,
            r#"
sources = ["config.json"]

[viewport]
scroll_throttle_ms = 40
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.sources, vec!["config.json".to_string()]);
        assert_eq!(config.viewport.scroll_throttle_ms, 40);
        assert_eq!(config.viewport.resize_debounce_ms, 250);
    }

    #[test]
    fn read_config_file_requires_the_file() {
        let tmp = TempDir::new().unwrap();
        let result = read_config_file(&tmp.path().join("elsewhere.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("folio.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_replaces_arrays_wholesale() {
        let base: toml::Value = toml::from_str(r#"sources = ["a", "b", "c"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"sources = ["z"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["sources"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value =
            toml::from_str("[carousel]\ninterval_ms = 5000\nswipe_threshold_px = 50.0").unwrap();
        let overlay: toml::Value = toml::from_str("[carousel]\ninterval_ms = 10").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["carousel"]["interval_ms"].as_integer(), Some(10));
        assert_eq!(merged["carousel"]["swipe_threshold_px"].as_float(), Some(50.0));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let overlay: toml::Value = toml::from_str("sourcse = []").unwrap();
        assert!(resolve_config(Some(overlay)).is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let overlay: toml::Value = toml::from_str("[carousel]\ninterval = 10").unwrap();
        assert!(resolve_config(Some(overlay)).is_err());
    }

    #[test]
    fn validate_empty_sources() {
        let overlay: toml::Value = toml::from_str("sources = []").unwrap();
        let result = resolve_config(Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_zero_interval() {
        let mut config = AppConfig::default();
        config.carousel.interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_negative_threshold() {
        let mut config = AppConfig::default();
        config.carousel.swipe_threshold_px = -1.0;
        assert!(config.validate().is_err());
    }
}

// SPDX-License-Identifier: MPL-2.0
//! This module handles the gallery configuration, including loading and saving
//! preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[gallery]` - Data source, theme, image ratio and columns per row
//! - `[timing]` - Flip duration, inter-phase gap and settle delay
//! - `[scroll]` - Scroll guard threshold and polling interval
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set the `FOLIO_FLIP_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use folio_flip::config::{self, GalleryConfig};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.gallery.columns = Some(2);
//! config::save(&config).expect("Failed to save config");
//!
//! let runtime = GalleryConfig::from(&config);
//! assert_eq!(runtime.columns.count(), 2);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::gallery::{Columns, FlipTiming, ScrollPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Enums
// =============================================================================

/// Visual theme of the gallery.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Blt,
    #[default]
    Mk,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Blt => write!(f, "blt"),
            Theme::Mk => write!(f, "mk"),
        }
    }
}

/// Aspect ratio of the tile images.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImageRatio {
    #[default]
    Portrait,
    Landscape,
}

impl ImageRatio {
    /// Height divided by width for a tile of this ratio.
    #[must_use]
    pub fn height_factor(self) -> f32 {
        match self {
            ImageRatio::Portrait => 4.0 / 3.0,
            ImageRatio::Landscape => 3.0 / 4.0,
        }
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// Gallery content and layout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GallerySection {
    /// Portfolio source: a local path or an `http(s)` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub image_ratio: ImageRatio,

    /// Columns per row on wide windows (1 to 3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
}

/// Flip animation timing, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimingSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter_phase_gap_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_ms: Option<u64>,
}

/// Scroll guard settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ScrollSection {
    /// Distance in logical pixels that closes the open tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,

    /// Seconds between scroll position samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_secs: Option<u64>,
}

/// Persisted configuration, as written to `settings.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub gallery: GallerySection,

    #[serde(default)]
    pub timing: TimingSection,

    #[serde(default)]
    pub scroll: ScrollSection,
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Validated configuration handed to the gallery at startup.
///
/// Every field is within range; out-of-range persisted values are clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    pub source: Option<String>,
    pub theme: Theme,
    pub image_ratio: ImageRatio,
    pub columns: Columns,
    pub timing: FlipTiming,
    pub scroll: ScrollPolicy,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for GalleryConfig {
    fn from(config: &Config) -> Self {
        let columns = config
            .gallery
            .columns
            .unwrap_or(DEFAULT_COLUMNS)
            .clamp(MIN_COLUMNS, MAX_COLUMNS);

        Self {
            source: config.gallery.source.clone(),
            theme: config.gallery.theme,
            image_ratio: config.gallery.image_ratio,
            columns: Columns::from_count(columns).unwrap_or_default(),
            timing: FlipTiming::from_millis(
                config.timing.flip_ms.unwrap_or(DEFAULT_FLIP_MS),
                config
                    .timing
                    .inter_phase_gap_ms
                    .unwrap_or(DEFAULT_INTER_PHASE_GAP_MS),
                config.timing.settle_ms.unwrap_or(DEFAULT_SETTLE_MS),
            ),
            scroll: ScrollPolicy::new(
                config.scroll.threshold.unwrap_or(DEFAULT_SCROLL_THRESHOLD),
                config.scroll.poll_secs.unwrap_or(DEFAULT_SCROLL_POLL_SECS),
            ),
        }
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some(format!("Could not read {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            gallery: GallerySection {
                source: Some("https://example.com/portfolio.js".to_string()),
                theme: Theme::Blt,
                image_ratio: ImageRatio::Landscape,
                columns: Some(2),
            },
            timing: TimingSection {
                flip_ms: Some(300),
                inter_phase_gap_ms: Some(20),
                settle_ms: None,
            },
            scroll: ScrollSection {
                threshold: Some(400.0),
                poll_secs: Some(2),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_reports_warning_for_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[gallery\n").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_writes_settings_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = temp_dir.path().join("cfg");
        save_with_override(&Config::default(), Some(base.clone())).expect("save");
        assert!(base.join(CONFIG_FILE).exists());
    }

    #[test]
    fn partial_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[gallery]\ntheme = \"blt\"\n").expect("parse");
        assert_eq!(config.gallery.theme, Theme::Blt);
        assert_eq!(config.gallery.image_ratio, ImageRatio::Portrait);
        assert_eq!(config.timing, TimingSection::default());
    }

    #[test]
    fn gallery_config_defaults_match_constants() {
        let runtime = GalleryConfig::default();
        assert_eq!(runtime.columns, Columns::Three);
        assert_eq!(runtime.theme, Theme::Mk);
        assert_eq!(runtime.timing.flip(), Duration::from_millis(DEFAULT_FLIP_MS));
        assert_eq!(runtime.scroll.threshold(), DEFAULT_SCROLL_THRESHOLD);
        assert!(runtime.source.is_none());
    }

    #[test]
    fn gallery_config_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.gallery.columns = Some(7);
        config.timing.flip_ms = Some(1);
        config.scroll.poll_secs = Some(0);

        let runtime = GalleryConfig::from(&config);
        assert_eq!(runtime.columns, Columns::Three);
        assert_eq!(runtime.timing.flip(), Duration::from_millis(MIN_FLIP_MS));
        assert_eq!(
            runtime.scroll.poll_interval(),
            Duration::from_secs(MIN_SCROLL_POLL_SECS)
        );

        config.gallery.columns = Some(0);
        assert_eq!(GalleryConfig::from(&config).columns, Columns::One);
    }

    #[test]
    fn image_ratio_height_factor() {
        assert!(ImageRatio::Portrait.height_factor() > 1.0);
        assert!(ImageRatio::Landscape.height_factor() < 1.0);
    }
}

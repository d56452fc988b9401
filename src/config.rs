//! Configuration: card metrics and appearance overrides loaded from JSON.
//!
//! Lookup order for [`Config::discover`]:
//! 1. an explicit path (must exist)
//! 2. `./material-card.json` (local project customization)
//! 3. `<config dir>/material-card/config.json` (global user config)
//! 4. built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::geometry::Point;
use crate::models::Appearance;
use crate::theme::{Font, Rgba};

pub const LOCAL_CONFIG: &str = "material-card.json";
pub const APP_DIR: &str = "material-card";
pub const GLOBAL_CONFIG: &str = "config.json";

/// Fixed dimensions a card lays itself out with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardMetrics {
    pub corner_radius: f32,
    pub shadow_radius: f32,
    pub shadow_opacity: f32,
    pub shadow_offset: Point,
    /// Shadow radius at the peak of the card tap pulse
    pub pulse_radius: f32,
    /// Minimum height of a text body cell
    pub min_row_height: f32,
    /// Minimum height of a title header or footer
    pub min_header_height: f32,
    /// Inset of labels from the cell's left and right edges
    pub item_padding: f32,
    /// Space above and below label text
    pub item_padding_vertical: f32,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            corner_radius: 3.0,
            shadow_radius: 1.5,
            shadow_opacity: 0.5,
            shadow_offset: Point::new(0.0, 1.0),
            pulse_radius: 6.0,
            min_row_height: 53.0,
            min_header_height: 40.0,
            item_padding: 16.0,
            item_padding_vertical: 16.0,
        }
    }
}

impl CardMetrics {
    /// Metrics for hosts where one point is one terminal cell
    pub fn terminal() -> Self {
        Self {
            corner_radius: 1.0,
            shadow_radius: 0.0,
            shadow_opacity: 0.5,
            shadow_offset: Point::new(0.0, 1.0),
            pulse_radius: 2.0,
            min_row_height: 3.0,
            min_header_height: 3.0,
            item_padding: 2.0,
            item_padding_vertical: 1.0,
        }
    }
}

/// Appearance as written in a config file: every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AppearanceFile {
    header_background: Option<Rgba>,
    cell_background: Option<Rgba>,
    border_color: Option<Rgba>,
    title_font: Option<Font>,
    title_color: Option<Rgba>,
    text_font: Option<Font>,
    text_color: Option<Rgba>,
    shadow_color: Option<Rgba>,
    ripple_color: Option<Rgba>,
    /// Seconds
    ripple_duration: Option<f64>,
}

impl AppearanceFile {
    fn into_appearance(self) -> Result<Appearance, ConfigError> {
        let defaults = Appearance::default();
        let ripple_duration = match self.ripple_duration {
            Some(secs) => Duration::try_from_secs_f64(secs)
                .ok()
                .filter(|duration| !duration.is_zero())
                .ok_or(ConfigError::InvalidRippleDuration(secs))?,
            None => defaults.ripple_duration,
        };
        Ok(Appearance {
            header_background: self.header_background.unwrap_or(defaults.header_background),
            cell_background: self.cell_background.unwrap_or(defaults.cell_background),
            border_color: self.border_color.unwrap_or(defaults.border_color),
            title_font: self.title_font.unwrap_or(defaults.title_font),
            title_color: self.title_color.unwrap_or(defaults.title_color),
            text_font: self.text_font.unwrap_or(defaults.text_font),
            text_color: self.text_color.unwrap_or(defaults.text_color),
            shadow_color: self.shadow_color.unwrap_or(defaults.shadow_color),
            ripple_color: self.ripple_color.unwrap_or(defaults.ripple_color),
            ripple_duration,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    appearance: AppearanceFile,
    metrics: Option<CardMetrics>,
}

/// Loaded configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub appearance: Appearance,
    /// `None` when the file does not set metrics; hosts pick their preset
    pub metrics: Option<CardMetrics>,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        Ok(Self {
            appearance: file.appearance.into_appearance()?,
            metrics: file.metrics,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        info!(path = %path.display(), "loaded card config");
        Ok(config)
    }

    /// Find and load configuration; returns where it came from, if anywhere.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Ok((Self::load(&local)?, Some(local)));
        }

        if let Some(global) = global_config_path() {
            if global.exists() {
                return Ok((Self::load(&global)?, Some(global)));
            }
        }

        debug!("no card config found, using defaults");
        Ok((Self::default(), None))
    }
}

/// `<config dir>/material-card/config.json`, when the platform has a config dir
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(GLOBAL_CONFIG))
}

//! Configuration and settings management for Inkfield
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform-specific config directory.
//!
//! Configuration is organized into two sections:
//! - Style defaults (what a freshly drawn shape looks like)
//! - Canvas settings (initial viewport size and zoom)

use inkfield_core::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_ZOOM, MIN_ZOOM};
use inkfield_core::style::{
    validate_font_size, validate_line_dash, validate_opacity, validate_stroke_width,
};
use inkfield_core::{FillStyle, FontFamily, ShapeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Style applied to newly created shapes
///
/// Everything a shape's resolved options need except the per-shape seed and
/// the zoom level, which the canvas supplies at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    /// Fill color for rectangles
    pub fill: String,
    /// Stroke color for every shape
    pub stroke: String,
    /// Stroke width, one of 1, 3, 6
    pub stroke_width: u32,
    /// Dash pattern, empty for a solid stroke
    pub stroke_line_dash: Vec<f64>,
    /// Fill pattern for rectangles
    pub fill_style: FillStyle,
    /// Font family for text
    pub font: FontFamily,
    /// Font size for text, one of 16, 24, 32, 48
    pub font_size: u32,
    /// Opacity in [0, 1]
    pub opacity: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            fill: "#A7A7A7".to_string(),
            stroke: "#B20000".to_string(),
            stroke_width: 6,
            stroke_line_dash: Vec::new(),
            fill_style: FillStyle::Hachure,
            font: FontFamily::Minecraft,
            font_size: 24,
            opacity: 1.0,
        }
    }
}

impl StyleDefaults {
    fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&str, Result<(), ShapeError>); 4] = [
            ("style.stroke_width", validate_stroke_width(self.stroke_width)),
            ("style.font_size", validate_font_size(self.font_size)),
            ("style.opacity", validate_opacity(self.opacity)),
            ("style.stroke_line_dash", validate_line_dash(&self.stroke_line_dash)),
        ];
        for (key, check) in checks {
            if let Err(err) = check {
                return Err(ConfigError::OutOfDomain {
                    key: key.to_string(),
                    reason: err.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Initial canvas geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Width in pixels until the host reports its real size
    pub width: f64,
    /// Height in pixels until the host reports its real size
    pub height: f64,
    /// Starting zoom level
    pub zoom: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            zoom: 1.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub style: StyleDefaults,
    pub canvas: CanvasSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location (`<config dir>/inkfield/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("inkfield").join("config.toml"))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Load the config at the default path, falling back to defaults when absent
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        let write_error = |source: std::io::Error| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, content).map_err(write_error)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.style.validate()?;

        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(ConfigError::OutOfDomain {
                key: "canvas".to_string(),
                reason: format!("{}x{} is not a positive size", self.canvas.width, self.canvas.height),
            });
        }

        if !(self.canvas.zoom > MIN_ZOOM && self.canvas.zoom < MAX_ZOOM) {
            return Err(ConfigError::OutOfDomain {
                key: "canvas.zoom".to_string(),
                reason: format!("{} is outside ({}, {})", self.canvas.zoom, MIN_ZOOM, MAX_ZOOM),
            });
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

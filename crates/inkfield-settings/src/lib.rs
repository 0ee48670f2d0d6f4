//! Inkfield Settings Crate
//!
//! Handles the style defaults new shapes are created with and the initial
//! canvas configuration, persisted as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, StyleDefaults};
pub use error::{ConfigError, SettingsError, SettingsResult};

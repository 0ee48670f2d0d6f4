//! Failures while locating, reading, writing or validating a settings file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Covers creating the parent directory as well as the file itself.
    #[error("Cannot write settings file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `dirs` found no per-user config directory (e.g. no `$HOME`).
    #[error("No per-user config directory on this platform")]
    NoConfigDir,

    #[error("Malformed JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot encode settings as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Settings that parsed but cannot be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Only `.toml` and `.json` files are understood.
    #[error("Settings file must end in .toml or .json, got '{0}'")]
    UnsupportedFormat(String),

    /// A style or canvas value new shapes would reject.
    #[error("Setting '{key}' rejected: {reason}")]
    OutOfDomain { key: String, reason: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

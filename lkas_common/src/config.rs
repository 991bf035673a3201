//! TOML configuration plumbing shared by every LKAS crate.
//!
//! Types that derive `Deserialize` pick up [`ConfigLoader`] for free and
//! then run their own `validate()`.
//!
//! ```rust,no_run
//! use lkas_common::config::{ConfigError, ConfigLoader, LogLevel};
//! use std::path::Path;
//!
//! #[derive(serde::Deserialize)]
//! struct Logging {
//!     #[serde(default)]
//!     log_level: LogLevel,
//! }
//!
//! fn level(path: &Path) -> Result<LogLevel, ConfigError> {
//!     Ok(Logging::load(path)?.log_level)
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a configuration could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No file at the given path.
    #[error("config file not found: {0}")]
    FileNotFound(String),

    /// File could not be read or TOML parsing failed.
    #[error("config parse error: {0}")]
    ParseError(String),

    /// Parsed, but a value is out of bounds.
    #[error("config validation: {0}")]
    ValidationError(String),
}

/// Log level for the replay harness and any embedding process.
///
/// Written in lowercase in TOML (`log_level = "debug"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// TOML loading for any deserializable config type.
///
/// # Errors
///
/// - `ConfigError::FileNotFound` when nothing exists at `path`
/// - `ConfigError::ParseError` for unreadable files and bad TOML
///
/// Bounds checks belong to each type's own `validate()`.
pub trait ConfigLoader: DeserializeOwned {
    /// Read and parse `path`.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
            _ => ConfigError::ParseError(format!("{}: {e}", path.display())),
        })?;
        Self::from_toml(&text)
    }

    /// Parse configuration from an in-memory TOML document.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: DeserializeOwned> ConfigLoader for T {}

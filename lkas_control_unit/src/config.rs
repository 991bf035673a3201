//! Session configuration loader with validation.
//!
//! A session file names the vehicle family and may override the family's
//! low-speed disable threshold and the default steering limits. The loaded
//! bundle carries the resolved [`FamilyTraits`] so the tick path never looks
//! anything up.

use std::path::Path;

use lkas_common::config::{ConfigError, ConfigLoader, LogLevel};
use lkas_common::steer::SteerLimitParams;
use lkas_common::vehicle::{FamilyTraits, VehicleFamily};
use serde::{Deserialize, Serialize};

/// Upper bound for a configured disable threshold [m/s].
pub const STEER_DISABLE_BELOW_MAX: f64 = 60.0;

/// One vehicle session, as written in TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    pub family: VehicleFamily,

    /// This system sends cruise cancel presses.
    #[serde(default)]
    pub longitudinal_control: bool,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Overrides the family's hard low-speed cutoff [m/s].
    #[serde(default)]
    pub steer_disable_below: Option<f64>,

    #[serde(default)]
    pub steer_limits: SteerLimitParams,
}

impl SessionConfig {
    /// Validate bounds. Called by every loader.
    pub fn validate(&self) -> Result<(), String> {
        self.steer_limits
            .validate()
            .map_err(|e| format!("steer_limits: {e}"))?;
        if let Some(speed) = self.steer_disable_below {
            if !speed.is_finite() || !(0.0..=STEER_DISABLE_BELOW_MAX).contains(&speed) {
                return Err(format!(
                    "steer_disable_below {speed} out of range [0, {STEER_DISABLE_BELOW_MAX}]"
                ));
            }
        }
        Ok(())
    }
}

/// Validated session configuration, ready for runtime use.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub session: SessionConfig,
    /// Family traits with session overrides applied.
    pub traits: FamilyTraits,
}

impl LoadedConfig {
    /// Build from an already-parsed session, validating it.
    pub fn from_session(session: SessionConfig) -> Result<Self, ConfigError> {
        session.validate().map_err(ConfigError::ValidationError)?;
        let mut traits = session.family.traits();
        if let Some(speed) = session.steer_disable_below {
            traits.steer_disable_below = Some(speed);
        }
        Ok(Self { session, traits })
    }

    /// Default limits for `family`.
    pub fn for_family(family: VehicleFamily) -> Self {
        Self {
            session: SessionConfig {
                family,
                longitudinal_control: false,
                log_level: LogLevel::default(),
                steer_disable_below: None,
                steer_limits: SteerLimitParams::default(),
            },
            traits: family.traits(),
        }
    }
}

/// Load and validate a session file.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    LoadedConfig::from_session(SessionConfig::load(path)?)
}

/// Load config from a TOML string (for testing).
pub fn load_config_from_str(toml: &str) -> Result<LoadedConfig, ConfigError> {
    LoadedConfig::from_session(SessionConfig::from_toml(toml)?)
}

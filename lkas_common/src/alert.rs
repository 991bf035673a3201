//! Driver-facing alert events raised by the arbitration layer.

use serde::{Deserialize, Serialize};

/// Alert shown to the driver, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverAlert {
    /// LKAS button is off while cruise is engaged.
    InvalidLkasSetting,
    /// Stopped behind a lead vehicle; driver must resume.
    ResumeRequired,
    /// Driver override has nearly revoked steering authority.
    SteerTorqueOver,
    /// Steering authority is reduced by driver override.
    SteerTorqueLow,
    /// Vehicle is below the platform's minimum steering speed.
    BelowSteerSpeed,
}

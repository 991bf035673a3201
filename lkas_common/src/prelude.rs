//! Prelude module for common re-exports.
//!
//! ```rust
//! use lkas_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel};

// ─── Platform ───────────────────────────────────────────────────────
pub use crate::steer::SteerLimitParams;
pub use crate::vehicle::{FamilyTraits, VehicleFamily};

// ─── Per-tick I/O ───────────────────────────────────────────────────
pub use crate::alert::DriverAlert;
pub use crate::input::{ControlCycleInput, VisualAlert};
pub use crate::message::{HudDisplayState, MessageBatch, OutgoingMessage, SteeringCommand};

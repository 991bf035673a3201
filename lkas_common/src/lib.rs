//! LKAS Common Library
//!
//! Shared constants, configuration loading and data types for the LKAS
//! arbitration workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Tick rates, timer lengths, unit conversions
//! - [`config`] - Configuration loading trait and error type
//! - [`vehicle`] - Vehicle families and their platform quirks
//! - [`steer`] - Steering torque limit parameters
//! - [`input`] - Per-tick input record
//! - [`message`] - Outgoing logical messages
//! - [`alert`] - Driver alert events
//! - [`prelude`] - Common re-exports for convenience

pub mod alert;
pub mod config;
pub mod consts;
pub mod input;
pub mod message;
pub mod prelude;
pub mod steer;
pub mod vehicle;

//! Session state module root.
//!
//! State that persists across ticks, one instance per vehicle session.

pub mod alert;
pub mod arbitration;
pub mod hud;

//! Steering control root.
//!
//! Override tracking (authority ratio) and the torque limiter that enforces it.

pub mod authority;
pub mod limiter;

//! Button command emulation root.
//!
//! Cruise resume/cancel press sequencing.

pub mod resume;

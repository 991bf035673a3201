//! # LKAS Control Unit Library
//!
//! Per-tick lateral actuation arbitration. Each control tick converts a
//! desired steering ratio into a rate-limited, authority-scaled torque
//! command, tracks driver override, derives the cluster lane-keep display,
//! sequences cruise resume presses, and returns the ordered list of logical
//! messages for the protocol encoder.
//!
//! ## Components
//!
//! 1. **Rate Timer**: ticks since activation ([`state::arbitration`])
//! 2. **Torque-Override Tracker**: authority ratio ([`control::authority`])
//! 3. **Steering Command Limiter**: rate/magnitude/cutoff clamps ([`control::limiter`])
//! 4. **HUD Alert State Machine**: lane-keep display ([`state::hud`])
//! 5. **Cruise-Resume Sequencer**: resume/cancel presses ([`command::resume`])
//! 6. **Driver Alert Arbiter**: latched driver alerts ([`state::alert`])
//! 7. **Cycle Orchestrator**: [`cycle::SteeringSession`]
//!
//! ## Zero-Allocation Tick
//!
//! All session state is plain inline data created once per vehicle session.
//! A tick performs no heap allocation, no I/O and no blocking; its messages
//! are returned in a fixed-capacity `heapless` batch.

#![deny(clippy::disallowed_types)]

pub mod command;
pub mod config;
pub mod control;
pub mod cycle;
pub mod state;

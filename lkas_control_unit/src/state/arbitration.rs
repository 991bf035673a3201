//! Arbitration state and the activation rate timer.
//!
//! `ArbitrationState` is owned by exactly one session. It is read and
//! written by the override tracker and the torque limiter every tick.

use lkas_common::consts::WARMUP_TICKS;

/// Steering arbitration state carried from tick to tick.
///
/// Invariants: `authority_ratio` is in [0, 1]; `last_applied_steer` is an
/// integer value within the platform torque ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbitrationState {
    /// Torque applied on the previous tick (rate limiter reference).
    pub last_applied_steer: f64,
    /// Share of max torque the system currently trusts itself with.
    pub authority_ratio: f64,
    /// Ticks left in the "driver is overriding" hold.
    pub override_timer: u32,
    /// Enabled ticks counted since control activation.
    pub activation_elapsed_ticks: u64,
}

impl Default for ArbitrationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbitrationState {
    /// Session-start state: no torque, full authority, no override.
    pub const fn new() -> Self {
        Self {
            last_applied_steer: 0.0,
            authority_ratio: 1.0,
            override_timer: 0,
            activation_elapsed_ticks: 0,
        }
    }

    /// Advance the rate timer by one tick.
    ///
    /// Returns the number of enabled ticks that preceded this one, so the
    /// activation tick itself reads 0. Any disabled tick re-arms the timer.
    #[inline]
    pub fn advance_activation(&mut self, enabled: bool) -> u64 {
        if !enabled {
            self.activation_elapsed_ticks = 0;
            return 0;
        }
        let elapsed = self.activation_elapsed_ticks;
        self.activation_elapsed_ticks = elapsed.saturating_add(1);
        elapsed
    }

    /// Whether `elapsed` still falls in the post-activation grace period.
    #[inline]
    pub const fn in_warmup(elapsed: u64) -> bool {
        elapsed < WARMUP_TICKS
    }
}

//! Torque-override tracker.
//!
//! Detects sustained driver torque while moving and moves the authority
//! ratio asymmetrically: it recovers in 0.5 s and decays over 2, 5 or 15 s
//! depending on whether a turn signal or a lane change is active. A lane
//! change decays slowest so the system does not fight the maneuver.
//!
//! ```text
//! hold  = 50 ticks after |driver torque| > threshold at > 5 km/h
//! ratio -= 1 / (rate · decay_s)     while hold > 0
//! ratio += 1 / (rate · recovery_s)  otherwise
//! ratio  = clamp(ratio, 0, 1)
//! ```

use lkas_common::consts::{
    AUTHORITY_DECAY_BLINKER_S, AUTHORITY_DECAY_DEFAULT_S, AUTHORITY_DECAY_LANE_CHANGE_S,
    AUTHORITY_RECOVERY_S, CONTROL_RATE_HZ, MS_TO_KPH, OVERRIDE_HOLD_TICKS,
    OVERRIDE_MIN_SPEED_KPH,
};
use tracing::debug;

use crate::state::arbitration::ArbitrationState;

/// Tracker inputs for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverrideSample {
    /// Vehicle speed [m/s].
    pub speed: f64,
    /// Measured driver torque [EPS units].
    pub driver_torque: f64,
    pub lane_change_active: bool,
    pub blinker_active: bool,
}

/// Decay time constant for the current maneuver context [s].
#[inline]
pub const fn decay_seconds(lane_change_active: bool, blinker_active: bool) -> f64 {
    if lane_change_active {
        AUTHORITY_DECAY_LANE_CHANGE_S
    } else if blinker_active {
        AUTHORITY_DECAY_BLINKER_S
    } else {
        AUTHORITY_DECAY_DEFAULT_S
    }
}

/// Per-tick ratio step for a time constant of `seconds`.
#[inline]
fn ratio_step(seconds: f64) -> f64 {
    1.0 / (CONTROL_RATE_HZ * seconds)
}

/// Whether the sample counts as the driver taking over.
#[inline]
pub fn is_driver_override(sample: &OverrideSample, threshold: f64) -> bool {
    sample.speed * MS_TO_KPH > OVERRIDE_MIN_SPEED_KPH && sample.driver_torque.abs() > threshold
}

/// Update the override hold and authority ratio for one tick.
///
/// `activation_elapsed_ticks` comes from the rate timer; during warm-up the
/// tracker fails open (full authority, no hold) and returns immediately.
pub fn update_authority(
    state: &mut ArbitrationState,
    sample: &OverrideSample,
    activation_elapsed_ticks: u64,
    override_threshold: f64,
) -> f64 {
    if ArbitrationState::in_warmup(activation_elapsed_ticks) {
        state.override_timer = 0;
        state.authority_ratio = 1.0;
        return state.authority_ratio;
    }

    if sample.lane_change_active {
        state.override_timer = 0;
    }
    let decay_s = decay_seconds(sample.lane_change_active, sample.blinker_active);

    if is_driver_override(sample, override_threshold) {
        if state.override_timer == 0 {
            debug!(
                driver_torque = sample.driver_torque,
                ratio = state.authority_ratio,
                decay_s,
                "driver override detected"
            );
        }
        state.override_timer = OVERRIDE_HOLD_TICKS;
    } else if state.override_timer > 0 {
        state.override_timer -= 1;
    }

    let ratio = if state.override_timer > 0 {
        state.authority_ratio - ratio_step(decay_s)
    } else {
        state.authority_ratio + ratio_step(AUTHORITY_RECOVERY_S)
    };
    // A NaN ratio resets to full authority, as in warm-up.
    state.authority_ratio = if ratio.is_nan() { 1.0 } else { ratio.clamp(0.0, 1.0) };
    state.authority_ratio
}

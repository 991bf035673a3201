//! Steering command limiter.
//!
//! Pipeline, applied once per tick:
//! 1. `raw = desired_ratio × M`, where `M = max_torque(speed)`.
//! 2. Driver-biased window + rate-of-change limit against the last command,
//!    rounded to the EPS resolution, then bounded to ±M.
//! 3. Authority band: ±trunc(authority_ratio × M) while authority < 1.
//! 4. Hard cutoffs: not enabled, |angle| ≥ 90°, or below the platform's
//!    disable speed → torque 0.
//!
//! The result is written back as the rate-limit reference for the next tick.

use bitflags::bitflags;
use lkas_common::consts::MAX_ACTIVE_STEER_ANGLE_DEG;
use lkas_common::steer::SteerLimitParams;

use crate::state::arbitration::ArbitrationState;

bitflags! {
    /// Diagnostic record of which limits shaped this tick's command.
    ///
    /// Telemetry only; none of these halt processing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LimitFlags: u8 {
        /// Raw command differed from the rate/magnitude-limited command.
        const RATE_LIMITED      = 0x01;
        /// Authority band reduced the command.
        const AUTHORITY_CLAMPED = 0x02;
        /// Steering angle at or past 90°.
        const ANGLE_CUTOFF      = 0x04;
        /// Below the platform's EPS fault-avoidance speed.
        const LOW_SPEED_CUTOFF  = 0x08;
        /// Lateral control not enabled.
        const DISENGAGED        = 0x10;
    }
}

impl LimitFlags {
    /// Flags that force the actuator off.
    pub const CUTOFF_MASK: Self = Self::from_bits_truncate(
        Self::ANGLE_CUTOFF.bits() | Self::LOW_SPEED_CUTOFF.bits() | Self::DISENGAGED.bits(),
    );
}

/// Limiter inputs for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteerRequest {
    /// Desired steering in [-1, 1].
    pub desired_ratio: f64,
    pub enabled: bool,
    /// Measured driver torque [EPS units].
    pub driver_torque: f64,
    /// Vehicle speed [m/s].
    pub speed: f64,
    /// Steering wheel angle [deg].
    pub angle: f64,
}

/// Limiter result for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitedSteer {
    /// Commanded torque before limiting.
    pub raw: f64,
    /// Final applied torque (integer valued).
    pub torque: f64,
    /// Torque request bit.
    pub request: bool,
    /// Actuator allowed this tick (enabled, angle and speed cutoffs passed).
    pub active: bool,
    /// Authority band limit in force (`M` when authority is full).
    pub authority_limit: f64,
    pub flags: LimitFlags,
}

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Bound `value` to `[lo, hi]`. Callers guarantee `lo <= hi`.
#[inline]
fn limit_band(value: f64, lo: f64, hi: f64) -> f64 {
    if value > hi {
        hi
    } else if value < lo {
        lo
    } else {
        value
    }
}

/// Standard steer torque limits: driver-biased window, then rate limit.
///
/// The window shifts toward the driver's torque so the command never
/// fights a driver pushing the other way. Magnitude may grow by at most
/// `max_rate_of_change` and shrink by at most `max_rate_of_release` per
/// tick. Output is rounded to the EPS integer resolution.
pub fn apply_std_torque_limits(
    command: f64,
    last: f64,
    driver_torque: f64,
    max_torque: f64,
    params: &SteerLimitParams,
) -> f64 {
    let rise = params.max_rate_of_change;
    let release = params.max_rate_of_release;
    let driver_shift = driver_torque * params.driver_factor;

    let driver_max =
        max_torque + (params.driver_allowance + driver_shift) * params.driver_multiplier;
    let driver_min =
        -max_torque + (-params.driver_allowance + driver_shift) * params.driver_multiplier;
    let max_allowed = driver_max.min(max_torque).max(0.0);
    let min_allowed = driver_min.max(-max_torque).min(0.0);
    let windowed = limit_band(command, min_allowed, max_allowed);

    let rated = if last > 0.0 {
        limit_band(windowed, (last - release).max(-rise), last + rise)
    } else {
        limit_band(windowed, last - rise, (last + release).min(rise))
    };

    rated.round_ties_even()
}

/// Run the full limiter for one tick and update `state.last_applied_steer`.
///
/// `disable_below` is the platform's hard low-speed cutoff [m/s], if any.
pub fn apply_steer_limits(
    state: &mut ArbitrationState,
    request: &SteerRequest,
    params: &SteerLimitParams,
    disable_below: Option<f64>,
) -> LimitedSteer {
    let mut flags = LimitFlags::empty();
    let desired = finite_or_zero(request.desired_ratio).clamp(-1.0, 1.0);
    let driver_torque = finite_or_zero(request.driver_torque);
    let max_torque = params.max_torque_at(request.speed);

    // 1. Raw command.
    let raw = desired * max_torque;

    // 2. Standard limits, then the speed-dependent ceiling.
    let limited = apply_std_torque_limits(
        raw,
        state.last_applied_steer,
        driver_torque,
        max_torque,
        params,
    );
    let mut torque = limit_band(limited, -max_torque.trunc(), max_torque.trunc());
    if raw != torque {
        flags |= LimitFlags::RATE_LIMITED;
    }

    // 3. Authority band.
    let mut authority_limit = max_torque;
    if state.authority_ratio < 1.0 {
        authority_limit = (state.authority_ratio.max(0.0) * max_torque).trunc();
        let banded = limit_band(torque, -authority_limit, authority_limit);
        if banded != torque {
            flags |= LimitFlags::AUTHORITY_CLAMPED;
        }
        torque = banded;
    }

    // 4. Hard cutoffs.
    if !request.enabled {
        flags |= LimitFlags::DISENGAGED;
    }
    if !(request.angle.abs() < MAX_ACTIVE_STEER_ANGLE_DEG) {
        flags |= LimitFlags::ANGLE_CUTOFF;
    }
    if let Some(threshold) = disable_below {
        if !(request.speed >= threshold) {
            flags |= LimitFlags::LOW_SPEED_CUTOFF;
        }
    }
    let active = !flags.intersects(LimitFlags::CUTOFF_MASK);
    if !active {
        torque = 0.0;
    }

    state.last_applied_steer = torque;

    LimitedSteer {
        raw,
        torque,
        request: torque != 0.0,
        active,
        authority_limit,
        flags,
    }
}

//! Steering torque limit parameters.
//!
//! Torque values are in actuator units (the EPS command LSB), speeds in m/s.
//! Every numeric field is range-checked by [`SteerLimitParams::validate`]
//! against [`MAX_TORQUE_LIMIT`] or the configured ceiling. All fields have
//! serde defaults so a session file only names what it overrides.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_TORQUE_BREAKPOINTS;

/// Upper bound for any configured torque value [actuator units].
pub const MAX_TORQUE_LIMIT: f64 = 1024.0;

/// `(speed [m/s], max torque)` pairs, speed strictly increasing.
pub type TorqueBreakpoints = Vec<(f64, f64), MAX_TORQUE_BREAKPOINTS>;

/// Per-vehicle steering limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SteerLimitParams {
    /// Absolute torque ceiling.
    #[serde(default = "default_max_torque")]
    pub max_torque: f64,

    /// Speed-dependent torque curve. Empty = flat at `max_torque`.
    #[serde(default)]
    pub max_torque_breakpoints: TorqueBreakpoints,

    /// Maximum growth of torque magnitude per tick.
    #[serde(default = "default_rate_of_change")]
    pub max_rate_of_change: f64,

    /// Maximum shrink of torque magnitude per tick.
    #[serde(default = "default_rate_of_release")]
    pub max_rate_of_release: f64,

    /// Driver torque dead band before the window starts to shift.
    #[serde(default = "default_driver_allowance")]
    pub driver_allowance: f64,

    /// Gain applied to the shifted driver window.
    #[serde(default = "default_driver_multiplier")]
    pub driver_multiplier: f64,

    /// Scale of measured driver torque into actuator units.
    #[serde(default = "default_driver_factor")]
    pub driver_factor: f64,

    /// Driver torque magnitude that counts as an override.
    #[serde(default = "default_override_threshold")]
    pub driver_torque_override_threshold: f64,
}

fn default_max_torque() -> f64 {
    255.0
}
fn default_rate_of_change() -> f64 {
    3.0
}
fn default_rate_of_release() -> f64 {
    7.0
}
fn default_driver_allowance() -> f64 {
    50.0
}
fn default_driver_multiplier() -> f64 {
    2.0
}
fn default_driver_factor() -> f64 {
    1.0
}
fn default_override_threshold() -> f64 {
    150.0
}

impl Default for SteerLimitParams {
    fn default() -> Self {
        Self {
            max_torque: default_max_torque(),
            max_torque_breakpoints: Vec::new(),
            max_rate_of_change: default_rate_of_change(),
            max_rate_of_release: default_rate_of_release(),
            driver_allowance: default_driver_allowance(),
            driver_multiplier: default_driver_multiplier(),
            driver_factor: default_driver_factor(),
            driver_torque_override_threshold: default_override_threshold(),
        }
    }
}

impl SteerLimitParams {
    /// Maximum torque at `speed`, linearly interpolated over the breakpoints.
    ///
    /// Clamps to the end values outside the curve and never exceeds
    /// `max_torque`. Non-finite speeds read as standstill.
    pub fn max_torque_at(&self, speed: f64) -> f64 {
        let speed = if speed.is_finite() { speed } else { 0.0 };
        let curve = self.max_torque_breakpoints.as_slice();

        let value = match curve {
            [] => self.max_torque,
            [(_, t)] => *t,
            [(s0, t0), ..] if speed <= *s0 => *t0,
            [.., (sn, tn)] if speed >= *sn => *tn,
            _ => curve
                .windows(2)
                .find(|w| speed <= w[1].0)
                .map(|w| {
                    let (s0, t0) = w[0];
                    let (s1, t1) = w[1];
                    t0 + (t1 - t0) * (speed - s0) / (s1 - s0)
                })
                .unwrap_or(self.max_torque),
        };

        value.min(self.max_torque)
    }

    /// Validate parameter bounds and curve shape.
    pub fn validate(&self) -> Result<(), String> {
        check_range("max_torque", self.max_torque, f64::MIN_POSITIVE, MAX_TORQUE_LIMIT)?;
        check_range(
            "max_rate_of_change",
            self.max_rate_of_change,
            f64::MIN_POSITIVE,
            self.max_torque,
        )?;
        check_range(
            "max_rate_of_release",
            self.max_rate_of_release,
            f64::MIN_POSITIVE,
            self.max_torque,
        )?;
        check_range("driver_allowance", self.driver_allowance, 0.0, MAX_TORQUE_LIMIT)?;
        check_range("driver_multiplier", self.driver_multiplier, 0.0, 100.0)?;
        check_range("driver_factor", self.driver_factor, 0.0, 100.0)?;
        check_range(
            "driver_torque_override_threshold",
            self.driver_torque_override_threshold,
            f64::MIN_POSITIVE,
            f64::MAX,
        )?;

        let mut prev_speed: Option<f64> = None;
        for &(speed, torque) in self.max_torque_breakpoints.iter() {
            check_range("breakpoint speed", speed, 0.0, f64::MAX)?;
            check_range("breakpoint torque", torque, f64::MIN_POSITIVE, self.max_torque)?;
            if let Some(prev) = prev_speed {
                if speed <= prev {
                    return Err(format!(
                        "breakpoint speeds must be strictly increasing ({prev} then {speed})"
                    ));
                }
            }
            prev_speed = Some(speed);
        }
        Ok(())
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), String> {
    if !value.is_finite() || value < min || value > max {
        return Err(format!("{name} {value} out of range [{min}, {max}]"));
    }
    Ok(())
}

//! Driver alert arbiter.
//!
//! Picks at most one driver-facing alert per tick, by priority, and holds it
//! on screen for [`DRIVER_ALERT_HOLD_TICKS`] before re-evaluating. The
//! low-speed alert only applies to platforms whose EPS cuts out above 10 m/s
//! and uses a 2 m/s hysteresis band.

use lkas_common::alert::DriverAlert;
use lkas_common::consts::{ALERT_TORQUE_LOW_RATIO, ALERT_TORQUE_OVER_RATIO, DRIVER_ALERT_HOLD_TICKS};
use tracing::debug;

/// Low-speed alert applies only above this minimum steer speed [m/s].
const LOW_SPEED_ALERT_MIN_STEER: f64 = 10.0;
/// Margin above the minimum steer speed that raises the low-speed flag [m/s].
const LOW_SPEED_SET_MARGIN: f64 = 2.0;
/// Margin above the minimum steer speed that clears it [m/s].
const LOW_SPEED_CLEAR_MARGIN: f64 = 4.0;

/// Inputs to the arbiter for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertInputs {
    pub cruise_enabled: bool,
    pub lkas_button_on: bool,
    pub cruise_standstill: bool,
    /// Authority ratio computed this tick.
    pub authority_ratio: f64,
    /// Vehicle speed [m/s].
    pub speed: f64,
    /// Platform minimum steering speed [m/s].
    pub min_steer_speed: f64,
}

/// Latched driver alert with its hold timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriverAlertArbiter {
    low_speed_alert: bool,
    hold_timer: u32,
    latched: Option<DriverAlert>,
}

impl DriverAlertArbiter {
    pub const fn new() -> Self {
        Self {
            low_speed_alert: false,
            hold_timer: 0,
            latched: None,
        }
    }

    /// Low-speed hysteresis flag.
    #[inline]
    pub const fn low_speed_alert(&self) -> bool {
        self.low_speed_alert
    }

    fn update_low_speed(&mut self, speed: f64, min_steer_speed: f64) {
        if speed < min_steer_speed + LOW_SPEED_SET_MARGIN
            && min_steer_speed > LOW_SPEED_ALERT_MIN_STEER
        {
            self.low_speed_alert = true;
        }
        if speed > min_steer_speed + LOW_SPEED_CLEAR_MARGIN {
            self.low_speed_alert = false;
        }
    }

    fn select(&self, inputs: &AlertInputs) -> Option<DriverAlert> {
        if !inputs.lkas_button_on {
            Some(DriverAlert::InvalidLkasSetting)
        } else if inputs.cruise_standstill {
            Some(DriverAlert::ResumeRequired)
        } else if inputs.authority_ratio < ALERT_TORQUE_OVER_RATIO {
            Some(DriverAlert::SteerTorqueOver)
        } else if inputs.authority_ratio < ALERT_TORQUE_LOW_RATIO {
            Some(DriverAlert::SteerTorqueLow)
        } else if self.low_speed_alert {
            Some(DriverAlert::BelowSteerSpeed)
        } else {
            None
        }
    }

    /// Evaluate one tick and return the alert to display, if any.
    pub fn update(&mut self, inputs: &AlertInputs) -> Option<DriverAlert> {
        self.update_low_speed(inputs.speed, inputs.min_steer_speed);

        if !inputs.cruise_enabled {
            self.hold_timer = 0;
        } else if self.hold_timer > 0 {
            self.hold_timer -= 1;
        } else {
            match self.select(inputs) {
                Some(alert) => {
                    if self.latched != Some(alert) {
                        debug!(?alert, previous = ?self.latched, "driver alert raised");
                    }
                    self.latched = Some(alert);
                    self.hold_timer = DRIVER_ALERT_HOLD_TICKS;
                }
                None => {
                    if let Some(previous) = self.latched.take() {
                        debug!(?previous, "driver alert cleared");
                    }
                }
            }
        }

        if self.hold_timer > 0 { self.latched } else { None }
    }
}

//! Per-tick input record produced by upstream state estimation.

use serde::{Deserialize, Serialize};

/// Visual alert requested by the alert manager for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualAlert {
    #[default]
    None,
    Fcw,
    SteerRequired,
    BrakePressed,
    WrongGear,
    SeatbeltUnbuckled,
    SpeedTooHigh,
    LdwLeft,
    LdwRight,
    Ldw,
}

/// Everything one control tick needs, immutable within the tick.
///
/// Missing fields deserialize to their inactive value (`false`, `0.0`,
/// `None`), matching the fail-safe reading of absent sensor data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlCycleInput {
    /// Desired steering as a fraction of max torque, in [-1, 1].
    pub desired_steer_ratio: f64,
    /// Lateral control engaged.
    pub enabled: bool,
    /// Driver torque on the wheel [EPS units].
    pub measured_driver_torque: f64,
    /// Vehicle speed [m/s].
    pub measured_vehicle_speed: f64,
    /// Steering wheel angle [deg].
    pub measured_steering_angle: f64,
    pub lane_change_active: bool,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub left_lane_visible: bool,
    pub right_lane_visible: bool,
    /// Radar distance to the lead vehicle [m].
    pub lead_distance: Option<f64>,
    pub cruise_standstill: bool,
    pub cancel_requested: bool,
    pub visual_alert: VisualAlert,
    /// Cruise control main state.
    pub cruise_enabled: bool,
    /// Driver's LKAS button setting.
    pub lkas_button_on: bool,
    /// Last rolling counter seen on the steering command frame.
    pub observed_steer_counter: u8,
    pub tick_index: u64,
}

impl ControlCycleInput {
    /// Either turn signal is on.
    #[inline]
    pub const fn blinker_active(&self) -> bool {
        self.left_blinker || self.right_blinker
    }
}

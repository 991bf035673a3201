//! System-wide constants for the LKAS workspace.
//!
//! Single source of truth for tick rates, timer lengths and unit conversions.
//! Imported by all crates; never duplicated locally.

/// Control loop rate [Hz]. One tick = 10 ms.
pub const CONTROL_RATE_HZ: f64 = 100.0;

/// Ticks after activation during which override tracking is suspended.
pub const WARMUP_TICKS: u64 = 50;

/// Ticks the "driver is overriding" condition is held after torque drops.
pub const OVERRIDE_HOLD_TICKS: u32 = 50;

/// Speed above which driver torque counts as an override [km/h].
pub const OVERRIDE_MIN_SPEED_KPH: f64 = 5.0;

/// Authority recovery time constant (ratio rising toward 1) [s].
pub const AUTHORITY_RECOVERY_S: f64 = 0.5;

/// Default authority decay time constant [s].
pub const AUTHORITY_DECAY_DEFAULT_S: f64 = 5.0;

/// Authority decay time constant while a turn signal is on [s].
pub const AUTHORITY_DECAY_BLINKER_S: f64 = 2.0;

/// Authority decay time constant during a lane change maneuver [s].
pub const AUTHORITY_DECAY_LANE_CHANGE_S: f64 = 15.0;

/// Steering angle at or beyond which the actuator is released [deg].
pub const MAX_ACTIVE_STEER_ANGLE_DEG: f64 = 90.0;

/// Lane visibility timer reload value [ticks].
pub const LANE_TIMER_RELOAD: u32 = 100;

/// Authority ratio above which the HUD reports the system as active.
pub const HUD_ACTIVE_AUTHORITY: f64 = 0.8;

/// Minimum spacing between resume presses: strictly more than this [ticks].
pub const RESUME_SPACING_TICKS: u64 = 5;

/// Resume presses in one burst before the spacing gate re-arms.
pub const RESUME_BURST_LEN: u32 = 6;

/// Period of the auxiliary display message [ticks] (20 Hz).
pub const AUX_DISPLAY_PERIOD_TICKS: u64 = 5;

/// Modulus of every 4-bit rolling message counter.
pub const MESSAGE_COUNTER_MODULUS: u8 = 16;

/// Maximum number of outgoing messages a single tick can produce.
pub const MAX_MESSAGES_PER_TICK: usize = 4;

/// Hold time of a latched driver alert [ticks].
pub const DRIVER_ALERT_HOLD_TICKS: u32 = 100;

/// Authority ratio below which the driver is told the system yielded.
pub const ALERT_TORQUE_OVER_RATIO: f64 = 0.1;

/// Authority ratio below which the driver is told torque is reduced.
pub const ALERT_TORQUE_LOW_RATIO: f64 = 0.6;

/// Maximum number of speed breakpoints in a max-torque curve.
pub const MAX_TORQUE_BREAKPOINTS: usize = 8;

/// m/s → km/h.
pub const MS_TO_KPH: f64 = 3.6;

/// km/h → m/s.
pub const KPH_TO_MS: f64 = 1.0 / MS_TO_KPH;

/// mph → m/s.
pub const MPH_TO_MS: f64 = 0.44704;

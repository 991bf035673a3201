//! Cycle orchestrator: one vehicle session, one call per 10 ms tick.
//!
//! ## Tick Order
//! 1. Rate timer (ticks since activation).
//! 2. Torque-override tracker → authority ratio.
//! 3. Steering command limiter → applied torque.
//! 4. HUD state machine (fed the limiter's `active` flag).
//! 5. Cruise-resume sequencer.
//! 6. Driver alert arbiter.
//! 7. Message assembly.
//!
//! ## Message Order
//! Steering command, EPS status echo (platform-gated), resume/cancel press,
//! auxiliary display (every 5th tick, platform-gated).
//!
//! A tick never fails and never allocates. Each session owns all of its
//! state; independent sessions share nothing.

use lkas_common::alert::DriverAlert;
use lkas_common::consts::{AUX_DISPLAY_PERIOD_TICKS, MESSAGE_COUNTER_MODULUS, WARMUP_TICKS};
use lkas_common::input::ControlCycleInput;
use lkas_common::message::{MessageBatch, OutgoingMessage, SteeringCommand, wrap_counter};
use static_assertions::const_assert;
use tracing::{debug, trace};

use crate::command::resume::{ResumeRequest, ResumeState};
use crate::config::LoadedConfig;
use crate::control::authority::{OverrideSample, update_authority};
use crate::control::limiter::{LimitFlags, LimitedSteer, SteerRequest, apply_steer_limits};
use crate::state::alert::{AlertInputs, DriverAlertArbiter};
use crate::state::arbitration::ArbitrationState;
use crate::state::hud::{HudOutput, HudState};

const_assert!(AUX_DISPLAY_PERIOD_TICKS > 0);

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-session counters, updated every tick with no allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleStats {
    /// Total ticks executed.
    pub ticks: u64,
    /// Ticks where the rate/magnitude limiter changed the raw command.
    pub rate_limited: u64,
    /// Ticks where the authority band reduced the command.
    pub authority_clamped: u64,
    /// Ticks with the actuator forced off.
    pub inactive: u64,
    /// Ticks spent inside a driver-override hold.
    pub override_held: u64,
    pub resume_presses: u64,
    pub cancel_presses: u64,
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            rate_limited: 0,
            authority_clamped: 0,
            inactive: 0,
            override_held: 0,
            resume_presses: 0,
            cancel_presses: 0,
        }
    }

    /// Record one tick. O(1), no allocation.
    #[inline]
    pub fn record(
        &mut self,
        steer: &LimitedSteer,
        override_held: bool,
        button: Option<&OutgoingMessage>,
    ) {
        self.ticks += 1;
        if steer.flags.contains(LimitFlags::RATE_LIMITED) {
            self.rate_limited += 1;
        }
        if steer.flags.contains(LimitFlags::AUTHORITY_CLAMPED) {
            self.authority_clamped += 1;
        }
        if !steer.active {
            self.inactive += 1;
        }
        if override_held {
            self.override_held += 1;
        }
        match button {
            Some(OutgoingMessage::ResumeButtonPress { .. }) => self.resume_presses += 1,
            Some(OutgoingMessage::CancelButtonPress { .. }) => self.cancel_presses += 1,
            _ => {}
        }
    }
}

// ─── Steering Command Counter ───────────────────────────────────────

/// 4-bit rolling counter for the steering command frame.
///
/// Seeded from the counter last seen on the bus on the session's first
/// tick, then advanced by one every tick (including the first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SteerCounter {
    value: u8,
    seeded: bool,
}

impl SteerCounter {
    pub const fn new() -> Self {
        Self {
            value: 0,
            seeded: false,
        }
    }

    /// Advance and return this tick's counter.
    #[inline]
    pub fn next(&mut self, observed: u8) -> u8 {
        if !self.seeded {
            self.value = observed % MESSAGE_COUNTER_MODULUS;
            self.seeded = true;
            debug!(observed, "steering counter seeded");
        }
        self.value = (self.value + 1) % MESSAGE_COUNTER_MODULUS;
        self.value
    }
}

// ─── Session ────────────────────────────────────────────────────────

/// Everything one tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutput {
    /// Ordered messages for the protocol encoder.
    pub messages: MessageBatch,
    pub steer: LimitedSteer,
    pub hud: HudOutput,
    pub alert: Option<DriverAlert>,
    /// Authority ratio after this tick's update.
    pub authority_ratio: f64,
}

/// One vehicle session.
#[derive(Debug, Clone)]
pub struct SteeringSession {
    config: LoadedConfig,
    arbitration: ArbitrationState,
    hud: HudState,
    resume: ResumeState,
    alerts: DriverAlertArbiter,
    steer_counter: SteerCounter,
    stats: CycleStats,
}

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

impl SteeringSession {
    /// Start a session with all state at its initial values.
    pub fn new(config: LoadedConfig) -> Self {
        debug!(family = ?config.session.family, traits = ?config.traits, "session started");
        Self {
            config,
            arbitration: ArbitrationState::new(),
            hud: HudState::new(),
            resume: ResumeState::new(),
            alerts: DriverAlertArbiter::new(),
            steer_counter: SteerCounter::new(),
            stats: CycleStats::new(),
        }
    }

    pub fn config(&self) -> &LoadedConfig {
        &self.config
    }

    pub fn arbitration(&self) -> &ArbitrationState {
        &self.arbitration
    }

    pub fn hud(&self) -> &HudState {
        &self.hud
    }

    pub fn resume(&self) -> &ResumeState {
        &self.resume
    }

    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Run one control tick.
    pub fn tick(&mut self, input: &ControlCycleInput) -> CycleOutput {
        let limits = &self.config.session.steer_limits;
        let traits = self.config.traits;
        let speed = finite_or_zero(input.measured_vehicle_speed);

        // 1. Rate timer.
        let elapsed = self.arbitration.advance_activation(input.enabled);
        if elapsed == WARMUP_TICKS {
            debug!(tick = input.tick_index, "override tracking armed");
        }

        // 2. Override tracker.
        let sample = OverrideSample {
            speed,
            driver_torque: input.measured_driver_torque,
            lane_change_active: input.lane_change_active,
            blinker_active: input.blinker_active(),
        };
        let authority_ratio = update_authority(
            &mut self.arbitration,
            &sample,
            elapsed,
            limits.driver_torque_override_threshold,
        );

        // 3. Limiter.
        let request = SteerRequest {
            desired_ratio: input.desired_steer_ratio,
            enabled: input.enabled,
            driver_torque: input.measured_driver_torque,
            speed,
            angle: input.measured_steering_angle,
        };
        let steer = apply_steer_limits(
            &mut self.arbitration,
            &request,
            limits,
            traits.steer_disable_below,
        );

        // 4. HUD.
        let hud = self.hud.update(
            steer.active,
            input.visual_alert,
            input.left_lane_visible,
            input.right_lane_visible,
            authority_ratio,
        );

        // 5. Resume / cancel.
        let button = self.resume.update(&ResumeRequest {
            cancel_requested: input.cancel_requested,
            longitudinal_control: self.config.session.longitudinal_control,
            cruise_standstill: input.cruise_standstill,
            lead_distance: input.lead_distance,
            tick_index: input.tick_index,
        });

        // 6. Driver alerts.
        let alert = self.alerts.update(&AlertInputs {
            cruise_enabled: input.cruise_enabled,
            lkas_button_on: input.lkas_button_on,
            cruise_standstill: input.cruise_standstill,
            authority_ratio,
            speed,
            min_steer_speed: traits.min_steer_speed,
        });

        // 7. Messages. Batch capacity covers the four optional slots.
        let mut messages = MessageBatch::new();
        let command = SteeringCommand {
            counter: self.steer_counter.next(input.observed_steer_counter),
            torque: steer.torque as i16,
            request: steer.request,
            warning: hud.warning,
            display_state: hud.display_state,
        };
        let _ = messages.push(OutgoingMessage::SteeringCommand(command));
        if traits.steering_status_echo {
            let _ = messages.push(OutgoingMessage::SteeringStatus {
                counter: wrap_counter(input.tick_index),
            });
        }
        if let Some(msg) = button {
            let _ = messages.push(msg);
        }
        if traits.aux_display && input.tick_index % AUX_DISPLAY_PERIOD_TICKS == 0 {
            let _ = messages.push(OutgoingMessage::AuxDisplay {
                counter: wrap_counter(input.tick_index),
                enabled: input.enabled,
            });
        }

        self.stats.record(
            &steer,
            self.arbitration.override_timer > 0,
            button.as_ref(),
        );

        trace!(
            tick = input.tick_index,
            torque = steer.torque,
            raw = steer.raw,
            limit = steer.authority_limit,
            ratio = authority_ratio,
            elapsed,
            flags = steer.flags.bits(),
            "steer"
        );

        CycleOutput {
            messages,
            steer,
            hud,
            alert,
            authority_ratio,
        }
    }
}

//! Cruise-resume sequencer.
//!
//! While the car is held at standstill by cruise control, watches the lead
//! vehicle's radar distance. Once the lead moves off, emits a burst of six
//! resume button presses, one every tick past the spacing gate, then backs
//! off until the gate re-opens. A cancel request on a system that owns
//! longitudinal control pre-empts all of this.
//!
//! A latched lead distance of exactly 0.0 marks "no standstill seen yet".

use lkas_common::consts::{RESUME_BURST_LEN, RESUME_SPACING_TICKS};
use lkas_common::message::{OutgoingMessage, wrap_counter};
use tracing::debug;

/// Sequencer inputs for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResumeRequest {
    pub cancel_requested: bool,
    /// This system owns longitudinal control.
    pub longitudinal_control: bool,
    pub cruise_standstill: bool,
    /// Radar lead distance [m]; `None` reads as no lead (0.0).
    pub lead_distance: Option<f64>,
    pub tick_index: u64,
}

/// Resume sequencing state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResumeState {
    pub last_known_lead_distance: f64,
    pub resume_sequence_count: u32,
    pub last_resume_tick: u64,
}

impl ResumeState {
    pub const fn new() -> Self {
        Self {
            last_known_lead_distance: 0.0,
            resume_sequence_count: 0,
            last_resume_tick: 0,
        }
    }

    /// Run one tick. Returns the button press to send, if any.
    pub fn update(&mut self, req: &ResumeRequest) -> Option<OutgoingMessage> {
        if req.cancel_requested && req.longitudinal_control {
            debug!(tick = req.tick_index, "cancel button press");
            return Some(OutgoingMessage::CancelButtonPress {
                counter: wrap_counter(req.tick_index),
            });
        }

        if !req.cruise_standstill {
            if self.last_known_lead_distance != 0.0 {
                self.last_known_lead_distance = 0.0;
            }
            return None;
        }

        let lead = req.lead_distance.filter(|d| d.is_finite()).unwrap_or(0.0);

        if self.last_known_lead_distance == 0.0 {
            self.last_known_lead_distance = lead;
            self.resume_sequence_count = 0;
            if lead != 0.0 {
                debug!(lead, tick = req.tick_index, "standstill lead distance latched");
            }
            return None;
        }

        let spacing = req.tick_index.saturating_sub(self.last_resume_tick);
        if lead == self.last_known_lead_distance || spacing <= RESUME_SPACING_TICKS {
            return None;
        }

        let counter = wrap_counter(u64::from(self.resume_sequence_count));
        self.resume_sequence_count = self.resume_sequence_count.saturating_add(1);
        if self.resume_sequence_count >= RESUME_BURST_LEN {
            self.last_resume_tick = req.tick_index;
        }
        debug!(
            count = self.resume_sequence_count,
            lead,
            latched = self.last_known_lead_distance,
            tick = req.tick_index,
            "resume button press"
        );
        Some(OutgoingMessage::ResumeButtonPress { counter })
    }
}

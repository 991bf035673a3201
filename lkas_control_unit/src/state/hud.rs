//! HUD alert state machine.
//!
//! Each lane line keeps a visibility timer that reloads on sight and drains
//! one tick at a time once the line is lost, so a flickering detection does
//! not make the cluster icon blink.

use lkas_common::consts::{HUD_ACTIVE_AUTHORITY, LANE_TIMER_RELOAD};
use lkas_common::input::VisualAlert;
use lkas_common::message::HudDisplayState;
use tracing::debug;

/// Lane visibility timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudState {
    pub left_lane_timer: u32,
    pub right_lane_timer: u32,
    last_display: HudDisplayState,
}

/// HUD fields for this tick's steering command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudOutput {
    /// "Steering required" warning bit.
    pub warning: bool,
    pub display_state: HudDisplayState,
}

#[inline]
fn refresh(timer: &mut u32, visible: bool) {
    if visible {
        *timer = LANE_TIMER_RELOAD;
    } else {
        *timer = timer.saturating_sub(1);
    }
}

impl HudState {
    pub const fn new() -> Self {
        Self {
            left_lane_timer: 0,
            right_lane_timer: 0,
            last_display: HudDisplayState::NoLane,
        }
    }

    /// Refresh lane timers and pick the display state.
    ///
    /// `enabled` is whether the actuator is active this tick, `authority`
    /// the current override authority ratio.
    pub fn update(
        &mut self,
        enabled: bool,
        visual_alert: VisualAlert,
        left_lane_visible: bool,
        right_lane_visible: bool,
        authority: f64,
    ) -> HudOutput {
        refresh(&mut self.left_lane_timer, left_lane_visible);
        refresh(&mut self.right_lane_timer, right_lane_visible);

        let warning = visual_alert == VisualAlert::SteerRequired;
        let left = self.left_lane_timer > 0;
        let right = self.right_lane_timer > 0;

        let display_state = if (left && right) || warning {
            if authority > HUD_ACTIVE_AUTHORITY && (enabled || warning) {
                HudDisplayState::Active
            } else {
                HudDisplayState::Inactive
            }
        } else if left {
            HudDisplayState::LeftOnly
        } else if right {
            HudDisplayState::RightOnly
        } else {
            HudDisplayState::NoLane
        };

        if display_state != self.last_display {
            debug!(
                from = ?self.last_display,
                to = ?display_state,
                warning,
                authority,
                "hud display changed"
            );
            self.last_display = display_state;
        }

        HudOutput {
            warning,
            display_state,
        }
    }
}

//! Property tests: invariants that hold for any input sequence.

use lkas_common::input::{ControlCycleInput, VisualAlert};
use lkas_common::message::{HudDisplayState, OutgoingMessage};
use lkas_common::vehicle::VehicleFamily;
use proptest::prelude::*;

use super::session;

// ── Strategies ──────────────────────────────────────────────────────

fn family_strategy() -> impl Strategy<Value = VehicleFamily> {
    prop::sample::select(VehicleFamily::ALL.to_vec())
}

fn alert_strategy() -> impl Strategy<Value = VisualAlert> {
    prop::sample::select(vec![
        VisualAlert::None,
        VisualAlert::SteerRequired,
        VisualAlert::Fcw,
        VisualAlert::LdwLeft,
    ])
}

fn input_strategy() -> impl Strategy<Value = ControlCycleInput> {
    let motion = (
        -1.5f64..1.5,
        any::<bool>(),
        -400.0f64..400.0,
        0.0f64..40.0,
        -120.0f64..120.0,
    );
    let context = (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::option::of(0.0f64..50.0),
    );
    let cruise = (
        any::<bool>(),
        any::<bool>(),
        alert_strategy(),
        any::<bool>(),
        any::<bool>(),
        any::<u8>(),
    );
    (motion, context, cruise).prop_map(
        |(
            (desired, enabled, driver, speed, angle),
            (lane_change, left_blink, right_blink, left_lane, right_lane, lead),
            (standstill, cancel, visual_alert, cruise_enabled, button_on, observed),
        )| ControlCycleInput {
            desired_steer_ratio: desired,
            enabled,
            measured_driver_torque: driver,
            measured_vehicle_speed: speed,
            measured_steering_angle: angle,
            lane_change_active: lane_change,
            left_blinker: left_blink,
            right_blinker: right_blink,
            left_lane_visible: left_lane,
            right_lane_visible: right_lane,
            lead_distance: lead,
            cruise_standstill: standstill,
            cancel_requested: cancel,
            visual_alert,
            cruise_enabled,
            lkas_button_on: button_on,
            observed_steer_counter: observed,
            tick_index: 0,
        },
    )
}

fn sequence_strategy() -> impl Strategy<Value = Vec<ControlCycleInput>> {
    prop::collection::vec(input_strategy(), 1..300).prop_map(|mut inputs| {
        for (tick, input) in inputs.iter_mut().enumerate() {
            input.tick_index = tick as u64;
        }
        inputs
    })
}

// ── Properties ──────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_tick_invariants(family in family_strategy(), inputs in sequence_strategy()) {
        let mut s = session(family);
        for input in &inputs {
            let out = s.tick(input);
            let max_torque = s
                .config()
                .session
                .steer_limits
                .max_torque_at(input.measured_vehicle_speed);

            prop_assert!((0.0..=1.0).contains(&out.authority_ratio));
            prop_assert!(out.steer.torque.abs() <= max_torque);
            prop_assert_eq!(out.steer.torque, out.steer.torque.trunc());
            if out.authority_ratio < 1.0 {
                let band = (out.authority_ratio * max_torque).trunc();
                prop_assert!(out.steer.torque.abs() <= band);
            }
            if !out.steer.active {
                prop_assert_eq!(out.steer.torque, 0.0);
            }
            prop_assert_eq!(out.steer.request, out.steer.torque != 0.0);
            prop_assert_eq!(s.arbitration().last_applied_steer, out.steer.torque);

            prop_assert!(!out.messages.is_empty() && out.messages.len() <= 4);
            let is_steering_command = matches!(out.messages[0], OutgoingMessage::SteeringCommand(_));
            prop_assert!(is_steering_command);
            for msg in out.messages.iter() {
                prop_assert!(msg.counter() < 16);
            }
            prop_assert_ne!(out.hud.display_state as u8, 2);
            prop_assert!(HudDisplayState::from_u8(out.hud.display_state as u8).is_some());
        }
    }

    #[test]
    fn prop_sessions_are_deterministic(family in family_strategy(), inputs in sequence_strategy()) {
        let mut a = session(family);
        let mut b = session(family);
        for input in &inputs {
            prop_assert_eq!(a.tick(input), b.tick(input));
        }
    }

    #[test]
    fn prop_rate_limit_respected(inputs in sequence_strategy()) {
        let mut s = session(VehicleFamily::Kona);
        let mut last = 0.0f64;
        for input in &inputs {
            let out = s.tick(input);
            if out.steer.active && out.steer.torque.abs() > last.abs() {
                // Magnitude grows by at most the rise rate per tick.
                prop_assert!(out.steer.torque.abs() - last.abs() <= 3.0);
            }
            last = out.steer.torque;
        }
    }
}

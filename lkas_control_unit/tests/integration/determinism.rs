//! Integration test: sessions are deterministic and isolated.

use lkas_common::input::{ControlCycleInput, VisualAlert};
use lkas_common::vehicle::VehicleFamily;

use super::{cruising, session};

/// Scripted 20 s drive: engage, curves, an override, a stop and a restart.
fn script() -> Vec<ControlCycleInput> {
    (0..2000u64)
        .map(|tick| {
            let t = tick as f64 * 0.01;
            let mut input = cruising(tick);
            input.desired_steer_ratio = 0.6 * (t * 0.7).sin();
            input.measured_steering_angle = 20.0 * (t * 0.7).sin();
            input.observed_steer_counter = 7;
            if (400..520).contains(&tick) {
                input.measured_driver_torque = -220.0;
            }
            if (700..760).contains(&tick) {
                input.lane_change_active = true;
                input.left_blinker = true;
            }
            if (1000..1400).contains(&tick) {
                input.measured_vehicle_speed = 0.0;
                input.cruise_standstill = true;
                input.lead_distance = Some(if tick < 1200 { 5.0 } else { 7.0 });
            }
            if tick % 97 == 0 {
                input.visual_alert = VisualAlert::SteerRequired;
                input.right_lane_visible = false;
            }
            if (1500..1510).contains(&tick) {
                input.enabled = false;
            }
            input
        })
        .collect()
}

#[test]
fn identical_inputs_identical_outputs() {
    let inputs = script();
    let mut a = session(VehicleFamily::GrandeurHev19);
    let mut b = session(VehicleFamily::GrandeurHev19);
    for input in &inputs {
        assert_eq!(a.tick(input), b.tick(input));
    }
    assert_eq!(a.stats(), b.stats());
    assert!(a.stats().resume_presses > 0);
    assert!(a.stats().override_held > 0);
}

#[test]
fn interleaved_sessions_do_not_interact() {
    let inputs = script();
    let mut solo = session(VehicleFamily::Palisade);
    let expected: Vec<_> = inputs.iter().map(|i| solo.tick(i)).collect();

    let mut a = session(VehicleFamily::Palisade);
    let mut noise = session(VehicleFamily::Palisade);
    for (input, want) in inputs.iter().zip(&expected) {
        let mut other = *input;
        other.measured_driver_torque = 400.0;
        other.desired_steer_ratio = -1.0;
        noise.tick(&other);
        assert_eq!(&a.tick(input), want);
    }
}

//! Integration test: stop-and-go resume sequencing through the orchestrator.

use lkas_common::input::ControlCycleInput;
use lkas_common::message::OutgoingMessage;
use lkas_common::vehicle::VehicleFamily;
use lkas_control_unit::config::LoadedConfig;
use lkas_control_unit::cycle::{CycleOutput, SteeringSession};

use super::{cruising, session};

// ── Helpers ─────────────────────────────────────────────────────────

fn stopped(tick: u64, lead: f64) -> ControlCycleInput {
    ControlCycleInput {
        measured_vehicle_speed: 0.0,
        cruise_standstill: true,
        lead_distance: Some(lead),
        ..cruising(tick)
    }
}

fn resume_counter(out: &CycleOutput) -> Option<u8> {
    out.messages.iter().find_map(|m| match m {
        OutgoingMessage::ResumeButtonPress { counter } => Some(*counter),
        _ => None,
    })
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn lead_pulls_away_triggers_burst() {
    let mut s = session(VehicleFamily::Kona);
    for tick in 0..100 {
        assert_eq!(resume_counter(&s.tick(&cruising(tick))), None);
    }
    assert_eq!(resume_counter(&s.tick(&stopped(100, 6.0))), None);
    for tick in 101..110 {
        assert_eq!(resume_counter(&s.tick(&stopped(tick, 6.0))), None);
    }

    let presses: Vec<(u64, u8)> = (110..140)
        .filter_map(|tick| resume_counter(&s.tick(&stopped(tick, 7.5))).map(|c| (tick, c)))
        .collect();
    assert_eq!(
        presses,
        vec![
            (110, 0),
            (111, 1),
            (112, 2),
            (113, 3),
            (114, 4),
            (115, 5),
            (121, 6),
            (127, 7),
            (133, 8),
            (139, 9),
        ]
    );
    assert_eq!(s.stats().resume_presses, 10);
}

#[test]
fn resume_sits_between_steering_and_aux_display() {
    let mut s = session(VehicleFamily::Sonata);
    s.tick(&stopped(100, 6.0));
    let out = s.tick(&stopped(105, 9.0));
    assert_eq!(out.messages.len(), 3);
    assert!(matches!(out.messages[0], OutgoingMessage::SteeringCommand(_)));
    assert_eq!(out.messages[1], OutgoingMessage::ResumeButtonPress { counter: 0 });
    assert!(matches!(out.messages[2], OutgoingMessage::AuxDisplay { counter: 9, .. }));
}

#[test]
fn moving_off_rearms_next_stop() {
    let mut s = session(VehicleFamily::Kona);
    s.tick(&stopped(10, 5.0));
    for tick in 11..20 {
        s.tick(&stopped(tick, 8.0));
    }
    assert!(s.resume().resume_sequence_count >= 6);

    s.tick(&cruising(20));
    assert_eq!(s.resume().last_known_lead_distance, 0.0);

    // Second stop: fresh latch and a fresh burst starting at counter 0.
    assert_eq!(resume_counter(&s.tick(&stopped(200, 4.0))), None);
    assert_eq!(s.resume().resume_sequence_count, 0);
    assert_eq!(resume_counter(&s.tick(&stopped(201, 6.0))), Some(0));
}

#[test]
fn cancel_wins_when_longitudinal_owned() {
    let mut cfg = LoadedConfig::for_family(VehicleFamily::Kona);
    cfg.session.longitudinal_control = true;
    let mut s = SteeringSession::new(cfg);
    s.tick(&stopped(100, 6.0));

    let mut input = stopped(117, 9.0);
    input.cancel_requested = true;
    let out = s.tick(&input);
    assert_eq!(out.messages.len(), 2);
    assert_eq!(out.messages[1], OutgoingMessage::CancelButtonPress { counter: 5 });
    assert_eq!(s.stats().cancel_presses, 1);
    assert_eq!(s.stats().resume_presses, 0);
}

#[test]
fn cancel_dropped_without_longitudinal_control() {
    let mut s = session(VehicleFamily::Kona);
    let mut input = cruising(3);
    input.cancel_requested = true;
    assert_eq!(s.tick(&input).messages.len(), 1);
}

#[test]
fn standstill_raises_resume_alert() {
    let mut s = session(VehicleFamily::Kona);
    let out = s.tick(&stopped(0, 6.0));
    assert_eq!(out.alert, Some(lkas_common::alert::DriverAlert::ResumeRequired));
}

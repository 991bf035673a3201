//! Integration test: sessions built from TOML files on disk.

use std::io::Write;

use lkas_common::config::ConfigError;
use lkas_common::vehicle::VehicleFamily;
use lkas_control_unit::config::load_config;
use lkas_control_unit::cycle::SteeringSession;
use tempfile::NamedTempFile;

use super::{cruising, steering_command};

fn write_config(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

#[test]
fn speed_curve_caps_torque() {
    let file = write_config(
        r#"
family = "SANTA_FE"

[steer_limits]
max_torque = 255.0
max_rate_of_change = 10.0
max_torque_breakpoints = [[0.0, 255.0], [20.0, 255.0], [30.0, 120.0]]
"#,
    );
    let mut s = SteeringSession::new(load_config(file.path()).unwrap());
    let torques: Vec<i16> = (0..60)
        .map(|tick| {
            let mut input = cruising(tick);
            input.desired_steer_ratio = 1.0;
            input.measured_vehicle_speed = 30.0;
            steering_command(&s.tick(&input)).torque
        })
        .collect();
    assert!(torques.iter().all(|&t| t <= 120));
    assert_eq!(torques[..3], [10, 20, 30]);
    assert_eq!(torques.last(), Some(&120));
}

#[test]
fn configured_disable_threshold_applies() {
    let file = write_config("family = \"KONA_EV\"\nsteer_disable_below = 3.0\n");
    let loaded = load_config(file.path()).unwrap();
    assert_eq!(loaded.session.family, VehicleFamily::KonaEv);
    let mut s = SteeringSession::new(loaded);

    let mut input = cruising(0);
    input.measured_vehicle_speed = 2.5;
    assert!(!s.tick(&input).steer.active);
    input.measured_vehicle_speed = 3.5;
    input.tick_index = 1;
    assert!(s.tick(&input).steer.active);
}

#[test]
fn longitudinal_flag_from_file() {
    let file = write_config("family = \"PALISADE\"\nlongitudinal_control = true\n");
    let mut s = SteeringSession::new(load_config(file.path()).unwrap());
    let mut input = cruising(2);
    input.cancel_requested = true;
    assert_eq!(s.tick(&input).messages.len(), 2);
}

#[test]
fn invalid_file_rejected() {
    let file = write_config("family = \"SONATA\"\n[steer_limits]\nmax_rate_of_release = -1.0\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("max_rate_of_release")));
}

#[test]
fn shipped_config_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../config/session.toml");
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.session.family, VehicleFamily::Sonata);
    assert_eq!(loaded.session.steer_limits.max_torque_at(40.0), 200.0);
}

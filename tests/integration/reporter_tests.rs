//! TelemetryReporter status handling and payload plumbing.

use safemon::app::state::{ActuatorState, SensorSnapshot, Signals};
use safemon::config::{NetworkConfig, Thresholds};
use safemon::error::UploadError;
use safemon::telemetry::reporter::TelemetryReporter;

use crate::mock_hw::{calm_snapshot, MockClock, MockHardware, MockHttp};

fn network(firebase_url: &'static str) -> NetworkConfig {
    NetworkConfig {
        wifi_ssid: "plant-floor",
        wifi_password: "",
        dashboard_url: "http://10.0.0.2:8080/data",
        firebase_url,
        firebase_secret: "tok",
    }
}

fn run(
    reporter: &TelemetryReporter,
    http: &mut MockHttp,
    snap: &SensorSnapshot,
    actuators: &ActuatorState,
) -> safemon::telemetry::reporter::ReportOutcome {
    let mut hw = MockHardware::new(*snap).with_distances(&[75.0]);
    let signals = Signals::derive(snap, &Thresholds::default());
    reporter.report(http, &mut hw, &MockClock::at(0), snap, &signals, actuators)
}

#[test]
fn dashboard_accepts_any_2xx() {
    let reporter = TelemetryReporter::new(&network("https://db.example.com"));
    let mut http = MockHttp::ok();
    http.post_result = Ok(201);

    let out = run(&reporter, &mut http, &calm_snapshot(), &ActuatorState::STARTUP);
    assert_eq!(out.dashboard, Ok(()));
}

#[test]
fn dashboard_rejects_non_2xx() {
    let reporter = TelemetryReporter::new(&network("https://db.example.com"));
    let mut http = MockHttp::ok();
    http.post_result = Ok(404);

    let out = run(&reporter, &mut http, &calm_snapshot(), &ActuatorState::STARTUP);
    assert_eq!(out.dashboard, Err(UploadError::Status(404)));
    assert_eq!(out.firebase, Ok(()));
}

#[test]
fn firebase_accepts_only_200() {
    let reporter = TelemetryReporter::new(&network("https://db.example.com"));
    let mut http = MockHttp::ok();
    http.put_result = Ok(204);

    let out = run(&reporter, &mut http, &calm_snapshot(), &ActuatorState::STARTUP);
    assert_eq!(out.firebase, Err(UploadError::Status(204)));
}

#[test]
fn firebase_url_without_trailing_slash() {
    let reporter = TelemetryReporter::new(&network("https://db.example.com"));
    let mut http = MockHttp::ok();

    run(&reporter, &mut http, &calm_snapshot(), &ActuatorState::STARTUP);
    assert_eq!(
        http.requests[1].url,
        "https://db.example.com/sensor_data/1700000000.json?auth=tok"
    );
}

#[test]
fn missing_climate_is_sent_as_zero() {
    let reporter = TelemetryReporter::new(&network("https://db.example.com"));
    let mut http = MockHttp::ok();
    let mut snap = calm_snapshot();
    snap.temperature_c = None;
    snap.humidity_pct = None;

    run(&reporter, &mut http, &snap, &ActuatorState::STARTUP);

    assert_eq!(http.requests[0].body["temperature"], 0.0);
    assert_eq!(http.requests[0].body["humidity"], 0.0);
    assert_eq!(http.requests[1].body["sensors"]["temperature"], 0.0);
}

#[test]
fn alarm_state_flows_into_both_documents() {
    let reporter = TelemetryReporter::new(&network("https://db.example.com"));
    let mut http = MockHttp::ok();
    let mut snap = calm_snapshot();
    snap.tilt_triggered = true;
    let actuators = ActuatorState { led_red: true, led_green: false, buzzer: true, motor_on: false };

    run(&reporter, &mut http, &snap, &actuators);

    let dash = &http.requests[0].body;
    assert_eq!(dash["vibration"], true);
    assert_eq!(dash["motor_state"], false);
    assert_eq!(dash["system_ok"], false);
    assert_eq!(dash["distance"], 75.0);

    let fb = &http.requests[1].body;
    assert_eq!(fb["timestamp"], 1_700_000_000u64);
    assert_eq!(fb["actuators"]["buzzer"], true);
    assert_eq!(fb["actuators"]["led_green"], false);
    assert_eq!(fb["alerts"]["vibration_alert"], true);
    assert_eq!(fb["alerts"]["system_ok"], false);
}

//! MonitorService end-to-end cycles against mock ports.

use safemon::app::decision::AlertState;
use safemon::app::events::{AppEvent, UploadTarget};
use safemon::app::service::MonitorService;
use safemon::app::state::ActuatorState;
use safemon::config::{NetworkConfig, SystemConfig};
use safemon::error::UploadError;

use crate::mock_hw::{calm_snapshot, HwCall, MockClock, MockHardware, MockHttp, RecordingSink};

const NETWORK: NetworkConfig = NetworkConfig {
    wifi_ssid: "plant-floor",
    wifi_password: "password1",
    dashboard_url: "http://dashboard.local/api/sensors",
    firebase_url: "https://safemon-demo.firebaseio.com/",
    firebase_secret: "s3cr3t",
};

fn started(hw: &mut MockHardware) -> (MonitorService, RecordingSink) {
    let mut svc = MonitorService::new(&SystemConfig::default(), &NETWORK);
    let mut sink = RecordingSink::default();
    svc.start(hw, &mut sink, true);
    hw.clear();
    sink.events.clear();
    (svc, sink)
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_drives_green_and_energises_relay() {
    let mut hw = MockHardware::new(calm_snapshot());
    let mut svc = MonitorService::new(&SystemConfig::default(), &NETWORK);
    let mut sink = RecordingSink::default();

    svc.start(&mut hw, &mut sink, false);

    assert_eq!(
        hw.calls,
        vec![
            HwCall::Indicators { led_red: false, led_green: true, buzzer: false },
            HwCall::Relay(true),
        ]
    );
    assert_eq!(svc.actuators(), ActuatorState::STARTUP);
    assert!(!svc.is_online());
    assert!(matches!(sink.events[..], [AppEvent::Started { online: false }]));
}

// ── Decision + actuation ──────────────────────────────────────

#[test]
fn calm_snapshot_is_normal_with_relay_forced_on() {
    let mut hw = MockHardware::new(calm_snapshot());
    let (mut svc, mut sink) = started(&mut hw);
    let clock = MockClock::at(1_000);

    let out = svc.tick(&mut hw, &mut MockHttp::ok(), &clock, &mut sink);

    assert_eq!(out.alert, Some(AlertState::Normal));
    assert_eq!(hw.last_indicators(), Some((false, true, false)));
    assert_eq!(hw.relay_calls(), vec![true]);
    assert_eq!(hw.pulses(), 0);
    assert!(out.interlock.is_none());
    assert!(out.report.is_none());
}

#[test]
fn injecting_spark_turns_on_buzzer() {
    let mut snap = calm_snapshot();
    snap.spark_triggered = true;
    let mut hw = MockHardware::new(snap);
    let (mut svc, mut sink) = started(&mut hw);

    let out = svc.tick(&mut hw, &mut MockHttp::ok(), &MockClock::at(1_000), &mut sink);

    assert_eq!(out.alert, Some(AlertState::Physical));
    assert_eq!(hw.last_indicators(), Some((true, false, true)));
    assert!(svc.actuators().audible_alarm());
}

#[test]
fn environmental_alert_is_silent_and_leaves_relay_alone() {
    let mut snap = calm_snapshot();
    snap.gas_level = 31_000;
    let mut hw = MockHardware::new(snap);
    let (mut svc, mut sink) = started(&mut hw);

    let out = svc.tick(&mut hw, &mut MockHttp::ok(), &MockClock::at(1_000), &mut sink);

    assert_eq!(out.alert, Some(AlertState::Environmental));
    assert_eq!(hw.last_indicators(), Some((true, false, false)));
    assert!(hw.relay_calls().is_empty());
    assert_eq!(hw.pulses(), 0);
    assert!(svc.actuators().motor_on);
}

#[test]
fn threshold_is_exclusive() {
    let mut snap = calm_snapshot();
    snap.gas_level = 30_000;
    snap.sound_level = 30_000;
    let mut hw = MockHardware::new(snap);
    let (mut svc, mut sink) = started(&mut hw);

    let out = svc.tick(&mut hw, &mut MockHttp::ok(), &MockClock::at(1_000), &mut sink);
    assert_eq!(out.alert, Some(AlertState::Normal));
}

// ── Proximity interlock ───────────────────────────────────────

#[test]
fn person_close_during_physical_alert_stops_motor() {
    let mut snap = calm_snapshot();
    snap.tilt_triggered = true;
    let mut hw = MockHardware::new(snap).with_distances(&[30.0]);
    let (mut svc, mut sink) = started(&mut hw);

    let out = svc.tick(&mut hw, &mut MockHttp::ok(), &MockClock::at(1_000), &mut sink);

    let lock = out.interlock.expect("interlock engaged");
    assert_eq!(lock.distance_cm, 30.0);
    assert!(!lock.motor_on);
    assert_eq!(hw.relay_calls(), vec![false]);
    assert!(!svc.actuators().motor_on);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::ProximityChecked { motor_on: false, .. }
    )));
}

#[test]
fn every_tripping_cycle_reports_motor_stopped() {
    let mut snap = calm_snapshot();
    snap.spark_triggered = true;
    let mut hw = MockHardware::new(snap).with_distances(&[30.0, 25.0]);
    let (mut svc, mut sink) = started(&mut hw);
    let clock = MockClock::at(1_000);

    svc.tick(&mut hw, &mut MockHttp::ok(), &clock, &mut sink);
    clock.advance(1_000);
    svc.tick(&mut hw, &mut MockHttp::ok(), &clock, &mut sink);

    let stops: Vec<f32> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ProximityChecked { distance_cm, motor_on: false } => Some(*distance_cm),
            _ => None,
        })
        .collect();
    assert_eq!(stops, vec![30.0, 25.0]);
    assert_eq!(hw.relay_calls(), vec![false, false]);
}

#[test]
fn exactly_at_threshold_keeps_motor_running() {
    let mut snap = calm_snapshot();
    snap.tilt_triggered = true;
    let mut hw = MockHardware::new(snap).with_distances(&[50.0]);
    let (mut svc, mut sink) = started(&mut hw);

    let out = svc.tick(&mut hw, &mut MockHttp::ok(), &MockClock::at(1_000), &mut sink);

    assert!(out.interlock.unwrap().motor_on);
    assert_eq!(hw.relay_calls(), vec![true]);
}

#[test]
fn no_echo_sentinel_keeps_motor_running() {
    let mut snap = calm_snapshot();
    snap.spark_triggered = true;
    let mut hw = MockHardware::new(snap).with_distances(&[1000.0]);
    let (mut svc, mut sink) = started(&mut hw);

    let out = svc.tick(&mut hw, &mut MockHttp::ok(), &MockClock::at(1_000), &mut sink);
    assert!(out.interlock.unwrap().motor_on);
}

#[test]
fn summary_carries_interlock_distance() {
    let mut snap = calm_snapshot();
    snap.tilt_triggered = true;
    let mut hw = MockHardware::new(snap).with_distances(&[42.0]);
    let (mut svc, mut sink) = started(&mut hw);

    svc.tick(&mut hw, &mut MockHttp::ok(), &MockClock::at(1_000), &mut sink);

    let summary = sink.events.iter().rev().find_map(|e| match e {
        AppEvent::CycleSummary(s) => Some(*s),
        _ => None,
    });
    let summary = summary.expect("summary emitted");
    assert_eq!(summary.snapshot.distance_cm, Some(42.0));
    assert!(!summary.actuators.motor_on);
}

#[test]
fn returning_to_normal_re_energises_relay() {
    let mut snap = calm_snapshot();
    snap.tilt_triggered = true;
    let mut hw = MockHardware::new(snap).with_distances(&[10.0]);
    let (mut svc, mut sink) = started(&mut hw);
    let clock = MockClock::at(1_000);

    svc.tick(&mut hw, &mut MockHttp::ok(), &clock, &mut sink);
    assert!(!svc.actuators().motor_on);

    hw.snapshot = calm_snapshot();
    hw.clear();
    clock.advance(1_000);
    svc.tick(&mut hw, &mut MockHttp::ok(), &clock, &mut sink);

    assert_eq!(hw.relay_calls(), vec![true]);
    assert!(svc.actuators().motor_on);
}

// ── Report tick ───────────────────────────────────────────────

#[test]
fn report_fires_every_five_seconds() {
    let mut hw = MockHardware::new(calm_snapshot());
    let (mut svc, mut sink) = started(&mut hw);
    let clock = MockClock::at(0);
    let mut http = MockHttp::ok();

    let mut reports = Vec::new();
    for _ in 0..12 {
        let out = svc.tick(&mut hw, &mut http, &clock, &mut sink);
        reports.push(out.report.is_some());
        clock.advance(1_000);
    }

    // t = 5 s and 10 s
    let fired: Vec<usize> = reports.iter().enumerate().filter(|(_, r)| **r).map(|(i, _)| i).collect();
    assert_eq!(fired, vec![5, 10]);
    assert_eq!(http.requests.len(), 4);
    assert_eq!(svc.cycle_count(), 12);
}

#[test]
fn report_posts_dashboard_then_puts_firebase() {
    let mut hw = MockHardware::new(calm_snapshot()).with_distances(&[120.0, 130.0]);
    let (mut svc, mut sink) = started(&mut hw);
    let mut http = MockHttp::ok();

    let out = svc.tick(&mut hw, &mut http, &MockClock::at(5_000), &mut sink);

    let report = out.report.expect("report tick");
    assert_eq!(report.dashboard, Ok(()));
    assert_eq!(report.firebase, Ok(()));

    assert_eq!(http.requests.len(), 2);
    let dash = &http.requests[0];
    assert_eq!(dash.method, "POST");
    assert_eq!(dash.url, NETWORK.dashboard_url);
    assert_eq!(dash.body["distance"], 120.0);
    assert_eq!(dash.body["motor_state"], true);
    assert_eq!(dash.body["system_ok"], true);

    let fb = &http.requests[1];
    assert_eq!(fb.method, "PUT");
    assert_eq!(
        fb.url,
        "https://safemon-demo.firebaseio.com/sensor_data/1700000000.json?auth=s3cr3t"
    );
    assert_eq!(fb.body["sensors"]["distance"], 130.0);
    assert_eq!(fb.body["actuators"]["led_green"], true);

    // One fresh pulse per upload.
    assert_eq!(hw.pulses(), 2);
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::UploadSucceeded(UploadTarget::Dashboard))));
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::UploadSucceeded(UploadTarget::Firebase))));
}

#[test]
fn alarm_cycle_with_report_fires_three_pulses() {
    let mut snap = calm_snapshot();
    snap.spark_triggered = true;
    let mut hw = MockHardware::new(snap);
    let (mut svc, mut sink) = started(&mut hw);

    svc.tick(&mut hw, &mut MockHttp::ok(), &MockClock::at(5_000), &mut sink);
    assert_eq!(hw.pulses(), 3);
}

#[test]
fn dashboard_failure_does_not_block_firebase() {
    let mut hw = MockHardware::new(calm_snapshot());
    let (mut svc, mut sink) = started(&mut hw);
    let mut http = MockHttp::ok();
    http.post_result = Err(UploadError::Transport(-1));

    let out = svc.tick(&mut hw, &mut http, &MockClock::at(5_000), &mut sink);

    let report = out.report.unwrap();
    assert_eq!(report.dashboard, Err(UploadError::Transport(-1)));
    assert_eq!(report.firebase, Ok(()));
    assert_eq!(http.requests.len(), 2);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::UploadFailed { target: UploadTarget::Dashboard, error: UploadError::Transport(-1) }
    )));
}

#[test]
fn offline_start_still_attempts_uploads() {
    let mut hw = MockHardware::new(calm_snapshot());
    let mut svc = MonitorService::new(&SystemConfig::default(), &NETWORK);
    let mut sink = RecordingSink::default();
    svc.start(&mut hw, &mut sink, false);
    let mut http = MockHttp::ok();

    let out = svc.tick(&mut hw, &mut http, &MockClock::at(5_000), &mut sink);

    assert!(out.report.is_some());
    assert_eq!(http.requests.len(), 2);
}

#[test]
fn every_cycle_ends_with_a_summary() {
    let mut hw = MockHardware::new(calm_snapshot());
    let (mut svc, mut sink) = started(&mut hw);

    svc.tick(&mut hw, &mut MockHttp::ok(), &MockClock::at(5_000), &mut sink);

    assert!(matches!(sink.events.last(), Some(AppEvent::CycleSummary(_))));
    assert!(matches!(sink.events.first(), Some(AppEvent::AlertDecided(AlertState::Normal))));
}

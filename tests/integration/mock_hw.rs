//! Mock adapters for integration tests.
//!
//! Records every actuator, ranging and HTTP call so tests can assert on
//! the full command history without touching real GPIO registers or the
//! network.

use std::cell::Cell;
use std::collections::VecDeque;

use safemon::app::events::AppEvent;
use safemon::app::ports::{ActuatorPort, ClockPort, DistancePort, EventSink, HttpPort, SensorPort};
use safemon::app::state::SensorSnapshot;
use safemon::error::UploadError;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HwCall {
    Indicators { led_red: bool, led_green: bool, buzzer: bool },
    Relay(bool),
    Pulse,
}

// ── MockHardware ──────────────────────────────────────────────

/// Sensors, ranger and actuators in one rig, as the real adapter is.
pub struct MockHardware {
    pub snapshot: SensorSnapshot,
    /// Distances returned by successive pulses; the last one repeats.
    pub distances: VecDeque<f32>,
    pub calls: Vec<HwCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(snapshot: SensorSnapshot) -> Self {
        Self {
            snapshot,
            distances: VecDeque::from([300.0]),
            calls: Vec::new(),
        }
    }

    pub fn with_distances(mut self, d: &[f32]) -> Self {
        self.distances = d.iter().copied().collect();
        self
    }

    pub fn pulses(&self) -> usize {
        self.calls.iter().filter(|c| **c == HwCall::Pulse).count()
    }

    pub fn relay_calls(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Relay(on) => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub fn last_indicators(&self) -> Option<(bool, bool, bool)> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::Indicators { led_red, led_green, buzzer } => Some((*led_red, *led_green, *buzzer)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl SensorPort for MockHardware {
    fn read_snapshot(&mut self) -> SensorSnapshot {
        self.snapshot
    }
}

impl DistancePort for MockHardware {
    fn measure_distance_cm(&mut self) -> f32 {
        self.calls.push(HwCall::Pulse);
        if self.distances.len() > 1 {
            self.distances.pop_front().unwrap_or(300.0)
        } else {
            self.distances.front().copied().unwrap_or(300.0)
        }
    }
}

impl ActuatorPort for MockHardware {
    fn set_indicators(&mut self, led_red: bool, led_green: bool, buzzer: bool) {
        self.calls.push(HwCall::Indicators { led_red, led_green, buzzer });
    }

    fn set_relay(&mut self, energized: bool) {
        self.calls.push(HwCall::Relay(energized));
    }
}

// ── MockHttp ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub url: String,
    pub body: serde_json::Value,
}

pub struct MockHttp {
    pub post_result: Result<u16, UploadError>,
    pub put_result: Result<u16, UploadError>,
    pub requests: Vec<Request>,
}

#[allow(dead_code)]
impl MockHttp {
    pub fn ok() -> Self {
        Self { post_result: Ok(200), put_result: Ok(200), requests: Vec::new() }
    }

    fn record(&mut self, method: &'static str, url: &str, body: &str) {
        self.requests.push(Request {
            method,
            url: url.to_owned(),
            body: serde_json::from_str(body).expect("body is JSON"),
        });
    }
}

impl HttpPort for MockHttp {
    fn post_json(&mut self, url: &str, body: &str) -> Result<u16, UploadError> {
        self.record("POST", url, body);
        self.post_result
    }

    fn put_json(&mut self, url: &str, body: &str) -> Result<u16, UploadError> {
        self.record("PUT", url, body);
        self.put_result
    }
}

// ── MockClock ─────────────────────────────────────────────────

pub struct MockClock {
    pub now_ms: Cell<u32>,
    pub unix_secs: u64,
}

#[allow(dead_code)]
impl MockClock {
    pub fn at(now_ms: u32) -> Self {
        Self { now_ms: Cell::new(now_ms), unix_secs: 1_700_000_000 }
    }

    pub fn advance(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get().wrapping_add(ms));
    }
}

impl ClockPort for MockClock {
    fn uptime_ms(&self) -> u32 {
        self.now_ms.get()
    }

    fn unix_time_secs(&self) -> u64 {
        self.unix_secs
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Fixtures ──────────────────────────────────────────────────

/// 25 °C, 40 %, gas 10000, sound 5000, nothing tripped.
pub fn calm_snapshot() -> SensorSnapshot {
    SensorSnapshot {
        temperature_c: Some(25.0),
        humidity_pct: Some(40.0),
        gas_level: 10_000,
        sound_level: 5_000,
        tilt_triggered: false,
        spark_triggered: false,
        distance_cm: None,
    }
}

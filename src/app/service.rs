//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the long-lived state (last applied
//! [`ActuatorState`], report timer) and runs one full control cycle per
//! [`tick`](MonitorService::tick).  All I/O flows through port traits
//! injected at call sites, so the whole service runs against mocks.
//!
//! ```text
//!  SensorPort ───▶ ┌──────────────────────────────┐ ──▶ EventSink
//! DistancePort ──▶ │        MonitorService         │
//! ActuatorPort ◀── │ decide · interlock · report   │ ──▶ HttpPort
//!   ClockPort ───▶ └──────────────────────────────┘
//! ```
//!
//! Cycle order is fixed: sample → decide → actuate → interlock →
//! (report tick) → summary.  The caller sleeps between cycles.
//!
//! The Wi-Fi bootstrap result is recorded but does not gate uploads:
//! they are attempted on every report tick and fail fast when offline.

use log::info;

use super::decision::{decide, AlertState};
use super::events::{AppEvent, CycleSummary, UploadTarget};
use super::ports::{ActuatorPort, ClockPort, DistancePort, EventSink, HttpPort, SensorPort};
use super::state::{ActuatorState, Signals};
use crate::config::{NetworkConfig, SystemConfig, Thresholds};
use crate::error::UploadError;
use crate::safety::{InterlockOutcome, ProximityInterlock};
use crate::scheduler::ReportTimer;
use crate::telemetry::reporter::{ReportOutcome, TelemetryReporter};

/// What happened during one [`MonitorService::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    /// Rule that fired, `None` when the previous outputs were retained.
    pub alert: Option<AlertState>,
    pub interlock: Option<InterlockOutcome>,
    /// Present only on report ticks.
    pub report: Option<ReportOutcome>,
}

pub struct MonitorService {
    thresholds: Thresholds,
    interlock: ProximityInterlock,
    report_timer: ReportTimer,
    reporter: TelemetryReporter,
    actuators: ActuatorState,
    online: bool,
    cycle_count: u64,
}

impl MonitorService {
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig, network: &NetworkConfig) -> Self {
        Self {
            thresholds: config.thresholds,
            interlock: ProximityInterlock::new(&config.thresholds),
            report_timer: ReportTimer::new(config.report_interval_ms),
            reporter: TelemetryReporter::new(network),
            actuators: ActuatorState::STARTUP,
            online: false,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the power-on outputs (green, silent, motor running).
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink, online: bool) {
        self.online = online;
        self.actuators = ActuatorState::STARTUP;
        let s = self.actuators;
        hw.set_indicators(s.led_red, s.led_green, s.buzzer);
        hw.set_relay(s.motor_on);
        sink.emit(&AppEvent::Started { online });
        info!("MonitorService started (online={})", online);
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one control cycle.
    ///
    /// `hw` satisfies the sensor, ranging and actuator ports at once; this
    /// avoids a double mutable borrow while keeping each boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + DistancePort + ActuatorPort),
        http: &mut impl HttpPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        self.cycle_count += 1;
        let now_ms = clock.uptime_ms();

        // 1. Sample
        let mut snapshot = hw.read_snapshot();
        let signals = Signals::derive(&snapshot, &self.thresholds);

        // 2. Decide + actuate
        let alert = decide(&snapshot, &self.thresholds);
        match alert {
            Some(a) => {
                self.apply_alert(a, hw);
                sink.emit(&AppEvent::AlertDecided(a));
            }
            None => sink.emit(&AppEvent::AlertRetained),
        }

        // 3. Proximity interlock (audible alarm only)
        let interlock = self.interlock.evaluate(&mut self.actuators, hw);
        if let Some(o) = interlock {
            snapshot.distance_cm = Some(o.distance_cm);
            sink.emit(&AppEvent::ProximityChecked {
                distance_cm: o.distance_cm,
                motor_on: o.motor_on,
            });
        }

        // 4. Report tick
        let report = if self.report_timer.poll(now_ms) {
            let outcome =
                self.reporter
                    .report(http, hw, clock, &snapshot, &signals, &self.actuators);
            emit_upload(sink, UploadTarget::Dashboard, outcome.dashboard);
            emit_upload(sink, UploadTarget::Firebase, outcome.firebase);
            Some(outcome)
        } else {
            None
        };

        // 5. Debug summary
        sink.emit(&AppEvent::CycleSummary(CycleSummary {
            snapshot,
            signals,
            actuators: self.actuators,
        }));

        CycleOutcome { alert, interlock, report }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last applied actuator state.
    pub fn actuators(&self) -> ActuatorState {
        self.actuators
    }

    /// Wi-Fi bootstrap result passed to [`start`](Self::start).
    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_alert(&mut self, alert: AlertState, hw: &mut impl ActuatorPort) {
        let next = alert.actuator_state();
        hw.set_indicators(next.led_red, next.led_green, next.buzzer);
        if let Some(energized) = alert.relay_command() {
            hw.set_relay(energized);
        }
        self.actuators = next;
    }
}

fn emit_upload(sink: &mut impl EventSink, target: UploadTarget, result: Result<(), UploadError>) {
    match result {
        Ok(()) => sink.emit(&AppEvent::UploadSucceeded(target)),
        Err(error) => sink.emit(&AppEvent::UploadFailed { target, error }),
    }
}

//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{error, info, warn};

use crate::app::decision::AlertState;
use crate::app::events::{AppEvent, CycleSummary, UploadTarget};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

fn on_off(v: bool) -> &'static str {
    if v { "ON" } else { "OFF" }
}

fn yes_no(v: bool) -> &'static str {
    if v { "YES" } else { "NO" }
}

fn target_name(t: UploadTarget) -> &'static str {
    match t {
        UploadTarget::Dashboard => "dashboard",
        UploadTarget::Firebase => "firebase",
    }
}

fn log_summary(s: &CycleSummary) {
    let snap = &s.snapshot;
    match (snap.temperature_c, snap.humidity_pct) {
        (Some(t), Some(h)) => info!(
            "T={:.1}\u{00b0}C H={:.0}% | gas={} sound={}",
            t, h, snap.gas_level, snap.sound_level
        ),
        _ => info!("T=-- H=-- | gas={} sound={}", snap.gas_level, snap.sound_level),
    }
    info!(
        "sound={} gas={} tilt={} spark={}",
        yes_no(s.signals.sound_detected),
        yes_no(s.signals.gas_alert),
        yes_no(s.signals.tilt),
        yes_no(s.signals.spark),
    );
    info!(
        "red={} buzzer={} motor={}",
        on_off(s.actuators.led_red),
        on_off(s.actuators.buzzer),
        on_off(s.actuators.motor_on),
    );
    info!("---");
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { online: true } => {
                info!("START | online, uploads enabled");
            }
            AppEvent::Started { online: false } => {
                warn!("START | offline mode, uploads will still be attempted");
            }
            AppEvent::AlertDecided(state @ AlertState::Normal) => {
                info!("ALERT | {}", state.label());
            }
            AppEvent::AlertDecided(state) => {
                warn!("ALERT | {}", state.label());
            }
            AppEvent::AlertRetained => {
                info!("ALERT | no rule matched, outputs unchanged");
            }
            AppEvent::ProximityChecked { distance_cm, motor_on: true } => {
                info!("PROX  | {:.1} cm, motor=ON", distance_cm);
            }
            AppEvent::ProximityChecked { distance_cm, motor_on: false } => {
                warn!("PROX  | {:.1} cm, person near machine, motor stopped", distance_cm);
            }
            AppEvent::UploadSucceeded(target) => {
                info!("UPLD  | {} ok", target_name(*target));
            }
            AppEvent::UploadFailed { target, error: e } => {
                error!("UPLD  | {} failed: {}", target_name(*target), e);
            }
            AppEvent::CycleSummary(s) => log_summary(s),
        }
    }
}

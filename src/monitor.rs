//! Per-tick evaluation: samples in, display state and alert decision out.

use crate::{
    AlertEdge, AlertSound, BatteryReport, DisplayState, IconCategory, Indicator, NO_GAMEPAD_TEXT,
    TelemetrySource, UNKNOWN_TEXT, classify,
};

/// One controller's reading for a single tick.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceSample {
    pub label: String,
    /// `None` when the controller's battery report could not be read.
    pub report: Option<BatteryReport>,
}

impl DeviceSample {
    pub fn new(label: impl Into<String>, report: Option<BatteryReport>) -> Self {
        Self {
            label: label.into(),
            report,
        }
    }

    pub fn has_report(&self) -> bool {
        self.report.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub display: DisplayState,
    /// True when the low-battery alert fired for at least one device this tick.
    pub alert: bool,
}

/// Evaluates one tick worth of samples against the shared alert edge.
///
/// Devices are processed in order and each one overwrites the display state of
/// the previous one, so the last device decides what the indicator shows.
pub fn evaluate_tick(samples: &[DeviceSample], edge: &mut AlertEdge) -> TickOutcome {
    let mut outcome = TickOutcome {
        display: DisplayState::new(IconCategory::Disconnected, NO_GAMEPAD_TEXT),
        alert: false,
    };

    for sample in samples {
        let Some(report) = &sample.report else {
            outcome.display = DisplayState::new(IconCategory::Disconnected, UNKNOWN_TEXT);
            continue;
        };

        let percentage = report.charge_percentage();
        outcome.display = classify(report.status, percentage);

        if let Some(percentage) = percentage {
            if edge.observe(percentage) {
                tracing::warn!(
                    device = %sample.label,
                    percentage,
                    "gamepad battery critically low"
                );
                outcome.alert = true;
            }
        }
    }

    outcome
}

/// Owns the telemetry source, the outputs and the alert edge for the process lifetime.
pub struct BatteryMonitor<S, I, A> {
    source: S,
    indicator: I,
    sound: A,
    edge: AlertEdge,
}

impl<S, I, A> BatteryMonitor<S, I, A>
where
    S: TelemetrySource,
    I: Indicator,
    A: AlertSound,
{
    pub fn new(source: S, indicator: I, sound: A) -> Self {
        Self {
            source,
            indicator,
            sound,
            edge: AlertEdge::new(),
        }
    }

    pub fn edge(&self) -> AlertEdge {
        self.edge
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut I {
        &mut self.indicator
    }

    pub fn sound(&self) -> &A {
        &self.sound
    }

    /// Reads every connected controller once and pushes the result to the outputs.
    pub fn tick(&mut self) -> TickOutcome {
        let samples = self.sample_devices();
        let outcome = evaluate_tick(&samples, &mut self.edge);
        tracing::debug!(devices = samples.len(), display = %outcome.display, "tick evaluated");

        self.indicator.set_icon(outcome.display.icon);
        self.indicator.set_text(&outcome.display.text);
        if outcome.alert {
            self.sound.play_once();
        }

        outcome
    }

    fn sample_devices(&mut self) -> Vec<DeviceSample> {
        let devices = match self.source.devices() {
            Ok(devices) => devices,
            Err(e) => {
                tracing::warn!(error = %e, "failed to enumerate gamepads");
                return Vec::new();
            }
        };

        devices
            .iter()
            .map(|device| {
                let label = self.source.label(device);
                let report = match self.source.report(device) {
                    Ok(report) => Some(report),
                    Err(e) => {
                        tracing::debug!(device = %label, error = %e, "battery report unavailable");
                        None
                    }
                };
                DeviceSample::new(label, report)
            })
            .collect()
    }
}

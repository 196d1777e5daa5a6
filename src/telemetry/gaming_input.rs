//! Xbox-compatible gamepads through Windows.Gaming.Input.

use windows::{Gaming::Input::Gamepad, System::Power::BatteryStatus};

use crate::{BatteryReport, ChargeStatus, TelemetryError, telemetry::TelemetrySource};

#[derive(Debug, Default)]
pub struct GamingInputSource;

impl GamingInputSource {
    pub fn new() -> Self {
        Self
    }
}

impl TelemetrySource for GamingInputSource {
    /// Position in `Gamepad::Gamepads()` at enumeration time, plus the gamepad.
    type Device = (u32, Gamepad);

    fn devices(&mut self) -> Result<Vec<Self::Device>, TelemetryError> {
        let gamepads = Gamepad::Gamepads()?;
        (0..gamepads.Size()?)
            .map(|index| -> Result<Self::Device, TelemetryError> {
                Ok((index, gamepads.GetAt(index)?))
            })
            .collect()
    }

    fn report(&mut self, device: &Self::Device) -> Result<BatteryReport, TelemetryError> {
        let report = device.1.TryGetBatteryReport()?;

        let status = match report.Status()? {
            BatteryStatus::NotPresent => ChargeStatus::NotPresent,
            BatteryStatus::Discharging => ChargeStatus::Discharging,
            BatteryStatus::Idle => ChargeStatus::Idle,
            BatteryStatus::Charging => ChargeStatus::Charging,
            _ => ChargeStatus::Unknown,
        };

        // Null capacity references surface as errors from the getters.
        let full = report
            .FullChargeCapacityInMilliwattHours()
            .and_then(|value| value.Value())
            .ok()
            .map(f64::from);
        let remaining = report
            .RemainingCapacityInMilliwattHours()
            .and_then(|value| value.Value())
            .ok()
            .map(f64::from);

        Ok(BatteryReport::new(status, remaining, full))
    }

    fn label(&self, device: &Self::Device) -> String {
        format!("gamepad {}", device.0)
    }
}

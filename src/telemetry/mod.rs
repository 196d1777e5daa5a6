//! Where battery reports come from.

use crate::{BatteryReport, TelemetryError};

pub mod sysfs;

#[cfg(windows)]
pub mod gaming_input;
#[cfg(windows)]
pub mod hid;

/// A provider of connected controllers and their battery reports.
pub trait TelemetrySource {
    type Device;

    /// Currently connected controllers, in the order they should be evaluated.
    fn devices(&mut self) -> Result<Vec<Self::Device>, TelemetryError>;

    fn report(&mut self, device: &Self::Device) -> Result<BatteryReport, TelemetryError>;

    /// Human readable name used in log lines.
    fn label(&self, device: &Self::Device) -> String;
}

/// An optional source; `None` never reports any device.
impl<S: TelemetrySource> TelemetrySource for Option<S> {
    type Device = S::Device;

    fn devices(&mut self) -> Result<Vec<Self::Device>, TelemetryError> {
        match self {
            Some(source) => source.devices(),
            None => Ok(Vec::new()),
        }
    }

    fn report(&mut self, device: &Self::Device) -> Result<BatteryReport, TelemetryError> {
        match self {
            Some(source) => source.report(device),
            None => Err(TelemetryError::Disconnected(String::from("unavailable source"))),
        }
    }

    fn label(&self, device: &Self::Device) -> String {
        match self {
            Some(source) => source.label(device),
            None => String::from("unavailable source"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainedDevice<A, B> {
    First(A),
    Second(B),
}

/// Lists the devices of `first`, then those of `second`.
///
/// A failure to enumerate one side is logged and that side contributes no
/// devices for the tick.
#[derive(Debug)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> TelemetrySource for Chain<A, B>
where
    A: TelemetrySource,
    B: TelemetrySource,
{
    type Device = ChainedDevice<A::Device, B::Device>;

    fn devices(&mut self) -> Result<Vec<Self::Device>, TelemetryError> {
        let (first, second) = (self.first.devices(), self.second.devices());
        if let (Err(e), Err(_)) = (&first, &second) {
            return Err(TelemetryError::NoBatteryData(format!("any source ({e})")));
        }

        let mut devices = Vec::new();
        match first {
            Ok(found) => devices.extend(found.into_iter().map(ChainedDevice::First)),
            Err(e) => tracing::warn!(error = %e, "first telemetry source failed to enumerate"),
        }
        match second {
            Ok(found) => devices.extend(found.into_iter().map(ChainedDevice::Second)),
            Err(e) => tracing::warn!(error = %e, "second telemetry source failed to enumerate"),
        }
        Ok(devices)
    }

    fn report(&mut self, device: &Self::Device) -> Result<BatteryReport, TelemetryError> {
        match device {
            ChainedDevice::First(d) => self.first.report(d),
            ChainedDevice::Second(d) => self.second.report(d),
        }
    }

    fn label(&self, device: &Self::Device) -> String {
        match device {
            ChainedDevice::First(d) => self.first.label(d),
            ChainedDevice::Second(d) => self.second.label(d),
        }
    }
}

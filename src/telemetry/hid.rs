//! DualSense controllers read directly over HID.
//!
//! Windows.Gaming.Input does not expose Sony controllers, so their battery is
//! decoded from raw input reports instead.

use std::{
    collections::HashMap,
    ffi::{CStr, CString},
};

use hidapi::{BusType, HidApi, HidDevice};

use crate::{
    BatteryReport, TelemetryError,
    dualsense::{self, DualSenseBattery},
    telemetry::TelemetrySource,
};

const DEVICE_READ_TIMEOUT_MS: i32 = 100;
const REPORT_BUFFER_SIZE: usize = 78;
// Reading the calibration feature report switches Bluetooth pads to full input reports.
const FEATURE_REPORT_CALIBRATION: u8 = 0x05;
const FEATURE_REPORT_CALIBRATION_LEN: usize = 41;

struct ConnectedController {
    device: HidDevice,
    is_bluetooth: bool,
    last_battery: Option<DualSenseBattery>,
}

pub struct HidSource {
    hid_api: HidApi,
    connected: HashMap<CString, ConnectedController>,
}

impl HidSource {
    pub fn new() -> Result<Self, TelemetryError> {
        Ok(Self {
            hid_api: HidApi::new()?,
            connected: HashMap::new(),
        })
    }

    fn open(&mut self, path: &CStr) -> Result<&mut ConnectedController, TelemetryError> {
        if !self.connected.contains_key(path) {
            let device = self.hid_api.open_path(path)?;
            let is_bluetooth =
                matches!(device.get_device_info()?.bus_type(), BusType::Bluetooth);

            if is_bluetooth {
                let mut feature = [0u8; FEATURE_REPORT_CALIBRATION_LEN];
                feature[0] = FEATURE_REPORT_CALIBRATION;
                if let Err(e) = device.get_feature_report(&mut feature) {
                    tracing::debug!(
                        path = %c_str_to_string(path),
                        error = %e,
                        "calibration request failed"
                    );
                }
            }

            tracing::info!(path = %c_str_to_string(path), is_bluetooth, "DualSense connected");
            self.connected.insert(
                path.to_owned(),
                ConnectedController {
                    device,
                    is_bluetooth,
                    last_battery: None,
                },
            );
        }

        self.connected
            .get_mut(path)
            .ok_or_else(|| TelemetryError::Disconnected(c_str_to_string(path)))
    }
}

impl TelemetrySource for HidSource {
    type Device = CString;

    fn devices(&mut self) -> Result<Vec<CString>, TelemetryError> {
        self.hid_api.refresh_devices()?;

        let mut paths: Vec<CString> = self
            .hid_api
            .device_list()
            .filter(|dev| dualsense::is_dualsense(dev.vendor_id(), dev.product_id()))
            .map(|dev| dev.path().to_owned())
            .collect();
        paths.sort();
        paths.dedup();

        self.connected.retain(|path, _| {
            let still_connected = paths.contains(path);
            if !still_connected {
                tracing::info!(path = %c_str_to_string(path), "DualSense disconnected");
            }
            still_connected
        });

        Ok(paths)
    }

    fn report(&mut self, device: &CString) -> Result<BatteryReport, TelemetryError> {
        let label = c_str_to_string(device);
        let controller = self.open(device)?;

        let mut buf = [0u8; REPORT_BUFFER_SIZE];
        let bytes_read = match controller.device.read_timeout(&mut buf, DEVICE_READ_TIMEOUT_MS) {
            Ok(n) => n,
            Err(e) => {
                self.connected.remove(device.as_c_str());
                return Err(e.into());
            }
        };

        if bytes_read > 0 {
            let report = &buf[..bytes_read];
            if let Some(battery) = dualsense::parse_battery(report, controller.is_bluetooth) {
                controller.last_battery = Some(battery);
            }
        }

        controller
            .last_battery
            .clone()
            .map(BatteryReport::from)
            .ok_or(TelemetryError::NoBatteryData(label))
    }

    fn label(&self, device: &CString) -> String {
        c_str_to_string(device)
    }
}

fn c_str_to_string(path: &CStr) -> String {
    path.to_string_lossy().into_owned()
}

//! Controller batteries exposed by Linux HID drivers under `/sys/class/power_supply`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{BatteryReport, ChargeStatus, TelemetryError, telemetry::TelemetrySource};

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

// Supply names registered by the in-tree and common out-of-tree gamepad drivers.
const CONTROLLER_SUPPLY_PREFIXES: &[&str] = &[
    "ps-controller-battery-",
    "sony_controller_battery_",
    "nintendo_switch_controller_battery_",
    "xpadneo-",
    "wiimote_battery_",
    "steam-controller",
];

#[derive(Debug, Clone)]
pub struct SysfsSource {
    root: PathBuf,
}

impl SysfsSource {
    pub fn new() -> Self {
        Self::with_root(POWER_SUPPLY_DIR)
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn is_controller_supply(path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let known_prefix = CONTROLLER_SUPPLY_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix));
        if !known_prefix && !is_xpad_battery(name) {
            return false;
        }

        // Missing `scope` is tolerated, older drivers do not set it.
        match read_attr(path, "scope") {
            Some(scope) => scope == "Device",
            None => true,
        }
    }
}

impl Default for SysfsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySource for SysfsSource {
    type Device = PathBuf;

    fn devices(&mut self) -> Result<Vec<PathBuf>, TelemetryError> {
        let entries = fs::read_dir(&self.root).map_err(|e| TelemetryError::io(&self.root, e))?;

        let mut supplies: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| Self::is_controller_supply(path))
            .collect();

        supplies.sort();
        Ok(supplies)
    }

    fn report(&mut self, device: &PathBuf) -> Result<BatteryReport, TelemetryError> {
        if !device.is_dir() {
            return Err(TelemetryError::Disconnected(self.label(device)));
        }

        if read_attr(device, "present").as_deref() == Some("0") {
            return Ok(BatteryReport::new(ChargeStatus::NotPresent, None, None));
        }

        let status_path = device.join("status");
        let status = fs::read_to_string(&status_path)
            .map_err(|e| TelemetryError::io(&status_path, e))?;
        let status = parse_status(status.trim());

        let (remaining, full) = read_capacity_pair(device);
        Ok(BatteryReport::new(status, remaining, full))
    }

    fn label(&self, device: &PathBuf) -> String {
        device
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| device.display().to_string())
    }
}

/// The in-tree xpad driver registers `xpad<N>-battery`.
fn is_xpad_battery(name: &str) -> bool {
    name.strip_prefix("xpad")
        .and_then(|rest| rest.strip_suffix("-battery"))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_status(status: &str) -> ChargeStatus {
    match status {
        "Charging" => ChargeStatus::Charging,
        "Discharging" => ChargeStatus::Discharging,
        "Not charging" | "Full" => ChargeStatus::Idle,
        _ => ChargeStatus::Unknown,
    }
}

/// Remaining/full capacity, preferring energy over charge over the percentage attribute.
fn read_capacity_pair(device: &Path) -> (Option<f64>, Option<f64>) {
    for (now, full) in [("energy_now", "energy_full"), ("charge_now", "charge_full")] {
        let pair = (read_number(device, now), read_number(device, full));
        if let (Some(_), Some(_)) = pair {
            return pair;
        }
    }

    match read_number(device, "capacity") {
        Some(capacity) => (Some(capacity), Some(100.0)),
        None => (None, None),
    }
}

fn read_attr(device: &Path, name: &str) -> Option<String> {
    fs::read_to_string(device.join(name))
        .ok()
        .map(|s| s.trim().to_string())
}

fn read_number(device: &Path, name: &str) -> Option<f64> {
    read_attr(device, name)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn supply(root: &Path, name: &str, attrs: &[(&str, &str)]) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for (attr, value) in attrs {
            fs::write(dir.join(attr), format!("{value}\n")).unwrap();
        }
        dir
    }

    #[test]
    fn lists_only_controller_batteries() {
        let tmp = TempDir::new().unwrap();
        supply(tmp.path(), "BAT0", &[("scope", "System"), ("status", "Discharging")]);
        supply(tmp.path(), "AC", &[("online", "1")]);
        supply(tmp.path(), "hid-00:11:22-battery", &[("scope", "Device")]);
        supply(tmp.path(), "ps-controller-battery-aa:bb", &[("scope", "Device")]);
        supply(tmp.path(), "nintendo_switch_controller_battery_01", &[]);
        supply(tmp.path(), "xpadneo-odd", &[("scope", "System")]);
        supply(tmp.path(), "xpad0-battery", &[("scope", "Device")]);
        supply(tmp.path(), "xpad-battery", &[("scope", "Device")]);

        let mut source = SysfsSource::with_root(tmp.path());
        let labels: Vec<String> = source
            .devices()
            .unwrap()
            .iter()
            .map(|d| source.label(d))
            .collect();

        assert_eq!(
            labels,
            [
                "nintendo_switch_controller_battery_01",
                "ps-controller-battery-aa:bb",
                "xpad0-battery",
            ]
        );
    }

    #[test]
    fn matches_numbered_xpad_batteries() {
        assert!(is_xpad_battery("xpad0-battery"));
        assert!(is_xpad_battery("xpad12-battery"));
        assert!(!is_xpad_battery("xpad-battery"));
        assert!(!is_xpad_battery("xpadx-battery"));
        assert!(!is_xpad_battery("xpad0-battery-extra"));
    }

    #[test]
    fn xpad_battery_feeds_a_critical_reading() {
        let tmp = TempDir::new().unwrap();
        supply(
            tmp.path(),
            "xpad0-battery",
            &[("scope", "Device"), ("status", "Discharging"), ("capacity", "3")],
        );

        let mut source = SysfsSource::with_root(tmp.path());
        let devices = source.devices().unwrap();
        assert_eq!(devices.len(), 1);

        let report = source.report(&devices[0]).unwrap();
        assert_eq!(report.status, ChargeStatus::Discharging);
        assert_eq!(report.charge_percentage(), Some(3));
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let mut source = SysfsSource::with_root(tmp.path().join("absent"));
        assert!(matches!(source.devices(), Err(TelemetryError::Io { .. })));
    }

    #[test]
    fn reads_capacity_percentage() {
        let tmp = TempDir::new().unwrap();
        let pad = supply(
            tmp.path(),
            "ps-controller-battery-aa:bb",
            &[("status", "Discharging"), ("capacity", "45")],
        );

        let report = SysfsSource::with_root(tmp.path()).report(&pad).unwrap();
        assert_eq!(report, BatteryReport::new(ChargeStatus::Discharging, Some(45.0), Some(100.0)));
        assert_eq!(report.charge_percentage(), Some(45));
    }

    #[test]
    fn prefers_energy_over_capacity() {
        let tmp = TempDir::new().unwrap();
        let pad = supply(
            tmp.path(),
            "xpadneo-01",
            &[
                ("status", "Charging"),
                ("energy_now", "1500000"),
                ("energy_full", "2000000"),
                ("capacity", "10"),
            ],
        );

        let report = SysfsSource::with_root(tmp.path()).report(&pad).unwrap();
        assert_eq!(report.status, ChargeStatus::Charging);
        assert_eq!(report.charge_percentage(), Some(75));
    }

    #[test]
    fn maps_status_strings() {
        assert_eq!(parse_status("Not charging"), ChargeStatus::Idle);
        assert_eq!(parse_status("Full"), ChargeStatus::Idle);
        assert_eq!(parse_status("Unknown"), ChargeStatus::Unknown);
        assert_eq!(parse_status("whatever"), ChargeStatus::Unknown);
    }

    #[test]
    fn absent_battery_is_not_present() {
        let tmp = TempDir::new().unwrap();
        let pad = supply(tmp.path(), "wiimote_battery_1", &[("present", "0")]);

        let report = SysfsSource::with_root(tmp.path()).report(&pad).unwrap();
        assert_eq!(report.status, ChargeStatus::NotPresent);
    }

    #[test]
    fn no_capacity_attributes_is_indeterminate() {
        let tmp = TempDir::new().unwrap();
        let pad = supply(tmp.path(), "steam-controller", &[("status", "Discharging")]);

        let report = SysfsSource::with_root(tmp.path()).report(&pad).unwrap();
        assert_eq!(report.charge_percentage(), None);
    }

    #[test]
    fn vanished_device_is_disconnected() {
        let tmp = TempDir::new().unwrap();
        let pad = supply(tmp.path(), "xpadneo-01", &[("status", "Discharging")]);
        fs::remove_dir_all(&pad).unwrap();

        let err = SysfsSource::with_root(tmp.path()).report(&pad).unwrap_err();
        assert!(matches!(err, TelemetryError::Disconnected(name) if name == "xpadneo-01"));
    }
}

use std::fmt;

use crate::{DANGER_LEVEL, NO_BATTERY_TEXT, UNKNOWN_TEXT};

/// Power state reported for a controller battery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChargeStatus {
    NotPresent,
    Discharging,
    Idle,
    Charging,
    Unknown,
}

/// Raw battery telemetry for one controller, as read from a telemetry source.
#[derive(Clone, Debug, PartialEq)]
pub struct BatteryReport {
    pub status: ChargeStatus,
    pub remaining_capacity: Option<f64>,
    pub full_capacity: Option<f64>,
}

impl BatteryReport {
    pub fn new(
        status: ChargeStatus,
        remaining_capacity: Option<f64>,
        full_capacity: Option<f64>,
    ) -> Self {
        Self {
            status,
            remaining_capacity,
            full_capacity,
        }
    }

    pub fn charge_percentage(&self) -> Option<u8> {
        estimate_charge_percentage(self.remaining_capacity, self.full_capacity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconCategory {
    Disconnected,
    Empty,
    Low,
    Used,
    Full,
    Charging,
    Unknown,
    NoGamepadBattery,
}

impl IconCategory {
    pub const ALL: [IconCategory; 8] = [
        IconCategory::Disconnected,
        IconCategory::Empty,
        IconCategory::Low,
        IconCategory::Used,
        IconCategory::Full,
        IconCategory::Charging,
        IconCategory::Unknown,
        IconCategory::NoGamepadBattery,
    ];
}

/// Icon and tooltip text the indicator shows for the current tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub icon: IconCategory,
    pub text: String,
}

impl DisplayState {
    pub fn new(icon: IconCategory, text: impl Into<String>) -> Self {
        Self {
            icon,
            text: text.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(IconCategory::Unknown, UNKNOWN_TEXT)
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.text, self.icon)
    }
}

/// Converts remaining/full capacity into a whole percentage.
///
/// Returns `None` when either value is missing, when `full` is not strictly
/// positive, or when either value is negative or not finite. Ties round to
/// even and anything above a full charge clamps to 100.
pub fn estimate_charge_percentage(remaining: Option<f64>, full: Option<f64>) -> Option<u8> {
    let (remaining, full) = (remaining?, full?);
    if !remaining.is_finite() || !full.is_finite() || remaining < 0.0 || full <= 0.0 {
        return None;
    }

    let percentage = (remaining / full * 100.0).round_ties_even();
    Some(percentage.min(100.0) as u8)
}

pub fn icon_for_level(percentage: u8) -> IconCategory {
    match percentage {
        p if p > 66 => IconCategory::Full,
        p if p > 33 => IconCategory::Used,
        p if p > DANGER_LEVEL => IconCategory::Low,
        _ => IconCategory::Empty,
    }
}

pub fn classify(status: ChargeStatus, percentage: Option<u8>) -> DisplayState {
    let Some(percentage) = percentage else {
        return DisplayState::unknown();
    };

    match status {
        ChargeStatus::NotPresent => {
            DisplayState::new(IconCategory::NoGamepadBattery, NO_BATTERY_TEXT)
        }
        ChargeStatus::Discharging | ChargeStatus::Idle => DisplayState::new(
            icon_for_level(percentage),
            format!("Gamepad battery: {percentage}%"),
        ),
        ChargeStatus::Charging => DisplayState::new(
            IconCategory::Charging,
            format!("Gamepad charging: {percentage}%"),
        ),
        ChargeStatus::Unknown => DisplayState::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUSES: [ChargeStatus; 5] = [
        ChargeStatus::NotPresent,
        ChargeStatus::Discharging,
        ChargeStatus::Idle,
        ChargeStatus::Charging,
        ChargeStatus::Unknown,
    ];

    #[test]
    fn estimate_requires_both_capacities() {
        assert_eq!(estimate_charge_percentage(None, Some(100.0)), None);
        assert_eq!(estimate_charge_percentage(Some(50.0), None), None);
        assert_eq!(estimate_charge_percentage(None, None), None);
    }

    #[test]
    fn estimate_scales_and_rounds() {
        assert_eq!(estimate_charge_percentage(Some(10.0), Some(100.0)), Some(10));
        assert_eq!(estimate_charge_percentage(Some(0.0), Some(100.0)), Some(0));
        assert_eq!(estimate_charge_percentage(Some(100.0), Some(100.0)), Some(100));
        assert_eq!(estimate_charge_percentage(Some(1.0), Some(3.0)), Some(33));
        assert_eq!(estimate_charge_percentage(Some(2.0), Some(3.0)), Some(67));
        assert_eq!(estimate_charge_percentage(Some(27_340.0), Some(41_200.0)), Some(66));
    }

    #[test]
    fn estimate_ties_round_to_even() {
        // 1/8 = 12.5%, 3/8 = 37.5%
        assert_eq!(estimate_charge_percentage(Some(1.0), Some(8.0)), Some(12));
        assert_eq!(estimate_charge_percentage(Some(3.0), Some(8.0)), Some(38));
    }

    #[test]
    fn estimate_rejects_malformed_capacity() {
        assert_eq!(estimate_charge_percentage(Some(10.0), Some(0.0)), None);
        assert_eq!(estimate_charge_percentage(Some(10.0), Some(-5.0)), None);
        assert_eq!(estimate_charge_percentage(Some(-1.0), Some(100.0)), None);
        assert_eq!(estimate_charge_percentage(Some(f64::NAN), Some(100.0)), None);
        assert_eq!(estimate_charge_percentage(Some(1.0), Some(f64::INFINITY)), None);
    }

    #[test]
    fn estimate_clamps_overfull_battery() {
        assert_eq!(estimate_charge_percentage(Some(130.0), Some(100.0)), Some(100));
    }

    #[test]
    fn icon_thresholds() {
        assert_eq!(icon_for_level(100), IconCategory::Full);
        assert_eq!(icon_for_level(67), IconCategory::Full);
        assert_eq!(icon_for_level(66), IconCategory::Used);
        assert_eq!(icon_for_level(34), IconCategory::Used);
        assert_eq!(icon_for_level(33), IconCategory::Low);
        assert_eq!(icon_for_level(6), IconCategory::Low);
        assert_eq!(icon_for_level(5), IconCategory::Empty);
        assert_eq!(icon_for_level(0), IconCategory::Empty);
    }

    #[test]
    fn classify_without_percentage_is_unknown_for_every_status() {
        for status in STATUSES {
            assert_eq!(classify(status, None), DisplayState::unknown());
        }
    }

    #[test]
    fn classify_discharging_and_idle_use_level_icons() {
        let state = classify(ChargeStatus::Discharging, Some(10));
        assert_eq!(state.icon, IconCategory::Low);
        assert_eq!(state.text, "Gamepad battery: 10%");

        let state = classify(ChargeStatus::Idle, Some(80));
        assert_eq!(state.icon, IconCategory::Full);
        assert_eq!(state.text, "Gamepad battery: 80%");
    }

    #[test]
    fn classify_charging_ignores_level() {
        let state = classify(ChargeStatus::Charging, Some(3));
        assert_eq!(state.icon, IconCategory::Charging);
        assert_eq!(state.text, "Gamepad charging: 3%");
    }

    #[test]
    fn classify_not_present_and_unknown() {
        assert_eq!(
            classify(ChargeStatus::NotPresent, Some(50)),
            DisplayState::new(IconCategory::NoGamepadBattery, "No gamepad battery found.")
        );
        assert_eq!(classify(ChargeStatus::Unknown, Some(50)), DisplayState::unknown());
    }

    #[test]
    fn classify_is_pure() {
        for status in STATUSES {
            for percentage in [None, Some(0), Some(5), Some(50), Some(100)] {
                assert_eq!(classify(status, percentage), classify(status, percentage));
            }
        }
    }
}

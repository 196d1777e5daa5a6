//! DualSense input report decoding.

use crate::{BatteryReport, ChargeStatus};

pub const VENDOR_ID_SONY: u16 = 0x054C;
pub const PRODUCT_ID_DUALSENSE: u16 = 0x0CE6;
pub const PRODUCT_ID_DUALSENSE_EDGE: u16 = 0x0DF2;

// USB reports carry the status byte one position earlier than Bluetooth ones.
const STATUS_OFFSET_USB: usize = 53;
const STATUS_OFFSET_BLUETOOTH: usize = 54;

pub fn is_dualsense(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == VENDOR_ID_SONY
        && (product_id == PRODUCT_ID_DUALSENSE || product_id == PRODUCT_ID_DUALSENSE_EDGE)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DualSenseBattery {
    pub battery_capacity: u8,
    pub charging_status: ChargeStatus,
}

impl From<DualSenseBattery> for BatteryReport {
    fn from(battery: DualSenseBattery) -> Self {
        BatteryReport::new(
            battery.charging_status,
            Some(f64::from(battery.battery_capacity)),
            Some(100.0),
        )
    }
}

/// Decodes the battery byte of a full input report.
///
/// Returns `None` for reports too short to carry it, such as the reduced
/// Bluetooth report sent before the controller switches to full mode.
pub fn parse_battery(report: &[u8], is_bluetooth: bool) -> Option<DualSenseBattery> {
    let offset = if is_bluetooth {
        STATUS_OFFSET_BLUETOOTH
    } else {
        STATUS_OFFSET_USB
    };
    let status_byte = *report.get(offset)?;

    let battery_data = status_byte & 0x0F; // 0-10
    let charging_bits = (status_byte & 0xF0) >> 4;

    let battery_capacity = (battery_data * 10 + 5).min(100);

    let charging_status = match charging_bits {
        0x0 => ChargeStatus::Discharging,
        0x1 => ChargeStatus::Charging,
        0x2 => ChargeStatus::Idle,
        // 0xA/0xB: voltage or temperature out of range, 0xF: charging error
        _ => ChargeStatus::Unknown,
    };

    Some(DualSenseBattery {
        battery_capacity,
        charging_status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_status(offset: usize, status: u8) -> [u8; 64] {
        let mut buf = [0u8; 64];
        buf[offset] = status;
        buf
    }

    #[test]
    fn usb_discharging() {
        let buf = report_with_status(53, 0x04);
        let battery = parse_battery(&buf, false).unwrap();
        assert_eq!(battery.battery_capacity, 45);
        assert_eq!(battery.charging_status, ChargeStatus::Discharging);
    }

    #[test]
    fn bluetooth_uses_later_offset() {
        let buf = report_with_status(54, 0x12);
        let battery = parse_battery(&buf, true).unwrap();
        assert_eq!(battery.battery_capacity, 25);
        assert_eq!(battery.charging_status, ChargeStatus::Charging);
    }

    #[test]
    fn full_level_caps_at_hundred() {
        let buf = report_with_status(53, 0x2A);
        let battery = parse_battery(&buf, false).unwrap();
        assert_eq!(battery.battery_capacity, 100);
        assert_eq!(battery.charging_status, ChargeStatus::Idle);
    }

    #[test]
    fn error_nibbles_are_unknown() {
        for status in [0xA3, 0xB3, 0xF3] {
            let buf = report_with_status(53, status);
            assert_eq!(
                parse_battery(&buf, false).unwrap().charging_status,
                ChargeStatus::Unknown
            );
        }
    }

    #[test]
    fn short_report_is_rejected() {
        assert_eq!(parse_battery(&[0u8; 10], true), None);
        assert_eq!(parse_battery(&[0u8; 54], true), None);
        assert!(parse_battery(&[0u8; 54], false).is_some());
    }

    #[test]
    fn converts_to_battery_report() {
        let report: BatteryReport = DualSenseBattery {
            battery_capacity: 5,
            charging_status: ChargeStatus::Discharging,
        }
        .into();
        assert_eq!(report.charge_percentage(), Some(5));
    }

    #[test]
    fn recognises_dualsense_ids() {
        assert!(is_dualsense(0x054C, 0x0CE6));
        assert!(is_dualsense(0x054C, 0x0DF2));
        assert!(!is_dualsense(0x054C, 0x09CC));
        assert!(!is_dualsense(0x045E, 0x0CE6));
    }
}

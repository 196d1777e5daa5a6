//! Samples the battery of connected game controllers and turns each sample into
//! an indicator state plus an edge-triggered low-battery alert.

use std::time::Duration;

pub mod alert;
pub mod battery;
pub mod dualsense;
pub mod error;
pub mod glyph;
pub mod indicator;
pub mod instance;
pub mod monitor;
pub mod sound;
pub mod telemetry;

pub use alert::AlertEdge;
pub use battery::{
    BatteryReport, ChargeStatus, DisplayState, IconCategory, classify,
    estimate_charge_percentage, icon_for_level,
};
pub use error::TelemetryError;
pub use indicator::Indicator;
pub use monitor::{BatteryMonitor, DeviceSample, TickOutcome, evaluate_tick};
pub use sound::AlertSound;
pub use telemetry::TelemetrySource;

// --- Constants ---
/// Percentage at or below which the low-battery alert is eligible to fire.
pub const DANGER_LEVEL: u8 = 5;
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(5);
pub const INSTANCE_NAME: &str = "GamepadBattery";

pub const UNKNOWN_TEXT: &str = "Unknown gamepad battery status.";
pub const NO_GAMEPAD_TEXT: &str = "No gamepad found.";
pub const NO_BATTERY_TEXT: &str = "No gamepad battery found.";

// Window message plumbing for the Windows tray driver.
pub const WM_APP_TRAYMSG: u32 = 0x8000 + 1; // WM_APP + 1
pub const TIMER_ID_POLL: usize = 1;
pub const IDM_EXIT: u16 = 1001;

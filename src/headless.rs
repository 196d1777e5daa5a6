//! Poll loop for hosts without a Windows notification area.

use std::thread;

use gamepad_battery::{
    BatteryMonitor, UPDATE_INTERVAL, indicator::LogIndicator, sound::TerminalBell,
    telemetry::sysfs::SysfsSource,
};

/// Evaluates immediately, then every `UPDATE_INTERVAL` until the process is killed.
pub fn run() -> anyhow::Result<()> {
    let mut monitor = BatteryMonitor::new(SysfsSource::new(), LogIndicator::new(), TerminalBell);
    tracing::info!(interval = ?UPDATE_INTERVAL, "monitoring gamepad batteries");

    loop {
        monitor.tick();
        thread::sleep(UPDATE_INTERVAL);
    }
}

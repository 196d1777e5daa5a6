// No console window in release builds on Windows.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(not(windows))]
mod headless;
#[cfg(windows)]
mod tray;
#[cfg(windows)]
mod window;
#[cfg(windows)]
mod window_creator;
#[cfg(windows)]
mod window_message_handler;

use anyhow::Context;
use gamepad_battery::{INSTANCE_NAME, instance};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(_instance) =
        instance::acquire(INSTANCE_NAME).context("failed to claim the single-instance lock")?
    else {
        tracing::info!("another instance is already running");
        return Ok(());
    };

    run()
}

#[cfg(not(windows))]
fn run() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(windows)]
fn run() -> anyhow::Result<()> {
    use gamepad_battery::{
        BatteryMonitor, WM_APP_TRAYMSG,
        sound::SystemAlertSound,
        telemetry::{Chain, gaming_input::GamingInputSource, hid::HidSource},
    };
    use windows::{
        Win32::{
            Foundation::HINSTANCE, System::LibraryLoader::GetModuleHandleW,
            UI::WindowsAndMessaging::RegisterWindowMessageW,
        },
        core::w,
    };

    let hinstance: HINSTANCE = unsafe { GetModuleHandleW(None) }
        .context("failed to get module handle")?
        .into();

    let (hwnd, window_creator) =
        window::create_monitor_window(hinstance).context("failed to create monitor window")?;
    let tray = tray::TrayIcon::add(hwnd, WM_APP_TRAYMSG).context("failed to add tray icon")?;
    let taskbar_created_msg = unsafe { RegisterWindowMessageW(w!("TaskbarCreated")) };
    if taskbar_created_msg == 0 {
        tracing::warn!("TaskbarCreated not registered, tray icon is lost on Explorer restart");
    }

    let hid = match HidSource::new() {
        Ok(source) => Some(source),
        Err(e) => {
            tracing::warn!(error = %e, "HID unavailable, DualSense controllers will not be seen");
            None
        }
    };
    let source = Chain::new(GamingInputSource::new(), hid);

    let mut app_state = Box::new(window::AppState {
        hwnd,
        taskbar_created_msg,
        monitor: BatteryMonitor::new(source, tray, SystemAlertSound),
    });
    window_creator.associate_appstate_with_hwnd(hwnd, &mut app_state);

    app_state.monitor.tick();
    window::start_poll_timer(app_state.hwnd).context("failed to start poll timer")?;

    window::run_message_loop().context("message loop failed")?;
    tracing::info!("exiting");
    Ok(())
}

use crate::{tray::TrayIcon, window_creator::WindowCreator, window_message_handler};
use gamepad_battery::{
    BatteryMonitor, TIMER_ID_POLL, UPDATE_INTERVAL,
    sound::SystemAlertSound,
    telemetry::{Chain, gaming_input::GamingInputSource, hid::HidSource},
};
use windows::{
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM},
        UI::WindowsAndMessaging::{
            DefWindowProcW, DispatchMessageW, GWLP_USERDATA, GetMessageW, GetWindowLongPtrW, MSG,
            SetTimer, TranslateMessage,
        },
    },
    core::{BOOL, Error, HRESULT, Result},
};

pub type Monitor =
    BatteryMonitor<Chain<GamingInputSource, Option<HidSource>>, TrayIcon, SystemAlertSound>;

pub struct AppState {
    pub hwnd: HWND,
    /// `TaskbarCreated` message id, broadcast when Explorer (re)starts.
    pub taskbar_created_msg: u32,
    pub monitor: Monitor,
}

pub fn create_monitor_window(hinstance: HINSTANCE) -> Result<(HWND, WindowCreator)> {
    let window_creator = WindowCreator::new(hinstance);
    let hwnd = window_creator.create_monitor_window()?;
    Ok((hwnd, window_creator))
}

pub fn start_poll_timer(hwnd: HWND) -> Result<()> {
    let timer_id = unsafe {
        SetTimer(
            Some(hwnd),
            TIMER_ID_POLL,
            UPDATE_INTERVAL.as_millis() as u32,
            None,
        )
    };
    if timer_id == 0 {
        return Err(Error::from_win32());
    }
    tracing::debug!(timer_id, interval = ?UPDATE_INTERVAL, "poll timer started");
    Ok(())
}

/// Pumps messages until `WM_QUIT`.
pub fn run_message_loop() -> Result<()> {
    let mut msg = MSG::default();
    loop {
        // GetMessageW waits for a message
        let result: BOOL = unsafe { GetMessageW(&mut msg, None, 0, 0) };

        match result.0 {
            -1 => {
                let error = unsafe { GetLastError() };
                return Err(Error::new(HRESULT::from(error), "GetMessageW error"));
            }
            0 => return Ok(()),
            _ => unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            },
        }
    }
}

pub unsafe extern "system" fn wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let app_state_ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) };

    if app_state_ptr != 0 {
        let app_state = unsafe { &mut *(app_state_ptr as *mut AppState) };

        if let Some(result) =
            window_message_handler::handle_message(hwnd, msg, wparam, lparam, app_state)
        {
            return result;
        }
    }

    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

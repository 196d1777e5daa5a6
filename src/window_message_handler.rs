use crate::{tray, window::AppState};
use gamepad_battery::{IDM_EXIT, TIMER_ID_POLL, WM_APP_TRAYMSG};
use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    UI::WindowsAndMessaging::{
        DestroyWindow, KillTimer, PostQuitMessage, WM_COMMAND, WM_CONTEXTMENU, WM_DESTROY,
        WM_RBUTTONUP, WM_TIMER,
    },
};

pub fn handle_message(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    app_state: &mut AppState,
) -> Option<LRESULT> {
    match msg {
        WM_TIMER => handle_timer_message(wparam, app_state),
        WM_COMMAND => handle_command_message(hwnd, wparam),
        WM_APP_TRAYMSG => handle_tray_message(hwnd, lparam),
        WM_DESTROY => handle_destroy_message(hwnd),
        m if m != 0 && m == app_state.taskbar_created_msg => handle_taskbar_created(app_state),
        _ => None,
    }
}

fn handle_timer_message(wparam: WPARAM, app_state: &mut AppState) -> Option<LRESULT> {
    if wparam.0 == TIMER_ID_POLL {
        app_state.monitor.tick();
        Some(LRESULT(0))
    } else {
        None
    }
}

fn handle_command_message(hwnd: HWND, wparam: WPARAM) -> Option<LRESULT> {
    let menu_id = (wparam.0 & 0xFFFF) as u16;
    match menu_id {
        IDM_EXIT => {
            tracing::info!("exit requested from tray menu");
            unsafe {
                let _ = DestroyWindow(hwnd);
            };
            Some(LRESULT(0))
        }
        _ => None,
    }
}

fn handle_tray_message(hwnd: HWND, lparam: LPARAM) -> Option<LRESULT> {
    let mouse_msg = (lparam.0 & 0xFFFF) as u32;
    if mouse_msg == WM_RBUTTONUP || mouse_msg == WM_CONTEXTMENU {
        if let Err(e) = tray::show_context_menu(hwnd) {
            tracing::warn!(error = %e, "failed to show context menu");
        }
        Some(LRESULT(0))
    } else {
        None
    }
}

fn handle_taskbar_created(app_state: &mut AppState) -> Option<LRESULT> {
    app_state.monitor.indicator_mut().restore();
    Some(LRESULT(0))
}

fn handle_destroy_message(hwnd: HWND) -> Option<LRESULT> {
    tracing::debug!("monitor window destroyed, shutting down");
    unsafe {
        let _ = KillTimer(Some(hwnd), TIMER_ID_POLL);
        PostQuitMessage(0);
    };
    Some(LRESULT(0))
}

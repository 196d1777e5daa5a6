use crate::window::{AppState, wndproc};
use windows::{
    Win32::{
        Foundation::{HINSTANCE, HWND},
        UI::WindowsAndMessaging::{
            CreateWindowExW, GWLP_USERDATA, RegisterClassExW, SetWindowLongPtrW, WNDCLASSEXW,
            WS_EX_TOOLWINDOW, WS_POPUP,
        },
    },
    core::{Error, PCWSTR, w},
};

const MONITOR_WINDOW_CLASS_NAME: PCWSTR = w!("gamepad_battery_window_class");

/// Creates the never-shown window that owns the tray icon and the poll timer.
pub struct WindowCreator {
    hinstance: HINSTANCE,
}

impl WindowCreator {
    pub fn new(hinstance: HINSTANCE) -> Self {
        Self { hinstance }
    }

    pub fn create_monitor_window(&self) -> Result<HWND, Error> {
        self.register_window_class()?;
        self.create_window_instance()
    }

    fn register_window_class(&self) -> Result<u16, Error> {
        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            hInstance: self.hinstance,
            lpszClassName: MONITOR_WINDOW_CLASS_NAME,
            lpfnWndProc: Some(wndproc),
            ..Default::default()
        };

        let atom = unsafe { RegisterClassExW(&wc) };
        if atom == 0 {
            Err(Error::from_win32())
        } else {
            Ok(atom)
        }
    }

    fn create_window_instance(&self) -> Result<HWND, Error> {
        unsafe {
            CreateWindowExW(
                WS_EX_TOOLWINDOW,
                MONITOR_WINDOW_CLASS_NAME,
                w!("Gamepad battery"),
                WS_POPUP,
                0,
                0,
                0,
                0,
                None,
                None,
                Some(self.hinstance),
                None,
            )
        }
    }

    pub fn associate_appstate_with_hwnd(&self, hwnd: HWND, app_state: &mut AppState) {
        unsafe {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, app_state as *mut _ as isize);
        }
    }
}

//! Notification-area icon showing the current battery state.

use std::collections::HashMap;

use windows::{
    Win32::{
        Foundation::{HWND, LPARAM, POINT, WPARAM},
        Graphics::Gdi::{CreateBitmap, DeleteObject},
        UI::{
            Shell::{
                NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NIM_MODIFY, NIM_SETVERSION,
                NOTIFYICONDATAW, Shell_NotifyIconW,
            },
            WindowsAndMessaging::{
                AppendMenuW, CreateIconIndirect, CreatePopupMenu, DestroyIcon, DestroyMenu,
                GetCursorPos, HICON, HMENU, ICONINFO, MF_STRING, PostMessageW, SetForegroundWindow,
                TPM_LEFTALIGN, TPM_RETURNCMD, TPM_RIGHTBUTTON, TrackPopupMenu, WM_COMMAND,
            },
        },
    },
    core::{Error, w},
};

use gamepad_battery::{IDM_EXIT, IconCategory, Indicator, glyph, indicator::ShownState};

const TRAY_ICON_ID: u32 = 1;
const DEFAULT_TIP: &str = "Gamepad battery";

pub struct TrayIcon {
    hwnd: HWND,
    callback_message_id: u32,
    icons: HashMap<IconCategory, HICON>,
    shown: ShownState,
}

impl TrayIcon {
    /// Adds the icon to the notification area, initially showing `Disconnected`.
    pub fn add(hwnd: HWND, callback_message_id: u32) -> Result<Self, Error> {
        let mut icons = HashMap::new();
        for category in IconCategory::ALL {
            icons.insert(category, create_glyph_icon(category)?);
        }

        let mut tray = Self {
            hwnd,
            callback_message_id,
            icons,
            shown: ShownState::default(),
        };
        tray.register(IconCategory::Disconnected, DEFAULT_TIP.to_string())?;
        Ok(tray)
    }

    /// Adds the icon again after Explorer restarted, keeping what it last showed.
    pub fn restore(&mut self) {
        let icon = self.shown.icon().unwrap_or(IconCategory::Disconnected);
        let text = self.shown.text().unwrap_or(DEFAULT_TIP).to_string();

        match self.register(icon, text) {
            Ok(()) => tracing::info!(?icon, "tray icon restored after taskbar restart"),
            Err(e) => tracing::warn!(error = %e, "failed to restore tray icon"),
        }
    }

    /// Removes the icon from the notification area. Does nothing once removed.
    pub fn remove(&mut self) {
        if !self.shown.is_registered() {
            return;
        }
        self.shown.clear();

        let nid = notify_data(self.hwnd);
        if !unsafe { Shell_NotifyIconW(NIM_DELETE, &nid).as_bool() } {
            tracing::warn!(error = %Error::from_win32(), "Shell_NotifyIconW(NIM_DELETE) failed");
        }
    }

    fn register(&mut self, icon: IconCategory, text: String) -> Result<(), Error> {
        let mut nid = notify_data(self.hwnd);
        nid.uFlags = NIF_MESSAGE | NIF_ICON | NIF_TIP;
        nid.uCallbackMessage = self.callback_message_id;
        nid.hIcon = self.icons[&icon];
        copy_tooltip(&mut nid, &text);

        if !unsafe { Shell_NotifyIconW(NIM_ADD, &nid).as_bool() } {
            return Err(Error::from_win32());
        }
        self.shown = ShownState::registered(icon, text);

        if !unsafe { Shell_NotifyIconW(NIM_SETVERSION, &nid).as_bool() } {
            let version_error = Error::from_win32();
            self.remove();
            return Err(version_error);
        }

        Ok(())
    }
}

fn notify_data(hwnd: HWND) -> NOTIFYICONDATAW {
    NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ICON_ID,
        ..Default::default()
    }
}

fn modify(nid: &NOTIFYICONDATAW) -> bool {
    let modified = unsafe { Shell_NotifyIconW(NIM_MODIFY, nid).as_bool() };
    if !modified {
        tracing::warn!(error = %Error::from_win32(), "Shell_NotifyIconW(NIM_MODIFY) failed");
    }
    modified
}

impl Indicator for TrayIcon {
    fn set_icon(&mut self, icon: IconCategory) {
        let mut nid = notify_data(self.hwnd);
        nid.uFlags = NIF_ICON;
        nid.hIcon = self.icons[&icon];
        self.shown.update_icon(icon, || modify(&nid));
    }

    fn set_text(&mut self, text: &str) {
        let mut nid = notify_data(self.hwnd);
        nid.uFlags = NIF_TIP;
        copy_tooltip(&mut nid, text);
        self.shown.update_text(text, || modify(&nid));
    }
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        self.remove();
        for (_, icon) in self.icons.drain() {
            let _ = unsafe { DestroyIcon(icon) };
        }
    }
}

fn copy_tooltip(nid: &mut NOTIFYICONDATAW, text: &str) {
    let wide_chars = text.encode_utf16().collect::<Vec<_>>();
    let len_to_copy = std::cmp::min(wide_chars.len(), nid.szTip.len() - 1);
    nid.szTip[..len_to_copy].copy_from_slice(&wide_chars[..len_to_copy]);
    nid.szTip[len_to_copy] = 0;
}

fn create_glyph_icon(category: IconCategory) -> Result<HICON, Error> {
    let pixels = glyph::render(category);
    let size = glyph::SIZE as i32;
    // 1bpp mask, rows padded to 16 bits; the colour bitmap's alpha does the masking.
    let mask_bits = vec![0u8; glyph::SIZE * 2];

    unsafe {
        let hbm_color = CreateBitmap(size, size, 1, 32, Some(pixels.as_ptr().cast()));
        let hbm_mask = CreateBitmap(size, size, 1, 1, Some(mask_bits.as_ptr().cast()));

        let info = ICONINFO {
            fIcon: true.into(),
            xHotspot: 0,
            yHotspot: 0,
            hbmMask: hbm_mask,
            hbmColor: hbm_color,
        };
        let icon = CreateIconIndirect(&info);

        let _ = DeleteObject(hbm_color.into());
        let _ = DeleteObject(hbm_mask.into());
        icon
    }
}

pub fn show_context_menu(hwnd: HWND) -> Result<(), Error> {
    unsafe {
        let hmenu = CreatePopupMenu()?;

        struct MenuGuard(HMENU);
        impl Drop for MenuGuard {
            fn drop(&mut self) {
                if !self.0.is_invalid() {
                    let _ = unsafe { DestroyMenu(self.0) };
                }
            }
        }
        let _guard = MenuGuard(hmenu);

        AppendMenuW(hmenu, MF_STRING, IDM_EXIT as usize, w!("Exit"))?;

        let mut point = POINT::default();
        GetCursorPos(&mut point)?;

        // Without this the menu does not close when clicking elsewhere.
        let _ = SetForegroundWindow(hwnd);

        let selected_cmd = TrackPopupMenu(
            hmenu,
            TPM_LEFTALIGN | TPM_RIGHTBUTTON | TPM_RETURNCMD,
            point.x,
            point.y,
            Some(0),
            hwnd,
            None,
        );

        if selected_cmd.0 != 0 {
            PostMessageW(
                Some(hwnd),
                WM_COMMAND,
                WPARAM(selected_cmd.0 as usize),
                LPARAM(0),
            )?;
        }
    }
    Ok(())
}

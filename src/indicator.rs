use crate::{DisplayState, IconCategory};

/// The persistent status widget: an icon plus a line of hover text.
pub trait Indicator {
    fn set_icon(&mut self, icon: IconCategory);
    fn set_text(&mut self, text: &str);
}

/// Indicator for hosts without a notification area; logs each change once.
#[derive(Debug, Default)]
pub struct LogIndicator {
    icon: Option<IconCategory>,
    text: String,
    shown: Option<DisplayState>,
}

impl LogIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last state that was logged.
    pub fn shown(&self) -> Option<&DisplayState> {
        self.shown.as_ref()
    }

    fn flush(&mut self) {
        let Some(icon) = self.icon else {
            return;
        };
        let current = DisplayState::new(icon, self.text.clone());
        if self.shown.as_ref() != Some(&current) {
            tracing::info!(icon = ?current.icon, "{}", current.text);
            self.shown = Some(current);
        }
    }
}

impl Indicator for LogIndicator {
    fn set_icon(&mut self, icon: IconCategory) {
        self.icon = Some(icon);
    }

    // The monitor sets the icon first, so the text completes a state.
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.flush();
    }
}

/// What a notification-area icon is known to display.
///
/// Values change only after the shell accepted them, so a rejected update is
/// retried on the next tick. Cleared once the icon is removed from the shell.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShownState {
    icon: Option<IconCategory>,
    text: Option<String>,
}

impl ShownState {
    /// State right after a successful registration with `icon` and `text`.
    pub fn registered(icon: IconCategory, text: impl Into<String>) -> Self {
        Self {
            icon: Some(icon),
            text: Some(text.into()),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.icon.is_some()
    }

    pub fn icon(&self) -> Option<IconCategory> {
        self.icon
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn clear(&mut self) {
        self.icon = None;
        self.text = None;
    }

    /// Runs `apply` unless `icon` is already shown. Returns true when `apply` ran and succeeded.
    pub fn update_icon(&mut self, icon: IconCategory, apply: impl FnOnce() -> bool) -> bool {
        if !self.is_registered() || self.icon == Some(icon) {
            return false;
        }
        let applied = apply();
        if applied {
            self.icon = Some(icon);
        }
        applied
    }

    /// Runs `apply` unless `text` is already shown. Returns true when `apply` ran and succeeded.
    pub fn update_text(&mut self, text: &str, apply: impl FnOnce() -> bool) -> bool {
        if !self.is_registered() || self.text.as_deref() == Some(text) {
            return false;
        }
        let applied = apply();
        if applied {
            self.text = Some(text.to_string());
        }
        applied
    }
}

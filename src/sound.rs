/// One-shot low-battery cue.
pub trait AlertSound {
    /// Starts the cue without blocking. Must not overlap a cue that is still playing.
    fn play_once(&mut self);
}

#[cfg(windows)]
pub use self::windows_sound::SystemAlertSound;

#[cfg(windows)]
mod windows_sound {
    use windows::{
        Win32::Media::Audio::{PlaySoundW, SND_ALIAS, SND_ASYNC, SND_NOSTOP},
        core::w,
    };

    use super::AlertSound;

    /// Plays the user's "Exclamation" system sound.
    #[derive(Debug, Default)]
    pub struct SystemAlertSound;

    impl AlertSound for SystemAlertSound {
        fn play_once(&mut self) {
            let flags = SND_ALIAS | SND_ASYNC | SND_NOSTOP;
            let started = unsafe { PlaySoundW(w!("SystemExclamation"), None, flags) };
            if !started.as_bool() {
                tracing::debug!("alert sound not started, a sound is already playing");
            }
        }
    }
}

/// Rings the terminal bell on stderr.
#[cfg(not(windows))]
#[derive(Debug, Default)]
pub struct TerminalBell;

#[cfg(not(windows))]
impl AlertSound for TerminalBell {
    fn play_once(&mut self) {
        use std::io::Write;

        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            tracing::debug!(error = %e, "failed to ring terminal bell");
        }
    }
}

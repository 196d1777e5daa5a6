use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no battery data available for {0}")]
    NoBatteryData(String),

    #[error("device {0} is no longer connected")]
    Disconnected(String),

    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[cfg(windows)]
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),
}

impl TelemetryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TelemetryError::Io {
            path: path.into(),
            source,
        }
    }
}

use kp_core::ports::UiPort;
use tauri::{AppHandle, Manager};
use tracing::{info, warn};

/// Tauri-specific runtime adapter for UI operations.
///
/// This adapter must only be constructed inside Tauri setup phase
/// and must not be used outside kp-tauri.
pub struct TauriUiPort {
    app: AppHandle,
    settings_window_label: String,
}

impl TauriUiPort {
    pub(crate) fn new(app: AppHandle, settings_window_label: impl Into<String>) -> Self {
        Self {
            app,
            settings_window_label: settings_window_label.into(),
        }
    }
}

impl UiPort for TauriUiPort {
    fn close_settings(&self) {
        let Some(window) = self.app.get_webview_window(&self.settings_window_label) else {
            return;
        };
        if let Err(err) = window.close() {
            warn!(error = %err, "close settings window failed");
        }
    }

    fn exit(&self) {
        info!("exiting kiosk player");
        self.app.exit(0);
    }
}

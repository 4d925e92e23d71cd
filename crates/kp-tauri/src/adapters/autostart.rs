use anyhow::Result;
use kp_core::ports::AutostartPort;
use tauri::AppHandle;
use tauri_plugin_autostart::ManagerExt as _;

/// Login-item registration through `tauri-plugin-autostart`.
///
/// This adapter must only be constructed inside Tauri setup phase,
/// after the autostart plugin is registered.
pub struct TauriAutostart {
    app_handle: AppHandle,
}

impl TauriAutostart {
    pub(crate) fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl AutostartPort for TauriAutostart {
    fn is_enabled(&self) -> Result<bool> {
        self.app_handle
            .autolaunch()
            .is_enabled()
            .map_err(anyhow::Error::from)
    }

    fn enable(&self) -> Result<()> {
        self.app_handle.autolaunch().enable()?;
        Ok(())
    }

    fn disable(&self) -> Result<()> {
        self.app_handle.autolaunch().disable()?;
        Ok(())
    }
}

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};
use tracing::debug;

pub const SETTINGS_WINDOW_LABEL: &str = "settings";

const SETTINGS_PAGE: &str = "settings.html";
const SETTINGS_WIDTH: f64 = 520.0;
const SETTINGS_HEIGHT: f64 = 560.0;

/// Open the settings window, or bring the existing one to the front.
///
/// 打开设置窗口；若已存在则聚焦。
pub fn open_settings_window(app: &AppHandle) -> tauri::Result<()> {
    if let Some(window) = app.get_webview_window(SETTINGS_WINDOW_LABEL) {
        debug!("settings window already open, focusing");
        window.show()?;
        window.unminimize()?;
        window.set_focus()?;
        return Ok(());
    }

    // The kiosk window is always on top; the settings window has to be too.
    WebviewWindowBuilder::new(app, SETTINGS_WINDOW_LABEL, WebviewUrl::App(SETTINGS_PAGE.into()))
        .title("Kiosk Player Settings")
        .inner_size(SETTINGS_WIDTH, SETTINGS_HEIGHT)
        .resizable(false)
        .maximizable(false)
        .decorations(true)
        .always_on_top(true)
        .center()
        .focused(true)
        .build()?;
    Ok(())
}

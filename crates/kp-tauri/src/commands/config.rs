//! Settings commands
//! 设置相关的 Tauri 命令

use kp_app::KioskRuntimeHandle;
use kp_core::config::{ConfigPatch, KioskConfig};
use tauri::{State, WebviewWindow};
use tracing::{info_span, Instrument};

use super::{ensure_caller, map_err};
use crate::settings_window::SETTINGS_WINDOW_LABEL;

/// Current configuration for the settings form.
/// 获取当前配置。
#[tauri::command]
pub async fn get_config(
    window: WebviewWindow,
    runtime: State<'_, KioskRuntimeHandle>,
) -> Result<KioskConfig, String> {
    ensure_caller(window.label(), SETTINGS_WINDOW_LABEL).map_err(map_err)?;
    runtime
        .get_config()
        .instrument(info_span!("command.get_config"))
        .await
        .map_err(|err| map_err(err.into()))
}

/// Merge and persist `config`, then reload the kiosk.
/// 保存配置并重新加载展示内容。
///
/// ## Behavior / 行为
/// - Fields absent from `config` keep their current value
/// - The settings window is closed by the runtime once the change is applied
#[tauri::command]
pub async fn save_config(
    window: WebviewWindow,
    runtime: State<'_, KioskRuntimeHandle>,
    config: ConfigPatch,
) -> Result<KioskConfig, String> {
    ensure_caller(window.label(), SETTINGS_WINDOW_LABEL).map_err(map_err)?;
    runtime
        .save_config(config)
        .instrument(info_span!("command.save_config"))
        .await
        .map_err(|err| map_err(err.into()))
}

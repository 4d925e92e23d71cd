use anyhow::Context;
use kp_app::KioskRuntimeHandle;
use kp_core::display::Direction;
use kp_core::kiosk::KioskEvent;
use tauri::{State, WebviewWindow};

use super::{ensure_caller, map_err};
use crate::window::KIOSK_WINDOW_LABEL;

/// Move the kiosk window to the neighbouring display.
/// 将展示窗口移动到相邻显示器。
#[tauri::command]
pub async fn move_window(
    window: WebviewWindow,
    runtime: State<'_, KioskRuntimeHandle>,
    direction: String,
) -> Result<(), String> {
    ensure_caller(window.label(), KIOSK_WINDOW_LABEL).map_err(map_err)?;
    let direction: Direction = direction
        .parse()
        .context("invalid move direction")
        .map_err(map_err)?;
    runtime
        .send_event(KioskEvent::MoveRequested(direction))
        .await
        .map_err(|err| map_err(err.into()))
}

/// Ask for the local playlist once the page listens for it.
/// 页面订阅完成后请求本地播放列表。
#[tauri::command]
pub async fn request_video_list(
    window: WebviewWindow,
    runtime: State<'_, KioskRuntimeHandle>,
) -> Result<(), String> {
    ensure_caller(window.label(), KIOSK_WINDOW_LABEL).map_err(map_err)?;
    runtime
        .request_videos()
        .await
        .map_err(|err| map_err(err.into()))
}

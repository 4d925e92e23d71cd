use tauri::{AppHandle, WebviewWindow};
use tauri_plugin_dialog::DialogExt;
use tokio::sync::oneshot;
use tracing::debug;

use super::{ensure_caller, map_err};
use crate::settings_window::SETTINGS_WINDOW_LABEL;

/// Native folder picker. Resolves to `None` when the operator cancels.
/// 选择本地视频文件夹；取消时返回 `None`。
#[tauri::command]
pub async fn select_folder(
    app: AppHandle,
    window: WebviewWindow,
) -> Result<Option<String>, String> {
    ensure_caller(window.label(), SETTINGS_WINDOW_LABEL).map_err(map_err)?;

    let (tx, rx) = oneshot::channel();
    app.dialog()
        .file()
        .set_parent(&window)
        .set_title("Select video folder")
        .pick_folder(move |folder| {
            let _ = tx.send(folder);
        });

    let folder = rx
        .await
        .map_err(|_| map_err(anyhow::anyhow!("folder picker closed without a reply")))?;
    let path = folder
        .and_then(|folder| folder.into_path().ok())
        .map(|path| path.to_string_lossy().into_owned());
    debug!(selected = ?path, "folder picker finished");
    Ok(path)
}

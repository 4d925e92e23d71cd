pub mod config;
pub mod dialog;
pub mod error;
pub mod window;

pub use config::{get_config, save_config};
pub use dialog::select_folder;
pub use error::map_err;
pub use window::{move_window, request_video_list};

/// Commands are scoped to one window; any other caller is rejected.
///
/// 命令仅允许指定窗口调用。
pub(crate) fn ensure_caller(label: &str, expected: &str) -> anyhow::Result<()> {
    if label == expected {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "command not available to window '{label}'"
        ))
    }
}

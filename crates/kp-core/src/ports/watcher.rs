use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Receives the rescanned video list once a burst of changes settles.
pub type OnFolderChange = Arc<dyn Fn(Vec<PathBuf>) + Send + Sync>;

/// Keeps a folder subscription alive. Dropping it releases the OS handle
/// and stops any pending debounce.
///
/// 保持目录订阅；drop 时释放系统句柄。
pub trait WatchGuard: Send {
    fn folder(&self) -> &Path;
}

/// Folder change notifications.
///
/// 目录变更通知端口。
///
/// # Behavior / 行为
/// - Non-recursive.
/// - Events are debounced; `on_change` runs once per quiet period.
/// - A folder that does not exist yields `Ok(None)`.
pub trait FolderWatchPort: Send + Sync {
    fn watch(
        &self,
        folder: &Path,
        on_change: OnFolderChange,
    ) -> anyhow::Result<Option<Box<dyn WatchGuard>>>;
}

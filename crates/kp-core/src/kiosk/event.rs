use crate::display::Direction;

/// Why a reload was requested. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadReason {
    Startup,
    ConnectivityRestored,
    Scheduled,
    FolderChanged,
    SettingsSaved,
}

impl ReloadReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadReason::Startup => "startup",
            ReloadReason::ConnectivityRestored => "connectivity_restored",
            ReloadReason::Scheduled => "scheduled",
            ReloadReason::FolderChanged => "folder_changed",
            ReloadReason::SettingsSaved => "settings_saved",
        }
    }
}

/// Events that drive the kiosk lifecycle.
///
/// 驱动展示窗口生命周期的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskEvent {
    /// Window created on its display.
    ///
    /// 窗口已创建并放置。
    WindowPlaced,
    ReloadRequested(ReloadReason),
    /// The page for `generation` finished loading.
    ///
    /// 指定代次的页面加载完成。
    LoadFinished { generation: u64 },
    LoadFailed { generation: u64, reason: String },
    /// The retry timer scheduled for `generation` fired.
    ///
    /// 重试定时器到期。
    RetryElapsed { generation: u64 },
    /// Close gesture on the kiosk window. Always intercepted.
    ///
    /// 用户尝试关闭窗口（总会被拦截）。
    CloseRequested,
    WindowMoved,
    WindowResized,
    MoveRequested(Direction),
    /// Operator quit from the tray.
    ///
    /// 托盘菜单退出。
    QuitRequested,
    WindowDestroyed,
}

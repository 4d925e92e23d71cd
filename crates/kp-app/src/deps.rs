//! # Kiosk Dependencies / 展示依赖
//!
//! Parameter grouping for [`KioskRuntime`](crate::KioskRuntime)
//! construction. Not a builder: every port is required.

use std::sync::Arc;
use kp_core::ports::*;

/// Ports the kiosk runtime drives.
/// 展示运行时使用的端口。
pub struct KioskDeps {
    // Persistence / 持久化
    pub config: Arc<dyn ConfigPort>,

    // Windowing / 窗口
    pub window: Arc<dyn KioskWindowPort>,
    pub ui: Arc<dyn UiPort>,

    // Local content / 本地内容
    pub library: Arc<dyn VideoLibraryPort>,
    pub folder_watch: Arc<dyn FolderWatchPort>,

    // Network / 网络
    pub connectivity_probe: Arc<dyn ConnectivityProbePort>,
    pub content_probe: Arc<dyn ContentProbePort>,

    // System / 系统
    pub autostart: Arc<dyn AutostartPort>,
}

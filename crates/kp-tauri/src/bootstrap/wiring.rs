//! # Dependency wiring / 依赖装配
//!
//! Builds [`KioskDeps`] from the infrastructure adapters in `kp-infra` and
//! the AppHandle-backed adapters in this crate. Only called from the Tauri
//! setup closure.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kp_app::KioskDeps;
use kp_core::ports::*;
use kp_infra::config::resolve_config_path;
use kp_infra::{
    DirsAppDirsAdapter, DnsConnectivityProbe, FileConfigRepository, FsVideoLibrary,
    HttpContentProbe, NotifyFolderWatcher,
};
use tauri::AppHandle;
use tracing::info;

use crate::adapters::{TauriAutostart, TauriUiPort};
use crate::settings_window::SETTINGS_WINDOW_LABEL;
use crate::window::TauriKioskWindow;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Application directory resolution failed: {0}")]
    AppDirs(#[from] AppDirsError),

    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),
}

pub type WiringResult<T> = Result<T, WiringError>;

/// Adapters that need no AppHandle.
/// 不依赖 AppHandle 的基础设施适配器。
struct InfraLayer {
    config: Arc<dyn ConfigPort>,
    library: Arc<dyn VideoLibraryPort>,
    folder_watch: Arc<dyn FolderWatchPort>,
    connectivity_probe: Arc<dyn ConnectivityProbePort>,
    content_probe: Arc<dyn ContentProbePort>,
}

fn create_infra_layer(config_path: &Path) -> WiringResult<InfraLayer> {
    let library: Arc<dyn VideoLibraryPort> = Arc::new(FsVideoLibrary::new());
    let folder_watch: Arc<dyn FolderWatchPort> =
        Arc::new(NotifyFolderWatcher::new(Arc::clone(&library)));
    let content_probe = HttpContentProbe::new()
        .map_err(|err| WiringError::HttpClient(format!("{err:#}")))?;

    Ok(InfraLayer {
        config: Arc::new(FileConfigRepository::new(config_path)),
        library,
        folder_watch,
        connectivity_probe: Arc::new(DnsConnectivityProbe::new()),
        content_probe: Arc::new(content_probe),
    })
}

fn config_path(app_dirs: &dyn AppDirsPort) -> WiringResult<PathBuf> {
    let dirs = app_dirs.get_app_dirs()?;
    Ok(resolve_config_path(&dirs))
}

/// Wire all dependencies together.
/// 将所有依赖连接在一起。
///
/// `window` is shared with the setup closure, which attaches it to the
/// runtime handle once the runtime exists.
///
/// # Errors / 错误
///
/// Returns `WiringError` if the data directory cannot be resolved or the
/// HTTP client cannot be built.
pub fn wire_dependencies(
    app: &AppHandle,
    window: Arc<TauriKioskWindow>,
) -> WiringResult<KioskDeps> {
    // Step 1: Resolve where the configuration lives
    // 步骤 1：确定配置文件位置
    let config_path = config_path(&DirsAppDirsAdapter::new())?;
    info!(path = %config_path.display(), "using configuration file");

    // Step 2: Infrastructure adapters
    // 步骤 2：基础设施适配器
    let infra = create_infra_layer(&config_path)?;

    // Step 3: Construct KioskDeps with all dependencies
    // 步骤 3：构造 KioskDeps
    Ok(KioskDeps {
        // Persistence / 持久化
        config: infra.config,

        // Windowing / 窗口
        window,
        ui: Arc::new(TauriUiPort::new(app.clone(), SETTINGS_WINDOW_LABEL)),

        // Local content / 本地内容
        library: infra.library,
        folder_watch: infra.folder_watch,

        // Network / 网络
        connectivity_probe: infra.connectivity_probe,
        content_probe: infra.content_probe,

        // System / 系统
        autostart: Arc::new(TauriAutostart::new(app.clone())),
    })
}

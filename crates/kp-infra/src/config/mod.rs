mod file_repo;

use std::path::PathBuf;

use kp_core::app_dirs::AppDirs;

pub use file_repo::FileConfigRepository;

/// Overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "KIOSK_PLAYER_CONFIG_PATH";

/// Configuration file path, taken from [`CONFIG_PATH_ENV`] when set.
pub fn resolve_config_path(dirs: &AppDirs) -> PathBuf {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => dirs.config_file(),
    }
}

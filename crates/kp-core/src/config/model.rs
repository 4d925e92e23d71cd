use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults::DEFAULT_AUTO_RELOAD_HOURS;
use super::patch::ConfigPatch;

const SECS_PER_HOUR: f64 = 3600.0;

/// Upper bound for the auto-reload period: one year.
pub const MAX_AUTO_RELOAD_HOURS: f64 = 24.0 * 365.0;

/// What the kiosk renders.
///
/// Serialized as a single-key object, `{"remoteUrl": "..."}` or
/// `{"folderPath": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContentSource {
    #[serde(rename = "remoteUrl")]
    RemoteUrl(String),
    #[serde(rename = "folderPath")]
    FolderPath(PathBuf),
}

impl ContentSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, ContentSource::RemoteUrl(_))
    }

    pub fn folder_path(&self) -> Option<&Path> {
        match self {
            ContentSource::FolderPath(path) => Some(path),
            ContentSource::RemoteUrl(_) => None,
        }
    }

    /// Host name the connectivity monitor should resolve.
    ///
    /// `None` for folder sources and for URLs without a host.
    pub fn probe_host(&self) -> Option<String> {
        match self {
            ContentSource::RemoteUrl(raw) => url::Url::parse(raw)
                .ok()
                .and_then(|url| url.host_str().map(str::to_string)),
            ContentSource::FolderPath(_) => None,
        }
    }
}

/// Fully resolved kiosk configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskConfig {
    /// Index into the currently enumerated display list. Best effort only.
    pub last_display: usize,
    pub content_source: ContentSource,
    pub block_clicks: bool,
    /// Suppress every pointer-down and key-down, navigation included.
    pub strict_input_lock: bool,
    pub auto_reload_enabled: bool,
    pub auto_reload_hours: f64,
    pub auto_start: bool,
}

impl KioskConfig {
    /// Overlay the fields carried by `patch`.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        *self = ConfigPatch::from(&*self).merge(patch.clone()).resolve();
    }

    /// Auto-reload period, falling back to the default when the configured
    /// hours are not a positive finite number. Capped at
    /// [`MAX_AUTO_RELOAD_HOURS`].
    pub fn auto_reload_period(&self) -> Duration {
        let default = || Duration::from_secs_f64(DEFAULT_AUTO_RELOAD_HOURS * SECS_PER_HOUR);
        if !self.auto_reload_hours.is_finite() || self.auto_reload_hours <= 0.0 {
            return default();
        }
        let hours = self.auto_reload_hours.min(MAX_AUTO_RELOAD_HOURS);
        Duration::try_from_secs_f64(hours * SECS_PER_HOUR).unwrap_or_else(|_| default())
    }
}

use std::path::PathBuf;

use super::model::*;

pub const DEFAULT_PLAYLIST_URL: &str = "https://www.youtube.com/embed/OlHbxpG_vh0?list=PL2iT-_cw7fDVHb7RoI35TSvQSdIexOa9g&autoplay=1&loop=1&controls=0";

pub const DEFAULT_AUTO_RELOAD_HOURS: f64 = 8.0;

impl Default for ContentSource {
    fn default() -> Self {
        ContentSource::RemoteUrl(DEFAULT_PLAYLIST_URL.to_string())
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            last_display: 0,
            content_source: ContentSource::default(),
            block_clicks: true,
            strict_input_lock: false,
            auto_reload_enabled: true,
            auto_reload_hours: DEFAULT_AUTO_RELOAD_HOURS,
            auto_start: false,
        }
    }
}

impl ContentSource {
    /// Convenience constructor for a local folder source.
    pub fn folder(path: impl Into<PathBuf>) -> Self {
        ContentSource::FolderPath(path.into())
    }
}

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use kp_core::{content::build_playlist, ports::VideoLibraryPort};

/// Reads video files straight from a directory. Not recursive.
#[derive(Debug, Clone, Default)]
pub struct FsVideoLibrary;

impl FsVideoLibrary {
    pub fn new() -> Self {
        Self
    }
}

impl VideoLibraryPort for FsVideoLibrary {
    fn scan(&self, folder: &Path) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(folder = %folder.display(), error = %err, "video folder unreadable");
                return Vec::new();
            }
        };

        let files = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file());

        let videos = build_playlist(files);
        debug!(folder = %folder.display(), count = videos.len(), "scanned video folder");
        videos
    }
}

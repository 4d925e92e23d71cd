//! Content resolution rules.

use std::path::{Path, PathBuf};

/// Extensions recognised as playable video, compared case-insensitively.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "wmv", "flv", "webm", "m4v", "3gp", "ogv",
];

/// Shown by the kiosk page when a folder yields no videos.
pub const EMPTY_FOLDER_MESSAGE: &str = "No video files found in the selected folder";

pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Keep video files only and sort them on the full path string.
///
/// The ordering is plain lexicographic, so `clip10` sorts before `clip2`.
pub fn build_playlist<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut videos: Vec<PathBuf> = paths.into_iter().filter(|p| is_video_file(p)).collect();
    videos.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    videos
}

/// What a load resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedContent {
    Remote(String),
    Local { videos: Vec<PathBuf> },
}

impl ResolvedContent {
    pub fn is_empty_folder(&self) -> bool {
        matches!(self, ResolvedContent::Local { videos } if videos.is_empty())
    }
}

use std::path::{Path, PathBuf};

pub trait VideoLibraryPort: Send + Sync {
    /// Sorted video files directly inside `folder`. Empty when the folder is
    /// missing or unreadable.
    fn scan(&self, folder: &Path) -> Vec<PathBuf>;
}

mod library;
mod watcher;

pub use library::FsVideoLibrary;
pub use watcher::{NotifyFolderWatcher, DEBOUNCE_WINDOW};

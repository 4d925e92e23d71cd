//! Port interfaces for the application layer
//!
//! Ports define the contract between the kiosk runtime and the adapters
//! that talk to the operating system, the filesystem, the network and the
//! windowing toolkit.

pub mod app_dirs;
pub mod autostart;
pub mod config;
pub mod errors;
pub mod library;
pub mod probe;
pub mod ui;
pub mod watcher;
pub mod window;

pub use app_dirs::AppDirsPort;
pub use autostart::AutostartPort;
pub use config::ConfigPort;
pub use errors::AppDirsError;
pub use library::VideoLibraryPort;
pub use probe::{ConnectivityProbePort, ContentProbePort};
pub use ui::UiPort;
pub use watcher::{FolderWatchPort, OnFolderChange, WatchGuard};
pub use window::KioskWindowPort;

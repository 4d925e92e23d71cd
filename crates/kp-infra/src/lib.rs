//! # kp-infra
//!
//! Adapters implementing the `kp-core` ports against the local machine:
//! the JSON configuration file, the video folder, folder change
//! notifications, DNS and HTTP probes, and the application directories.

pub mod app_dirs;
pub mod config;
pub mod fs;
pub mod net;

pub use app_dirs::DirsAppDirsAdapter;
pub use config::FileConfigRepository;
pub use fs::{FsVideoLibrary, NotifyFolderWatcher};
pub use net::{DnsConnectivityProbe, HttpContentProbe};

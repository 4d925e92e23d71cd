mod config_diff;
pub mod save_config;

pub use config_diff::ConfigDiff;
pub use save_config::{SaveConfig, SaveOutcome};

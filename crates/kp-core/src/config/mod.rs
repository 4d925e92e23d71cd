//! Kiosk configuration.
//!
//! [`KioskConfig`] is the fully resolved record the runtime works with.
//! [`ConfigPatch`] is the partial form used for persistence and for updates
//! coming from the settings window: every field is optional and a patch only
//! overrides what it carries.

mod defaults;
mod model;
mod patch;

pub use defaults::{DEFAULT_AUTO_RELOAD_HOURS, DEFAULT_PLAYLIST_URL};
pub use model::{ContentSource, KioskConfig, MAX_AUTO_RELOAD_HOURS};
pub use patch::ConfigPatch;

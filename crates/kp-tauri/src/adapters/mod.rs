pub mod autostart;
pub mod ui;

pub use autostart::TauriAutostart;
pub use ui::TauriUiPort;

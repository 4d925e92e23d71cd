//! # kp-tauri
//!
//! Tauri integration layer for Kiosk Player.
//!
//! This crate provides:
//! - The kiosk window adapter (`KioskWindowPort` over a Tauri webview window)
//! - Tray menu and settings window
//! - Tauri command handlers
//! - The boundary script injected into the kiosk page
//! - Tracing bootstrap and dependency wiring
//!
//! ## Modules
//!
//! - **adapters**: AppHandle-backed port implementations (autostart, UI)
//! - **bootstrap**: tracing subscriber and dependency wiring
//! - **commands**: Tauri command handlers (config, window, dialog)
//! - **lifecycle**: run event hook

pub mod adapters;
pub mod boundary;
pub mod bootstrap;
pub mod commands;
pub mod lifecycle;
pub mod settings_window;
pub mod tray;
pub mod window;

pub use settings_window::{open_settings_window, SETTINGS_WINDOW_LABEL};
pub use window::{TauriKioskWindow, KIOSK_WINDOW_LABEL};

//! # kp-core
//!
//! Core domain models and business logic for Kiosk Player.
//!
//! This crate contains pure logic without any infrastructure dependencies:
//! configuration and its merge rules, display geometry, the video list
//! rules, connectivity edge detection, the kiosk window lifecycle state
//! machine and the port traits implemented by the outer layers.

pub mod app_dirs;
pub mod config;
pub mod connectivity;
pub mod content;
pub mod display;
pub mod input;
pub mod kiosk;
pub mod page;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::{ConfigPatch, ContentSource, KioskConfig};
pub use display::{Direction, Rect};
pub use kiosk::{KioskAction, KioskEvent, KioskState, KioskStateMachine, ReloadReason};

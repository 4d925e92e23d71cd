//! # kp-app
//!
//! Orchestration for Kiosk Player: the runtime task that owns all mutable
//! kiosk state, the auto-reload timer, the connectivity monitor and the
//! use cases they call into.

pub mod deps;
pub mod runtime;
pub mod usecases;

pub use deps::KioskDeps;
pub use runtime::{KioskMessage, KioskRuntime, KioskRuntimeHandle, RuntimeError};

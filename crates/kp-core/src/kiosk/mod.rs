//! Kiosk window lifecycle.
//!
//! A pure state machine: the runtime feeds it events and executes the
//! actions it returns.

mod action;
mod event;
mod state;
mod state_machine;

pub use action::{KioskAction, RETRY_DELAY};
pub use event::{KioskEvent, ReloadReason};
pub use state::KioskState;
pub use state_machine::KioskStateMachine;

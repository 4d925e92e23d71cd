pub mod tracing;
pub mod wiring;

pub use wiring::{wire_dependencies, WiringError};

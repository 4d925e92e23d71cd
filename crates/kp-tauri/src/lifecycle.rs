use tauri::{AppHandle, RunEvent};
use tracing::debug;

/// Run-loop hook.
///
/// An exit request without an explicit code comes from the last window
/// closing or an OS signal to the event loop; only the operator's quit
/// (which exits with code 0) ends the process.
pub fn on_run_event(_app: &AppHandle, event: RunEvent) {
    if let RunEvent::ExitRequested { code, api, .. } = event {
        if code.is_none() {
            debug!("implicit exit request prevented");
            api.prevent_exit();
        }
    }
}

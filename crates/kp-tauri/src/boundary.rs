//! Script injected into the kiosk window before any page script runs.
//!
//! It exposes `window.kioskAPI` and installs the capture-phase input
//! interceptor. Element ids and classes come from [`kp_core::input`] so the
//! page, the presentation script and the gate agree.

use kp_core::input::{
    BLOCK_CLICKS_CLASS, CLICK_BLOCKER_ID, NAV_LEFT_ID, NAV_RIGHT_ID, STRICT_LOCK_CLASS,
};

/// Event carrying the local playlist to the kiosk page.
pub const LOAD_VIDEO_FILES_EVENT: &str = "load-video-files";

/// Command invoked by `kioskAPI.moveWindow`.
pub const MOVE_WINDOW_COMMAND: &str = "move_window";

/// Command invoked once the playlist listener is registered.
pub const REQUEST_VIDEO_LIST_COMMAND: &str = "request_video_list";

const TEMPLATE: &str = include_str!("boundary.js");

/// Initialization script for the kiosk window.
pub fn boundary_script() -> String {
    [
        ("{{CLICK_BLOCKER_ID}}", CLICK_BLOCKER_ID),
        ("{{BLOCK_CLICKS_CLASS}}", BLOCK_CLICKS_CLASS),
        ("{{STRICT_LOCK_CLASS}}", STRICT_LOCK_CLASS),
        ("{{NAV_LEFT_ID}}", NAV_LEFT_ID),
        ("{{NAV_RIGHT_ID}}", NAV_RIGHT_ID),
        ("{{MOVE_WINDOW_COMMAND}}", MOVE_WINDOW_COMMAND),
        ("{{REQUEST_VIDEO_LIST_COMMAND}}", REQUEST_VIDEO_LIST_COMMAND),
        ("{{LOAD_VIDEO_FILES_EVENT}}", LOAD_VIDEO_FILES_EVENT),
    ]
    .iter()
    .fold(TEMPLATE.to_string(), |script, (placeholder, value)| {
        script.replace(placeholder, value)
    })
}

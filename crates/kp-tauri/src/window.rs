//! Kiosk window adapter.
//!
//! 全屏展示窗口适配器。
//!
//! The window is created once by the runtime and never closed by the user:
//! close gestures are prevented and forwarded as [`KioskEvent::CloseRequested`].
//! Page-load completion, moves, resizes and destruction are forwarded the
//! same way. The adapter holds no kiosk state of its own.

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{anyhow, Context, Result};
use kp_app::KioskRuntimeHandle;
use kp_core::display::Rect;
use kp_core::input::InputPolicy;
use kp_core::kiosk::KioskEvent;
use kp_core::page::{parse_generation, PageRequest, KIOSK_PAGE_PATH};
use kp_core::ports::KioskWindowPort;
use tauri::webview::PageLoadEvent;
use tauri::{
    AppHandle, Emitter, Manager, Monitor, PhysicalPosition, PhysicalSize, Position, Size, Url,
    WebviewUrl, WebviewWindow, WebviewWindowBuilder, WindowEvent,
};
use tracing::{debug, warn};

use crate::boundary::{boundary_script, LOAD_VIDEO_FILES_EVENT};

pub const KIOSK_WINDOW_LABEL: &str = "kiosk";

const KIOSK_WINDOW_TITLE: &str = "Kiosk Player";

fn monitor_rect(monitor: &Monitor) -> Rect {
    let position = monitor.position();
    let size = monitor.size();
    Rect::new(position.x, position.y, size.width, size.height)
}

/// Forward the load generation carried by a finished kiosk page.
fn finished_generation(url: &Url) -> Option<u64> {
    if url.path() != KIOSK_PAGE_PATH {
        return None;
    }
    url.query().and_then(parse_generation)
}

pub struct TauriKioskWindow {
    app: AppHandle,
    events: OnceLock<KioskRuntimeHandle>,
}

impl TauriKioskWindow {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            events: OnceLock::new(),
        }
    }

    /// Route window callbacks to `handle`. Must happen before `create`.
    pub fn attach(&self, handle: KioskRuntimeHandle) {
        if self.events.set(handle).is_err() {
            warn!("kiosk window already attached to a runtime");
        }
    }

    fn events(&self) -> Result<KioskRuntimeHandle> {
        self.events
            .get()
            .cloned()
            .ok_or_else(|| anyhow!("kiosk window is not attached to a runtime"))
    }

    fn window(&self) -> Result<WebviewWindow> {
        self.app
            .get_webview_window(KIOSK_WINDOW_LABEL)
            .ok_or_else(|| anyhow!("kiosk window does not exist"))
    }
}

impl KioskWindowPort for TauriKioskWindow {
    fn displays(&self) -> Result<Vec<Rect>> {
        let monitors = self
            .app
            .available_monitors()
            .context("enumerate monitors failed")?;
        Ok(monitors.iter().map(monitor_rect).collect())
    }

    fn create(&self, bounds: Rect) -> Result<()> {
        let events = self.events()?;
        let page_events = events.clone();

        let window = WebviewWindowBuilder::new(
            &self.app,
            KIOSK_WINDOW_LABEL,
            WebviewUrl::App(KIOSK_PAGE_PATH.trim_start_matches('/').into()),
        )
        .title(KIOSK_WINDOW_TITLE)
        .decorations(false)
        .always_on_top(true)
        .skip_taskbar(true)
        .resizable(false)
        .visible(false)
        .initialization_script(&boundary_script())
        .on_page_load(move |_window, payload| {
            if !matches!(payload.event(), PageLoadEvent::Finished) {
                return;
            }
            match finished_generation(payload.url()) {
                Some(generation) => page_events.post(KioskEvent::LoadFinished { generation }),
                None => debug!(url = %payload.url(), "page load without generation"),
            }
        })
        .build()
        .context("build kiosk window failed")?;

        window.on_window_event(move |event| match event {
            WindowEvent::CloseRequested { api, .. } => {
                api.prevent_close();
                events.post(KioskEvent::CloseRequested);
            }
            WindowEvent::Moved(_) => events.post(KioskEvent::WindowMoved),
            WindowEvent::Resized(_) => events.post(KioskEvent::WindowResized),
            WindowEvent::Destroyed => events.post(KioskEvent::WindowDestroyed),
            _ => {}
        });

        self.place(bounds)?;
        window.show().context("show kiosk window failed")?;
        if let Err(err) = window.set_focus() {
            debug!(error = %err, "focus kiosk window failed");
        }
        Ok(())
    }

    fn bounds(&self) -> Result<Rect> {
        let window = self.window()?;
        let position = window.outer_position()?;
        let size = window.outer_size()?;
        Ok(Rect::new(position.x, position.y, size.width, size.height))
    }

    fn place(&self, bounds: Rect) -> Result<()> {
        let window = self.window()?;
        // Fullscreen pins the window to its current monitor; leave it first.
        window.set_fullscreen(false)?;
        window.set_position(Position::Physical(PhysicalPosition {
            x: bounds.x,
            y: bounds.y,
        }))?;
        window.set_size(Size::Physical(PhysicalSize {
            width: bounds.width,
            height: bounds.height,
        }))?;
        window.set_fullscreen(true)?;
        window.set_always_on_top(true)?;
        Ok(())
    }

    fn load_page(&self, request: &PageRequest) -> Result<()> {
        let window = self.window()?;
        let mut url = window.url().context("read kiosk window url failed")?;
        url.set_path(KIOSK_PAGE_PATH);
        url.set_query(Some(&request.query()));
        url.set_fragment(None);
        debug!(generation = request.generation, %url, "navigating kiosk window");
        window.navigate(url).context("navigate kiosk window failed")?;
        Ok(())
    }

    fn apply_presentation(&self, policy: &InputPolicy) -> Result<()> {
        let window = self.window()?;
        window.set_cursor_visible(false)?;
        window.set_always_on_top(true)?;
        window
            .eval(&policy.presentation_script())
            .context("apply presentation script failed")?;
        Ok(())
    }

    fn push_videos(&self, videos: &[PathBuf]) -> Result<()> {
        let paths: Vec<String> = videos
            .iter()
            .map(|path| path.to_string_lossy().into_owned())
            .collect();
        self.app
            .emit_to(KIOSK_WINDOW_LABEL, LOAD_VIDEO_FILES_EVENT, paths)
            .context("emit video list failed")?;
        Ok(())
    }
}

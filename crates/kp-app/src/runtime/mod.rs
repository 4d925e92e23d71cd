//! Kiosk runtime
//!
//! One task owns every piece of mutable kiosk state and consumes a single
//! message channel. Window callbacks, commands, timers, the folder watcher
//! and the connectivity monitor only post messages, so no locking is needed
//! around the state itself.

mod connectivity;
mod handle;
mod timer;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use kp_core::config::{ConfigPatch, ContentSource, KioskConfig};
use kp_core::connectivity::DEFAULT_PROBE_HOST;
use kp_core::content::{ResolvedContent, EMPTY_FOLDER_MESSAGE};
use kp_core::display::{self, Direction, Rect};
use kp_core::input::InputPolicy;
use kp_core::kiosk::{KioskAction, KioskEvent, KioskState, KioskStateMachine, ReloadReason};
use kp_core::page::{PageContent, PageRequest};
use kp_core::ports::WatchGuard;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::deps::KioskDeps;
use crate::usecases::SaveConfig;

pub use connectivity::ConnectivityMonitor;
pub use handle::{KioskMessage, KioskRuntimeHandle, RuntimeError, RUNTIME_CHANNEL_CAPACITY};
pub use timer::AutoReloadTimer;

/// Window bounds used when the OS reports no displays at all.
const FALLBACK_BOUNDS: Rect = Rect::new(0, 0, 1280, 720);

/// State owned by the runtime task.
struct KioskContext {
    config: KioskConfig,
    state: KioskState,
    videos: Vec<PathBuf>,
    /// Set while the file on disk is behind `config` after a failed write.
    config_dirty: bool,
    watch: Option<Box<dyn WatchGuard>>,
    auto_reload: AutoReloadTimer,
    connectivity: ConnectivityMonitor,
}

pub struct KioskRuntime {
    deps: KioskDeps,
    rx: mpsc::Receiver<KioskMessage>,
    handle: KioskRuntimeHandle,
    save_config: SaveConfig,
    ctx: KioskContext,
}

impl KioskRuntime {
    pub fn new(deps: KioskDeps) -> (Self, KioskRuntimeHandle) {
        let (tx, rx) = mpsc::channel(RUNTIME_CHANNEL_CAPACITY);
        let handle = KioskRuntimeHandle::new(tx);

        let timer_handle = handle.clone();
        let auto_reload = AutoReloadTimer::new(Arc::new(move || {
            timer_handle.post(KioskEvent::ReloadRequested(ReloadReason::Scheduled));
        }));

        let monitor_handle = handle.clone();
        let connectivity = ConnectivityMonitor::new(
            Arc::clone(&deps.connectivity_probe),
            Arc::new(move || {
                monitor_handle.post(KioskEvent::ReloadRequested(ReloadReason::ConnectivityRestored));
            }),
        );

        let runtime = Self {
            save_config: SaveConfig::new(Arc::clone(&deps.config)),
            deps,
            rx,
            handle: handle.clone(),
            ctx: KioskContext {
                config: KioskConfig::default(),
                state: KioskState::Uninitialized,
                videos: Vec::new(),
                config_dirty: false,
                watch: None,
                auto_reload,
                connectivity,
            },
        };
        (runtime, handle)
    }

    /// Start the kiosk and process messages until the window is gone.
    pub async fn run(mut self) -> Result<()> {
        self.start()
            .instrument(info_span!("runtime.start"))
            .await?;

        while let Some(message) = self.rx.recv().await {
            let span = info_span!("runtime.handle", message = message.kind());
            self.handle_message(message).instrument(span).await;
            if self.ctx.state == KioskState::Closed {
                break;
            }
        }

        self.shutdown_services();
        info!("kiosk runtime stopped");
        Ok(())
    }

    async fn start(&mut self) -> Result<()> {
        self.ctx.config = self.deps.config.load().await;

        let displays = self.deps.window.displays().unwrap_or_else(|err| {
            warn!(error = %format!("{err:#}"), "failed to enumerate displays");
            Vec::new()
        });
        let index = display::clamp_index(self.ctx.config.last_display, displays.len());
        if index != self.ctx.config.last_display {
            info!(
                stored = self.ctx.config.last_display,
                displays = displays.len(),
                "stored display is gone, using the first one"
            );
        }
        let bounds = displays.get(index).copied().unwrap_or(FALLBACK_BOUNDS);

        self.deps
            .window
            .create(bounds)
            .context("create kiosk window failed")?;
        info!(display = index, ?bounds, "kiosk window placed");
        self.dispatch(KioskEvent::WindowPlaced).await;

        self.apply_autostart();
        self.reconfigure_services();
        self.dispatch(KioskEvent::ReloadRequested(ReloadReason::Startup))
            .await;
        Ok(())
    }

    async fn handle_message(&mut self, message: KioskMessage) {
        match message {
            KioskMessage::Lifecycle(event) => self.dispatch(event).await,
            KioskMessage::GetConfig { reply } => {
                let _ = reply.send(self.ctx.config.clone());
            }
            KioskMessage::SaveConfig { patch, reply } => {
                self.apply_config_patch(patch).await;
                let _ = reply.send(self.ctx.config.clone());
                self.deps.ui.close_settings();
                self.dispatch(KioskEvent::ReloadRequested(ReloadReason::SettingsSaved))
                    .await;
            }
            KioskMessage::FolderChanged { folder, videos } => {
                if self.ctx.config.content_source.folder_path() != Some(folder.as_path()) {
                    debug!(folder = %folder.display(), "ignoring change of a folder no longer shown");
                    return;
                }
                self.ctx.videos = videos;
                self.dispatch(KioskEvent::ReloadRequested(ReloadReason::FolderChanged))
                    .await;
            }
            KioskMessage::VideosRequested => {
                if self.ctx.state.is_live() {
                    self.push_videos(None);
                }
            }
        }
    }

    /// Feed `event` to the state machine, then every follow-up event the
    /// executed actions produce, in order.
    async fn dispatch(&mut self, event: KioskEvent) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            if let KioskEvent::ReloadRequested(reason) = &event {
                info!(reason = reason.as_str(), "reload requested");
            }
            let (next, actions) = KioskStateMachine::transition(self.ctx.state, event);
            if next != self.ctx.state {
                debug!(from = ?self.ctx.state, to = ?next, "kiosk state changed");
            }
            self.ctx.state = next;

            for action in actions {
                if let Some(follow_up) = self.execute(action).await {
                    pending.push_back(follow_up);
                }
            }
        }
    }

    async fn execute(&mut self, action: KioskAction) -> Option<KioskEvent> {
        match action {
            KioskAction::LoadContent { generation } => match self.load_content(generation).await {
                Ok(()) => None,
                Err(err) => {
                    let reason = format!("{err:#}");
                    warn!(generation, error = %reason, "content load failed");
                    Some(KioskEvent::LoadFailed { generation, reason })
                }
            },
            KioskAction::ApplyPresentation { generation } => {
                self.apply_presentation(generation);
                None
            }
            KioskAction::ScheduleRetry { generation, delay } => {
                info!(generation, delay_secs = delay.as_secs(), "retrying content load");
                let handle = self.handle.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    handle.post(KioskEvent::RetryElapsed { generation });
                });
                None
            }
            KioskAction::PersistDisplay => {
                self.persist_display().await;
                None
            }
            KioskAction::MoveToAdjacent(direction) => {
                self.move_to_adjacent(direction).await;
                None
            }
            KioskAction::ReleaseFolderWatch => {
                self.release_folder_watch();
                None
            }
            KioskAction::Exit => {
                info!("exiting");
                self.shutdown_services();
                self.deps.ui.exit();
                None
            }
        }
    }

    fn input_policy(&self) -> InputPolicy {
        InputPolicy::new(
            self.ctx.config.block_clicks,
            self.ctx.config.strict_input_lock,
        )
    }

    async fn resolve_content(&mut self) -> Result<ResolvedContent> {
        match self.ctx.config.content_source.clone() {
            ContentSource::RemoteUrl(url) => {
                self.deps.content_probe.check(&url).await?;
                Ok(ResolvedContent::Remote(url))
            }
            ContentSource::FolderPath(folder) => {
                let videos = self.deps.library.scan(&folder);
                self.ensure_folder_watch(&folder);
                Ok(ResolvedContent::Local { videos })
            }
        }
    }

    async fn load_content(&mut self, generation: u64) -> Result<()> {
        let resolved = self.resolve_content().await?;
        if resolved.is_empty_folder() {
            info!(generation, "{}", EMPTY_FOLDER_MESSAGE);
        }
        let content = match resolved {
            ResolvedContent::Remote(url) => {
                self.ctx.videos.clear();
                PageContent::Remote { url }
            }
            ResolvedContent::Local { videos } => {
                self.ctx.videos = videos;
                PageContent::Local
            }
        };

        let request = PageRequest {
            generation,
            content,
            policy: self.input_policy(),
        };
        self.deps
            .window
            .load_page(&request)
            .context("navigate kiosk window failed")?;
        debug!(generation, "kiosk page requested");
        Ok(())
    }

    fn apply_presentation(&self, generation: u64) {
        if let Err(err) = self.deps.window.apply_presentation(&self.input_policy()) {
            warn!(generation, error = %format!("{err:#}"), "failed to apply presentation");
        }
        self.push_videos(Some(generation));
    }

    /// Send the local playlist to the page. No-op for remote content.
    fn push_videos(&self, generation: Option<u64>) {
        if self.ctx.config.content_source.is_remote() {
            return;
        }
        if let Err(err) = self.deps.window.push_videos(&self.ctx.videos) {
            warn!(?generation, error = %format!("{err:#}"), "failed to push video list");
        }
    }

    /// Display the window is on, with the list it was located in.
    fn current_display(&self) -> Result<(usize, Vec<Rect>)> {
        let displays = self.deps.window.displays()?;
        let bounds = self.deps.window.bounds()?;
        Ok((display::locate(&bounds, &displays), displays))
    }

    async fn remember_display(&mut self, index: usize) {
        if index == self.ctx.config.last_display && !self.ctx.config_dirty {
            return;
        }
        self.ctx.config.last_display = index;
        let patch = if self.ctx.config_dirty {
            ConfigPatch::from(&self.ctx.config)
        } else {
            ConfigPatch::display(index)
        };
        match self.deps.config.save(&patch).await {
            Ok(()) => {
                self.ctx.config_dirty = false;
                debug!(display = index, "display index saved");
            }
            Err(err) => {
                self.ctx.config_dirty = true;
                warn!(error = %format!("{err:#}"), "failed to persist display index");
            }
        }
    }

    async fn persist_display(&mut self) {
        match self.current_display() {
            Ok((index, _)) => self.remember_display(index).await,
            Err(err) => warn!(error = %format!("{err:#}"), "cannot locate kiosk window"),
        }
    }

    async fn move_to_adjacent(&mut self, direction: Direction) {
        let (current, displays) = match self.current_display() {
            Ok(located) => located,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "cannot locate kiosk window");
                return;
            }
        };
        let Some(target) = display::adjacent(current, direction, displays.len()) else {
            debug!(%direction, "only one display, not moving");
            return;
        };

        if let Err(err) = self.deps.window.place(displays[target]) {
            warn!(error = %format!("{err:#}"), target, "failed to move kiosk window");
            return;
        }
        info!(%direction, from = current, to = target, "kiosk window moved");
        self.remember_display(target).await;
    }

    fn ensure_folder_watch(&mut self, folder: &Path) {
        if matches!(&self.ctx.watch, Some(guard) if guard.folder() == folder) {
            return;
        }
        self.release_folder_watch();

        let handle = self.handle.clone();
        let watched = folder.to_path_buf();
        let on_change = Arc::new(move |videos: Vec<PathBuf>| {
            handle.post_folder_changed(watched.clone(), videos);
        });
        match self.deps.folder_watch.watch(folder, on_change) {
            Ok(guard) => self.ctx.watch = guard,
            Err(err) => {
                warn!(folder = %folder.display(), error = %format!("{err:#}"), "failed to watch folder")
            }
        }
    }

    fn release_folder_watch(&mut self) {
        if let Some(guard) = self.ctx.watch.take() {
            debug!(folder = %guard.folder().display(), "releasing folder watch");
        }
    }

    /// Bring timers, the connectivity monitor and the folder watch in line
    /// with the current configuration.
    fn reconfigure_services(&mut self) {
        let enabled = self.ctx.config.auto_reload_enabled;
        let period = self.ctx.config.auto_reload_period();
        self.ctx.auto_reload.reconfigure(enabled, period);

        match self.ctx.config.content_source.clone() {
            ContentSource::RemoteUrl(_) => {
                let host = self
                    .ctx
                    .config
                    .content_source
                    .probe_host()
                    .unwrap_or_else(|| DEFAULT_PROBE_HOST.to_string());
                self.release_folder_watch();
                self.ctx.connectivity.start(&host);
            }
            ContentSource::FolderPath(folder) => {
                self.ctx.connectivity.stop();
                self.ensure_folder_watch(&folder);
            }
        }
    }

    fn shutdown_services(&mut self) {
        self.ctx.auto_reload.stop();
        self.ctx.connectivity.stop();
        self.release_folder_watch();
    }

    fn apply_autostart(&self) {
        let desired = self.ctx.config.auto_start;
        let result = match self.deps.autostart.is_enabled() {
            Ok(current) if current == desired => return,
            Ok(_) if desired => self.deps.autostart.enable(),
            Ok(_) => self.deps.autostart.disable(),
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => info!(enabled = desired, "autostart updated"),
            Err(err) => warn!(error = %format!("{err:#}"), "failed to update autostart"),
        }
    }

    async fn apply_config_patch(&mut self, patch: ConfigPatch) {
        let previous = self.ctx.config.clone();
        let outcome = self
            .save_config
            .execute(&previous, &patch, self.ctx.config_dirty)
            .await;
        self.ctx.config = outcome.config;
        self.ctx.config_dirty = !outcome.persisted;
        self.apply_autostart();
        self.reconfigure_services();
    }
}

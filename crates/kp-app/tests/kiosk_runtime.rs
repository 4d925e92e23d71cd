use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kp_app::{KioskDeps, KioskRuntime, KioskRuntimeHandle};
use kp_core::config::{ConfigPatch, ContentSource, KioskConfig, DEFAULT_PLAYLIST_URL};
use kp_core::display::{Direction, Rect};
use kp_core::input::InputPolicy;
use kp_core::kiosk::KioskEvent;
use kp_core::page::{PageContent, PageRequest};
use kp_core::ports::*;
use tokio::task::JoinHandle;

const LEFT: Rect = Rect::new(0, 0, 1920, 1080);
const RIGHT: Rect = Rect::new(1920, 0, 1920, 1080);

#[derive(Debug, Clone, PartialEq)]
enum WindowCall {
    Create(Rect),
    Place(Rect),
    LoadPage(PageRequest),
    Presentation(InputPolicy),
    Videos(Vec<PathBuf>),
}

struct MockWindow {
    displays: Vec<Rect>,
    bounds: Mutex<Rect>,
    calls: Mutex<Vec<WindowCall>>,
}

impl MockWindow {
    fn new(displays: Vec<Rect>) -> Arc<Self> {
        Arc::new(Self {
            displays,
            bounds: Mutex::new(Rect::new(0, 0, 0, 0)),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<WindowCall> {
        self.calls.lock().unwrap().clone()
    }

    fn pages(&self) -> Vec<PageRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WindowCall::LoadPage(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn last_page(&self) -> PageRequest {
        self.pages().pop().expect("a page was loaded")
    }

    fn count(&self, pred: impl Fn(&WindowCall) -> bool) -> usize {
        self.calls().iter().filter(|call| pred(call)).count()
    }

    fn drag_to(&self, bounds: Rect) {
        *self.bounds.lock().unwrap() = bounds;
    }
}

impl KioskWindowPort for MockWindow {
    fn displays(&self) -> anyhow::Result<Vec<Rect>> {
        Ok(self.displays.clone())
    }

    fn create(&self, bounds: Rect) -> anyhow::Result<()> {
        *self.bounds.lock().unwrap() = bounds;
        self.calls.lock().unwrap().push(WindowCall::Create(bounds));
        Ok(())
    }

    fn bounds(&self) -> anyhow::Result<Rect> {
        Ok(*self.bounds.lock().unwrap())
    }

    fn place(&self, bounds: Rect) -> anyhow::Result<()> {
        *self.bounds.lock().unwrap() = bounds;
        self.calls.lock().unwrap().push(WindowCall::Place(bounds));
        Ok(())
    }

    fn load_page(&self, request: &PageRequest) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(WindowCall::LoadPage(request.clone()));
        Ok(())
    }

    fn apply_presentation(&self, policy: &InputPolicy) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(WindowCall::Presentation(*policy));
        Ok(())
    }

    fn push_videos(&self, videos: &[PathBuf]) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(WindowCall::Videos(videos.to_vec()));
        Ok(())
    }
}

#[derive(Default)]
struct MockConfig {
    stored: Mutex<ConfigPatch>,
    fail_writes: AtomicBool,
}

impl MockConfig {
    fn with(config: KioskConfig) -> Arc<Self> {
        Arc::new(Self {
            stored: Mutex::new(ConfigPatch::from(&config)),
            fail_writes: AtomicBool::new(false),
        })
    }

    fn stored(&self) -> KioskConfig {
        self.stored.lock().unwrap().clone().resolve()
    }
}

#[async_trait]
impl ConfigPort for MockConfig {
    async fn load(&self) -> KioskConfig {
        self.stored()
    }

    async fn save(&self, patch: &ConfigPatch) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("read-only filesystem");
        }
        let mut stored = self.stored.lock().unwrap();
        *stored = stored.clone().merge(patch.clone());
        Ok(())
    }
}

#[derive(Default)]
struct MockUi {
    settings_closed: AtomicUsize,
    exits: AtomicUsize,
}

impl UiPort for MockUi {
    fn close_settings(&self) {
        self.settings_closed.fetch_add(1, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.exits.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct MockLibrary {
    videos: Mutex<Vec<PathBuf>>,
}

impl VideoLibraryPort for MockLibrary {
    fn scan(&self, _folder: &Path) -> Vec<PathBuf> {
        self.videos.lock().unwrap().clone()
    }
}

struct MockGuard {
    folder: PathBuf,
    live: Arc<AtomicUsize>,
}

impl WatchGuard for MockGuard {
    fn folder(&self) -> &Path {
        &self.folder
    }
}

impl Drop for MockGuard {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct MockWatcher {
    live: Arc<AtomicUsize>,
    watched: Mutex<Vec<PathBuf>>,
    on_change: Mutex<Option<OnFolderChange>>,
}

impl MockWatcher {
    fn fire(&self, videos: Vec<PathBuf>) {
        let callback = self.on_change.lock().unwrap().clone().expect("watch active");
        callback(videos);
    }
}

impl FolderWatchPort for MockWatcher {
    fn watch(
        &self,
        folder: &Path,
        on_change: OnFolderChange,
    ) -> anyhow::Result<Option<Box<dyn WatchGuard>>> {
        self.live.fetch_add(1, Ordering::SeqCst);
        self.watched.lock().unwrap().push(folder.to_path_buf());
        *self.on_change.lock().unwrap() = Some(on_change);
        Ok(Some(Box::new(MockGuard {
            folder: folder.to_path_buf(),
            live: Arc::clone(&self.live),
        })))
    }
}

#[derive(Default)]
struct MockConnectivity {
    script: Mutex<VecDeque<bool>>,
}

#[async_trait]
impl ConnectivityProbePort for MockConnectivity {
    async fn is_reachable(&self, _host: &str) -> bool {
        self.script.lock().unwrap().pop_front().unwrap_or(true)
    }
}

#[derive(Default)]
struct MockContentProbe {
    failures_left: AtomicUsize,
    checks: AtomicUsize,
}

#[async_trait]
impl ContentProbePort for MockContentProbe {
    async fn check(&self, url: &str) -> anyhow::Result<()> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if self.failures_left.load(Ordering::SeqCst) > 0 {
            self.failures_left.fetch_sub(1, Ordering::SeqCst);
            anyhow::bail!("unreachable: {url}");
        }
        Ok(())
    }
}

#[derive(Default)]
struct MockAutostart {
    enabled: AtomicBool,
}

impl AutostartPort for MockAutostart {
    fn is_enabled(&self) -> anyhow::Result<bool> {
        Ok(self.enabled.load(Ordering::SeqCst))
    }

    fn enable(&self) -> anyhow::Result<()> {
        self.enabled.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn disable(&self) -> anyhow::Result<()> {
        self.enabled.store(false, Ordering::SeqCst);
        Ok(())
    }
}

struct Harness {
    config: Arc<MockConfig>,
    window: Arc<MockWindow>,
    ui: Arc<MockUi>,
    library: Arc<MockLibrary>,
    watcher: Arc<MockWatcher>,
    connectivity: Arc<MockConnectivity>,
    content: Arc<MockContentProbe>,
    autostart: Arc<MockAutostart>,
}

impl Harness {
    fn new(config: KioskConfig, displays: Vec<Rect>) -> Self {
        Self {
            config: MockConfig::with(config),
            window: MockWindow::new(displays),
            ui: Arc::new(MockUi::default()),
            library: Arc::new(MockLibrary::default()),
            watcher: Arc::new(MockWatcher::default()),
            connectivity: Arc::new(MockConnectivity::default()),
            content: Arc::new(MockContentProbe::default()),
            autostart: Arc::new(MockAutostart::default()),
        }
    }

    fn start(&self) -> (KioskRuntimeHandle, JoinHandle<anyhow::Result<()>>) {
        let (runtime, handle) = KioskRuntime::new(KioskDeps {
            config: self.config.clone(),
            window: self.window.clone(),
            ui: self.ui.clone(),
            library: self.library.clone(),
            folder_watch: self.watcher.clone(),
            connectivity_probe: self.connectivity.clone(),
            content_probe: self.content.clone(),
            autostart: self.autostart.clone(),
        });
        (handle, tokio::spawn(runtime.run()))
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

fn folder_config(folder: &str) -> KioskConfig {
    KioskConfig {
        content_source: ContentSource::folder(folder),
        ..KioskConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn startup_places_window_on_saved_display_and_loads_remote() {
    let harness = Harness::new(
        KioskConfig {
            last_display: 1,
            ..KioskConfig::default()
        },
        vec![LEFT, RIGHT],
    );
    let (_handle, _task) = harness.start();
    settle().await;

    let calls = harness.window.calls();
    assert_eq!(calls[0], WindowCall::Create(RIGHT));
    let page = harness.window.last_page();
    assert_eq!(page.generation, 1);
    assert_eq!(
        page.content,
        PageContent::Remote {
            url: DEFAULT_PLAYLIST_URL.to_string()
        }
    );
    assert_eq!(harness.content.checks.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn stale_display_index_falls_back_to_first() {
    let harness = Harness::new(
        KioskConfig {
            last_display: 5,
            ..KioskConfig::default()
        },
        vec![LEFT, RIGHT],
    );
    let (_handle, _task) = harness.start();
    settle().await;

    assert_eq!(harness.window.calls()[0], WindowCall::Create(LEFT));
}

#[tokio::test(start_paused = true)]
async fn failed_load_is_retried_after_five_seconds() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT]);
    harness.content.failures_left.store(1, Ordering::SeqCst);
    let (_handle, _task) = harness.start();
    settle().await;
    assert!(harness.window.pages().is_empty());

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(harness.window.pages().is_empty());

    tokio::time::sleep(Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(harness.window.last_page().generation, 2);
    assert_eq!(harness.content.checks.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn load_finished_applies_presentation() {
    let harness = Harness::new(
        KioskConfig {
            block_clicks: true,
            ..KioskConfig::default()
        },
        vec![LEFT],
    );
    let (handle, _task) = harness.start();
    settle().await;

    handle.post(KioskEvent::LoadFinished { generation: 1 });
    settle().await;

    assert!(harness
        .window
        .calls()
        .contains(&WindowCall::Presentation(InputPolicy::new(true, false))));
}

#[tokio::test(start_paused = true)]
async fn stale_load_finished_is_ignored() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT]);
    let (handle, _task) = harness.start();
    settle().await;

    handle.post(KioskEvent::LoadFinished { generation: 7 });
    settle().await;

    assert_eq!(
        harness
            .window
            .count(|call| matches!(call, WindowCall::Presentation(_))),
        0
    );
}

#[tokio::test(start_paused = true)]
async fn local_folder_is_scanned_watched_and_pushed() {
    let harness = Harness::new(folder_config("/srv/loop"), vec![LEFT]);
    let videos = vec![PathBuf::from("/srv/loop/a.mp4"), PathBuf::from("/srv/loop/b.mp4")];
    *harness.library.videos.lock().unwrap() = videos.clone();
    let (handle, _task) = harness.start();
    settle().await;

    assert_eq!(harness.window.last_page().content, PageContent::Local);
    assert_eq!(
        *harness.watcher.watched.lock().unwrap(),
        vec![PathBuf::from("/srv/loop")]
    );
    assert_eq!(harness.watcher.live.load(Ordering::SeqCst), 1);

    handle.post(KioskEvent::LoadFinished { generation: 1 });
    settle().await;
    assert!(harness.window.calls().contains(&WindowCall::Videos(videos)));
}

#[tokio::test(start_paused = true)]
async fn page_request_resends_local_playlist() {
    let harness = Harness::new(folder_config("/srv/loop"), vec![LEFT]);
    let videos = vec![PathBuf::from("/srv/loop/a.mp4")];
    *harness.library.videos.lock().unwrap() = videos.clone();
    let (handle, _task) = harness.start();
    settle().await;

    handle.post(KioskEvent::LoadFinished { generation: 1 });
    settle().await;
    handle.request_videos().await.unwrap();
    settle().await;

    let pushes = harness
        .window
        .count(|call| *call == WindowCall::Videos(videos.clone()));
    assert_eq!(pushes, 2);
}

#[tokio::test(start_paused = true)]
async fn page_request_is_ignored_for_remote_content() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT]);
    let (handle, _task) = harness.start();
    settle().await;

    handle.post(KioskEvent::LoadFinished { generation: 1 });
    settle().await;
    handle.request_videos().await.unwrap();
    settle().await;

    assert_eq!(
        harness
            .window
            .count(|call| matches!(call, WindowCall::Videos(_))),
        0
    );
}

#[tokio::test(start_paused = true)]
async fn folder_change_reloads_with_fresh_list() {
    let harness = Harness::new(folder_config("/srv/loop"), vec![LEFT]);
    let (handle, _task) = harness.start();
    settle().await;

    let fresh = vec![PathBuf::from("/srv/loop/new.mp4")];
    *harness.library.videos.lock().unwrap() = fresh.clone();
    harness.watcher.fire(fresh.clone());
    settle().await;

    assert_eq!(harness.window.last_page().generation, 2);
    handle.post(KioskEvent::LoadFinished { generation: 2 });
    settle().await;
    assert!(harness.window.calls().contains(&WindowCall::Videos(fresh)));
}

#[tokio::test(start_paused = true)]
async fn move_right_places_window_on_next_display_and_persists() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT, RIGHT]);
    let (handle, _task) = harness.start();
    settle().await;

    handle
        .send_event(KioskEvent::MoveRequested(Direction::Right))
        .await
        .unwrap();
    settle().await;

    assert!(harness.window.calls().contains(&WindowCall::Place(RIGHT)));
    assert_eq!(harness.config.stored().last_display, 1);

    handle
        .send_event(KioskEvent::MoveRequested(Direction::Right))
        .await
        .unwrap();
    settle().await;
    assert!(harness.window.calls().contains(&WindowCall::Place(LEFT)));
    assert_eq!(harness.config.stored().last_display, 0);
}

#[tokio::test(start_paused = true)]
async fn move_with_single_display_does_nothing() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT]);
    let (handle, _task) = harness.start();
    settle().await;

    handle.post(KioskEvent::MoveRequested(Direction::Left));
    settle().await;

    assert_eq!(
        harness
            .window
            .count(|call| matches!(call, WindowCall::Place(_))),
        0
    );
}

#[tokio::test(start_paused = true)]
async fn close_gesture_is_intercepted_and_persists_display() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT, RIGHT]);
    let (handle, task) = harness.start();
    settle().await;

    harness.window.drag_to(Rect::new(2000, 100, 800, 600));
    handle.post(KioskEvent::CloseRequested);
    settle().await;

    assert_eq!(harness.config.stored().last_display, 1);
    assert_eq!(harness.ui.exits.load(Ordering::SeqCst), 0);
    assert!(!task.is_finished());
}

#[tokio::test(start_paused = true)]
async fn save_config_persists_reloads_and_closes_settings() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT]);
    let (handle, _task) = harness.start();
    settle().await;

    let applied = handle
        .save_config(ConfigPatch {
            block_clicks: Some(false),
            auto_start: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    settle().await;

    assert!(!applied.block_clicks);
    assert!(!harness.config.stored().block_clicks);
    assert_eq!(harness.ui.settings_closed.load(Ordering::SeqCst), 1);
    assert!(harness.autostart.enabled.load(Ordering::SeqCst));

    let page = harness.window.last_page();
    assert_eq!(page.generation, 2);
    assert!(!page.policy.block_clicks);
}

#[tokio::test(start_paused = true)]
async fn save_config_write_failure_keeps_in_memory_state() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT]);
    harness.config.fail_writes.store(true, Ordering::SeqCst);
    let (handle, _task) = harness.start();
    settle().await;

    handle
        .save_config(ConfigPatch {
            auto_reload_hours: Some(2.0),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(handle.get_config().await.unwrap().auto_reload_hours, 2.0);
    assert_eq!(harness.config.stored().auto_reload_hours, 8.0);
}

#[tokio::test(start_paused = true)]
async fn failed_write_is_retried_in_full_on_next_mutation() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT, RIGHT]);
    harness.config.fail_writes.store(true, Ordering::SeqCst);
    let (handle, _task) = harness.start();
    settle().await;

    handle
        .save_config(ConfigPatch {
            block_clicks: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    settle().await;
    assert!(harness.config.stored().block_clicks);

    harness.config.fail_writes.store(false, Ordering::SeqCst);
    handle
        .send_event(KioskEvent::MoveRequested(Direction::Right))
        .await
        .unwrap();
    settle().await;

    let stored = harness.config.stored();
    assert_eq!(stored.last_display, 1);
    assert!(!stored.block_clicks);
}

#[tokio::test(start_paused = true)]
async fn unsaved_display_index_is_written_even_when_unchanged() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT, RIGHT]);
    harness.config.fail_writes.store(true, Ordering::SeqCst);
    let (handle, _task) = harness.start();
    settle().await;

    handle
        .send_event(KioskEvent::MoveRequested(Direction::Right))
        .await
        .unwrap();
    settle().await;
    assert_eq!(harness.config.stored().last_display, 0);

    harness.config.fail_writes.store(false, Ordering::SeqCst);
    handle.post(KioskEvent::WindowMoved);
    settle().await;

    assert_eq!(harness.config.stored().last_display, 1);
}

#[tokio::test(start_paused = true)]
async fn switching_to_folder_starts_watch_and_back_releases_it() {
    let harness = Harness::new(KioskConfig::default(), vec![LEFT]);
    let (handle, _task) = harness.start();
    settle().await;
    assert_eq!(harness.watcher.live.load(Ordering::SeqCst), 0);

    handle
        .save_config(ConfigPatch {
            content_source: Some(ContentSource::folder("/srv/loop")),
            ..Default::default()
        })
        .await
        .unwrap();
    settle().await;
    assert_eq!(harness.watcher.live.load(Ordering::SeqCst), 1);

    handle
        .save_config(ConfigPatch {
            content_source: Some(ContentSource::RemoteUrl("https://example.test/".into())),
            ..Default::default()
        })
        .await
        .unwrap();
    settle().await;
    assert_eq!(harness.watcher.live.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn quit_persists_releases_watch_and_exits() {
    let harness = Harness::new(folder_config("/srv/loop"), vec![LEFT, RIGHT]);
    let (handle, task) = harness.start();
    settle().await;
    harness.window.drag_to(RIGHT);

    handle.post(KioskEvent::QuitRequested);
    settle().await;

    assert_eq!(harness.ui.exits.load(Ordering::SeqCst), 1);
    assert_eq!(harness.watcher.live.load(Ordering::SeqCst), 0);
    assert_eq!(harness.config.stored().last_display, 1);

    handle.post(KioskEvent::WindowDestroyed);
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("runtime stops")
        .unwrap()
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn auto_reload_fires_after_configured_period() {
    let harness = Harness::new(
        KioskConfig {
            auto_reload_hours: 1.0,
            ..KioskConfig::default()
        },
        vec![LEFT],
    );
    let (_handle, _task) = harness.start();
    settle().await;
    assert_eq!(harness.window.last_page().generation, 1);

    tokio::time::sleep(Duration::from_secs(3600)).await;
    settle().await;
    assert_eq!(harness.window.last_page().generation, 2);
}

#[tokio::test(start_paused = true)]
async fn huge_auto_reload_hours_keep_runtime_alive() {
    let harness = Harness::new(
        KioskConfig {
            auto_reload_hours: 1e16,
            ..KioskConfig::default()
        },
        vec![LEFT],
    );
    let (handle, task) = harness.start();
    settle().await;

    assert_eq!(handle.get_config().await.unwrap().auto_reload_hours, 1e16);
    assert!(!task.is_finished());

    handle
        .save_config(ConfigPatch {
            auto_reload_hours: Some(f64::MAX),
            ..Default::default()
        })
        .await
        .unwrap();
    settle().await;
    assert!(!task.is_finished());
    assert_eq!(harness.window.last_page().generation, 2);
}

#[tokio::test(start_paused = true)]
async fn connectivity_recovery_reloads_once() {
    let harness = Harness::new(
        KioskConfig {
            auto_reload_enabled: false,
            ..KioskConfig::default()
        },
        vec![LEFT],
    );
    *harness.connectivity.script.lock().unwrap() = VecDeque::from([false, false, true, true]);
    let (_handle, _task) = harness.start();
    settle().await;

    tokio::time::sleep(Duration::from_secs(20)).await;
    settle().await;

    assert_eq!(harness.window.pages().len(), 2);
    assert_eq!(harness.window.last_page().generation, 2);
}

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use kp_core::ports::{FolderWatchPort, OnFolderChange, VideoLibraryPort, WatchGuard};

/// Quiet period after the last change before the folder is rescanned.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// `notify` based folder watcher with trailing-edge debounce.
pub struct NotifyFolderWatcher {
    library: Arc<dyn VideoLibraryPort>,
    debounce: Duration,
}

impl NotifyFolderWatcher {
    pub fn new(library: Arc<dyn VideoLibraryPort>) -> Self {
        Self {
            library,
            debounce: DEBOUNCE_WINDOW,
        }
    }

    #[cfg(test)]
    fn with_debounce(library: Arc<dyn VideoLibraryPort>, debounce: Duration) -> Self {
        Self { library, debounce }
    }
}

struct NotifyWatchGuard {
    folder: PathBuf,
    _watcher: RecommendedWatcher,
    debounce_task: AbortHandle,
}

impl WatchGuard for NotifyWatchGuard {
    fn folder(&self) -> &Path {
        &self.folder
    }
}

impl Drop for NotifyWatchGuard {
    fn drop(&mut self) {
        self.debounce_task.abort();
        debug!(folder = %self.folder.display(), "folder watch released");
    }
}

fn is_content_change(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

impl FolderWatchPort for NotifyFolderWatcher {
    fn watch(
        &self,
        folder: &Path,
        on_change: OnFolderChange,
    ) -> anyhow::Result<Option<Box<dyn WatchGuard>>> {
        if !folder.is_dir() {
            warn!(folder = %folder.display(), "video folder missing, not watching");
            return Ok(None);
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            match result {
                Ok(event) if is_content_change(&event) => {
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(err) => warn!(error = %err, "folder watch error"),
            }
        })
        .context("create folder watcher failed")?;

        watcher
            .watch(folder, RecursiveMode::NonRecursive)
            .with_context(|| format!("watch folder failed: {}", folder.display()))?;

        let library = Arc::clone(&self.library);
        let debounce = self.debounce;
        let watched = folder.to_path_buf();
        let task = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                // Each new event inside the window restarts it.
                loop {
                    match tokio::time::timeout(debounce, rx.recv()).await {
                        Ok(Some(())) => continue,
                        Ok(None) => return,
                        Err(_) => break,
                    }
                }
                let videos = library.scan(&watched);
                info!(folder = %watched.display(), count = videos.len(), "video folder changed");
                on_change(videos);
            }
        });

        info!(folder = %folder.display(), "watching video folder");
        Ok(Some(Box::new(NotifyWatchGuard {
            folder: folder.to_path_buf(),
            _watcher: watcher,
            debounce_task: task.abort_handle(),
        })))
    }
}

use std::path::PathBuf;

use kp_core::config::{ConfigPatch, KioskConfig};
use kp_core::kiosk::KioskEvent;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

/// Capacity of the runtime inbox.
pub const RUNTIME_CHANNEL_CAPACITY: usize = 100;

/// Messages consumed by the kiosk runtime.
#[derive(Debug)]
pub enum KioskMessage {
    /// Window, timer and tray events.
    Lifecycle(KioskEvent),
    GetConfig {
        reply: oneshot::Sender<KioskConfig>,
    },
    SaveConfig {
        patch: ConfigPatch,
        reply: oneshot::Sender<KioskConfig>,
    },
    /// Debounced change of a watched folder.
    FolderChanged {
        folder: PathBuf,
        videos: Vec<PathBuf>,
    },
    /// The kiosk page subscribed to the playlist and wants the current one.
    VideosRequested,
}

impl KioskMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            KioskMessage::Lifecycle(_) => "lifecycle",
            KioskMessage::GetConfig { .. } => "get_config",
            KioskMessage::SaveConfig { .. } => "save_config",
            KioskMessage::FolderChanged { .. } => "folder_changed",
            KioskMessage::VideosRequested => "videos_requested",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("kiosk runtime is not running")]
    Closed,

    #[error("kiosk runtime dropped the request")]
    NoReply,
}

/// Cloneable sender side of the runtime.
///
/// Synchronous callers (window callbacks, watcher, timers) use the `post*`
/// methods, which never block. Commands use the async methods.
#[derive(Clone)]
pub struct KioskRuntimeHandle {
    tx: mpsc::Sender<KioskMessage>,
}

impl KioskRuntimeHandle {
    pub(crate) fn new(tx: mpsc::Sender<KioskMessage>) -> Self {
        Self { tx }
    }

    fn try_post(&self, message: KioskMessage) {
        let kind = message.kind();
        if let Err(err) = self.tx.try_send(message) {
            warn!(kind, error = %err, "dropping kiosk runtime message");
        }
    }

    pub fn post(&self, event: KioskEvent) {
        self.try_post(KioskMessage::Lifecycle(event));
    }

    pub fn post_folder_changed(&self, folder: PathBuf, videos: Vec<PathBuf>) {
        self.try_post(KioskMessage::FolderChanged { folder, videos });
    }

    pub async fn send_event(&self, event: KioskEvent) -> Result<(), RuntimeError> {
        self.tx
            .send(KioskMessage::Lifecycle(event))
            .await
            .map_err(|_| RuntimeError::Closed)
    }

    /// Re-send the local playlist to the kiosk page.
    pub async fn request_videos(&self) -> Result<(), RuntimeError> {
        self.tx
            .send(KioskMessage::VideosRequested)
            .await
            .map_err(|_| RuntimeError::Closed)
    }

    pub async fn get_config(&self) -> Result<KioskConfig, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(KioskMessage::GetConfig { reply })
            .await
            .map_err(|_| RuntimeError::Closed)?;
        rx.await.map_err(|_| RuntimeError::NoReply)
    }

    /// Apply `patch`, returning the configuration now in effect.
    pub async fn save_config(&self, patch: ConfigPatch) -> Result<KioskConfig, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(KioskMessage::SaveConfig { patch, reply })
            .await
            .map_err(|_| RuntimeError::Closed)?;
        rx.await.map_err(|_| RuntimeError::NoReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closed_runtime_is_reported() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = KioskRuntimeHandle::new(tx);

        assert!(matches!(handle.get_config().await, Err(RuntimeError::Closed)));
        assert!(matches!(
            handle.send_event(KioskEvent::WindowMoved).await,
            Err(RuntimeError::Closed)
        ));
        handle.post(KioskEvent::WindowMoved);
    }

    #[tokio::test]
    async fn full_inbox_drops_posted_events() {
        let (tx, mut rx) = mpsc::channel(1);
        let handle = KioskRuntimeHandle::new(tx);

        handle.post(KioskEvent::WindowMoved);
        handle.post(KioskEvent::WindowResized);

        assert!(matches!(
            rx.recv().await,
            Some(KioskMessage::Lifecycle(KioskEvent::WindowMoved))
        ));
        assert!(rx.try_recv().is_err());
    }
}

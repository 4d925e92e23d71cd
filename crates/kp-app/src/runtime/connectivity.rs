use std::sync::Arc;

use kp_core::connectivity::{ConnectivityTracker, ConnectivityTransition, PROBE_INTERVAL};
use kp_core::ports::ConnectivityProbePort;
use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

/// Polls name resolution of the content host and reports recovery.
///
/// Only the offline → online edge calls `on_restored`. A single polling
/// task runs at a time.
pub struct ConnectivityMonitor {
    probe: Arc<dyn ConnectivityProbePort>,
    on_restored: Arc<dyn Fn() + Send + Sync>,
    running: Option<(String, AbortHandle)>,
}

impl ConnectivityMonitor {
    pub fn new(
        probe: Arc<dyn ConnectivityProbePort>,
        on_restored: Arc<dyn Fn() + Send + Sync>,
    ) -> Self {
        Self {
            probe,
            on_restored,
            running: None,
        }
    }

    /// Poll `host`. A no-op when already polling that host.
    pub fn start(&mut self, host: &str) {
        if matches!(&self.running, Some((current, _)) if current == host) {
            return;
        }
        self.stop();

        let probe = Arc::clone(&self.probe);
        let on_restored = Arc::clone(&self.on_restored);
        let target = host.to_string();
        let handle = tokio::spawn(async move {
            let mut tracker = ConnectivityTracker::new();
            let mut ticks = interval_at(Instant::now() + PROBE_INTERVAL, PROBE_INTERVAL);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let reachable = probe.is_reachable(&target).await;
                match tracker.observe(reachable) {
                    ConnectivityTransition::Restored => {
                        info!(host = %target, "connectivity restored");
                        on_restored();
                    }
                    ConnectivityTransition::Lost => {
                        warn!(host = %target, "connectivity lost");
                    }
                    ConnectivityTransition::Unchanged => {
                        trace!(host = %target, reachable, "connectivity unchanged");
                    }
                }
            }
        });

        debug!(host, "connectivity monitor started");
        self.running = Some((host.to_string(), handle.abort_handle()));
    }

    pub fn stop(&mut self) {
        if let Some((host, task)) = self.running.take() {
            task.abort();
            debug!(host = %host, "connectivity monitor stopped");
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.running.as_ref().map(|(host, _)| host.as_str())
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

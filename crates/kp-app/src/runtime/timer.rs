use std::sync::Arc;
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Periodic forced reload.
///
/// At most one task runs at a time: every reconfiguration aborts the
/// previous one before spawning the next.
pub struct AutoReloadTimer {
    on_tick: Arc<dyn Fn() + Send + Sync>,
    task: Option<AbortHandle>,
}

impl AutoReloadTimer {
    pub fn new(on_tick: Arc<dyn Fn() + Send + Sync>) -> Self {
        Self {
            on_tick,
            task: None,
        }
    }

    /// Restart the timer. The first tick fires one full `period` from now.
    pub fn reconfigure(&mut self, enabled: bool, period: Duration) {
        self.stop();
        if !enabled {
            debug!("auto reload disabled");
            return;
        }

        if period.is_zero() {
            warn!("auto reload period is zero; timer not started");
            return;
        }
        let Some(start) = Instant::now().checked_add(period) else {
            warn!(
                period_secs = period.as_secs_f64(),
                "auto reload period out of range; timer not started"
            );
            return;
        };

        let on_tick = Arc::clone(&self.on_tick);
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(start, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                info!("auto reload due");
                on_tick();
            }
        });
        self.task = Some(handle.abort_handle());
        info!(period_secs = period.as_secs_f64(), "auto reload scheduled");
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for AutoReloadTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

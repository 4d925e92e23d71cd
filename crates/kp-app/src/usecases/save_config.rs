//! Use case for applying a configuration update from the settings window
//! 应用设置窗口提交的配置更新

use std::sync::Arc;

use kp_core::config::{ConfigPatch, KioskConfig};
use kp_core::ports::ConfigPort;
use tracing::{info, info_span, warn, Instrument};

use super::ConfigDiff;

/// Result of [`SaveConfig::execute`].
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    /// Merged configuration, returned whether or not the write succeeded.
    pub config: KioskConfig,
    /// `false` when the write failed and disk is behind memory.
    pub persisted: bool,
}

/// Merge a patch into the running configuration and persist it.
///
/// ## Behavior / 行为
/// - Logs changed fields with old/new values
/// - Persists only the fields the patch carries, unless an earlier write
///   is still pending, in which case the whole merged configuration is written
/// - A failed write is logged; the merged configuration is still returned
///   so the kiosk keeps running with what the operator asked for
pub struct SaveConfig {
    config: Arc<dyn ConfigPort>,
}

impl SaveConfig {
    pub fn new(config: Arc<dyn ConfigPort>) -> Self {
        Self { config }
    }

    pub async fn execute(
        &self,
        current: &KioskConfig,
        patch: &ConfigPatch,
        pending: bool,
    ) -> SaveOutcome {
        let span = info_span!("usecase.save_config.execute");

        async {
            let mut updated = current.clone();
            updated.apply(patch);

            let changes = ConfigDiff::diff(current, &updated);
            info!(changed_fields = %changes.to_log_string(), "Updating kiosk configuration");

            let write = if pending {
                ConfigPatch::from(&updated)
            } else {
                patch.clone()
            };
            let persisted = match self.config.save(&write).await {
                Ok(()) => true,
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "Failed to persist configuration, keeping in-memory state");
                    false
                }
            };

            SaveOutcome {
                config: updated,
                persisted,
            }
        }
        .instrument(span)
        .await
    }
}

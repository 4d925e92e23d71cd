use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use kp_core::{
    config::{ConfigPatch, KioskConfig},
    ports::ConfigPort,
};

/// JSON configuration file.
///
/// The file holds a single flat object. Saving merges the patch into that
/// object key by key, so keys this version does not know about survive.
pub struct FileConfigRepository {
    path: PathBuf,
}

impl FileConfigRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create config dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Write to a sibling temp file, then rename over the target.
    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp config failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp config to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Raw stored object. Anything unreadable is reported as an error and
    /// left to the caller to soften.
    async fn read_object(&self) -> Result<Option<Map<String, Value>>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read config failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Value>(&content)
            .with_context(|| format!("parse config failed: {}", self.path.display()))?
        {
            Value::Object(map) => Ok(Some(map)),
            other => anyhow::bail!(
                "config root is not an object ({}): {}",
                json_kind(&other),
                self.path.display()
            ),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl ConfigPort for FileConfigRepository {
    async fn load(&self) -> KioskConfig {
        match self.read_object().await {
            Ok(Some(map)) => ConfigPatch::from_json_object(&map).resolve(),
            Ok(None) => {
                debug!(path = %self.path.display(), "no stored config, using defaults");
                KioskConfig::default()
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "config unreadable, using defaults");
                KioskConfig::default()
            }
        }
    }

    async fn save(&self, patch: &ConfigPatch) -> Result<()> {
        let mut stored = match self.read_object().await {
            Ok(map) => map.unwrap_or_default(),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "replacing unreadable config");
                Map::new()
            }
        };

        let Value::Object(updates) =
            serde_json::to_value(patch).context("serialize config patch failed")?
        else {
            anyhow::bail!("config patch did not serialize to an object");
        };
        stored.extend(updates);

        let content = serde_json::to_string_pretty(&Value::Object(stored))
            .context("serialize config failed")?;
        self.atomic_write(&content).await
    }
}

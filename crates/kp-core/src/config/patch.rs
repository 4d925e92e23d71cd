use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::model::{ContentSource, KioskConfig};

/// Partial configuration.
///
/// This is the shape persisted on disk and the payload of `save_config`.
/// Absent fields are left untouched when the patch is merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_display: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_source: Option<ContentSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_clicks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_input_lock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_reload_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_reload_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_start: Option<bool>,
}

fn field<T: serde::de::DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    object
        .get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

impl ConfigPatch {
    /// Patch carrying only the display index.
    pub fn display(index: usize) -> Self {
        Self {
            last_display: Some(index),
            ..Default::default()
        }
    }

    /// Read a patch out of a raw JSON object, one field at a time.
    ///
    /// A field with the wrong type is treated as missing instead of
    /// invalidating the whole record. Unknown keys are ignored.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        Self {
            last_display: field(object, "lastDisplay"),
            content_source: field(object, "contentSource"),
            block_clicks: field(object, "blockClicks"),
            strict_input_lock: field(object, "strictInputLock"),
            auto_reload_enabled: field(object, "autoReloadEnabled"),
            auto_reload_hours: field(object, "autoReloadHours"),
            auto_start: field(object, "autoStart"),
        }
    }

    /// Override `self` with every field `newer` provides.
    pub fn merge(self, newer: ConfigPatch) -> Self {
        Self {
            last_display: newer.last_display.or(self.last_display),
            content_source: newer.content_source.or(self.content_source),
            block_clicks: newer.block_clicks.or(self.block_clicks),
            strict_input_lock: newer.strict_input_lock.or(self.strict_input_lock),
            auto_reload_enabled: newer.auto_reload_enabled.or(self.auto_reload_enabled),
            auto_reload_hours: newer.auto_reload_hours.or(self.auto_reload_hours),
            auto_start: newer.auto_start.or(self.auto_start),
        }
    }

    /// Fill every missing field with its default.
    pub fn resolve(self) -> KioskConfig {
        let defaults = KioskConfig::default();
        KioskConfig {
            last_display: self.last_display.unwrap_or(defaults.last_display),
            content_source: self.content_source.unwrap_or(defaults.content_source),
            block_clicks: self.block_clicks.unwrap_or(defaults.block_clicks),
            strict_input_lock: self.strict_input_lock.unwrap_or(defaults.strict_input_lock),
            auto_reload_enabled: self
                .auto_reload_enabled
                .unwrap_or(defaults.auto_reload_enabled),
            auto_reload_hours: self.auto_reload_hours.unwrap_or(defaults.auto_reload_hours),
            auto_start: self.auto_start.unwrap_or(defaults.auto_start),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ConfigPatch::default()
    }
}

impl From<&KioskConfig> for ConfigPatch {
    fn from(config: &KioskConfig) -> Self {
        Self {
            last_display: Some(config.last_display),
            content_source: Some(config.content_source.clone()),
            block_clicks: Some(config.block_clicks),
            strict_input_lock: Some(config.strict_input_lock),
            auto_reload_enabled: Some(config.auto_reload_enabled),
            auto_reload_hours: Some(config.auto_reload_hours),
            auto_start: Some(config.auto_start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_prefers_newer_fields() {
        let base = ConfigPatch {
            last_display: Some(1),
            block_clicks: Some(true),
            ..Default::default()
        };
        let newer = ConfigPatch {
            block_clicks: Some(false),
            auto_reload_hours: Some(2.0),
            ..Default::default()
        };

        let merged = base.merge(newer);
        assert_eq!(merged.last_display, Some(1));
        assert_eq!(merged.block_clicks, Some(false));
        assert_eq!(merged.auto_reload_hours, Some(2.0));
        assert_eq!(merged.content_source, None);
    }

    #[test]
    fn merge_is_idempotent() {
        let base = ConfigPatch::display(3);
        let patch = ConfigPatch {
            content_source: Some(ContentSource::folder("/media")),
            ..Default::default()
        };

        let once = base.clone().merge(patch.clone());
        let twice = once.clone().merge(patch);
        assert_eq!(once, twice);
    }

    #[test]
    fn resolve_fills_defaults() {
        let config = ConfigPatch::display(4).resolve();
        let defaults = KioskConfig::default();
        assert_eq!(config.last_display, 4);
        assert_eq!(config.block_clicks, defaults.block_clicks);
        assert_eq!(config.content_source, defaults.content_source);
        assert_eq!(ConfigPatch::default().resolve(), defaults);
    }

    #[test]
    fn from_json_object_ignores_mistyped_fields() {
        let raw = json!({
            "lastDisplay": "two",
            "blockClicks": false,
            "autoReloadHours": 1.5,
            "contentSource": { "folderPath": "/srv/loop" },
            "somethingElse": 42
        });
        let patch = ConfigPatch::from_json_object(raw.as_object().unwrap());

        assert_eq!(patch.last_display, None);
        assert_eq!(patch.block_clicks, Some(false));
        assert_eq!(patch.auto_reload_hours, Some(1.5));
        assert_eq!(patch.content_source, Some(ContentSource::folder("/srv/loop")));
    }

    #[test]
    fn serializes_only_present_fields() {
        let value = serde_json::to_value(ConfigPatch::display(1)).unwrap();
        assert_eq!(value, json!({ "lastDisplay": 1 }));
    }

    #[test]
    fn deserializes_partial_payload() {
        let patch: ConfigPatch =
            serde_json::from_value(json!({ "autoStart": true, "strictInputLock": true })).unwrap();
        assert_eq!(patch.auto_start, Some(true));
        assert_eq!(patch.strict_input_lock, Some(true));
        assert!(patch.last_display.is_none());
        assert!(!patch.is_empty());
        assert!(ConfigPatch::default().is_empty());
    }

    #[test]
    fn full_config_round_trips_through_patch() {
        let mut config = KioskConfig::default();
        config.last_display = 2;
        config.auto_start = true;
        assert_eq!(ConfigPatch::from(&config).resolve(), config);
    }
}

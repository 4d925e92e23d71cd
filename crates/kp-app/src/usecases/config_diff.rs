use kp_core::config::{ContentSource, KioskConfig};

/// Field-level changes between two configurations, for logging.
#[derive(Debug, Default, PartialEq)]
pub struct ConfigDiff {
    changes: Vec<(&'static str, String, String)>,
}

fn describe_source(source: &ContentSource) -> String {
    match source {
        ContentSource::RemoteUrl(url) => format!("remote({url})"),
        ContentSource::FolderPath(path) => format!("folder({})", path.display()),
    }
}

impl ConfigDiff {
    pub fn diff(old: &KioskConfig, new: &KioskConfig) -> Self {
        let mut diff = Self::default();
        diff.push("last_display", &old.last_display, &new.last_display);
        if old.content_source != new.content_source {
            diff.changes.push((
                "content_source",
                describe_source(&old.content_source),
                describe_source(&new.content_source),
            ));
        }
        diff.push("block_clicks", &old.block_clicks, &new.block_clicks);
        diff.push(
            "strict_input_lock",
            &old.strict_input_lock,
            &new.strict_input_lock,
        );
        diff.push(
            "auto_reload_enabled",
            &old.auto_reload_enabled,
            &new.auto_reload_enabled,
        );
        diff.push(
            "auto_reload_hours",
            &old.auto_reload_hours,
            &new.auto_reload_hours,
        );
        diff.push("auto_start", &old.auto_start, &new.auto_start);
        diff
    }

    fn push<T: PartialEq + ToString>(&mut self, field: &'static str, old: &T, new: &T) {
        if old != new {
            self.changes.push((field, old.to_string(), new.to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn to_log_string(&self) -> String {
        if self.changes.is_empty() {
            return "(no changes)".to_string();
        }
        self.changes
            .iter()
            .map(|(field, old, new)| format!("{field}: {old} → {new}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

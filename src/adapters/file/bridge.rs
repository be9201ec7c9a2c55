//! Snapshot bridge backed by one JSON file
//!
//! The file is written by one producer and read here; the last writer wins.
//! A file that fails to parse is treated exactly like a missing one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::core::ports::{BridgeError, STALE_AFTER_MS, SnapshotRead, SnapshotStore};

/// Source tag stamped on every write
pub const BRIDGE_SOURCE: &str = "cmmc-query";

const EXPORTED_AT_KEY: &str = "_exportedAt";
const SOURCE_KEY: &str = "_source";

/// Key fragments that mark a field as credential-shaped
const SENSITIVE_KEY_FRAGMENTS: [&str; 7] =
    ["password", "passwd", "secret", "token", "apikey", "credential", "privatekey"];

/// Snapshot store over a single file
#[derive(Debug, Clone)]
pub struct FileSnapshotBridge {
    path: PathBuf,
}

impl FileSnapshotBridge {
    /// Create a bridge over the given handoff path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The handoff file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp and write a payload as of `now`
    pub fn write_at(&self, payload: Value, now: DateTime<Utc>) -> Result<Value, BridgeError> {
        let Value::Object(mut object) = payload else {
            return Err(BridgeError::InvalidPayload("snapshot must be a JSON object".to_string()));
        };

        object.insert(
            EXPORTED_AT_KEY.to_string(),
            Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        object.insert(SOURCE_KEY.to_string(), Value::String(BRIDGE_SOURCE.to_string()));
        let stamped = Value::Object(object);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&stamped)?)?;
        log::debug!("Wrote assessment snapshot to {}", self.path.display());

        Ok(stamped)
    }

    fn load(&self) -> Option<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Cannot read snapshot {}: {e}", self.path.display());
                return None;
            },
        };

        match serde_json::from_str(&content) {
            Ok(Value::Object(object)) => Some(object),
            Ok(_) => {
                log::warn!("Snapshot {} is not a JSON object", self.path.display());
                None
            },
            Err(e) => {
                log::warn!("Snapshot {} is not valid JSON: {e}", self.path.display());
                None
            },
        }
    }
}

impl SnapshotStore for FileSnapshotBridge {
    fn read_at(&self, now: DateTime<Utc>) -> SnapshotRead {
        let Some(object) = self.load() else {
            return SnapshotRead::Absent;
        };

        let exported_at = object.get(EXPORTED_AT_KEY).and_then(Value::as_str).map(String::from);
        let exported = exported_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let Some(exported) = exported else {
            return SnapshotRead::Stale {
                age_minutes: None,
                exported_at,
            };
        };

        let age_ms = (now - exported).num_milliseconds();
        if age_ms > STALE_AFTER_MS {
            return SnapshotRead::Stale {
                age_minutes: Some(age_ms / 60_000),
                exported_at,
            };
        }

        SnapshotRead::Fresh(redact(Value::Object(object)))
    }

    fn write(&self, payload: Value) -> Result<Value, BridgeError> {
        self.write_at(payload, Utc::now())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let normalized: String =
        key.chars().filter(char::is_ascii_alphanumeric).map(|c| c.to_ascii_lowercase()).collect();
    SENSITIVE_KEY_FRAGMENTS.iter().any(|fragment| normalized.contains(fragment))
}

/// Recursively drop credential-shaped keys
#[must_use]
pub fn redact(value: Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .filter(|(key, _)| !is_sensitive_key(key))
                .map(|(key, value)| (key, redact(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(redact).collect()),
        other => other,
    }
}

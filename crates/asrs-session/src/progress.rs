use asrs_core::models::session::{ProgressRecord, SessionState, RECORD_VERSION};
use asrs_core::storage_keys;
use asrs_storage::error::StorageError;
use asrs_storage::state;
use asrs_storage::KeyValueStore;
use serde_json::Value;

use crate::error::SessionError;

/// Saved progress older than this is ignored on load.
pub const STALENESS_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Persists the session as one JSON record. Never fails outward: storage
/// problems are logged and read as "nothing saved".
pub struct ProgressStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, storage_keys::PROGRESS)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn save(&self, session: &SessionState) {
        self.save_at(session, jiff::Timestamp::now()).await
    }

    /// Save `session` stamped with `now`.
    pub async fn save_at(&self, session: &SessionState, now: jiff::Timestamp) {
        let record = ProgressRecord::stamp(session, now);
        match state::save_state(&self.store, &self.key, &record).await {
            Ok(()) => tracing::debug!(
                key = %self.key,
                current_index = record.current_index,
                answered = record.answers.len(),
                "progress saved"
            ),
            Err(e) => tracing::warn!(error = %e, key = %self.key, "failed to save progress"),
        }
    }

    pub async fn load(&self) -> Option<SessionState> {
        self.load_at(jiff::Timestamp::now()).await
    }

    /// Load saved progress as of `now`. `None` when nothing is saved, the
    /// store fails, the record is unreadable, or it is stale.
    pub async fn load_at(&self, now: jiff::Timestamp) -> Option<SessionState> {
        let raw = match state::load_raw(&self.store, &self.key).await {
            Ok(raw) => raw,
            Err(StorageError::NotFound { .. }) => {
                tracing::debug!(key = %self.key, "no saved progress");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "failed to read saved progress");
                return None;
            }
        };

        let record = match decode(raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "discarding unreadable progress record");
                return None;
            }
        };

        if !is_fresh(record.saved_at, now) {
            tracing::info!(saved_at = %record.saved_at, "saved progress is stale, starting fresh");
            return None;
        }

        tracing::info!(
            current_index = record.current_index,
            answered = record.answers.len(),
            "restored saved progress"
        );
        Some(record.into_state())
    }

    pub async fn clear(&self) {
        match self.store.remove(&self.key).await {
            Ok(()) => tracing::debug!(key = %self.key, "progress cleared"),
            Err(e) => tracing::warn!(error = %e, key = %self.key, "failed to clear progress"),
        }
    }
}

/// True while `now - saved_at` is strictly under the staleness window.
/// A `saved_at` ahead of `now` counts as fresh.
pub fn is_fresh(saved_at: jiff::Timestamp, now: jiff::Timestamp) -> bool {
    now.as_millisecond() - saved_at.as_millisecond() < STALENESS_WINDOW_MS
}

fn decode(raw: Value) -> Result<ProgressRecord, SessionError> {
    let on_disk_version = match raw.get("record_version") {
        None => 0,
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| SessionError::Migration(format!("unsupported record_version {v}")))?,
    };

    let migrated = migrate(raw, on_disk_version)?;
    let record: ProgressRecord = serde_json::from_value(migrated)?;
    record.validate()?;
    Ok(record)
}

/// Run sequential migrations from `from_version` up to [`RECORD_VERSION`].
fn migrate(mut raw: Value, from_version: u32) -> Result<Value, SessionError> {
    if from_version > RECORD_VERSION {
        return Err(SessionError::Migration(format!(
            "record_version {from_version} is newer than this build supports ({RECORD_VERSION})"
        )));
    }

    // v0 → v1: the mobile build stored `currentQuestion` and an epoch-millisecond
    // `timestamp`; answers were already an object keyed by id.
    if from_version < 1 {
        let obj = raw
            .as_object_mut()
            .ok_or_else(|| SessionError::Migration("record is not a JSON object".to_string()))?;

        if let Some(index) = obj.remove("currentQuestion") {
            obj.insert("current_index".to_string(), index);
        }
        if let Some(millis) = obj.remove("timestamp") {
            let millis = millis.as_i64().ok_or_else(|| {
                SessionError::Migration("timestamp is not an integer".to_string())
            })?;
            let saved_at = jiff::Timestamp::from_millisecond(millis)
                .map_err(|e| SessionError::Migration(e.to_string()))?;
            obj.insert("saved_at".to_string(), Value::String(saved_at.to_string()));
        }
        obj.insert("record_version".to_string(), Value::Number(1.into()));
        tracing::info!("migrated progress record v0 → v1");
    }

    Ok(raw)
}

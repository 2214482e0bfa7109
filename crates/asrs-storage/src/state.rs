use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::objects::KeyValueStore;

/// Load a JSON record and deserialize it.
pub async fn load_state<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<T, StorageError> {
    let body = store.get(key).await?;
    let value: T = serde_json::from_slice(&body)?;
    Ok(value)
}

/// Load a JSON record as an untyped value, for callers that migrate older
/// layouts before deserializing.
pub async fn load_raw(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<serde_json::Value, StorageError> {
    load_state(store, key).await
}

/// Serialize a value as pretty JSON and save it under `key`.
pub async fn save_state<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.set(key, body).await
}

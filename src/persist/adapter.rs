use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::KeyValueBackend;
use crate::core::{DashboardError, Result};

/// Loads and parses the collection document stored under `key`.
///
/// This never fails: an absent key, a backend read error, and a malformed
/// payload all yield an empty vec. Errors are logged and swallowed so that
/// broken stored state cannot block startup; the caller falls back to its
/// seed data.
pub async fn load_collection<T: DeserializeOwned>(
    backend: &dyn KeyValueBackend,
    key: &str,
) -> Vec<T> {
    let payload = match backend.read(key).await {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("Failed to read collection '{}': {}", key, err);
            return Vec::new();
        }
    };

    match serde_json::from_str(&payload) {
        Ok(items) => items,
        Err(err) => {
            warn!("Discarding malformed collection '{}': {}", key, err);
            Vec::new()
        }
    }
}

/// Serializes the whole collection as pretty JSON and overwrites the
/// payload stored under `key`. There is no merge path: every save rewrites
/// the full document.
pub async fn save_collection<T: Serialize>(
    backend: &dyn KeyValueBackend,
    key: &str,
    items: &[T],
) -> Result<()> {
    let payload = serde_json::to_string_pretty(items).map_err(|err| {
        DashboardError::Serialization(format!(
            "Failed to encode collection '{}': {}",
            key, err
        ))
    })?;
    backend.write(key, &payload).await
}

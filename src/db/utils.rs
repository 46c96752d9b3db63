use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use super::KeyValueStore;

/// Reads a JSON value, falling back when the key is absent, unreadable or
/// does not parse.
pub async fn load_json<S, T, F>(store: &S, key: &str, fallback: F) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "stored value does not parse, using default");
                fallback()
            }
        },
        Ok(None) => fallback(),
        Err(err) => {
            warn!(key, error = %err, "failed to read stored value, using default");
            fallback()
        }
    }
}

pub async fn save_json<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize value for key '{}'", key))?;
    store.set(key, &raw).await
}

/// Fire-and-forget write: failures are logged, never surfaced.
pub async fn persist<S, T>(store: &S, key: &str, value: &T)
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    if let Err(err) = save_json(store, key, value).await {
        warn!(key, error = %err, "failed to persist value");
    }
}

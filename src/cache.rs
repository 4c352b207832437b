use rand::RngExt;
use serde::Deserialize;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

use crate::{MiniMateError, Result};

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: u64, // Unix timestamp (seconds)
}

/// Opens the database shared by the response cache and the profile store
pub fn open_database(path: impl AsRef<Path>) -> Result<fjall::Database> {
    fjall::Database::builder(path.as_ref())
        .open()
        .map_err(|e| MiniMateError::cache(format!("Failed to open database: {e}")))
}

/// Scale a TTL by a random factor in [0.9, 1.1) so entries don't expire together
#[must_use]
pub fn jittered(ttl: Duration) -> Duration {
    let jitter: f64 = rand::rng().random_range(0.9..1.1);
    ttl.mul_f64(jitter)
}

fn cache_error(e: impl ToString) -> MiniMateError {
    MiniMateError::cache(e.to_string())
}

fn get_from_store(store: fjall::Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key).map_err(cache_error)?.map(|v| v.to_vec()))
}

/// Key-value store with per-entry expiry
#[derive(Clone)]
pub struct PersistentCache {
    _db: fjall::Database,
    store: fjall::Keyspace,
}

impl PersistentCache {
    pub fn new(db: &fjall::Database) -> Result<Self> {
        let store = db
            .keyspace("cache", fjall::KeyspaceCreateOptions::default)
            .map_err(cache_error)?;
        Ok(PersistentCache {
            _db: db.clone(),
            store,
        })
    }

    /// Stores a serializable value with a time-to-live (TTL).
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = SystemTime::now()
            .checked_add(ttl)
            .ok_or_else(|| MiniMateError::cache("TTL overflow"))?
            .duration_since(UNIX_EPOCH)
            .map_err(cache_error)?
            .as_secs();
        let entry = StoredEntry { value, expires_at };
        let bytes = postcard::to_stdvec(&entry).map_err(cache_error)?;

        task::spawn_blocking(move || store.insert(key, bytes))
            .await
            .map_err(cache_error)?
            .map_err(cache_error)?;
        Ok(())
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key_bytes))
                .await
                .map_err(cache_error)??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("Key not found");
            return Ok(None);
        };

        let entry: StoredEntry<T> = match postcard::from_bytes(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                // Entries written by an older layout are treated as misses
                tracing::warn!("Dropping undecodable cache entry: {}", e);
                self.remove(key).await?;
                return Ok(None);
            }
        };
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(cache_error)?
            .as_secs();

        if now < entry.expires_at {
            tracing::debug!("Key found and still fresh");
            Ok(Some(entry.value))
        } else {
            tracing::debug!("Key found but expired");
            self.remove(key).await?;
            Ok(None)
        }
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key))
            .await
            .map_err(cache_error)?
            .map_err(cache_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_cache() -> (tempfile::TempDir, PersistentCache) {
        let dir = tempfile::tempdir().unwrap();
        let db = open_database(dir.path()).unwrap();
        let cache = PersistentCache::new(&db).unwrap();
        (dir, cache)
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (_dir, cache) = open_cache();
        cache
            .put("weather:current:47.37:8.54", vec![1.5f64, 2.5], Duration::from_secs(60))
            .await
            .unwrap();

        let value: Option<Vec<f64>> = cache.get("weather:current:47.37:8.54").await.unwrap();
        assert_eq!(value, Some(vec![1.5, 2.5]));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let (_dir, cache) = open_cache();
        let value: Option<String> = cache.get("nothing-here").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let (_dir, cache) = open_cache();
        cache
            .put("short-lived", "value".to_string(), Duration::ZERO)
            .await
            .unwrap();

        let value: Option<String> = cache.get("short-lived").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let (_dir, cache) = open_cache();
        cache
            .put("key", 42u32, Duration::from_secs(60))
            .await
            .unwrap();
        cache.remove("key").await.unwrap();
        let value: Option<u32> = cache.get("key").await.unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_jitter_stays_within_ten_percent() {
        let base = Duration::from_secs(900);
        for _ in 0..100 {
            let ttl = jittered(base);
            assert!(ttl >= Duration::from_secs(810));
            assert!(ttl < Duration::from_secs(990));
        }
    }
}

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::PostNLResult;

/// Key-value store for raw HTTP responses.
///
/// Values are responses rendered with [`crate::http::ToHttpString`]. Implementations decide
/// how the time-to-live is enforced; `None` means the entry does not expire.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored value, or `None` on a miss or after expiry.
    async fn get(&self, key: &str) -> PostNLResult<Option<String>>;

    /// Stores a value immediately.
    async fn save(&self, key: &str, value: String, ttl: Option<Duration>) -> PostNLResult<()>;

    /// Queues a value; it becomes visible after the next [`CacheStore::commit`].
    async fn save_deferred(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> PostNLResult<()>;

    /// Persists every deferred value.
    async fn commit(&self) -> PostNLResult<()>;
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(value: String, ttl: Option<Duration>) -> Self {
        Entry {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    deferred: Vec<(String, Entry)>,
}

impl Inner {
    fn prune(&mut self, now: Instant) {
        self.entries.retain(|_, entry| !entry.is_expired(now));
    }
}

/// In-process [`CacheStore`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    inner: Mutex<Inner>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed, unexpired entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let inner = self.inner.lock().await;
        inner
            .entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    /// Returns whether the cache holds no committed, unexpired entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> PostNLResult<Option<String>> {
        let now = Instant::now();
        let mut inner = self.inner.lock().await;
        let expired = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            inner.entries.remove(key);
        }
        Ok(None)
    }

    async fn save(&self, key: &str, value: String, ttl: Option<Duration>) -> PostNLResult<()> {
        let mut inner = self.inner.lock().await;
        inner.prune(Instant::now());
        inner.entries.insert(key.to_string(), Entry::new(value, ttl));
        Ok(())
    }

    async fn save_deferred(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> PostNLResult<()> {
        let mut inner = self.inner.lock().await;
        inner.deferred.push((key.to_string(), Entry::new(value, ttl)));
        Ok(())
    }

    async fn commit(&self) -> PostNLResult<()> {
        let mut inner = self.inner.lock().await;
        let deferred = std::mem::take(&mut inner.deferred);
        inner.prune(Instant::now());
        inner.entries.extend(deferred);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn entries_expire_after_their_ttl() {
        let cache = MemoryCache::new();
        cache
            .save("short", "a".to_string(), Some(Duration::from_millis(20)))
            .await
            .unwrap();
        cache.save("forever", "b".to_string(), None).await.unwrap();

        assert_eq!(cache.get("short").await.unwrap().as_deref(), Some("a"));
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.get("short").await.unwrap(), None);
        assert_eq!(cache.get("forever").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn writes_drop_expired_entries() {
        let cache = MemoryCache::new();
        let ttl = Some(Duration::from_millis(20));
        cache.save("a", "a".to_string(), ttl).await.unwrap();
        cache.save("b", "b".to_string(), ttl).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        cache.save("c", "c".to_string(), None).await.unwrap();
        assert_eq!(cache.inner.lock().await.entries.len(), 1);

        cache.save("d", "d".to_string(), ttl).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.save_deferred("e", "e".to_string(), None).await.unwrap();
        cache.commit().await.unwrap();
        let inner = cache.inner.lock().await;
        assert!(inner.entries.contains_key("c"));
        assert!(inner.entries.contains_key("e"));
        assert_eq!(inner.entries.len(), 2);
    }

    #[tokio::test]
    async fn deferred_entries_appear_on_commit() {
        let cache = MemoryCache::new();
        cache
            .save_deferred("key", "value".to_string(), None)
            .await
            .unwrap();
        assert_eq!(cache.get("key").await.unwrap(), None);
        assert!(cache.is_empty().await);

        cache.commit().await.unwrap();
        assert_eq!(cache.get("key").await.unwrap().as_deref(), Some("value"));
        assert_eq!(cache.len().await, 1);
    }
}

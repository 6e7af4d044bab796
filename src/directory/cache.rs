/**
 * Directory Read Cache
 *
 * Time-bounded cache over directory read results, keyed by query shape.
 * Only the full listing and single-id lookups are cached; search and filter
 * queries always read through.
 *
 * # Concurrency
 *
 * Entries live in a mutex-guarded map shared across all request tasks. A
 * cache miss runs its loader outside the lock, so two concurrent misses on
 * the same key may both load; both results are stored in turn and the
 * duplication heals at the next expiry. That is accepted behavior, not a
 * consistency problem: writers invalidate, they never read-modify-write.
 */

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::users::model::UserRecord;

/// Identifies a cacheable directory query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The full active-user listing
    AllUsers,
    /// A single user looked up by id
    UserById(Uuid),
}

/// A cached query result
#[derive(Debug, Clone)]
pub enum CachedQueryResult {
    Listing(Vec<UserRecord>),
    Record(UserRecord),
}

struct CacheEntry {
    value: CachedQueryResult,
    expires_at: Instant,
}

/// Shared TTL cache for directory reads
#[derive(Clone)]
pub struct DirectoryCache {
    entries: Arc<Mutex<HashMap<CacheKey, CacheEntry>>>,
    ttl: Duration,
}

impl DirectoryCache {
    /// Create a cache whose entries expire `ttl` after being stored.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Return the cached full listing, or load and cache it
    ///
    /// The loader only runs on a miss or after expiry.
    pub async fn listing_or_load<E, F, Fut>(&self, loader: F) -> Result<Vec<UserRecord>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<UserRecord>, E>>,
    {
        if let Some(CachedQueryResult::Listing(users)) = self.lookup(&CacheKey::AllUsers) {
            tracing::debug!("directory cache hit: full listing");
            return Ok(users);
        }

        let users = loader().await?;
        self.store(
            CacheKey::AllUsers,
            CachedQueryResult::Listing(users.clone()),
        );
        Ok(users)
    }

    /// Return the cached record for `id`, or load and cache it
    ///
    /// A loader returning `None` is passed through uncached, so lookup
    /// misses are never pinned for the TTL window.
    pub async fn record_or_load<E, F, Fut>(
        &self,
        id: Uuid,
        loader: F,
    ) -> Result<Option<UserRecord>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<UserRecord>, E>>,
    {
        let key = CacheKey::UserById(id);
        if let Some(CachedQueryResult::Record(user)) = self.lookup(&key) {
            tracing::debug!("directory cache hit: user {}", id);
            return Ok(Some(user));
        }

        let loaded = loader().await?;
        if let Some(user) = &loaded {
            self.store(key, CachedQueryResult::Record(user.clone()));
        }
        Ok(loaded)
    }

    /// Drop the full-listing entry if present.
    pub fn invalidate_listing(&self) {
        self.invalidate(&CacheKey::AllUsers);
    }

    /// Drop the entry for a single user if present.
    pub fn invalidate_record(&self, id: Uuid) {
        self.invalidate(&CacheKey::UserById(id));
    }

    fn invalidate(&self, key: &CacheKey) {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_some() {
            tracing::debug!("directory cache invalidated: {:?}", key);
        }
    }

    fn lookup(&self, key: &CacheKey) -> Option<CachedQueryResult> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                // Expired; drop it on the way out.
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn store(&self, key: CacheKey, value: CachedQueryResult) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.lock().unwrap().insert(key, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn user(username: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            name: username.to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "$2b$12$hash".to_string(),
            age: 25,
            university: "Colombo".to_string(),
            school: "Engineering".to_string(),
            work: "".to_string(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_listing_loads_once_within_ttl() {
        let cache = DirectoryCache::new(Duration::from_secs(60));
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            let users: Result<_, ()> = cache
                .listing_or_load(|| async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![user("alice")])
                })
                .await;
            assert_eq!(users.unwrap().len(), 1);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidated_listing_reloads() {
        let cache = DirectoryCache::new(Duration::from_secs(60));
        let loads = AtomicUsize::new(0);

        let load = || async {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(vec![user("alice")])
        };

        cache.listing_or_load(load).await.unwrap();
        cache.invalidate_listing();

        let load_again = || async {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(vec![user("alice"), user("bob")])
        };
        let users = cache.listing_or_load(load_again).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_reloads() {
        let cache = DirectoryCache::new(Duration::ZERO);
        let loads = AtomicUsize::new(0);

        for _ in 0..2 {
            let _: Result<_, ()> = cache
                .listing_or_load(|| async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![user("alice")])
                })
                .await;
        }

        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_record_cached_and_invalidated() {
        let cache = DirectoryCache::new(Duration::from_secs(60));
        let alice = user("alice");
        let id = alice.id;
        let loads = AtomicUsize::new(0);

        for _ in 0..2 {
            let got: Result<_, ()> = cache
                .record_or_load(id, || async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(Some(alice.clone()))
                })
                .await;
            assert!(got.unwrap().is_some());
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        cache.invalidate_record(id);
        let _: Result<_, ()> = cache
            .record_or_load(id, || async {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok(Some(alice.clone()))
            })
            .await;
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_lookup_miss_is_not_pinned() {
        let cache = DirectoryCache::new(Duration::from_secs(60));
        let id = Uuid::new_v4();

        let missing: Result<_, ()> = cache.record_or_load(id, || async { Ok(None) }).await;
        assert!(missing.unwrap().is_none());

        // A later load for the same id still runs and can now succeed.
        let alice = user("alice");
        let found: Result<_, ()> = cache
            .record_or_load(id, || async { Ok(Some(alice.clone())) })
            .await;
        assert!(found.unwrap().is_some());
    }
}

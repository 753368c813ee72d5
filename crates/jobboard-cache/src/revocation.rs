//! Denylist of revoked token identifiers.
//!
//! Entries carry a TTL covering the token's remaining lifetime, so the set prunes itself:
//! once a token would have expired anyway its entry is no longer needed.
//!
//! Two backends implement [`RevocationStore`]:
//!
//! - [`RedisRevocationStore`]: `SET {prefix}:revoked:{jti} 1 NX EX ttl` + `EXPIRE ... GT` / `EXISTS`
//! - [`InMemoryRevocationStore`]: bounded [`moka`] cache with per-entry expiry
//!
//! Lookups return errors instead of `false` when the store is unreachable. Callers must fail
//! closed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, info, instrument};

use crate::config::{CacheConfig, RevocationBackend};
use crate::keys;
use crate::redis::{CacheError, RedisCache};

/// Shortest TTL any entry is stored with.
pub const MIN_REVOCATION_TTL: Duration = Duration::from_secs(1);

#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Marks `jti` as revoked for at least `ttl`. Idempotent; a zero TTL is clamped to one
    /// second, and a repeat call never shortens an existing entry.
    async fn revoke(&self, jti: &str, ttl: Duration) -> Result<(), CacheError>;

    /// True iff an unexpired entry exists for `jti`.
    async fn is_revoked(&self, jti: &str) -> Result<bool, CacheError>;
}

fn clamp_ttl(ttl: Duration) -> Duration {
    ttl.max(MIN_REVOCATION_TTL)
}

pub struct RedisRevocationStore {
    cache: RedisCache,
    config: CacheConfig,
}

impl RedisRevocationStore {
    pub fn new(cache: RedisCache, config: CacheConfig) -> Self {
        Self { cache, config }
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    #[instrument(skip(self))]
    async fn revoke(&self, jti: &str, ttl: Duration) -> Result<(), CacheError> {
        let key = keys::revoked(&self.config, jti);
        self.cache.set_with_min_ttl(&key, &1u8, clamp_ttl(ttl)).await
    }

    #[instrument(skip(self))]
    async fn is_revoked(&self, jti: &str) -> Result<bool, CacheError> {
        let key = keys::revoked(&self.config, jti);
        self.cache.contains(&key).await
    }
}

/// Stores the absolute expiry instant as the value and expires each entry at it.
struct RevokedUntil;

impl moka::Expiry<String, Instant> for RevokedUntil {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Instant,
        created_at: Instant,
    ) -> Option<Duration> {
        Some(value.saturating_duration_since(created_at))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Instant,
        updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.saturating_duration_since(updated_at))
    }
}

/// Process-local store for single-instance deployments and tests.
///
/// Bounded by `max_capacity`; size it above the number of tokens revoked within the longest
/// token lifetime, otherwise the oldest entries can be dropped before they expire.
#[derive(Clone)]
pub struct InMemoryRevocationStore {
    revoked: Cache<String, Instant>,
}

impl InMemoryRevocationStore {
    pub fn new(max_capacity: u64) -> Self {
        let revoked = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(RevokedUntil)
            .build();

        Self { revoked }
    }
}

impl Default for InMemoryRevocationStore {
    fn default() -> Self {
        Self::new(100_000)
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, jti: &str, ttl: Duration) -> Result<(), CacheError> {
        let until = Instant::now() + clamp_ttl(ttl);

        // Never shorten an existing entry.
        let until = match self.revoked.get(jti).await {
            Some(existing) if existing > until => existing,
            _ => until,
        };

        self.revoked.insert(jti.to_owned(), until).await;
        debug!(jti = %jti, "Token revoked");
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, CacheError> {
        Ok(self.revoked.get(jti).await.is_some())
    }
}

/// Builds the backend selected by `REVOCATION_BACKEND`.
pub async fn build_revocation_store(
    config: &CacheConfig,
) -> Result<Arc<dyn RevocationStore>, CacheError> {
    match config.revocation_backend {
        RevocationBackend::Redis => {
            let cache = RedisCache::new(&config.redis_url).await?;
            info!("Using Redis revocation store");
            Ok(Arc::new(RedisRevocationStore::new(cache, config.clone())))
        }
        RevocationBackend::Memory => {
            info!(
                capacity = config.revocation_capacity,
                "Using in-memory revocation store"
            );
            Ok(Arc::new(InMemoryRevocationStore::new(
                config.revocation_capacity,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_revoked_before_revoke() {
        let store = InMemoryRevocationStore::default();
        assert!(!store.is_revoked("jti-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_revoked_after_revoke() {
        let store = InMemoryRevocationStore::default();
        store.revoke("jti-1", Duration::from_secs(60)).await.unwrap();

        assert!(store.is_revoked("jti-1").await.unwrap());
        assert!(!store.is_revoked("jti-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let store = InMemoryRevocationStore::default();
        store.revoke("jti-1", Duration::from_secs(60)).await.unwrap();
        store.revoke("jti-1", Duration::from_secs(60)).await.unwrap();

        assert!(store.is_revoked("jti-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let store = InMemoryRevocationStore::default();
        store.revoke("jti-short", Duration::from_secs(1)).await.unwrap();
        assert!(store.is_revoked("jti-short").await.unwrap());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        store.revoked.run_pending_tasks().await;

        assert!(!store.is_revoked("jti-short").await.unwrap());
    }

    #[tokio::test]
    async fn test_zero_ttl_is_clamped() {
        let store = InMemoryRevocationStore::default();
        store.revoke("jti-zero", Duration::ZERO).await.unwrap();

        assert!(store.is_revoked("jti-zero").await.unwrap());
    }

    #[tokio::test]
    async fn test_shorter_revoke_does_not_shorten_entry() {
        let store = InMemoryRevocationStore::default();
        store.revoke("jti-1", Duration::from_secs(60)).await.unwrap();
        store.revoke("jti-1", Duration::ZERO).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(store.is_revoked("jti-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_build_memory_backend() {
        let config = CacheConfig {
            revocation_backend: RevocationBackend::Memory,
            ..CacheConfig::default()
        };
        let store = build_revocation_store(&config).await.unwrap();

        store.revoke("jti-1", Duration::from_secs(60)).await.unwrap();
        assert!(store.is_revoked("jti-1").await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_redis_revocation() {
        let config = CacheConfig::default();
        let store = build_revocation_store(&config).await.unwrap();
        let jti = format!("test-{:?}", Instant::now());

        assert!(!store.is_revoked(&jti).await.unwrap());
        store.revoke(&jti, Duration::from_secs(5)).await.unwrap();
        assert!(store.is_revoked(&jti).await.unwrap());
    }
}

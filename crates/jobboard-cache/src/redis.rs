//! Redis client shared by the API.

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Redis client over a multiplexed, auto-reconnecting connection.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RedisCache {
    /// Connects to Redis.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the URL is invalid or the server is unreachable.
    pub async fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }

    /// Stores `value` under `key` for at least `ttl`. Sub-second TTLs round up to one second.
    ///
    /// Runs `SET key <json> NX EX ttl` and `EXPIRE key ttl GT` in one transaction, so a repeat
    /// call can extend an existing entry but never shorten it. `GT` needs Redis 7.
    #[instrument(skip(self, value), fields(cache.operation = "SET NX EX + EXPIRE GT"))]
    pub async fn set_with_min_ttl<T>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(value)?;
        let secs = ttl.as_secs().max(1);

        let _: () = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(key)
            .arg(json)
            .arg("NX")
            .arg("EX")
            .arg(secs)
            .ignore()
            .cmd("EXPIRE")
            .arg(key)
            .arg(secs)
            .arg("GT")
            .ignore()
            .query_async(&mut conn)
            .await?;

        debug!(cache.key = %key, cache.ttl_secs = %secs, "Cache set");

        Ok(())
    }

    /// `EXISTS key`. Unlike a cache read, a failure here is an error, not a miss.
    #[instrument(skip(self), fields(cache.operation = "EXISTS"))]
    pub async fn contains(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();
        let exists = conn.exists::<_, bool>(key).await?;

        debug!(cache.key = %key, cache.exists = exists, "Cache exists");

        Ok(exists)
    }
}

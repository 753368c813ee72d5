//! Cache and revocation store configuration.

use std::env;

/// Which backend holds revoked token identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RevocationBackend {
    /// Shared Redis instance, required when more than one API process runs.
    #[default]
    Redis,
    /// Process-local cache. Revocations are lost on restart.
    Memory,
}

impl RevocationBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Some(Self::Redis),
            "memory" | "in-memory" | "inmemory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Redis and revocation settings loaded from environment variables.
///
/// # Environment Variables
///
/// - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
/// - `CACHE_PREFIX`: Prefix for all keys (default: `jobboard`)
/// - `REVOCATION_BACKEND`: `redis` (default) or `memory`
/// - `REVOCATION_CAPACITY`: Entry bound for the in-memory backend (default: `100000`)
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub redis_url: String,
    pub key_prefix: String,
    pub revocation_backend: RevocationBackend,
    pub revocation_capacity: u64,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let revocation_backend = match env::var("REVOCATION_BACKEND") {
            Ok(value) => RevocationBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown REVOCATION_BACKEND, falling back to redis");
                RevocationBackend::Redis
            }),
            Err(_) => RevocationBackend::Redis,
        };

        Self {
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
            key_prefix: env::var("CACHE_PREFIX").unwrap_or_else(|_| "jobboard".into()),
            revocation_backend,
            revocation_capacity: env::var("REVOCATION_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100_000),
        }
    }

    /// Build a prefixed key.
    ///
    /// ```ignore
    /// let key = CacheConfig::default().prefixed_key("revoked:abc");
    /// // "jobboard:revoked:abc"
    /// ```
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".into(),
            key_prefix: "jobboard".into(),
            revocation_backend: RevocationBackend::Redis,
            revocation_capacity: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!(RevocationBackend::parse("redis"), Some(RevocationBackend::Redis));
        assert_eq!(RevocationBackend::parse(" Memory "), Some(RevocationBackend::Memory));
        assert_eq!(RevocationBackend::parse("memcached"), None);
    }

    #[test]
    fn test_prefixed_key() {
        let config = CacheConfig::default();
        assert_eq!(config.prefixed_key("revoked:abc"), "jobboard:revoked:abc");
    }
}

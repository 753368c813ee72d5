//! # Jobboard Cache
//!
//! Redis access and the token revocation store for the Jobboard API.
//!
//! # Example
//!
//! ```ignore
//! use jobboard_cache::{CacheConfig, build_revocation_store};
//!
//! let store = build_revocation_store(&CacheConfig::from_env()).await?;
//! store.revoke(&claims.jti, Duration::from_secs(3600)).await?;
//! assert!(store.is_revoked(&claims.jti).await?);
//! ```

pub mod config;
pub mod keys;
pub mod redis;
pub mod revocation;

pub use config::{CacheConfig, RevocationBackend};
pub use self::redis::{CacheError, RedisCache};
pub use revocation::{
    InMemoryRevocationStore, RedisRevocationStore, RevocationStore, build_revocation_store,
};

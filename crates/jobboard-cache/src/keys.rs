//! Key layout for everything the API stores in Redis.

use crate::CacheConfig;

/// Key for a revoked token identifier: `{prefix}:revoked:{jti}`.
pub fn revoked(config: &CacheConfig, jti: &str) -> String {
    config.prefixed_key(&format!("revoked:{jti}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revoked_key() {
        let config = CacheConfig::default();
        assert_eq!(
            revoked(&config, "0d6f1c52-0c55-4a34-a1b4-6d5a4f2b9e10"),
            "jobboard:revoked:0d6f1c52-0c55-4a34-a1b4-6d5a4f2b9e10"
        );
    }
}

use std::sync::Arc;

use anyhow::Context;

use jobboard_auth::TokenCodec;
use jobboard_cache::{CacheConfig, RevocationStore, build_revocation_store};
use jobboard_config::{CorsConfig, EmailConfig, JwtConfig};
use jobboard_db::{ApplicationRepository, JobRepository, PgRepository, UserRepository, init_db_pool};

use crate::utils::email::EmailService;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub revocations: Arc<dyn RevocationStore>,
    pub tokens: TokenCodec,
    pub jwt_config: JwtConfig,
    pub email: EmailService,
    pub cors_config: CorsConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("email", &self.email)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires one store implementing every repository trait.
    pub fn new<R>(
        repository: R,
        revocations: Arc<dyn RevocationStore>,
        jwt_config: JwtConfig,
        email_config: EmailConfig,
        cors_config: CorsConfig,
    ) -> anyhow::Result<Self>
    where
        R: UserRepository + JobRepository + ApplicationRepository + Clone + 'static,
    {
        let tokens = TokenCodec::new(&jwt_config).context("Invalid JWT configuration")?;

        Ok(Self {
            users: Arc::new(repository.clone()),
            jobs: Arc::new(repository.clone()),
            applications: Arc::new(repository),
            revocations,
            tokens,
            jwt_config,
            email: EmailService::new(email_config),
            cors_config,
        })
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    let revocations = build_revocation_store(&CacheConfig::from_env())
        .await
        .context("Failed to initialize revocation store")?;

    AppState::new(
        PgRepository::new(pool),
        revocations,
        JwtConfig::from_env(),
        EmailConfig::from_env(),
        CorsConfig::from_env(),
    )
}

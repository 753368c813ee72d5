//! # Jobboard DB
//!
//! Database pool and repositories for the Jobboard API.
//!
//! Handlers and services talk to the [`UserRepository`], [`JobRepository`] and
//! [`ApplicationRepository`] traits. [`PgRepository`] implements all three over a
//! PostgreSQL pool; with the `test-utils` feature, [`InMemoryStore`] implements them over
//! process memory.
//!
//! # Example
//!
//! ```ignore
//! use jobboard_db::{PgRepository, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let repo = PgRepository::new(pool);
//! let user = repo.find_by_email("a@x.com").await?;
//! ```

#[cfg(feature = "test-utils")]
pub mod memory;
pub mod postgres;
pub mod repository;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

#[cfg(feature = "test-utils")]
pub use memory::InMemoryStore;
pub use postgres::PgRepository;
pub use repository::{ApplicationRepository, JobRepository, UserRepository};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects to PostgreSQL and runs pending migrations.
///
/// # Errors
///
/// Fails if the database is unreachable or a migration does not apply.
pub async fn init_db_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;
    info!("Database connected and migrations applied");

    Ok(pool)
}

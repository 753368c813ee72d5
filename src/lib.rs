//! # Jobboard API
//!
//! A job board REST API built with Rust, Axum and PostgreSQL. Employers list jobs, job
//! seekers apply to them, and every protected route sits behind revocable JWTs.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Admin account creation
//! ├── middleware/       # Token guard, identity resolver and role gate extractors
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Signup, login, refresh, logout, verification, password reset
//! │   ├── users/       # Account management
//! │   ├── jobs/        # Job listings
//! │   └── applications/ # Job applications
//! └── utils/           # Email delivery, id parsing
//! ```
//!
//! Each feature module has a `router.rs`, a `controller.rs` with the HTTP handlers and a
//! `service.rs` with the business rules. Persistence goes through the repository traits in
//! `jobboard-db`; token revocation through the `RevocationStore` in `jobboard-cache`.
//!
//! ## Authentication
//!
//! - **Access token**: short-lived, carries the account role, accepted by protected routes
//! - **Refresh token**: long-lived, only accepted by `/api/v1/auth/refresh_token`
//! - **Purpose tokens**: single-use email verification and password reset links
//!
//! Logging out revokes the token's `jti` until the token would have expired anyway.
//!
//! ## Roles
//!
//! | Role | Can |
//! |------|-----|
//! | user | Browse jobs, apply |
//! | employer | Browse jobs, list and manage own jobs |
//! | admin | Everything an employer can; created via CLI only |
//!
//! ```bash
//! cargo run --bin jobboard-cli -- create-admin --username root --email admin@example.com --password 'long-enough'
//! ```
//!
//! API documentation is served at `/swagger-ui` and `/scalar` while the server runs.

pub mod cli;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

pub use jobboard_auth;
pub use jobboard_cache;
pub use jobboard_config;
pub use jobboard_core;
pub use jobboard_db;
pub use jobboard_models;

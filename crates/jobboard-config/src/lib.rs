//! # Jobboard Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing key, algorithm and lifetimes
//! - [`email`]: SMTP delivery settings
//! - [`cors`]: allowed browser origins
//! - [`server`]: bind address and log directory
//!
//! # Example
//!
//! ```ignore
//! use jobboard_config::{JwtConfig, EmailConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let email_config = EmailConfig::from_env();
//! ```

pub mod cors;
pub mod email;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

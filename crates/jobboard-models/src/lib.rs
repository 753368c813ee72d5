//! # Jobboard Models
//!
//! Entities (sqlx `FromRow`) and request/response DTOs (serde, validator, utoipa).

pub mod applications;
pub mod auth;
pub mod jobs;
pub mod users;

//! # Jobboard Core
//!
//! Foundational types shared by every Jobboard crate:
//!
//! - [`errors`]: the [`AppError`] taxonomy and its HTTP mapping
//! - [`password`]: bcrypt credential hashing and verification

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorBody, ErrorKind};
pub use password::{hash_password, verify_password};

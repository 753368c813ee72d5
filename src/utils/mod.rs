//! Shared utilities.
//!
//! - [`email`]: SMTP delivery of verification and password reset messages
//! - [`ids`]: path and query id parsing

pub mod email;
pub mod ids;

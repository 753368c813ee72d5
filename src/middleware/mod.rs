//! Request extractors for authentication and authorization.
//!
//! - [`auth`]: token guard (`AccessClaims`, `RefreshClaims`) and identity resolver (`CurrentUser`)
//! - [`role`]: role gate and the per-route role extractors
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The guard decodes the token, checks its `jti` against the revocation store and
//!    checks it is the right kind (access or refresh)
//! 3. `CurrentUser` loads the account named by the token
//! 4. Role extractors require the account to be verified and hold an allowed role
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::role::JobListingRole;
//!
//! async fn create_job(JobListingRole(user): JobListingRole) -> impl IntoResponse {
//!     // Only verified employers and admins get here
//! }
//! ```

pub mod auth;
pub mod role;

//! Authentication and authorization logic.
//!
//! Provides the token codec, password hashing, the per-request access
//! guard, and the credential store queries consumed by `cropshare_api`.

pub mod guard;
pub mod jwt;
pub mod password;
pub mod queries;

use thiserror::Error;

/// Authentication and authorization failures.
///
/// Every rejection is terminal for the request that produced it; nothing
/// in this layer retries. `Store` is the only variant that represents an
/// infrastructure fault rather than a policy decision.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no token provided")]
    TokenMissing,

    #[error("invalid token")]
    TokenInvalid,

    #[error("token expired")]
    TokenExpired,

    #[error("user not found")]
    UserNotFound,

    #[error("role not permitted")]
    RoleDenied,

    #[error("account blocked")]
    AccountBlocked,

    #[error("signing secret is not configured")]
    Signing,

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

//! Authentication service: login, registration, token refresh.

use sqlx::PgPool;
use tracing::info;

use cropshare_core::auth::guard::CredentialStore;
use cropshare_core::auth::jwt::{self, LOGIN_TOKEN_TTL_SECS};
use cropshare_core::auth::password::{hash_password, verify_password};
use cropshare_core::auth::queries;
use cropshare_core::models::user::Role;

use crate::error::{AppError, AppResult};

/// Authenticate with username + password, returning a signed identity
/// token embedding `{username, role, blocked}` with a 23 h expiry.
///
/// A blocked account can still log in; the block is enforced by the
/// guard on every protected route, against the live record.
pub async fn login(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
    secret: &[u8],
) -> AppResult<String> {
    let username = username.to_lowercase();
    let user = match store.find_by_username(&username).await? {
        None => {
            info!(username, "login failed: user not found");
            return Err(AppError::Unauthorized(
                "Login failed: User does not exist".into(),
            ));
        }
        Some(user) => user,
    };

    if !verify_password(password, &user.password_hash)? {
        info!(username, "login failed: invalid password");
        return Err(AppError::Unauthorized("Invalid password".into()));
    }

    let token = jwt::issue(
        &user.username,
        user.role,
        Some(user.blocked),
        LOGIN_TOKEN_TTL_SECS,
        secret,
    )?;
    info!(username, role = %user.role, "login succeeded");
    Ok(token)
}

/// Register a new grower account. New registrations start blocked until
/// an administrator approves them.
pub async fn register(pool: &PgPool, username: &str, password: &str) -> AppResult<()> {
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Both username and password are required".into(),
        ));
    }
    let username = username.to_lowercase();
    if queries::find_user_by_username(pool, &username)
        .await?
        .is_some()
    {
        return Err(AppError::Validation("User already exists".into()));
    }
    let hash = hash_password(password)?;
    queries::create_user(pool, &username, &hash, Role::Grower, true, None).await?;
    info!(username, "registered new grower, pending approval");
    Ok(())
}

/// Mint a fresh one-hour token from the presented one, ignoring expiry.
/// The store is not consulted.
pub fn refresh(token: Option<&str>, secret: &[u8]) -> AppResult<String> {
    let token = token
        .ok_or_else(|| AppError::Unauthorized("Invalid token. Cannot refresh.".into()))?;
    jwt::refresh(token, secret)
        .map_err(|_| AppError::Unauthorized("Invalid token. Cannot refresh.".into()))
}

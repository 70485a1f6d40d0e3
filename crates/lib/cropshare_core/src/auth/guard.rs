//! The access guard: validates an inbound token, re-resolves the live
//! user record, and enforces role and blocked policy before a request
//! is allowed to proceed.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::jwt::{self, TokenClaims};
use super::AuthError;
use crate::models::user::{Role, UserRecord};

/// Read-only lookup interface over the user store.
///
/// Callers lowercase usernames before lookup; implementations perform
/// exact match. Both lookups resolve at most once per call and return
/// either a result or an error, never both.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AuthError>;
}

/// Per-request authorization checks.
///
/// Every decision is recomputed from data read at the start of the
/// request; a blocked flag toggled concurrently by an administrator is
/// picked up on the user's next request, never retroactively. Both
/// entry points are read-only against the store.
#[derive(Clone)]
pub struct AccessGuard {
    store: Arc<dyn CredentialStore>,
    secret: String,
}

impl AccessGuard {
    pub fn new(store: Arc<dyn CredentialStore>, secret: String) -> Self {
        Self { store, secret }
    }

    /// The store behind the guard. Login shares its lookups.
    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    /// The process-wide signing secret.
    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// Validate a token and confirm the account still exists and is not
    /// blocked. No role check is applied, and the returned claims keep
    /// their token-time snapshot of the user rather than the live record.
    ///
    /// This is the laxer of the two entry points; see [`authorize_role`]
    /// for the strict one. They are intentionally separate code paths.
    ///
    /// [`authorize_role`]: AccessGuard::authorize_role
    pub async fn authenticate(&self, token: Option<&str>) -> Result<TokenClaims, AuthError> {
        let token = token.ok_or(AuthError::TokenMissing)?;
        let claims = jwt::verify(token, self.secret())?;
        let user = self
            .store
            .find_by_username(&claims.username)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if user.blocked {
            return Err(AuthError::AccountBlocked);
        }
        Ok(claims)
    }

    /// Validate a token, re-fetch the live user record, and require its
    /// role to be in `allowed`.
    ///
    /// The role check runs before the blocked check: a blocked user with
    /// the wrong role is rejected for the role, not the block. Returns
    /// the live record, never the token claims.
    pub async fn authorize_role(
        &self,
        token: Option<&str>,
        allowed: &[Role],
    ) -> Result<UserRecord, AuthError> {
        let token = token.ok_or(AuthError::TokenMissing)?;
        let claims = jwt::verify(token, self.secret())?;
        let user = self
            .store
            .find_by_username(&claims.username)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !allowed.contains(&user.role) {
            return Err(AuthError::RoleDenied);
        }
        if user.blocked {
            return Err(AuthError::AccountBlocked);
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::LOGIN_TOKEN_TTL_SECS;

    const SECRET: &[u8] = b"test-secret";

    struct FakeStore(Vec<UserRecord>);

    #[async_trait]
    impl CredentialStore for FakeStore {
        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserRecord>, AuthError> {
            Ok(self.0.iter().find(|u| u.username == username).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AuthError> {
            Ok(self.0.iter().find(|u| u.id == id).cloned())
        }
    }

    /// Store whose lookups always fail, for fault propagation tests.
    struct BrokenStore;

    #[async_trait]
    impl CredentialStore for BrokenStore {
        async fn find_by_username(&self, _: &str) -> Result<Option<UserRecord>, AuthError> {
            Err(AuthError::Store(sqlx::Error::PoolClosed))
        }

        async fn find_by_id(&self, _: Uuid) -> Result<Option<UserRecord>, AuthError> {
            Err(AuthError::Store(sqlx::Error::PoolClosed))
        }
    }

    fn user(username: &str, role: Role, blocked: bool) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: String::new(),
            role,
            blocked,
            pantry_id: None,
        }
    }

    fn guard(users: Vec<UserRecord>) -> AccessGuard {
        AccessGuard::new(Arc::new(FakeStore(users)), "test-secret".into())
    }

    fn token_for(username: &str, role: Role, blocked: bool) -> String {
        jwt::issue(username, role, Some(blocked), LOGIN_TOKEN_TTL_SECS, SECRET).unwrap()
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let g = guard(vec![]);
        let err = g.authorize_role(None, &[Role::Admin]).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenMissing));
        let err = g.authenticate(None).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenMissing));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let g = guard(vec![]);
        let err = g.authenticate(Some("not-a-token")).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let g = guard(vec![user("alice", Role::Grower, false)]);
        let token = jwt::issue("alice", Role::Grower, Some(false), -60, SECRET).unwrap();
        let err = g.authorize_role(Some(&token), &[Role::Grower]).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn role_mismatch_wins_over_blocked() {
        // A blocked PantryManager hitting an Admin-only route is told
        // about the role, not the block.
        let g = guard(vec![user("carol", Role::PantryManager, true)]);
        let token = token_for("carol", Role::PantryManager, true);
        let err = g.authorize_role(Some(&token), &[Role::Admin]).await.unwrap_err();
        assert!(matches!(err, AuthError::RoleDenied));
    }

    #[tokio::test]
    async fn live_blocked_flag_beats_stale_token() {
        // Token minted while unblocked; an admin has since flipped the flag.
        let g = guard(vec![user("alice", Role::Grower, true)]);
        let token = token_for("alice", Role::Grower, false);
        let err = g.authorize_role(Some(&token), &[Role::Grower]).await.unwrap_err();
        assert!(matches!(err, AuthError::AccountBlocked));
    }

    #[tokio::test]
    async fn authorize_role_returns_live_record() {
        let mut u = user("dave", Role::RepoManager, false);
        u.pantry_id = Some(Uuid::new_v4());
        let expected = u.pantry_id;
        let g = guard(vec![u]);
        let token = token_for("dave", Role::RepoManager, false);
        let got = g
            .authorize_role(Some(&token), &[Role::RepoManager])
            .await
            .unwrap();
        assert_eq!(got.pantry_id, expected);
    }

    #[tokio::test]
    async fn vanished_user_is_treated_as_unauthenticated() {
        let g = guard(vec![]);
        let token = token_for("ghost", Role::Grower, false);
        let err = g.authenticate(Some(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        let err = g.authorize_role(Some(&token), &[Role::Grower]).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn authenticate_returns_claims_snapshot() {
        let g = guard(vec![user("erin", Role::Grower, false)]);
        let token = token_for("erin", Role::Grower, false);
        let claims = g.authenticate(Some(&token)).await.unwrap();
        assert_eq!(claims.username, "erin");
        assert_eq!(claims.role, Role::Grower);
    }

    #[tokio::test]
    async fn authenticate_rejects_blocked_account() {
        let g = guard(vec![user("frank", Role::Grower, true)]);
        let token = token_for("frank", Role::Grower, false);
        let err = g.authenticate(Some(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::AccountBlocked));
    }

    #[tokio::test]
    async fn store_fault_propagates() {
        let g = AccessGuard::new(Arc::new(BrokenStore), "test-secret".into());
        let token = token_for("alice", Role::Grower, false);
        let err = g.authenticate(Some(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
    }
}

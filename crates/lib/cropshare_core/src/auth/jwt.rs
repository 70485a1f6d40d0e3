//! JWT token generation and verification.

use std::path::PathBuf;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AuthError;
use crate::models::user::Role;

/// Lifetime of a token minted at login: 23 hours.
pub const LOGIN_TOKEN_TTL_SECS: i64 = 23 * 60 * 60;

/// Lifetime of a token minted by [`refresh`]: 1 hour.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Claims embedded in a signed identity token.
///
/// `blocked` is a login-time snapshot and is absent from refreshed
/// tokens; the access guard never trusts it for authorization decisions
/// (it re-reads the live record instead).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub username: String,
    pub role: Role,
    #[serde(rename = "isBlocked", default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    pub iat: i64,
    pub exp: i64,
}

/// Sign a token (HS256) embedding the given claims with an absolute expiry.
///
/// Pure function of secret, claims, and clock. Fails with
/// [`AuthError::Signing`] only when the secret is missing.
pub fn issue(
    username: &str,
    role: Role,
    blocked: Option<bool>,
    ttl_secs: i64,
    secret: &[u8],
) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::Signing);
    }
    let now = Utc::now().timestamp();
    let claims = TokenClaims {
        username: username.to_string(),
        role,
        blocked,
        iat: now,
        exp: now + ttl_secs,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
        .map_err(|_| AuthError::Signing)
}

/// Verify a signed token, returning the embedded claims unmodified.
///
/// Fails with [`AuthError::TokenExpired`] once the embedded expiry has
/// passed and [`AuthError::TokenInvalid`] for a bad signature or a
/// malformed payload.
pub fn verify(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    decode_claims(token, secret, true)
}

/// Same as [`verify`] except that expiry alone does not reject.
/// Used only by [`refresh`].
pub fn verify_ignoring_expiry(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    decode_claims(token, secret, false)
}

fn decode_claims(token: &str, secret: &[u8], validate_exp: bool) -> Result<TokenClaims, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = validate_exp;
    validation.leeway = 0;
    decode::<TokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        })
}

/// Mint a fresh short-lived token from an existing (possibly expired) one.
///
/// The signature must still be valid. The new claims carry only the
/// username and role; the blocked flag is not re-embedded and the store
/// is not consulted, so a refreshed token can outlive a block applied
/// since login. Guarded routes still re-check the live record.
pub fn refresh(old_token: &str, secret: &[u8]) -> Result<String, AuthError> {
    let claims = verify_ignoring_expiry(old_token, secret)?;
    issue(&claims.username, claims.role, None, REFRESH_TOKEN_TTL_SECS, secret)
}

/// Resolve the signing secret: env var `ACCESS_TOKEN_SECRET` → persisted file.
///
/// Read once at startup; the secret is immutable for the process lifetime.
pub fn resolve_secret() -> String {
    if let Ok(secret) = std::env::var("ACCESS_TOKEN_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    // Generate and persist
    let secret_path = secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new signing secret");
    secret
}

/// Path to the persisted signing secret file.
fn secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cropshare")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn round_trip_returns_claims_unchanged() {
        let token =
            issue("alice@example.com", Role::Grower, Some(false), LOGIN_TOKEN_TTL_SECS, SECRET)
                .unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.username, "alice@example.com");
        assert_eq!(claims.role, Role::Grower);
        assert_eq!(claims.blocked, Some(false));
        assert_eq!(claims.exp, claims.iat + LOGIN_TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_fails_with_token_expired() {
        let token = issue("alice@example.com", Role::Grower, Some(false), -60, SECRET).unwrap();
        let err = verify(&token, SECRET).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn tampered_payload_fails_with_token_invalid() {
        let token =
            issue("alice@example.com", Role::Grower, Some(false), LOGIN_TOKEN_TTL_SECS, SECRET)
                .unwrap();
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let flipped = if parts[1].starts_with('A') { "B" } else { "A" };
        parts[1].replace_range(0..1, flipped);
        let err = verify(&parts.join("."), SECRET).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[test]
    fn tampered_signature_fails_with_token_invalid() {
        let token =
            issue("alice@example.com", Role::Grower, Some(false), LOGIN_TOKEN_TTL_SECS, SECRET)
                .unwrap();
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let flipped = if parts[2].starts_with('A') { "B" } else { "A" };
        parts[2].replace_range(0..1, flipped);
        let err = verify(&parts.join("."), SECRET).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[test]
    fn wrong_secret_fails_with_token_invalid() {
        let token =
            issue("alice@example.com", Role::Grower, Some(false), LOGIN_TOKEN_TTL_SECS, SECRET)
                .unwrap();
        let err = verify(&token, b"other-secret").unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[test]
    fn malformed_token_fails_with_token_invalid() {
        let err = verify("definitely.not.a-jwt", SECRET).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[test]
    fn verify_ignoring_expiry_accepts_expired_token() {
        let token = issue("bob@example.com", Role::Admin, Some(false), -60, SECRET).unwrap();
        let claims = verify_ignoring_expiry(&token, SECRET).unwrap();
        assert_eq!(claims.username, "bob@example.com");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn refresh_mints_valid_token_from_expired_one() {
        let old = issue("bob@example.com", Role::Admin, Some(false), -60, SECRET).unwrap();
        let new = refresh(&old, SECRET).unwrap();
        let claims = verify(&new, SECRET).unwrap();
        assert_eq!(claims.username, "bob@example.com");
        assert_eq!(claims.role, Role::Admin);
        // The refreshed token does not re-embed the blocked flag.
        assert_eq!(claims.blocked, None);
        assert_eq!(claims.exp, claims.iat + REFRESH_TOKEN_TTL_SECS);
    }

    #[test]
    fn refresh_rejects_bad_signature() {
        let old = issue("bob@example.com", Role::Admin, Some(false), -60, SECRET).unwrap();
        let err = refresh(&old, b"other-secret").unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[test]
    fn missing_blocked_claim_is_tolerated() {
        // Refreshed tokens omit the claim entirely; decoding must not fail.
        let token =
            issue("carol@example.com", Role::PantryManager, None, LOGIN_TOKEN_TTL_SECS, SECRET)
                .unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.blocked, None);
    }

    #[test]
    fn empty_secret_fails_with_signing_error() {
        let err =
            issue("alice@example.com", Role::Grower, None, LOGIN_TOKEN_TTL_SECS, b"").unwrap_err();
        assert!(matches!(err, AuthError::Signing));
    }
}

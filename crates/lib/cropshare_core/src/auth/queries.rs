//! User table queries and the PostgreSQL credential store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::guard::CredentialStore;
use super::AuthError;
use crate::models::user::{Role, UserRecord};

type UserRow = (Uuid, String, String, String, bool, Option<Uuid>);

fn row_to_user(row: UserRow) -> Result<UserRecord, sqlx::Error> {
    let (id, username, password_hash, role, blocked, pantry_id) = row;
    let role = role
        .parse::<Role>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    Ok(UserRecord {
        id,
        username,
        password_hash,
        role,
        blocked,
        pantry_id,
    })
}

/// Fetch a user by exact (already lowercased) username.
pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserRecord>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash, role, blocked, pantry_id \
         FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_user).transpose()?)
}

/// Fetch a user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash, role, blocked, pantry_id \
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_user).transpose()?)
}

/// Fetch all users with the given role, ordered by username.
pub async fn find_users_by_role(pool: &PgPool, role: Role) -> Result<Vec<UserRecord>, AuthError> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash, role, blocked, pantry_id \
         FROM users WHERE role = $1 ORDER BY username",
    )
    .bind(role.as_str())
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(row_to_user)
        .collect::<Result<_, _>>()?)
}

/// Create a new user, returning its ID. The username must already be
/// lowercased and unique.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    role: Role,
    blocked: bool,
    pantry_id: Option<Uuid>,
) -> Result<Uuid, AuthError> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (username, password_hash, role, blocked, pantry_id) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(blocked)
    .bind(pantry_id)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Set a user's blocked flag.
pub async fn set_blocked(pool: &PgPool, id: Uuid, blocked: bool) -> Result<(), AuthError> {
    sqlx::query("UPDATE users SET blocked = $2 WHERE id = $1")
        .bind(id)
        .bind(blocked)
        .execute(pool)
        .await?;
    Ok(())
}

/// Assign (or clear) a user's pantry.
pub async fn assign_pantry(
    pool: &PgPool,
    id: Uuid,
    pantry_id: Option<Uuid>,
) -> Result<(), AuthError> {
    sqlx::query("UPDATE users SET pantry_id = $2 WHERE id = $1")
        .bind(id)
        .bind(pantry_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a user, returning the number of rows removed.
pub async fn delete_user(pool: &PgPool, id: Uuid) -> Result<u64, AuthError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Credential store backed by the PostgreSQL `users` table.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        find_user_by_username(&self.pool, username).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AuthError> {
        find_user_by_id(&self.pool, id).await
    }
}

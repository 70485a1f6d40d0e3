//! Idempotent startup fixtures.
//!
//! Recreates the datasets the application has always shipped with: one
//! default account per role and four pantries. Existing rows are left
//! untouched, so the seed is safe to run on every startup.

use sqlx::PgPool;
use tracing::info;

use crate::auth::{password, queries, AuthError};
use crate::models::user::Role;
use crate::pantries;

struct DefaultUser {
    username: &'static str,
    password: &'static str,
    role: Role,
    blocked: bool,
}

// Development credentials only; real deployments replace these accounts.
const DEFAULT_USERS: &[DefaultUser] = &[
    DefaultUser {
        username: "admin@example.com",
        password: "adminPassword",
        role: Role::Admin,
        blocked: false,
    },
    DefaultUser {
        username: "pantrymanager01@example.com",
        password: "pantryManagerPassword",
        role: Role::PantryManager,
        blocked: false,
    },
    DefaultUser {
        username: "grower01@example.com",
        password: "growerPassword",
        role: Role::Grower,
        blocked: true,
    },
    DefaultUser {
        username: "repomanager01@example.com",
        password: "repoManagerPassword",
        role: Role::RepoManager,
        blocked: false,
    },
];

const DEFAULT_PANTRIES: &[(&str, &str)] = &[
    ("Pantry 1", "Location 1"),
    ("Pantry 2", "Location 2"),
    ("Pantry 3", "Location 3"),
    ("Pantry 4", "Location 4"),
];

/// Insert any missing default users and pantries.
pub async fn seed(pool: &PgPool) -> Result<(), AuthError> {
    for user in DEFAULT_USERS {
        if queries::find_user_by_username(pool, user.username)
            .await?
            .is_none()
        {
            let hash = password::hash_password(user.password)?;
            queries::create_user(pool, user.username, &hash, user.role, user.blocked, None)
                .await?;
            info!(username = user.username, role = %user.role, "seeded default user");
        }
    }

    for (name, location) in DEFAULT_PANTRIES {
        if pantries::find_by_name(pool, name)
            .await
            .map_err(AuthError::Store)?
            .is_none()
        {
            pantries::create(pool, name, location)
                .await
                .map_err(AuthError::Store)?;
            info!(name, "seeded default pantry");
        }
    }

    Ok(())
}

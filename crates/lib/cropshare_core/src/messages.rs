//! Contact message queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::message::Message;
use crate::uuid::uuidv7;

/// Store a new message, returning its ID.
pub async fn insert(pool: &PgPool, email: &str, message: &str) -> Result<Uuid, sqlx::Error> {
    let id = uuidv7();
    sqlx::query("INSERT INTO messages (id, email, message) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(email)
        .bind(message)
        .execute(pool)
        .await?;
    Ok(id)
}

/// Fetch all messages, newest first.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Message>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid, String, String, DateTime<Utc>)>(
        "SELECT id, email, message, created_at FROM messages ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(id, email, message, created_at)| Message {
            id,
            email,
            message,
            created_at,
        })
        .collect())
}

/// Delete a message, returning the number of rows removed.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM messages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

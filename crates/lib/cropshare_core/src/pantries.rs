//! Pantry queries.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::pantry::Pantry;

type PantryRow = (Uuid, String, String);

fn row_to_pantry((id, name, location): PantryRow) -> Pantry {
    Pantry { id, name, location }
}

/// Fetch all pantries, ordered by name.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Pantry>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PantryRow>(
        "SELECT id, name, location FROM pantries ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_pantry).collect())
}

/// Fetch a pantry by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Pantry>, sqlx::Error> {
    let row = sqlx::query_as::<_, PantryRow>(
        "SELECT id, name, location FROM pantries WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_pantry))
}

/// Fetch a pantry by name.
pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Pantry>, sqlx::Error> {
    let row = sqlx::query_as::<_, PantryRow>(
        "SELECT id, name, location FROM pantries WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_pantry))
}

/// Create a pantry, returning its ID.
pub async fn create(pool: &PgPool, name: &str, location: &str) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO pantries (name, location) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(location)
    .fetch_one(pool)
    .await
}

/// Delete a pantry, returning the number of rows removed.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pantries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

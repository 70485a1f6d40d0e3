//! Pantry stock queries: items reserved out of the central repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::food::FoodItem;
use crate::repo::{row_to_item, FoodRow};
use crate::uuid::uuidv7;

/// Fetch all stock for a pantry. A manager with no pantry assigned sees
/// only unassigned rows.
pub async fn find_by_pantry(
    pool: &PgPool,
    pantry_id: Option<Uuid>,
) -> Result<Vec<FoodItem>, sqlx::Error> {
    let rows = sqlx::query_as::<_, FoodRow>(
        "SELECT id, name, description, is_available, has_been_picked_up, \
                expiry_date, grower_id, pantry_id \
         FROM pantry_stock \
         WHERE pantry_id IS NOT DISTINCT FROM $1 \
         ORDER BY id",
    )
    .bind(pantry_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_item).collect())
}

/// Copy a reserved repository item into stock under the given pantry,
/// returning the new row's ID. The item is marked unavailable.
pub async fn insert_reserved(
    pool: &PgPool,
    item: &FoodItem,
    pantry_id: Option<Uuid>,
) -> Result<Uuid, sqlx::Error> {
    let id = uuidv7();
    sqlx::query(
        "INSERT INTO pantry_stock \
         (id, name, description, is_available, has_been_picked_up, expiry_date, grower_id, pantry_id) \
         VALUES ($1, $2, $3, FALSE, $4, $5, $6, $7)",
    )
    .bind(id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.has_been_picked_up)
    .bind(item.expiry_date)
    .bind(item.grower_id)
    .bind(pantry_id)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Delete a stock item, returning the number of rows removed.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pantry_stock WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

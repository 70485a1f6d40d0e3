//! Central repository queries: donated items awaiting reservation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::food::FoodItem;
use crate::uuid::uuidv7;

pub(crate) type FoodRow = (
    Uuid,
    String,
    String,
    bool,
    bool,
    NaiveDate,
    Option<Uuid>,
    Option<Uuid>,
);

pub(crate) fn row_to_item(row: FoodRow) -> FoodItem {
    let (id, name, description, is_available, has_been_picked_up, expiry_date, grower_id, pantry_id) =
        row;
    FoodItem {
        id,
        name,
        description,
        is_available,
        has_been_picked_up,
        expiry_date,
        grower_id,
        pantry_id,
    }
}

/// Fetch available items that have not expired. Expiry is date-only:
/// items expiring today are still listed.
pub async fn find_available(pool: &PgPool) -> Result<Vec<FoodItem>, sqlx::Error> {
    let rows = sqlx::query_as::<_, FoodRow>(
        "SELECT id, name, description, is_available, has_been_picked_up, \
                expiry_date, grower_id, pantry_id \
         FROM food_items \
         WHERE is_available AND expiry_date >= CURRENT_DATE \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_item).collect())
}

/// Fetch an item by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<FoodItem>, sqlx::Error> {
    let row = sqlx::query_as::<_, FoodRow>(
        "SELECT id, name, description, is_available, has_been_picked_up, \
                expiry_date, grower_id, pantry_id \
         FROM food_items WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_item))
}

/// Whether an item with the same name, description, and expiry already
/// exists.
pub async fn exists_duplicate(
    pool: &PgPool,
    name: &str,
    description: &str,
    expiry_date: NaiveDate,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM food_items \
         WHERE name = $1 AND description = $2 AND expiry_date = $3)",
    )
    .bind(name)
    .bind(description)
    .bind(expiry_date)
    .fetch_one(pool)
    .await
}

/// Insert a newly donated item, returning its ID.
pub async fn insert(
    pool: &PgPool,
    name: &str,
    description: &str,
    expiry_date: NaiveDate,
    grower_id: Uuid,
) -> Result<Uuid, sqlx::Error> {
    let id = uuidv7();
    sqlx::query(
        "INSERT INTO food_items \
         (id, name, description, is_available, has_been_picked_up, expiry_date, grower_id, pantry_id) \
         VALUES ($1, $2, $3, TRUE, FALSE, $4, $5, NULL)",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(expiry_date)
    .bind(grower_id)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Delete an item, returning the number of rows removed.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM food_items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

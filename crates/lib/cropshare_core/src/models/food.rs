//! Food item domain model.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

/// A donated food item. The same shape backs both the central repository
/// and the per-pantry stock tables; reserving an item moves the row from
/// one to the other.
///
/// Expiry is date-only: an item expiring today is still listed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_available: bool,
    pub has_been_picked_up: bool,
    pub expiry_date: NaiveDate,
    pub grower_id: Option<Uuid>,
    pub pantry_id: Option<Uuid>,
}

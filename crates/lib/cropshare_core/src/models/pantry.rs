//! Pantry domain model.

use serde::Serialize;
use uuid::Uuid;

/// A registered food pantry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pantry {
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

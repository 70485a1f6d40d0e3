//! Contact message domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A message left through the public contact form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

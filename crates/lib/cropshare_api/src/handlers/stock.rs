//! Pantry stock handlers.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::Redirect;
use axum::{Extension, Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use cropshare_core::auth::queries;
use cropshare_core::models::food::FoodItem;
use cropshare_core::models::pantry::Pantry;
use cropshare_core::models::user::UserRecord;
use cropshare_core::{pantries, stock};

use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::AppState;

/// A stock row enriched with its grower and pantry records.
#[derive(Debug, Serialize)]
pub struct StockItemView {
    #[serde(flatten)]
    pub item: FoodItem,
    pub grower: Option<UserRecord>,
    pub pantry: Option<Pantry>,
}

/// `GET /pantryManager` — the manager's stock, uncached.
pub async fn load_items(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<([(header::HeaderName, &'static str); 1], Json<Vec<StockItemView>>)> {
    let items = stock::find_by_pantry(&state.pool, user.pantry_id).await?;
    let mut views = Vec::with_capacity(items.len());
    for item in items {
        let grower = match item.grower_id {
            Some(id) => queries::find_user_by_id(&state.pool, id).await?,
            None => None,
        };
        let pantry = match item.pantry_id {
            Some(id) => pantries::find_by_id(&state.pool, id).await?,
            None => None,
        };
        views.push(StockItemView {
            item,
            grower,
            pantry,
        });
    }
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(views)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemForm {
    pub item_id: Uuid,
}

/// `POST /pantryManager/deletePantryStockItem` — bounce to confirmation.
pub async fn delete_item(Form(body): Form<StockItemForm>) -> Redirect {
    Redirect::to(&format!(
        "/pantryManager/deletePantryStockItemConfirmation?itemId={}",
        body.item_id
    ))
}

/// `GET /pantryManager/deletePantryStockItemConfirmation` — confirmation
/// page data.
pub async fn delete_confirmation(Query(query): Query<StockItemForm>) -> Json<serde_json::Value> {
    Json(json!({ "itemId": query.item_id }))
}

/// `POST /pantryManager/confirmDeletePantryStockItem` — delete for real.
pub async fn confirm_delete_item(
    State(state): State<AppState>,
    Form(body): Form<StockItemForm>,
) -> AppResult<Redirect> {
    stock::delete(&state.pool, body.item_id).await?;
    Ok(Redirect::to("/pantryManager"))
}

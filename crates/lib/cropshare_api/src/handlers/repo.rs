//! Central repository handlers: donate, browse, reserve, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Extension, Form, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use cropshare_core::models::food::FoodItem;
use cropshare_core::{repo, stock};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::AppState;

/// `GET /addItemToRepo` — donation form shell.
pub async fn show_add_item() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemForm {
    pub name: String,
    pub description: String,
    pub expiry_date: NaiveDate,
}

/// `POST /addItemToRepo` — donate a new item to the repository.
pub async fn add_item(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(body): Form<AddItemForm>,
) -> AppResult<Redirect> {
    if repo::exists_duplicate(&state.pool, &body.name, &body.description, body.expiry_date)
        .await?
    {
        return Err(AppError::Validation("Food item already exists".into()));
    }
    repo::insert(
        &state.pool,
        &body.name,
        &body.description,
        body.expiry_date,
        user.id,
    )
    .await?;
    Ok(Redirect::to("/centralRepo"))
}

/// `GET /centralRepo` — available, unexpired items.
pub async fn load_items(State(state): State<AppState>) -> AppResult<Json<Vec<FoodItem>>> {
    Ok(Json(repo::find_available(&state.pool).await?))
}

/// `GET /deleteItem/{id}` — item details for the delete confirmation page.
pub async fn delete_confirmation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FoodItem>> {
    let food = repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Food not found".into()))?;
    Ok(Json(food))
}

/// `GET /deleteItemConfirmed/{id}` — delete an item.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    if repo::delete(&state.pool, id).await? == 0 {
        return Err(AppError::NotFound("Food not found".into()));
    }
    Ok(Redirect::to("/centralRepo"))
}

/// `GET /reserveItem/{id}` — move an item into the manager's pantry
/// stock and drop it from the repository.
pub async fn reserve_item(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    let food = repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Food not found".into()))?;
    stock::insert_reserved(&state.pool, &food, user.pantry_id).await?;
    repo::delete(&state.pool, id).await?;
    Ok(Redirect::to("/centralRepo"))
}

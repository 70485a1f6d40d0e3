//! Administrator handlers: pantries, pantry managers, growers, messages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use cropshare_core::auth::password::hash_password;
use cropshare_core::auth::queries;
use cropshare_core::models::message::Message;
use cropshare_core::models::pantry::Pantry;
use cropshare_core::models::user::{Role, UserRecord};
use cropshare_core::{messages, pantries};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// `GET /admin` — dashboard shell.
pub async fn show_dashboard() -> StatusCode {
    StatusCode::OK
}

/// A pantry manager with their pantry attached.
#[derive(Debug, Serialize)]
pub struct ManagerView {
    #[serde(flatten)]
    pub manager: UserRecord,
    pub pantry: Option<Pantry>,
}

async fn managers_with_pantries(state: &AppState) -> AppResult<Vec<ManagerView>> {
    let managers = queries::find_users_by_role(&state.pool, Role::PantryManager).await?;
    let mut views = Vec::with_capacity(managers.len());
    for manager in managers {
        let pantry = match manager.pantry_id {
            Some(id) => pantries::find_by_id(&state.pool, id).await?,
            None => None,
        };
        views.push(ManagerView { manager, pantry });
    }
    Ok(views)
}

/// `GET /admin/managePantries` — all pantries.
pub async fn manage_pantries(State(state): State<AppState>) -> AppResult<Json<Vec<Pantry>>> {
    Ok(Json(pantries::find_all(&state.pool).await?))
}

/// `GET /admin/managePantriesAndManagers` — managers and pantries.
pub async fn manage_pantries_and_managers(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let managers = managers_with_pantries(&state).await?;
    let pantries = pantries::find_all(&state.pool).await?;
    Ok(Json(
        json!({ "pantryManagers": managers, "pantries": pantries }),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPantryForm {
    pub pantry_manager_id: Uuid,
    pub pantry_id: Uuid,
}

/// `POST /admin/managePantriesAndManagers` — assign a pantry to a manager.
pub async fn assign_pantry_to_manager(
    State(state): State<AppState>,
    Form(body): Form<AssignPantryForm>,
) -> AppResult<Redirect> {
    let manager = queries::find_user_by_id(&state.pool, body.pantry_manager_id)
        .await?
        .ok_or_else(|| AppError::Validation("Pantry manager not found".into()))?;
    queries::assign_pantry(&state.pool, manager.id, Some(body.pantry_id)).await?;
    Ok(Redirect::to("/admin/managePantriesAndManagers"))
}

/// `GET /admin/managePantryManagers` — managers with their pantries.
pub async fn manage_pantry_managers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ManagerView>>> {
    Ok(Json(managers_with_pantries(&state).await?))
}

/// `GET /admin/createPantry` — form shell.
pub async fn show_create_pantry() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct CreatePantryForm {
    pub name: String,
    pub location: String,
}

/// `POST /admin/createPantry` — create a pantry.
pub async fn create_pantry(
    State(state): State<AppState>,
    Form(body): Form<CreatePantryForm>,
) -> AppResult<Redirect> {
    pantries::create(&state.pool, &body.name, &body.location).await?;
    Ok(Redirect::to("/admin"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryIdForm {
    pub pantry_id: Uuid,
}

/// `POST /admin/deletePantry` — bounce to confirmation.
pub async fn delete_pantry(Form(body): Form<PantryIdForm>) -> Redirect {
    Redirect::to(&format!(
        "/admin/deletePantryConfirmation?pantryId={}",
        body.pantry_id
    ))
}

/// `GET /admin/deletePantryConfirmation` — confirmation page data.
pub async fn delete_pantry_confirmation(
    Query(query): Query<PantryIdForm>,
) -> Json<serde_json::Value> {
    Json(json!({ "pantryId": query.pantry_id }))
}

/// `POST /admin/confirmDeletePantry` — delete for real.
pub async fn confirm_delete_pantry(
    State(state): State<AppState>,
    Form(body): Form<PantryIdForm>,
) -> AppResult<Redirect> {
    pantries::delete(&state.pool, body.pantry_id).await?;
    Ok(Redirect::to("/admin/managePantries"))
}

/// `GET /admin/createPantryManager` — form shell.
pub async fn show_create_pantry_manager() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct CreateManagerForm {
    pub username: String,
    pub password: String,
}

/// `POST /admin/createPantryManager` — create a pantry manager account.
pub async fn create_pantry_manager(
    State(state): State<AppState>,
    Form(body): Form<CreateManagerForm>,
) -> AppResult<Redirect> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "Both username and password are required.".into(),
        ));
    }
    let username = body.username.to_lowercase();
    if queries::find_user_by_username(&state.pool, &username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already exists.".into()));
    }
    let hash = hash_password(&body.password)?;
    queries::create_user(
        &state.pool,
        &username,
        &hash,
        Role::PantryManager,
        false,
        None,
    )
    .await?;
    Ok(Redirect::to("/admin"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerIdForm {
    pub pantry_manager_id: Uuid,
}

/// `POST /admin/deletePantryManager` — bounce to confirmation.
pub async fn delete_pantry_manager(Form(body): Form<ManagerIdForm>) -> Redirect {
    Redirect::to(&format!(
        "/admin/deletePantryManagerConfirmation?pantryManagerId={}",
        body.pantry_manager_id
    ))
}

/// `GET /admin/deletePantryManagerConfirmation` — confirmation page data.
pub async fn delete_pantry_manager_confirmation(
    Query(query): Query<ManagerIdForm>,
) -> Json<serde_json::Value> {
    Json(json!({ "pantryManagerId": query.pantry_manager_id }))
}

/// `POST /admin/confirmDeletePantryManager` — delete for real.
pub async fn confirm_delete_pantry_manager(
    State(state): State<AppState>,
    Form(body): Form<ManagerIdForm>,
) -> AppResult<Redirect> {
    queries::delete_user(&state.pool, body.pantry_manager_id).await?;
    Ok(Redirect::to("/admin/managePantryManagers"))
}

/// `POST /admin/changePantryManagerStatus` — toggle the blocked flag.
pub async fn change_pantry_manager_status(
    State(state): State<AppState>,
    Form(body): Form<ManagerIdForm>,
) -> AppResult<Redirect> {
    let manager = queries::find_user_by_id(&state.pool, body.pantry_manager_id)
        .await?
        .ok_or_else(|| AppError::Validation("Pantry Manager not found".into()))?;
    queries::set_blocked(&state.pool, manager.id, !manager.blocked).await?;
    Ok(Redirect::to("/admin/managePantryManagers"))
}

/// `GET /admin/manageGrowers` — all growers.
pub async fn manage_growers(State(state): State<AppState>) -> AppResult<Json<Vec<UserRecord>>> {
    Ok(Json(
        queries::find_users_by_role(&state.pool, Role::Grower).await?,
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowerIdForm {
    pub grower_id: Uuid,
}

/// `POST /admin/deleteGrower` — bounce to confirmation.
pub async fn delete_grower(Form(body): Form<GrowerIdForm>) -> Redirect {
    Redirect::to(&format!(
        "/admin/deleteGrowerConfirmation?growerId={}",
        body.grower_id
    ))
}

/// `GET /admin/deleteGrowerConfirmation` — confirmation page data.
pub async fn delete_grower_confirmation(
    Query(query): Query<GrowerIdForm>,
) -> Json<serde_json::Value> {
    Json(json!({ "growerId": query.grower_id }))
}

/// `POST /admin/confirmDeleteGrower` — delete for real.
pub async fn confirm_delete_grower(
    State(state): State<AppState>,
    Form(body): Form<GrowerIdForm>,
) -> AppResult<Redirect> {
    queries::delete_user(&state.pool, body.grower_id).await?;
    Ok(Redirect::to("/admin/manageGrowers"))
}

/// `POST /admin/changeGrowerStatus` — toggle the blocked flag.
pub async fn change_grower_status(
    State(state): State<AppState>,
    Form(body): Form<GrowerIdForm>,
) -> AppResult<Redirect> {
    let grower = queries::find_user_by_id(&state.pool, body.grower_id)
        .await?
        .ok_or_else(|| AppError::Validation("Grower not found".into()))?;
    queries::set_blocked(&state.pool, grower.id, !grower.blocked).await?;
    Ok(Redirect::to("/admin/manageGrowers"))
}

/// `GET /admin/messages` — all contact messages.
pub async fn show_messages(State(state): State<AppState>) -> AppResult<Json<Vec<Message>>> {
    Ok(Json(messages::find_all(&state.pool).await?))
}

/// `GET /admin/messages/delete/{id}` — delete a message.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    messages::delete(&state.pool, id).await?;
    Ok(Redirect::to("/admin/messages"))
}

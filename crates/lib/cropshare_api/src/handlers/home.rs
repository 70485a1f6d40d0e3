//! Public and shared-page handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Form, Json};
use serde::Deserialize;

use cropshare_core::auth::queries;
use cropshare_core::models::pantry::Pantry;
use cropshare_core::models::user::{Role, UserRecord};
use cropshare_core::{messages, pantries};

use crate::error::AppResult;
use crate::AppState;

/// `GET /` — home page shell.
pub async fn show_home() -> StatusCode {
    StatusCode::OK
}

/// `GET /about` — about page shell.
pub async fn show_about() -> StatusCode {
    StatusCode::OK
}

/// `GET /messageForm` — contact form shell.
pub async fn show_message_form() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct MessageForm {
    pub email: String,
    pub message: String,
}

/// `POST /submitMessage` — store a contact message.
pub async fn submit_message(
    State(state): State<AppState>,
    Form(body): Form<MessageForm>,
) -> AppResult<Redirect> {
    messages::insert(&state.pool, &body.email, &body.message).await?;
    Ok(Redirect::to("/"))
}

/// `GET /pantriesList` — all pantries, for any signed-in user.
pub async fn pantries_list(State(state): State<AppState>) -> AppResult<Json<Vec<Pantry>>> {
    Ok(Json(pantries::find_all(&state.pool).await?))
}

/// `GET /growersList` — all growers, for any signed-in user.
pub async fn growers_list(State(state): State<AppState>) -> AppResult<Json<Vec<UserRecord>>> {
    Ok(Json(
        queries::find_users_by_role(&state.pool, Role::Grower).await?,
    ))
}

//! Authentication request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::auth;
use crate::services::cookies::{clear_jwt_cookie, jwt_cookie, JWT_COOKIE};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// `GET /login` — login form shell.
pub async fn show_login() -> StatusCode {
    StatusCode::OK
}

/// `POST /login` — authenticate and set the `jwt` cookie.
pub async fn handle_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(body): Form<CredentialsForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let token = auth::login(
        state.guard.store(),
        &body.username,
        &body.password,
        state.guard.secret(),
    )
    .await?;
    Ok((jar.add(jwt_cookie(&token)), Redirect::to("/")))
}

/// `GET /register` — registration form shell.
pub async fn show_register() -> StatusCode {
    StatusCode::OK
}

/// `POST /register` — create a grower account, then send to login.
pub async fn handle_register(
    State(state): State<AppState>,
    Form(body): Form<CredentialsForm>,
) -> AppResult<Redirect> {
    auth::register(&state.pool, &body.username, &body.password).await?;
    Ok(Redirect::to("/login"))
}

/// `GET /logout` — clear the identity cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.add(clear_jwt_cookie()), Redirect::to("/"))
}

/// `GET /refresh-token` — re-mint the identity token, ignoring expiry.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, &'static str)> {
    let token = jar.get(JWT_COOKIE).map(|c| c.value().to_string());
    let new_token = auth::refresh(token.as_deref(), state.guard.secret())?;
    Ok((
        jar.add(jwt_cookie(&new_token)),
        "Token refreshed successfully.",
    ))
}

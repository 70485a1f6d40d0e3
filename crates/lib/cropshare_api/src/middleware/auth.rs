//! Authentication middleware: cookie extraction in front of the access
//! guard.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use cropshare_core::auth::jwt::TokenClaims;
use cropshare_core::models::user::{Role, UserRecord};

use crate::error::AppError;
use crate::services::cookies::JWT_COOKIE;
use crate::AppState;

/// Request extension inserted by [`require_auth`]: the decoded token
/// claims, a login-time snapshot of the user.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub TokenClaims);

/// Request extension inserted by [`require_role`]: the live user record
/// re-read from the store for this request.
///
/// Handlers must match the extension to the guard wired in front of
/// them; the two guards attach different shapes.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

/// State for [`require_role`]: the app state plus the allowed-role set
/// declared at route wiring time.
#[derive(Clone)]
pub struct RoleGate {
    pub state: AppState,
    pub allowed: &'static [Role],
}

/// Middleware for routes any signed-in, non-blocked user may reach.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar.get(JWT_COOKIE).map(|c| c.value().to_string());
    let claims = state.guard.authenticate(token.as_deref()).await?;
    request.extensions_mut().insert(AuthClaims(claims));
    Ok(next.run(request).await)
}

/// Middleware for role-gated routes.
pub async fn require_role(
    State(gate): State<RoleGate>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar.get(JWT_COOKIE).map(|c| c.value().to_string());
    let user = gate
        .state
        .guard
        .authorize_role(token.as_deref(), gate.allowed)
        .await?;
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

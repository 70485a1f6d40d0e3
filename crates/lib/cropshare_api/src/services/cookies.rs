//! Cookie service: the `jwt` session carrier.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Cookie name for the identity token.
pub const JWT_COOKIE: &str = "jwt";

/// Build the httpOnly identity cookie. No Max-Age is set: the cookie
/// lives for the browser session and the token carries its own expiry.
pub fn jwt_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((JWT_COOKIE.to_string(), token.to_string()))
        .http_only(true)
        .secure(false) // TODO: set true once deployments are HTTPS-only
        .same_site(SameSite::Strict)
        .path("/".to_string())
        .build()
}

/// Build an expired cookie to clear the identity token.
pub fn clear_jwt_cookie() -> Cookie<'static> {
    Cookie::build((JWT_COOKIE.to_string(), String::new()))
        .http_only(true)
        .secure(false)
        .same_site(SameSite::Strict)
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}

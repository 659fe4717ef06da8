//! Auth token cookies
//!
//! Login, register and refresh mirror the token pair into HTTP-only cookies;
//! logout clears them.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cine_service::dto::AuthResponse;
use time::Duration;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

fn token_cookie(name: &'static str, value: String, max_age: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
        .max_age(Duration::seconds(max_age))
        .build()
}

/// Add both token cookies for a fresh session
pub fn with_tokens(jar: CookieJar, auth: &AuthResponse, secure: bool) -> CookieJar {
    jar.add(token_cookie(
        ACCESS_TOKEN_COOKIE,
        auth.access_token.clone(),
        auth.expires_in,
        secure,
    ))
    .add(token_cookie(
        REFRESH_TOKEN_COOKIE,
        auth.refresh_token.clone(),
        auth.refresh_expires_in,
        secure,
    ))
}

/// Expire both token cookies
pub fn clear_tokens(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_TOKEN_COOKIE).path("/"))
}

/// Non-empty cookie value
pub fn token_from(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

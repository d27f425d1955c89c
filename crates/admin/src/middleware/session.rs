use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use tracing::warn;

use super::flash::{Flash, set_flash};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "token";
pub const LOGIN_PATH: &str = "/admin/login";

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

fn to_login(jar: CookieJar, message: &str) -> Response {
    let jar = set_flash(clear_session(jar), Flash::error(message));
    (jar, Redirect::to(LOGIN_PATH)).into_response()
}

/// Lets the request through only for an enabled administrator. The admin's
/// `UserResponse` and id are attached as request extensions.
pub async fn require_admin(
    cookie_jar: CookieJar,
    State(data): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = cookie_jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        });

    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return to_login(cookie_jar, "Please log in to continue");
    };

    match data.di_container.auth_service.session_admin(&token).await {
        Ok(session) => {
            let admin = session.data;
            req.extensions_mut().insert(admin.id);
            req.extensions_mut().insert(admin);
            next.run(req).await
        }
        Err(e) => {
            warn!("Rejected admin session on {}: {}", req.uri().path(), e.message);
            to_login(cookie_jar, &e.message)
        }
    }
}

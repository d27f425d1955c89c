use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use shared::domain::request::LoginRequest;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

use super::{DASHBOARD_PATH, redirect_with};
use crate::{
    middleware::{
        flash::{Flash, set_flash, take_flash},
        session::{LOGIN_PATH, clear_session, session_cookie},
    },
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPage {
    pub flash: Option<Flash>,
}

#[utoipa::path(
    get,
    path = "/admin/login",
    tag = "Auth",
    responses(
        (status = 200, description = "Login page state with any pending flash message", body = LoginPage),
    )
)]
pub async fn login_page(jar: CookieJar) -> Response {
    let (jar, flash) = take_flash(jar);
    (jar, Json(LoginPage { flash })).into_response()
}

#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "Auth",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Sets the session cookie and redirects to the dashboard, or back to login on failure"),
    )
)]
pub async fn login(
    State(data): State<Arc<AppState>>,
    jar: CookieJar,
    Form(body): Form<LoginRequest>,
) -> Response {
    match data.di_container.auth_service.login_admin(&body).await {
        Ok(response) => {
            let jar = jar.add(session_cookie(response.data, data.cookie_secure));
            (jar, Redirect::to(DASHBOARD_PATH)).into_response()
        }
        Err(e) => redirect_with(jar, LOGIN_PATH, Flash::error(e.message)),
    }
}

#[utoipa::path(
    get,
    path = "/admin/logout",
    tag = "Auth",
    responses(
        (status = 303, description = "Clears the session cookie and redirects to login"),
    )
)]
pub async fn logout(jar: CookieJar) -> Response {
    info!("Admin session closed");

    let jar = set_flash(clear_session(jar), Flash::success("You have been logged out"));
    (jar, Redirect::to(LOGIN_PATH)).into_response()
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/admin/logout", get(logout))
        .with_state(app_state)
}

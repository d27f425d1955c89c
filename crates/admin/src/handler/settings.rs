use axum::{
    Extension, Form, Json,
    extract::State,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use shared::domain::{
    request::{ChangePasswordRequest, UpdateAddressesRequest},
    response::{site::SiteResponse, user::UserResponse},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

use super::{AdminPage, DASHBOARD_PATH, redirect_outcome, redirect_with};
use crate::{
    middleware::{
        flash::{Flash, take_flash},
        session,
    },
    state::AppState,
};

const SETTINGS_PATH: &str = "/admin/settings";

#[utoipa::path(
    get,
    path = "/admin/settings",
    tag = "Settings",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Site payment addresses", body = AdminPage<SiteResponse>),
        (status = 303, description = "Not signed in, or the settings could not be loaded and the dashboard is shown with an error flash"),
    )
)]
pub async fn view_settings(State(data): State<Arc<AppState>>, jar: CookieJar) -> Response {
    match data.di_container.site_service.get_site().await {
        Ok(response) => {
            let (jar, flash) = take_flash(jar);
            (jar, Json(AdminPage::new(flash, response.data))).into_response()
        }
        Err(e) => redirect_with(jar, DASHBOARD_PATH, Flash::error(e.message)),
    }
}

#[utoipa::path(
    post,
    path = "/admin/settings",
    tag = "Settings",
    security(
        ("session_cookie" = [])
    ),
    request_body(content = ChangePasswordRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects to settings with the outcome as a flash message"),
    )
)]
pub async fn change_password(
    State(data): State<Arc<AppState>>,
    Extension(admin): Extension<UserResponse>,
    jar: CookieJar,
    Form(body): Form<ChangePasswordRequest>,
) -> Response {
    let result = data
        .di_container
        .auth_service
        .change_password(admin.id, &body)
        .await;

    redirect_outcome(jar, result, SETTINGS_PATH, SETTINGS_PATH)
}

#[utoipa::path(
    post,
    path = "/admin/settings/addresses",
    tag = "Settings",
    security(
        ("session_cookie" = [])
    ),
    request_body(content = UpdateAddressesRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects to settings with the outcome as a flash message"),
    )
)]
pub async fn update_addresses(
    State(data): State<Arc<AppState>>,
    jar: CookieJar,
    Form(body): Form<UpdateAddressesRequest>,
) -> Response {
    let result = data
        .di_container
        .site_service
        .update_addresses(&body)
        .await;

    redirect_outcome(jar, result, SETTINGS_PATH, SETTINGS_PATH)
}

pub fn settings_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(SETTINGS_PATH, get(view_settings).post(change_password))
        .route("/admin/settings/addresses", post(update_addresses))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            session::require_admin,
        ))
        .with_state(app_state)
}

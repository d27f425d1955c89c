use axum::{
    Form, Json,
    extract::{Path, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use shared::domain::{
    request::{AdjustBalanceRequest, EditUserForm},
    response::user::UserDetailResponse,
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

const UNKNOWN_USER: &str = "User with that Id not found";

fn edit_user_path(id: &str) -> String {
    format!("/admin/edit-user/{}", urlencoding::encode(id))
}

fn parse_user_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

#[utoipa::path(
    post,
    path = "/admin/credit-user/{client_id}",
    tag = "User",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("client_id" = i32, Path, description = "Client ID")
    ),
    request_body(content = AdjustBalanceRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects to the client's edit page with the outcome as a flash message"),
    )
)]
pub async fn credit_user(
    State(data): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
    Form(body): Form<AdjustBalanceRequest>,
) -> Response {
    let back = edit_user_path(&raw_id);
    let Some(client_id) = parse_user_id(&raw_id) else {
        return redirect_with(jar, &back, Flash::error(UNKNOWN_USER));
    };

    let result = data
        .di_container
        .user_service
        .credit_user(client_id, &body)
        .await;

    redirect_outcome(jar, result, &back, &back)
}

#[utoipa::path(
    post,
    path = "/admin/deposit-user/{client_id}",
    tag = "User",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("client_id" = i32, Path, description = "Client ID")
    ),
    request_body(content = AdjustBalanceRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects to the client's edit page with the outcome as a flash message"),
    )
)]
pub async fn deposit_user(
    State(data): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
    Form(body): Form<AdjustBalanceRequest>,
) -> Response {
    let back = edit_user_path(&raw_id);
    let Some(client_id) = parse_user_id(&raw_id) else {
        return redirect_with(jar, &back, Flash::error(UNKNOWN_USER));
    };

    let result = data
        .di_container
        .user_service
        .deposit_user(client_id, &body)
        .await;

    redirect_outcome(jar, result, &back, &back)
}

#[utoipa::path(
    get,
    path = "/admin/delete-account/{client_id}",
    tag = "User",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("client_id" = i32, Path, description = "Client ID")
    ),
    responses(
        (status = 303, description = "Redirects to the dashboard with the outcome as a flash message"),
    )
)]
pub async fn delete_account(
    State(data): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
) -> Response {
    let Some(client_id) = parse_user_id(&raw_id) else {
        return redirect_with(jar, DASHBOARD_PATH, Flash::error(UNKNOWN_USER));
    };

    let result = data.di_container.user_service.delete_user(client_id).await;

    redirect_outcome(jar, result, DASHBOARD_PATH, DASHBOARD_PATH)
}

#[utoipa::path(
    get,
    path = "/admin/edit-user/{id}",
    tag = "User",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User with ledger history", body = AdminPage<UserDetailResponse>),
        (status = 303, description = "Unknown or malformed user id, redirects to the dashboard"),
    )
)]
pub async fn view_user(
    State(data): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
) -> Response {
    let Some(id) = parse_user_id(&raw_id) else {
        return redirect_with(jar, DASHBOARD_PATH, Flash::error(UNKNOWN_USER));
    };

    match data.di_container.user_service.get_user(id).await {
        Ok(response) => {
            let (jar, flash) = take_flash(jar);
            (jar, Json(AdminPage::new(flash, response.data))).into_response()
        }
        Err(e) => redirect_with(jar, DASHBOARD_PATH, Flash::error(e.message)),
    }
}

#[utoipa::path(
    post,
    path = "/admin/edit-user/{id}",
    tag = "User",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body(content = EditUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects to the edit page with the outcome as a flash message"),
    )
)]
pub async fn edit_user(
    State(data): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
    Form(body): Form<EditUserForm>,
) -> Response {
    let Some(id) = parse_user_id(&raw_id) else {
        return redirect_with(jar, DASHBOARD_PATH, Flash::error(UNKNOWN_USER));
    };

    let result = data.di_container.user_service.edit_user(id, &body).await;

    let back = edit_user_path(&raw_id);
    redirect_outcome(jar, result, &back, &back)
}

pub fn user_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin/credit-user/{client_id}", post(credit_user))
        .route("/admin/deposit-user/{client_id}", post(deposit_user))
        .route("/admin/delete-account/{client_id}", get(delete_account))
        .route("/admin/edit-user/{id}", get(view_user).post(edit_user))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            session::require_admin,
        ))
        .with_state(app_state)
}

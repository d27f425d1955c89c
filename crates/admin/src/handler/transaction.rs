use axum::{
    extract::{Path, State},
    middleware,
    response::Response,
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

use super::{DASHBOARD_PATH, redirect_outcome};
use crate::{middleware::session, state::AppState};

#[utoipa::path(
    get,
    path = "/admin/approve-deposit/{reference}",
    tag = "Transactions",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("reference" = String, Path, description = "Deposit reference")
    ),
    responses(
        (status = 303, description = "Redirects to the dashboard with the outcome as a flash message"),
    )
)]
pub async fn approve_deposit(
    State(data): State<Arc<AppState>>,
    Path(reference): Path<String>,
    jar: CookieJar,
) -> Response {
    let result = data
        .di_container
        .deposit_service
        .approve_deposit(&reference)
        .await;

    redirect_outcome(jar, result, DASHBOARD_PATH, DASHBOARD_PATH)
}

#[utoipa::path(
    get,
    path = "/admin/reject-deposit/{reference}",
    tag = "Transactions",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("reference" = String, Path, description = "Deposit reference")
    ),
    responses(
        (status = 303, description = "Redirects to the dashboard with the outcome as a flash message"),
    )
)]
pub async fn reject_deposit(
    State(data): State<Arc<AppState>>,
    Path(reference): Path<String>,
    jar: CookieJar,
) -> Response {
    let result = data
        .di_container
        .deposit_service
        .reject_deposit(&reference)
        .await;

    redirect_outcome(jar, result, DASHBOARD_PATH, DASHBOARD_PATH)
}

#[utoipa::path(
    get,
    path = "/admin/approve-withdrawal/{reference}",
    tag = "Transactions",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("reference" = String, Path, description = "Withdrawal reference")
    ),
    responses(
        (status = 303, description = "Redirects to the dashboard with the outcome as a flash message"),
    )
)]
pub async fn approve_withdrawal(
    State(data): State<Arc<AppState>>,
    Path(reference): Path<String>,
    jar: CookieJar,
) -> Response {
    let result = data
        .di_container
        .withdraw_service
        .approve_withdrawal(&reference)
        .await;

    redirect_outcome(jar, result, DASHBOARD_PATH, DASHBOARD_PATH)
}

#[utoipa::path(
    get,
    path = "/admin/reject-withdrawal/{reference}",
    tag = "Transactions",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("reference" = String, Path, description = "Withdrawal reference")
    ),
    responses(
        (status = 303, description = "Redirects to the dashboard with the outcome as a flash message"),
    )
)]
pub async fn reject_withdrawal(
    State(data): State<Arc<AppState>>,
    Path(reference): Path<String>,
    jar: CookieJar,
) -> Response {
    let result = data
        .di_container
        .withdraw_service
        .reject_withdrawal(&reference)
        .await;

    redirect_outcome(jar, result, DASHBOARD_PATH, DASHBOARD_PATH)
}

pub fn transaction_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin/approve-deposit/{reference}", get(approve_deposit))
        .route("/admin/reject-deposit/{reference}", get(reject_deposit))
        .route(
            "/admin/approve-withdrawal/{reference}",
            get(approve_withdrawal),
        )
        .route(
            "/admin/reject-withdrawal/{reference}",
            get(reject_withdrawal),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            session::require_admin,
        ))
        .with_state(app_state)
}

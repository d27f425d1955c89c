use axum::{
    Json,
    extract::State,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use shared::domain::response::{ErrorResponse, dashboard::DashboardResponse};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

use super::AdminPage;
use crate::{
    middleware::{
        flash::{Flash, take_flash},
        session,
    },
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/admin",
    tag = "Dashboard",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Clients with pending deposits and withdrawals; empty lists and an error flash when loading fails", body = AdminPage<DashboardResponse>),
        (status = 303, description = "Not signed in as an administrator"),
    )
)]
pub async fn dashboard(State(data): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let services = &data.di_container;

    let page = async {
        let users = services.user_service.get_clients().await?.data;
        let pending_deposits = services.deposit_service.get_pending_deposits().await?.data;
        let pending_withdrawals = services
            .withdraw_service
            .get_pending_withdrawals()
            .await?
            .data;

        Ok::<_, ErrorResponse>(DashboardResponse {
            users,
            pending_deposits,
            pending_withdrawals,
        })
    }
    .await;

    let (jar, flash) = take_flash(jar);

    match page {
        Ok(dashboard) => (jar, Json(AdminPage::new(flash, dashboard))).into_response(),
        Err(e) => {
            let page = AdminPage::new(Some(Flash::error(e.message)), DashboardResponse::default());
            (jar, Json(page)).into_response()
        }
    }
}

pub fn dashboard_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin", get(dashboard))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            session::require_admin,
        ))
        .with_state(app_state)
}

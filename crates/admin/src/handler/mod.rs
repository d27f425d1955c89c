mod auth;
mod dashboard;
mod settings;
mod transaction;
mod user;

use crate::{
    middleware::flash::{Flash, set_flash},
    state::AppState,
};
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use prometheus_client::encoding::text::encode;
use serde::Serialize;
use shared::domain::response::{ApiResponse, ErrorResponse};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_axum::router::OpenApiRouter;

pub use self::auth::auth_routes;
pub use self::dashboard::dashboard_routes;
pub use self::settings::settings_routes;
pub use self::transaction::transaction_routes;
pub use self::user::user_routes;

pub const DASHBOARD_PATH: &str = "/admin";

/// JSON body of every admin page: the page data plus the flash message left
/// by the previous action, if any.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminPage<T> {
    pub flash: Option<Flash>,
    pub data: T,
}

impl<T> AdminPage<T> {
    pub fn new(flash: Option<Flash>, data: T) -> Self {
        Self { flash, data }
    }
}

pub fn redirect_with(jar: CookieJar, to: &str, flash: Flash) -> Response {
    (set_flash(jar, flash), Redirect::to(to)).into_response()
}

/// Redirects after a mutation, carrying the service message as a flash.
pub fn redirect_outcome<T>(
    jar: CookieJar,
    result: Result<ApiResponse<T>, ErrorResponse>,
    success_to: &str,
    failure_to: &str,
) -> Response {
    match result {
        Ok(response) => redirect_with(jar, success_to, Flash::success(response.message)),
        Err(e) => redirect_with(jar, failure_to, Flash::error(e.message)),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login_page,
        auth::login,
        auth::logout,
        dashboard::dashboard,
        settings::view_settings,
        settings::change_password,
        settings::update_addresses,
        transaction::approve_deposit,
        transaction::reject_deposit,
        transaction::approve_withdrawal,
        transaction::reject_withdrawal,
        user::credit_user,
        user::deposit_user,
        user::delete_account,
        user::view_user,
        user::edit_user
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Administrator sign in and out"),
        (name = "Dashboard", description = "Clients and pending requests"),
        (name = "Transactions", description = "Deposit and withdrawal review"),
        (name = "User", description = "Client account management"),
        (name = "Settings", description = "Site addresses and admin password")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            );
        }
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let mut router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone());

        router = router.merge(auth_routes(shared_state.clone()));
        router = router.merge(dashboard_routes(shared_state.clone()));
        router = router.merge(settings_routes(shared_state.clone()));
        router = router.merge(transaction_routes(shared_state.clone()));
        router = router.merge(user_routes(shared_state.clone()));

        let (router, api) = router.split_for_parts();

        router
            .route(
                "/api-docs/openapi.json",
                get(move || {
                    let api = api.clone();
                    async move { Json(api) }
                }),
            )
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("Server running on http://{}", listener.local_addr()?);
        info!("OpenAPI document available at http://localhost:{port}/api-docs/openapi.json");

        axum::serve(listener, app).await?;
        Ok(())
    }
}

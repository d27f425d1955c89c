use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Method, Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
    response::Response,
};
use async_trait::async_trait;
use deposit_admin::{handler::AppRouter, state::AppState};
use rust_decimal::{Decimal, dec};
use serde_json::Value;
use shared::{
    abstract_trait::{
        DepositRepositoryTrait, DynDepositRepository, DynHashing, DynJwtService,
        DynSiteRepository, HashingTrait, JwtServiceTrait, SiteRepositoryTrait,
    },
    config::{Hashing, JwtConfig},
    domain::request::UpdateAddressesRequest,
    model::{deposit::Deposit, site::Site, status::TransactionStatus},
    testing::InMemoryStore,
    utils::{AppError, Repositories},
};
use tower::ServiceExt;

const SECRET: &str = "admin-route-secret";

struct Harness {
    store: Arc<InMemoryStore>,
    app: Router,
    admin_cookie: String,
}

impl Harness {
    fn new() -> Self {
        let store = InMemoryStore::new();
        let repositories = store.repositories();
        Self::with_repositories(store, repositories)
    }

    fn with_repositories(store: Arc<InMemoryStore>, repositories: Repositories) -> Self {
        let admin = store.add_user("admin@example.com", "x", Decimal::ZERO, true, false);

        let state = AppState::with_repositories(
            repositories,
            Arc::new(Hashing::with_cost(4)) as DynHashing,
            Arc::new(JwtConfig::new(SECRET)) as DynJwtService,
            false,
        );

        Self {
            admin_cookie: cookie_for(admin.user_id as i64),
            store,
            app: AppRouter::build(state),
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, path: &str, cookie: Option<&str>, form: &str) -> Response {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap())
            .await
    }
}

fn cookie_for(user_id: i64) -> String {
    let token = JwtConfig::new(SECRET).generate_token(user_id).unwrap();
    format!("token={token}")
}

fn location(response: &Response) -> &str {
    response.headers()[LOCATION].to_str().unwrap()
}

/// Raw `flash` cookie value set by the response, if any.
fn flash_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix("flash="))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
        .filter(|v| !v.is_empty())
}

fn flash_text(response: &Response) -> String {
    let raw = flash_cookie(response).expect("flash cookie set");
    urlencoding::decode(&raw).unwrap().into_owned()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Site and deposit storage that is always unreachable.
struct BrokenStorage;

fn broken() -> AppError {
    AppError::InternalError("connection refused".to_string())
}

#[async_trait]
impl SiteRepositoryTrait for BrokenStorage {
    async fn find_first(&self) -> Result<Option<Site>, AppError> {
        Err(broken())
    }

    async fn create(&self, _input: &UpdateAddressesRequest) -> Result<Site, AppError> {
        Err(broken())
    }

    async fn update(&self, _site_id: i32, _input: &UpdateAddressesRequest) -> Result<Site, AppError> {
        Err(broken())
    }
}

#[async_trait]
impl DepositRepositoryTrait for BrokenStorage {
    async fn find_by_status(&self, _status: TransactionStatus) -> Result<Vec<Deposit>, AppError> {
        Err(broken())
    }

    async fn find_by_reference(&self, _reference: &str) -> Result<Option<Deposit>, AppError> {
        Err(broken())
    }

    async fn transition_status(
        &self,
        _reference: &str,
        _from: TransactionStatus,
        _to: TransactionStatus,
    ) -> Result<Option<Deposit>, AppError> {
        Err(broken())
    }
}

fn broken_harness() -> Harness {
    let store = InMemoryStore::new();
    let repositories = Repositories {
        site: Arc::new(BrokenStorage) as DynSiteRepository,
        deposit: Arc::new(BrokenStorage) as DynDepositRepository,
        ..store.repositories()
    };
    Harness::with_repositories(store, repositories)
}

const GUARDED_GETS: &[&str] = &[
    "/admin",
    "/admin/settings",
    "/admin/approve-deposit/REF",
    "/admin/reject-deposit/REF",
    "/admin/approve-withdrawal/REF",
    "/admin/reject-withdrawal/REF",
    "/admin/delete-account/1",
    "/admin/edit-user/1",
];

const GUARDED_POSTS: &[&str] = &[
    "/admin/settings",
    "/admin/settings/addresses",
    "/admin/credit-user/1",
    "/admin/deposit-user/1",
    "/admin/edit-user/1",
];

async fn assert_all_rejected(harness: &Harness, cookie: Option<&str>) {
    for path in GUARDED_GETS {
        let response = harness.get(path, cookie).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {path}");
        assert_eq!(location(&response), "/admin/login", "GET {path}");
    }

    for path in GUARDED_POSTS {
        let response = harness.post_form(path, cookie, "amount=50").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {path}");
        assert_eq!(location(&response), "/admin/login", "POST {path}");
    }
}

#[tokio::test]
async fn missing_session_is_sent_to_login() {
    let harness = Harness::new();
    assert_all_rejected(&harness, None).await;
}

#[tokio::test]
async fn forged_token_is_sent_to_login() {
    let harness = Harness::new();
    assert_all_rejected(&harness, Some("token=not-a-jwt")).await;
}

#[tokio::test]
async fn non_admin_session_is_sent_to_login() {
    let harness = Harness::new();
    let client = harness
        .store
        .add_user("client@example.com", "x", Decimal::ZERO, false, false);

    assert_all_rejected(&harness, Some(&cookie_for(client.user_id as i64))).await;
}

#[tokio::test]
async fn disabled_admin_session_is_sent_to_login() {
    let harness = Harness::new();
    let disabled = harness
        .store
        .add_user("off@example.com", "x", Decimal::ZERO, true, true);

    assert_all_rejected(&harness, Some(&cookie_for(disabled.user_id as i64))).await;
}

#[tokio::test]
async fn approve_deposit_redirects_to_dashboard_with_flash() {
    let harness = Harness::new();
    let client = harness
        .store
        .add_user("client@example.com", "x", dec!(10), false, false);
    harness.store.add_deposit(client.user_id, dec!(90), "DEP-9");

    let response = harness
        .get("/admin/approve-deposit/DEP-9", Some(&harness.admin_cookie))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");
    assert_eq!(flash_text(&response), "success:Deposit Approved");

    let stored = harness.store.user(client.user_id).unwrap();
    assert_eq!(stored.balance, dec!(100));
    assert_eq!(stored.invested, dec!(90));

    let again = harness
        .get("/admin/approve-deposit/DEP-9", Some(&harness.admin_cookie))
        .await;
    assert_eq!(location(&again), "/admin");
    assert!(flash_text(&again).starts_with("error:"));
    assert_eq!(
        harness.store.user(client.user_id).unwrap().balance,
        dec!(100)
    );
}

#[tokio::test]
async fn reject_withdrawal_refunds_and_redirects() {
    let harness = Harness::new();
    let client = harness
        .store
        .add_user("client@example.com", "x", dec!(10), false, false);
    harness.store.add_withdraw(client.user_id, dec!(15), "WD-9");

    let response = harness
        .get("/admin/reject-withdrawal/WD-9", Some(&harness.admin_cookie))
        .await;

    assert_eq!(location(&response), "/admin");
    assert_eq!(flash_text(&response), "success:Withdrawal Rejected");
    assert_eq!(harness.store.user(client.user_id).unwrap().balance, dec!(25));
}

#[tokio::test]
async fn credit_user_redirects_back_to_edit_page() {
    let harness = Harness::new();
    let client = harness
        .store
        .add_user("client@example.com", "x", dec!(0), false, false);
    let path = format!("/admin/credit-user/{}", client.user_id);

    let response = harness
        .post_form(&path, Some(&harness.admin_cookie), "amount=50")
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/admin/edit-user/{}", client.user_id)
    );
    assert_eq!(flash_text(&response), "success:User credited successfully");
    assert_eq!(harness.store.user(client.user_id).unwrap().balance, dec!(50));
    assert_eq!(harness.store.histories().len(), 1);

    let refused = harness
        .post_form(&path, Some(&harness.admin_cookie), "amount=lots")
        .await;
    assert!(flash_text(&refused).starts_with("error:Invalid amount"));
    assert_eq!(harness.store.histories().len(), 1);
}

#[tokio::test]
async fn flash_is_shown_once_on_the_next_page() {
    let harness = Harness::new();
    let client = harness
        .store
        .add_user("client@example.com", "x", dec!(0), false, false);
    harness.store.add_deposit(client.user_id, dec!(5), "DEP-F");

    let response = harness
        .get("/admin/reject-deposit/DEP-F", Some(&harness.admin_cookie))
        .await;
    let flash = flash_cookie(&response).unwrap();

    let cookie = format!("{}; flash={flash}", harness.admin_cookie);
    let page = harness.get("/admin", Some(&cookie)).await;

    assert_eq!(page.status(), StatusCode::OK);
    assert_eq!(flash_cookie(&page), None);
    assert!(
        page.headers()
            .get_all(SET_COOKIE)
            .iter()
            .any(|v| v.to_str().unwrap().starts_with("flash="))
    );

    let body = json_body(page).await;
    assert_eq!(body["flash"]["type"], "success");
    assert_eq!(body["flash"]["message"], "Deposit Rejected");
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 1);

    let later = harness.get("/admin", Some(&harness.admin_cookie)).await;
    let body = json_body(later).await;
    assert!(body["flash"].is_null());
}

#[tokio::test]
async fn settings_keep_blank_addresses() {
    let harness = Harness::new();

    harness
        .post_form(
            "/admin/settings/addresses",
            Some(&harness.admin_cookie),
            "bitcoin_address=bc1&bch_address=bch1",
        )
        .await;

    let response = harness
        .post_form(
            "/admin/settings/addresses",
            Some(&harness.admin_cookie),
            "bitcoin_address=&bch_address=bch2",
        )
        .await;
    assert_eq!(location(&response), "/admin/settings");

    let page = harness
        .get("/admin/settings", Some(&harness.admin_cookie))
        .await;
    let body = json_body(page).await;
    assert_eq!(body["data"]["bitcoin_address"], "bc1");
    assert_eq!(body["data"]["bch_address"], "bch2");
}

#[tokio::test]
async fn password_rules_are_flashed() {
    let harness = Harness::new();

    let response = harness
        .post_form(
            "/admin/settings",
            Some(&harness.admin_cookie),
            "password=short&password2=short",
        )
        .await;

    assert_eq!(location(&response), "/admin/settings");
    assert_eq!(
        flash_text(&response),
        "error:Password should be at least 8 characters long"
    );
}

#[tokio::test]
async fn login_sets_session_cookie_and_logout_clears_it() {
    let harness = Harness::new();
    let hash = Hashing::with_cost(4)
        .hash_password("letmein-please")
        .await
        .unwrap();
    harness
        .store
        .add_user("boss@example.com", &hash, Decimal::ZERO, true, false);

    let response = harness
        .post_form(
            "/admin/login",
            None,
            "email=boss%40example.com&password=letmein-please",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    let token = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix("token="))
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string();

    let dashboard = harness
        .get("/admin", Some(&format!("token={token}")))
        .await;
    assert_eq!(dashboard.status(), StatusCode::OK);

    let wrong = harness
        .post_form(
            "/admin/login",
            None,
            "email=boss%40example.com&password=wrong-password",
        )
        .await;
    assert_eq!(location(&wrong), "/admin/login");
    assert_eq!(flash_text(&wrong), "error:Invalid email or password");

    let logout = harness.get("/admin/logout", None).await;
    assert_eq!(location(&logout), "/admin/login");
}

#[tokio::test]
async fn metrics_and_openapi_are_public() {
    let harness = Harness::new();

    let metrics = harness.get("/metrics", None).await;
    assert_eq!(metrics.status(), StatusCode::OK);

    let docs = harness.get("/api-docs/openapi.json", None).await;
    assert_eq!(docs.status(), StatusCode::OK);
    let body = json_body(docs).await;
    assert!(body["paths"]["/admin/approve-deposit/{reference}"].is_object());
}

#[tokio::test]
async fn malformed_client_id_is_flashed_as_unknown_user() {
    let harness = Harness::new();

    for path in ["/admin/credit-user/abc", "/admin/deposit-user/abc"] {
        let response = harness
            .post_form(path, Some(&harness.admin_cookie), "amount=50")
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {path}");
        assert_eq!(location(&response), "/admin/edit-user/abc", "POST {path}");
        assert_eq!(flash_text(&response), "error:User with that Id not found");
    }

    let edit = harness
        .post_form("/admin/edit-user/abc", Some(&harness.admin_cookie), "email=a%40b.c")
        .await;
    assert_eq!(location(&edit), "/admin");
    assert_eq!(flash_text(&edit), "error:User with that Id not found");

    for path in ["/admin/edit-user/abc", "/admin/delete-account/abc"] {
        let response = harness.get(path, Some(&harness.admin_cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {path}");
        assert_eq!(location(&response), "/admin", "GET {path}");
        assert_eq!(flash_text(&response), "error:User with that Id not found");
    }

    assert!(harness.store.histories().is_empty());
}

#[tokio::test]
async fn dashboard_shows_load_failure_as_flash() {
    let harness = broken_harness();

    let page = harness.get("/admin", Some(&harness.admin_cookie)).await;
    assert_eq!(page.status(), StatusCode::OK);

    let body = json_body(page).await;
    assert_eq!(body["flash"]["type"], "error");
    assert_eq!(body["flash"]["message"], "Internal server error");
    assert!(body["data"]["users"].as_array().unwrap().is_empty());
    assert!(body["data"]["pending_deposits"].as_array().unwrap().is_empty());
    assert!(body["data"]["pending_withdrawals"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn settings_load_failure_redirects_to_dashboard() {
    let harness = broken_harness();

    let response = harness
        .get("/admin/settings", Some(&harness.admin_cookie))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");
    assert_eq!(flash_text(&response), "error:Internal server error");
}

#[tokio::test]
async fn unreadable_flash_cookie_is_cleared() {
    let harness = Harness::new();
    let cookie = format!("{}; flash=garbage", harness.admin_cookie);

    let page = harness.get("/admin", Some(&cookie)).await;
    assert_eq!(page.status(), StatusCode::OK);
    assert!(
        page.headers()
            .get_all(SET_COOKIE)
            .iter()
            .any(|v| v.to_str().unwrap().starts_with("flash=;"))
    );

    let body = json_body(page).await;
    assert!(body["flash"].is_null());
}

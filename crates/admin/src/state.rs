use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{ConnectionPool, Hashing, JwtConfig},
    utils::{DependenciesInject, Repositories},
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(pool: ConnectionPool, jwt_secret: &str, cookie_secure: bool) -> Self {
        Self::with_repositories(
            Repositories::postgres(pool),
            Arc::new(Hashing::new()) as DynHashing,
            Arc::new(JwtConfig::new(jwt_secret)) as DynJwtService,
            cookie_secure,
        )
    }

    pub fn with_repositories(
        repositories: Repositories,
        hashing: DynHashing,
        jwt_config: DynJwtService,
        cookie_secure: bool,
    ) -> Self {
        let mut registry = Registry::default();

        let di_container =
            DependenciesInject::from_repositories(repositories, hashing, jwt_config, &mut registry);

        Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            cookie_secure,
        }
    }
}

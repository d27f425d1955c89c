use prometheus_client::registry::Registry;
use std::sync::Arc;

use crate::{
    abstract_trait::{
        DynAuthService, DynDepositRepository, DynDepositService, DynHashing,
        DynHistoryRepository, DynJwtService, DynSiteRepository, DynSiteService,
        DynUserRepository, DynUserService, DynWithdrawRepository, DynWithdrawService,
    },
    config::ConnectionPool,
    repository::{
        deposit::DepositRepository, history::HistoryRepository, site::SiteRepository,
        user::UserRepository, withdraw::WithdrawRepository,
    },
    service::{
        auth::AuthService, deposit::DepositService, site::SiteService, user::UserService,
        withdraw::WithdrawService,
    },
};

/// The repository set every service is built from.
#[derive(Clone)]
pub struct Repositories {
    pub user: DynUserRepository,
    pub deposit: DynDepositRepository,
    pub withdraw: DynWithdrawRepository,
    pub history: DynHistoryRepository,
    pub site: DynSiteRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            user: Arc::new(UserRepository::new(pool.clone())) as DynUserRepository,
            deposit: Arc::new(DepositRepository::new(pool.clone())) as DynDepositRepository,
            withdraw: Arc::new(WithdrawRepository::new(pool.clone())) as DynWithdrawRepository,
            history: Arc::new(HistoryRepository::new(pool.clone())) as DynHistoryRepository,
            site: Arc::new(SiteRepository::new(pool)) as DynSiteRepository,
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub user_service: DynUserService,
    pub deposit_service: DynDepositService,
    pub withdraw_service: DynWithdrawService,
    pub site_service: DynSiteService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"DynAuthService")
            .field("user_service", &"DynUserService")
            .field("deposit_service", &"DynDepositService")
            .field("withdraw_service", &"DynWithdrawService")
            .field("site_service", &"DynSiteService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn from_repositories(
        repositories: Repositories,
        hashing: DynHashing,
        jwt_config: DynJwtService,
        registry: &mut Registry,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(
            repositories.user.clone(),
            hashing,
            jwt_config,
            registry,
        )) as DynAuthService;

        let user_service = Arc::new(UserService::new(
            repositories.user.clone(),
            repositories.history.clone(),
            registry,
        )) as DynUserService;

        let deposit_service = Arc::new(DepositService::new(
            repositories.deposit.clone(),
            repositories.history.clone(),
            repositories.user.clone(),
            registry,
        )) as DynDepositService;

        let withdraw_service = Arc::new(WithdrawService::new(
            repositories.withdraw.clone(),
            repositories.history.clone(),
            repositories.user.clone(),
            registry,
        )) as DynWithdrawService;

        let site_service =
            Arc::new(SiteService::new(repositories.site.clone(), registry)) as DynSiteService;

        Self {
            auth_service,
            user_service,
            deposit_service,
            withdraw_service,
            site_service,
        }
    }
}

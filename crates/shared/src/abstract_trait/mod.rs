pub mod auth;
pub mod deposit;
pub mod hashing;
pub mod history;
pub mod jwt;
pub mod site;
pub mod user;
pub mod withdraw;

pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::hashing::{DynHashing, HashingTrait};

pub use self::jwt::{DynJwtService, JwtServiceTrait};

pub use self::deposit::{
    DepositRepositoryTrait, DepositServiceTrait, DynDepositRepository, DynDepositService,
};

pub use self::history::{DynHistoryRepository, HistoryRepositoryTrait};

pub use self::site::{DynSiteRepository, DynSiteService, SiteRepositoryTrait, SiteServiceTrait};

pub use self::user::{DynUserRepository, DynUserService, UserRepositoryTrait, UserServiceTrait};

pub use self::withdraw::{
    DynWithdrawRepository, DynWithdrawService, WithdrawRepositoryTrait, WithdrawServiceTrait,
};

//! In-memory repositories for exercising services and handlers without
//! PostgreSQL.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::types::Json;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    abstract_trait::{
        DepositRepositoryTrait, DynDepositRepository, DynHistoryRepository, DynSiteRepository,
        DynUserRepository, DynWithdrawRepository, HistoryRepositoryTrait, SiteRepositoryTrait,
        UserRepositoryTrait, WithdrawRepositoryTrait,
    },
    domain::request::{
        CreateHistoryRequest, CreateUserRequest, UpdateAddressesRequest, UpdateUserRequest,
    },
    model::{
        deposit::Deposit,
        history::{History, UserSnapshot},
        site::Site,
        status::TransactionStatus,
        user::User,
        withdraw::Withdraw,
    },
    utils::{AppError, Repositories},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    deposits: Vec<Deposit>,
    withdraws: Vec<Withdraw>,
    histories: Vec<History>,
    sites: Vec<Site>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// One store backing all five repository traits.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::InternalError("in-memory store poisoned".to_string()))
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            user: self.clone() as DynUserRepository,
            deposit: self.clone() as DynDepositRepository,
            withdraw: self.clone() as DynWithdrawRepository,
            history: self.clone() as DynHistoryRepository,
            site: self.clone() as DynSiteRepository,
        }
    }

    /// Inserts a user with the given figures. `password` must already be a
    /// bcrypt hash when the user is expected to log in.
    pub fn add_user(
        &self,
        email: &str,
        password: &str,
        balance: Decimal,
        is_admin: bool,
        disabled: bool,
    ) -> User {
        let mut tables = self.tables();
        let user = User {
            user_id: tables.next_id(),
            firstname: "Test".to_string(),
            lastname: "User".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: String::new(),
            balance,
            invested: Decimal::ZERO,
            account_level: String::new(),
            upgrade: false,
            disabled,
            cot: String::new(),
            currency: "USD".to_string(),
            withdrawal_pin: String::new(),
            is_admin,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        tables.users.push(user.clone());
        user
    }

    /// Seeds a pending deposit together with its pending ledger entry.
    pub fn add_deposit(&self, user_id: i32, amount: Decimal, reference: &str) -> Deposit {
        let mut tables = self.tables();
        let deposit = Deposit {
            deposit_id: tables.next_id(),
            user_id,
            amount,
            reference: reference.to_string(),
            method: "Bitcoin".to_string(),
            status: TransactionStatus::Pending.to_string(),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        tables.deposits.push(deposit.clone());
        let history = pending_history(&mut tables, "DEPOSIT", user_id, amount, reference);
        tables.histories.push(history);
        deposit
    }

    /// Seeds a pending withdrawal together with its pending ledger entry.
    pub fn add_withdraw(&self, user_id: i32, amount: Decimal, reference: &str) -> Withdraw {
        let mut tables = self.tables();
        let withdraw = Withdraw {
            withdraw_id: tables.next_id(),
            user_id,
            amount,
            reference: reference.to_string(),
            method: "Bitcoin".to_string(),
            status: TransactionStatus::Pending.to_string(),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        tables.withdraws.push(withdraw.clone());
        let history = pending_history(&mut tables, "WITHDRAWAL", user_id, amount, reference);
        tables.histories.push(history);
        withdraw
    }

    pub fn add_site(&self, site: Site) {
        self.tables().sites.push(site);
    }

    pub fn user(&self, id: i32) -> Option<User> {
        self.tables().users.iter().find(|u| u.user_id == id).cloned()
    }

    pub fn deposit(&self, reference: &str) -> Option<Deposit> {
        self.tables()
            .deposits
            .iter()
            .find(|d| d.reference == reference)
            .cloned()
    }

    pub fn withdraw(&self, reference: &str) -> Option<Withdraw> {
        self.tables()
            .withdraws
            .iter()
            .find(|w| w.reference == reference)
            .cloned()
    }

    pub fn histories(&self) -> Vec<History> {
        self.tables().histories.clone()
    }

    pub fn site(&self) -> Option<Site> {
        self.tables().sites.first().cloned()
    }
}

fn pending_history(
    tables: &mut Tables,
    kind: &str,
    user_id: i32,
    amount: Decimal,
    reference: &str,
) -> History {
    let snapshot = tables
        .users
        .iter()
        .find(|u| u.user_id == user_id)
        .map(UserSnapshot::from)
        .unwrap_or_else(|| UserSnapshot {
            user_id,
            firstname: String::new(),
            lastname: String::new(),
            email: String::new(),
            currency: String::new(),
        });

    History {
        history_id: tables.next_id(),
        kind: kind.to_string(),
        note: None,
        amount,
        reference: reference.to_string(),
        user_id,
        user_snapshot: Json(snapshot),
        method: "Bitcoin".to_string(),
        status: TransactionStatus::Pending.to_string(),
        date: Utc::now(),
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryStore {
    async fn find_clients(&self) -> Result<Vec<User>, AppError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .filter(|u| !u.is_admin)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.lock()?.users.iter().find(|u| u.user_id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.lock()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, input: &CreateUserRequest) -> Result<User, AppError> {
        let mut tables = self.lock()?;
        let user = User {
            user_id: tables.next_id(),
            firstname: input.firstname.clone(),
            lastname: input.lastname.clone(),
            email: input.email.clone(),
            password: input.password.clone(),
            phone: input.phone.clone(),
            balance: Decimal::ZERO,
            invested: Decimal::ZERO,
            account_level: String::new(),
            upgrade: false,
            disabled: false,
            cot: String::new(),
            currency: input.currency.clone(),
            withdrawal_pin: String::new(),
            is_admin: input.is_admin,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, input: &UpdateUserRequest) -> Result<Option<User>, AppError> {
        let mut tables = self.lock()?;
        let Some(user) = tables.users.iter_mut().find(|u| u.user_id == input.id) else {
            return Ok(None);
        };

        user.firstname = input.firstname.clone();
        user.lastname = input.lastname.clone();
        user.email = input.email.clone();
        user.balance = input.balance;
        user.invested = input.invested;
        user.upgrade = input.upgrade;
        user.disabled = input.disabled;
        user.account_level = input.account_level.clone();
        user.cot = input.cot.clone();
        user.phone = input.phone.clone();
        user.currency = input.currency.clone();
        user.withdrawal_pin = input.withdrawal_pin.clone();
        user.updated_at = Some(Utc::now());

        Ok(Some(user.clone()))
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), AppError> {
        let mut tables = self.lock()?;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.user_id == id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;
        user.password = password_hash.to_string();
        Ok(())
    }

    async fn adjust_balance(
        &self,
        id: i32,
        balance_delta: Decimal,
        invested_delta: Decimal,
    ) -> Result<Option<User>, AppError> {
        let mut tables = self.lock()?;
        let Some(user) = tables.users.iter_mut().find(|u| u.user_id == id) else {
            return Ok(None);
        };
        user.balance += balance_delta;
        user.invested += invested_delta;
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.lock()?;
        let before = tables.users.len();
        tables.users.retain(|u| u.user_id != id);
        if tables.users.len() == before {
            return Err(AppError::NotFound(format!("User with id {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl DepositRepositoryTrait for InMemoryStore {
    async fn find_by_status(&self, status: TransactionStatus) -> Result<Vec<Deposit>, AppError> {
        Ok(self
            .lock()?
            .deposits
            .iter()
            .filter(|d| d.status == status.as_str())
            .cloned()
            .collect())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Deposit>, AppError> {
        Ok(self
            .lock()?
            .deposits
            .iter()
            .find(|d| d.reference == reference)
            .cloned())
    }

    async fn transition_status(
        &self,
        reference: &str,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> Result<Option<Deposit>, AppError> {
        let mut tables = self.lock()?;
        let found = tables
            .deposits
            .iter_mut()
            .find(|d| d.reference == reference && d.status == from.as_str());
        Ok(found.map(|d| {
            d.status = to.to_string();
            d.updated_at = Some(Utc::now());
            d.clone()
        }))
    }
}

#[async_trait]
impl WithdrawRepositoryTrait for InMemoryStore {
    async fn find_by_status(&self, status: TransactionStatus) -> Result<Vec<Withdraw>, AppError> {
        Ok(self
            .lock()?
            .withdraws
            .iter()
            .filter(|w| w.status == status.as_str())
            .cloned()
            .collect())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Withdraw>, AppError> {
        Ok(self
            .lock()?
            .withdraws
            .iter()
            .find(|w| w.reference == reference)
            .cloned())
    }

    async fn transition_status(
        &self,
        reference: &str,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> Result<Option<Withdraw>, AppError> {
        let mut tables = self.lock()?;
        let found = tables
            .withdraws
            .iter_mut()
            .find(|w| w.reference == reference && w.status == from.as_str());
        Ok(found.map(|w| {
            w.status = to.to_string();
            w.updated_at = Some(Utc::now());
            w.clone()
        }))
    }
}

#[async_trait]
impl HistoryRepositoryTrait for InMemoryStore {
    async fn create(&self, input: &CreateHistoryRequest) -> Result<History, AppError> {
        let mut tables = self.lock()?;
        let history = History {
            history_id: tables.next_id(),
            kind: input.kind.to_string(),
            note: input.note.clone(),
            amount: input.amount,
            reference: input.reference.clone(),
            user_id: input.user_id,
            user_snapshot: Json(input.user_snapshot.clone()),
            method: input.method.clone(),
            status: input.status.to_string(),
            date: Utc::now(),
        };
        tables.histories.push(history.clone());
        Ok(history)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<History>, AppError> {
        Ok(self
            .lock()?
            .histories
            .iter()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_status_by_reference(
        &self,
        reference: &str,
        status: TransactionStatus,
    ) -> Result<u64, AppError> {
        let mut tables = self.lock()?;
        let mut touched = 0;
        for history in tables.histories.iter_mut().filter(|h| h.reference == reference) {
            history.status = status.to_string();
            touched += 1;
        }
        Ok(touched)
    }
}

#[async_trait]
impl SiteRepositoryTrait for InMemoryStore {
    async fn find_first(&self) -> Result<Option<Site>, AppError> {
        Ok(self.lock()?.sites.first().cloned())
    }

    async fn create(&self, input: &UpdateAddressesRequest) -> Result<Site, AppError> {
        let mut tables = self.lock()?;
        let site = Site {
            site_id: tables.next_id(),
            bitcoin_address: input.bitcoin_address.clone(),
            bch_address: input.bch_address.clone(),
            ethereum_address: input.ethereum_address.clone(),
            usdt_address: input.usdt_address.clone(),
            whatsapp_number: input.whatsapp_number.clone(),
            updated_at: Some(Utc::now()),
        };
        tables.sites.push(site.clone());
        Ok(site)
    }

    async fn update(&self, site_id: i32, input: &UpdateAddressesRequest) -> Result<Site, AppError> {
        let mut tables = self.lock()?;
        let site = tables
            .sites
            .iter_mut()
            .find(|s| s.site_id == site_id)
            .ok_or_else(|| AppError::NotFound(format!("Site {site_id} not found")))?;

        site.bitcoin_address = input.bitcoin_address.clone();
        site.bch_address = input.bch_address.clone();
        site.ethereum_address = input.ethereum_address.clone();
        site.usdt_address = input.usdt_address.clone();
        site.whatsapp_number = input.whatsapp_number.clone();
        site.updated_at = Some(Utc::now());

        Ok(site.clone())
    }
}

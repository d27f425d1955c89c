use std::sync::Arc;

use prometheus_client::registry::Registry;
use rust_decimal::{Decimal, dec};

use crate::{
    abstract_trait::{DynHashing, DynJwtService, HashingTrait},
    config::{Hashing, JwtConfig},
    domain::{
        request::{
            AdjustBalanceRequest, ChangePasswordRequest, EditUserForm, LoginRequest,
            UpdateAddressesRequest,
        },
        response::site::SiteResponse,
    },
    model::site::Site,
    testing::InMemoryStore,
    utils::DependenciesInject,
};

const SECRET: &str = "service-test-secret";

fn container(store: &Arc<InMemoryStore>) -> DependenciesInject {
    let mut registry = Registry::default();
    DependenciesInject::from_repositories(
        store.repositories(),
        Arc::new(Hashing::with_cost(4)) as DynHashing,
        Arc::new(JwtConfig::new(SECRET)) as DynJwtService,
        &mut registry,
    )
}

fn amount(value: &str) -> AdjustBalanceRequest {
    AdjustBalanceRequest {
        amount: value.to_string(),
    }
}

#[tokio::test]
async fn approving_a_deposit_credits_balance_and_invested_once() {
    let store = InMemoryStore::new();
    let user = store.add_user("client@example.com", "x", dec!(10), false, false);
    store.add_deposit(user.user_id, dec!(250), "DEP-1");
    let di = container(&store);

    let approved = di.deposit_service.approve_deposit("DEP-1").await.unwrap();
    assert_eq!(approved.message, "Deposit Approved");
    assert_eq!(approved.data.status, "approved");

    let stored = store.user(user.user_id).unwrap();
    assert_eq!(stored.balance, dec!(260));
    assert_eq!(stored.invested, dec!(250));
    assert_eq!(store.deposit("DEP-1").unwrap().status, "approved");
    assert!(
        store
            .histories()
            .iter()
            .filter(|h| h.reference == "DEP-1")
            .all(|h| h.status == "approved")
    );

    let second = di.deposit_service.approve_deposit("DEP-1").await;
    assert!(second.is_err());

    let stored = store.user(user.user_id).unwrap();
    assert_eq!(stored.balance, dec!(260));
    assert_eq!(stored.invested, dec!(250));
}

#[tokio::test]
async fn rejecting_a_deposit_leaves_balance_untouched() {
    let store = InMemoryStore::new();
    let user = store.add_user("client@example.com", "x", dec!(10), false, false);
    store.add_deposit(user.user_id, dec!(99), "DEP-2");
    let di = container(&store);

    let rejected = di.deposit_service.reject_deposit("DEP-2").await.unwrap();
    assert_eq!(rejected.message, "Deposit Rejected");

    assert_eq!(store.user(user.user_id).unwrap().balance, dec!(10));
    assert_eq!(store.deposit("DEP-2").unwrap().status, "rejected");
    assert!(
        store
            .histories()
            .iter()
            .filter(|h| h.reference == "DEP-2")
            .all(|h| h.status == "rejected")
    );
}

#[tokio::test]
async fn unknown_deposit_reference_is_not_found() {
    let store = InMemoryStore::new();
    let di = container(&store);

    let err = di
        .deposit_service
        .approve_deposit("missing")
        .await
        .unwrap_err();
    assert_eq!(err.message, "Deposit with reference missing not found");
}

#[tokio::test]
async fn rejecting_a_withdrawal_refunds_the_amount() {
    let store = InMemoryStore::new();
    let user = store.add_user("client@example.com", "x", dec!(40), false, false);
    store.add_withdraw(user.user_id, dec!(60), "WD-1");
    let di = container(&store);

    let rejected = di.withdraw_service.reject_withdrawal("WD-1").await.unwrap();
    assert_eq!(rejected.message, "Withdrawal Rejected");

    assert_eq!(store.user(user.user_id).unwrap().balance, dec!(100));
    assert_eq!(store.withdraw("WD-1").unwrap().status, "rejected");

    assert!(di.withdraw_service.reject_withdrawal("WD-1").await.is_err());
    assert_eq!(store.user(user.user_id).unwrap().balance, dec!(100));
}

#[tokio::test]
async fn approving_a_withdrawal_does_not_move_funds() {
    let store = InMemoryStore::new();
    let user = store.add_user("client@example.com", "x", dec!(40), false, false);
    store.add_withdraw(user.user_id, dec!(60), "WD-2");
    let di = container(&store);

    di.withdraw_service.approve_withdrawal("WD-2").await.unwrap();

    assert_eq!(store.user(user.user_id).unwrap().balance, dec!(40));
    assert_eq!(store.withdraw("WD-2").unwrap().status, "approved");
    assert!(
        store
            .histories()
            .iter()
            .filter(|h| h.reference == "WD-2")
            .all(|h| h.status == "approved")
    );
}

#[tokio::test]
async fn rejecting_a_withdrawal_of_a_missing_owner_stays_pending() {
    let store = InMemoryStore::new();
    store.add_withdraw(9999, dec!(60), "WD-ORPHAN");
    let di = container(&store);

    let err = di
        .withdraw_service
        .reject_withdrawal("WD-ORPHAN")
        .await
        .unwrap_err();
    assert_eq!(
        err.message,
        "Owner 9999 of withdrawal WD-ORPHAN not found for refund"
    );

    assert_eq!(store.withdraw("WD-ORPHAN").unwrap().status, "pending");
    assert!(
        store
            .histories()
            .iter()
            .filter(|h| h.reference == "WD-ORPHAN")
            .all(|h| h.status == "pending")
    );
}

#[tokio::test]
async fn crediting_fifty_appends_one_profit_row() {
    let store = InMemoryStore::new();
    let user = store.add_user("client@example.com", "x", dec!(0), false, false);
    let di = container(&store);

    let credited = di
        .user_service
        .credit_user(user.user_id, &amount("50"))
        .await
        .unwrap();
    assert_eq!(credited.message, "User credited successfully");

    assert_eq!(store.user(user.user_id).unwrap().balance, dec!(50));

    let rows = store.histories();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "PROFIT");
    assert_eq!(rows[0].status, "approved");
    assert_eq!(rows[0].method, "Company Deposit");
    assert_eq!(rows[0].reference.len(), 16);
    assert_eq!(rows[0].user_snapshot.0.email, "client@example.com");
}

#[tokio::test]
async fn deposit_to_user_writes_deposit_row() {
    let store = InMemoryStore::new();
    let user = store.add_user("client@example.com", "x", dec!(5), false, false);
    let di = container(&store);

    let deposited = di
        .user_service
        .deposit_user(user.user_id, &amount(" 20.5 "))
        .await
        .unwrap();
    assert_eq!(deposited.message, "Account Deposit successfully");
    assert_eq!(deposited.data.kind, "DEPOSIT");

    assert_eq!(store.user(user.user_id).unwrap().balance, dec!(25.5));
}

#[tokio::test]
async fn invalid_amount_writes_nothing() {
    let store = InMemoryStore::new();
    let user = store.add_user("client@example.com", "x", dec!(5), false, false);
    let di = container(&store);

    for bad in ["abc", "", "0"] {
        assert!(
            di.user_service
                .credit_user(user.user_id, &amount(bad))
                .await
                .is_err()
        );
    }

    assert!(store.histories().is_empty());
    assert_eq!(store.user(user.user_id).unwrap().balance, dec!(5));
}

#[tokio::test]
async fn crediting_a_missing_user_is_not_found() {
    let store = InMemoryStore::new();
    let di = container(&store);

    let err = di
        .user_service
        .credit_user(404, &amount("50"))
        .await
        .unwrap_err();
    assert_eq!(err.message, "User with that Id not found");
}

#[tokio::test]
async fn edit_user_overwrites_fields_and_refuses_bad_numbers() {
    let store = InMemoryStore::new();
    let user = store.add_user("client@example.com", "x", dec!(5), false, false);
    let di = container(&store);

    let form = EditUserForm {
        firstname: "Grace".into(),
        lastname: "Hopper".into(),
        email: "grace@example.com".into(),
        balance: "75".into(),
        invested: "12.5".into(),
        disabled: Some("true".into()),
        currency: "EUR".into(),
        ..Default::default()
    };

    let edited = di.user_service.edit_user(user.user_id, &form).await.unwrap();
    assert_eq!(edited.message, "Client Account updated successfully");

    let stored = store.user(user.user_id).unwrap();
    assert_eq!(stored.email, "grace@example.com");
    assert_eq!(stored.balance, dec!(75));
    assert_eq!(stored.invested, dec!(12.5));
    assert!(stored.disabled);

    let bad = EditUserForm {
        balance: "plenty".into(),
        ..form
    };
    assert!(di.user_service.edit_user(user.user_id, &bad).await.is_err());
    assert_eq!(store.user(user.user_id).unwrap().balance, dec!(75));
}

#[tokio::test]
async fn get_user_includes_history() {
    let store = InMemoryStore::new();
    let user = store.add_user("client@example.com", "x", dec!(5), false, false);
    let di = container(&store);

    di.user_service
        .credit_user(user.user_id, &amount("1"))
        .await
        .unwrap();

    let detail = di.user_service.get_user(user.user_id).await.unwrap();
    assert_eq!(detail.data.user.id, user.user_id);
    assert_eq!(detail.data.history.len(), 1);
}

#[tokio::test]
async fn clients_exclude_admins_and_delete_removes_user() {
    let store = InMemoryStore::new();
    store.add_user("admin@example.com", "x", Decimal::ZERO, true, false);
    let client = store.add_user("client@example.com", "x", Decimal::ZERO, false, false);
    let di = container(&store);

    let clients = di.user_service.get_clients().await.unwrap();
    assert_eq!(clients.data.len(), 1);
    assert_eq!(clients.data[0].email, "client@example.com");

    let deleted = di.user_service.delete_user(client.user_id).await.unwrap();
    assert_eq!(deleted.message, "Account Deleted Successfully");
    assert!(store.user(client.user_id).is_none());
    assert!(di.user_service.delete_user(client.user_id).await.is_err());
}

#[tokio::test]
async fn blank_address_fields_keep_stored_values() {
    let store = InMemoryStore::new();
    store.add_site(Site {
        site_id: 1,
        bitcoin_address: Some("bc1-old".into()),
        bch_address: Some("bch-old".into()),
        ethereum_address: Some("0xold".into()),
        usdt_address: Some("T-old".into()),
        whatsapp_number: Some("+100".into()),
        updated_at: None,
    });
    let di = container(&store);

    let updated = di
        .site_service
        .update_addresses(&UpdateAddressesRequest {
            bitcoin_address: Some("bc1-new".into()),
            bch_address: Some("   ".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.message, "Addresses updated successfully");
    assert_eq!(updated.data.bitcoin_address.as_deref(), Some("bc1-new"));
    assert_eq!(updated.data.bch_address.as_deref(), Some("bch-old"));
    assert_eq!(updated.data.ethereum_address.as_deref(), Some("0xold"));
    assert_eq!(updated.data.usdt_address.as_deref(), Some("T-old"));
    assert_eq!(updated.data.whatsapp_number.as_deref(), Some("+100"));
}

#[tokio::test]
async fn first_address_save_stores_every_field() {
    let store = InMemoryStore::new();
    let di = container(&store);

    assert_eq!(
        di.site_service.get_site().await.unwrap().data,
        SiteResponse::default()
    );

    di.site_service
        .update_addresses(&UpdateAddressesRequest {
            bitcoin_address: Some("bc1".into()),
            bch_address: Some("bch".into()),
            ethereum_address: Some("0x1".into()),
            usdt_address: Some("T1".into()),
            whatsapp_number: Some("".into()),
        })
        .await
        .unwrap();

    let site = store.site().unwrap();
    assert_eq!(site.bch_address.as_deref(), Some("bch"));
    assert_eq!(site.whatsapp_number, None);
}

#[tokio::test]
async fn change_password_reports_rule_messages() {
    let store = InMemoryStore::new();
    let admin = store.add_user("admin@example.com", "x", Decimal::ZERO, true, false);
    let di = container(&store);

    let cases = [
        ("", "", "Enter new password"),
        ("short", "short", "Password should be at least 8 characters long"),
        ("longenough", "different1", "Passwords do not match"),
    ];

    for (password, password2, expected) in cases {
        let err = di
            .auth_service
            .change_password(
                admin.user_id,
                &ChangePasswordRequest {
                    password: password.into(),
                    password2: password2.into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.message, expected);
    }

    let ok = di
        .auth_service
        .change_password(
            admin.user_id,
            &ChangePasswordRequest {
                password: "longenough".into(),
                password2: "longenough".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(ok.message, "Password updated successfully");

    let stored = store.user(admin.user_id).unwrap();
    assert_ne!(stored.password, "longenough");
    assert!(
        Hashing::with_cost(4)
            .compare_password(&stored.password, "longenough")
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn only_enabled_admins_can_log_in() {
    let store = InMemoryStore::new();
    let hash = Hashing::with_cost(4).hash_password("secret-pw").await.unwrap();
    let admin = store.add_user("admin@example.com", &hash, Decimal::ZERO, true, false);
    store.add_user("client@example.com", &hash, Decimal::ZERO, false, false);
    store.add_user("off@example.com", &hash, Decimal::ZERO, true, true);
    let di = container(&store);

    let login = |email: &str, password: &str| LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let token = di
        .auth_service
        .login_admin(&login("admin@example.com", "secret-pw"))
        .await
        .unwrap()
        .data;

    let session = di.auth_service.session_admin(&token).await.unwrap();
    assert_eq!(session.data.id, admin.user_id);

    for (email, password) in [
        ("admin@example.com", "wrong-pw"),
        ("client@example.com", "secret-pw"),
        ("off@example.com", "secret-pw"),
        ("nobody@example.com", "secret-pw"),
    ] {
        let err = di
            .auth_service
            .login_admin(&login(email, password))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid email or password");
    }

    assert!(di.auth_service.session_admin("garbage").await.is_err());
}

#[tokio::test]
async fn bootstrap_creates_one_admin_that_can_log_in() {
    let store = InMemoryStore::new();
    let di = container(&store);

    let created = di
        .auth_service
        .ensure_admin("root@example.com", "changeme123")
        .await
        .unwrap();
    assert_eq!(created.message, "Administrator created");

    let stored = store.user(created.data.id).unwrap();
    assert!(stored.is_admin);
    assert_ne!(stored.password, "changeme123");

    let again = di
        .auth_service
        .ensure_admin("root@example.com", "another-password")
        .await
        .unwrap();
    assert_eq!(again.message, "Administrator already exists");
    assert_eq!(again.data.id, created.data.id);

    let login = LoginRequest {
        email: "root@example.com".to_string(),
        password: "changeme123".to_string(),
    };
    assert!(di.auth_service.login_admin(&login).await.is_ok());
}

#[tokio::test]
async fn bootstrap_refuses_a_short_password() {
    let store = InMemoryStore::new();
    let di = container(&store);

    let err = di
        .auth_service
        .ensure_admin("root@example.com", "short")
        .await
        .unwrap_err();
    assert_eq!(err.message, "Password should be at least 8 characters long");
}

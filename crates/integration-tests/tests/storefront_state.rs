//! Integration tests for the assembled storefront across process restarts.
//!
//! Each `Storefront` built over the same data directory stands in for one
//! CLI invocation: start, one action, shutdown.
//!
//! Run with: cargo test -p shopshifter-integration-tests

#![allow(clippy::unwrap_used)]

use std::path::Path;

use secrecy::SecretString;
use tokio::runtime::Handle;

use shopshifter_core::{CartItem, Price, ProductId};
use shopshifter_storefront::auth::{AuthError, LoginForm, SignupForm, ValidationError};
use shopshifter_storefront::config::{StorageBackend, StorefrontConfig};
use shopshifter_storefront::error::AppError;
use shopshifter_storefront::state::Storefront;

fn config(dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        storage: StorageBackend::File,
        data_dir: dir.to_path_buf(),
        ..StorefrontConfig::default()
    }
}

/// One run: build, restore the session, act, flush.
fn run<T>(dir: &Path, action: impl FnOnce(&mut Storefront) -> T) -> T {
    let mut shop = Storefront::new(config(dir), Handle::current()).unwrap();
    shop.start();
    let result = action(&mut shop);
    shop.shutdown();
    result
}

fn signup_form(email: &str, password: &str) -> SignupForm {
    SignupForm {
        name: "Ann".to_string(),
        email: email.to_string(),
        password: SecretString::from(password),
    }
}

fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: SecretString::from(password),
    }
}

fn watch(quantity: u32) -> CartItem {
    CartItem {
        id: ProductId::new(1),
        title: "White Watch".to_string(),
        price: Price::from_cents(1999),
        image: "/products/product1.jpg".to_string(),
        quantity,
    }
}

#[tokio::test(start_paused = true)]
async fn test_session_and_cart_survive_runs() {
    let dir = tempfile::tempdir().unwrap();

    run(dir.path(), |shop| {
        shop.sign_up(&signup_form("ann@x.io", "secret1")).unwrap();
    });
    run(dir.path(), |shop| {
        assert!(shop.session().is_logged_in());
        shop.session_mut().add_to_cart(watch(2));
    });
    run(dir.path(), |shop| {
        shop.session_mut().update_quantity(ProductId::new(1), 3);
    });

    let (user, count, subtotal) = run(dir.path(), |shop| {
        let session = shop.session();
        (
            session.user().map(ToString::to_string),
            session.item_count(),
            session.subtotal(),
        )
    });
    assert_eq!(user.as_deref(), Some("ann@x.io"));
    assert_eq!(count, 3);
    assert_eq!(subtotal, Price::from_cents(5997));
}

#[tokio::test(start_paused = true)]
async fn test_logout_then_login_restores_cart() {
    let dir = tempfile::tempdir().unwrap();

    run(dir.path(), |shop| {
        shop.sign_up(&signup_form("ann@x.io", "secret1")).unwrap();
        shop.session_mut().add_to_cart(watch(2));
    });
    run(dir.path(), |shop| {
        assert!(shop.log_out().is_some());
    });
    run(dir.path(), |shop| {
        assert!(!shop.session().is_logged_in());
        assert!(shop.session().cart().is_empty());
    });
    run(dir.path(), |shop| {
        shop.log_in(&login_form("ann@x.io", "secret1")).unwrap();
        assert_eq!(shop.session().item_count(), 2);
    });
}

#[tokio::test(start_paused = true)]
async fn test_auth_failures_leave_session_alone() {
    let dir = tempfile::tempdir().unwrap();

    run(dir.path(), |shop| {
        shop.sign_up(&signup_form("ann@x.io", "secret1")).unwrap();
        shop.log_out();
    });

    run(dir.path(), |shop| {
        assert!(matches!(
            shop.sign_up(&signup_form("ann@x.io", "secret2")),
            Err(AppError::Auth(AuthError::DuplicateEmail))
        ));
        assert!(matches!(
            shop.log_in(&login_form("ann@x.io", "wrong-pass")),
            Err(AppError::Auth(AuthError::InvalidCredentials))
        ));
        assert!(matches!(
            shop.log_in(&login_form("ann@x.io", "123")),
            Err(AppError::Auth(AuthError::Validation(
                ValidationError::PasswordTooShort { min: 6 }
            )))
        ));
        assert!(!shop.session().is_logged_in());
        assert_eq!(shop.auth().users().len(), 1);
    });
}

#[tokio::test(start_paused = true)]
async fn test_deleted_profile_cannot_log_in() {
    let dir = tempfile::tempdir().unwrap();

    run(dir.path(), |shop| {
        shop.sign_up(&signup_form("ann@x.io", "secret1")).unwrap();
    });
    run(dir.path(), |shop| {
        shop.delete_profile().unwrap();
    });
    run(dir.path(), |shop| {
        assert!(!shop.session().is_logged_in());
        assert!(shop.log_in(&login_form("ann@x.io", "secret1")).is_err());
    });
}

//! Sign-up, login, and profile commands.

use secrecy::SecretString;
use shopshifter_storefront::auth::{LoginForm, SignupForm};
use shopshifter_storefront::error::AppError;
use shopshifter_storefront::state::Storefront;

/// Create a demo account and log in as it.
#[allow(clippy::print_stdout)]
pub fn signup(
    shop: &mut Storefront,
    name: String,
    email: String,
    password: String,
) -> Result<(), AppError> {
    let form = SignupForm {
        name,
        email,
        password: SecretString::from(password),
    };
    let email = shop.sign_up(&form)?;
    println!("Welcome! Signed up and logged in as {email}.");
    Ok(())
}

/// Log in to an existing demo account.
#[allow(clippy::print_stdout)]
pub fn login(shop: &mut Storefront, email: String, password: String) -> Result<(), AppError> {
    let form = LoginForm {
        email,
        password: SecretString::from(password),
    };
    let email = shop.log_in(&form)?;
    let count = shop.session().item_count();
    println!("Logged in as {email}. Cart: {count} item(s).");
    Ok(())
}

/// Log out, saving the cart.
#[allow(clippy::print_stdout)]
pub fn logout(shop: &mut Storefront) {
    match shop.log_out() {
        Some(email) => println!("Logged out {email}."),
        None => println!("Not logged in."),
    }
}

/// Show the logged-in user.
#[allow(clippy::print_stdout)]
pub fn whoami(shop: &Storefront) {
    match shop.session().user() {
        Some(email) => println!("{email}"),
        None => println!("Not logged in."),
    }
}

/// Delete the logged-in account.
#[allow(clippy::print_stdout)]
pub fn delete_profile(shop: &mut Storefront) -> Result<(), AppError> {
    let email = shop.delete_profile()?;
    println!("Deleted profile {email} and logged out.");
    Ok(())
}

//! Shopshifter CLI - browse the demo catalog and manage a cart.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! shopshifter products --category electronics
//! shopshifter product 3
//!
//! # Create an account (logs you in)
//! shopshifter signup --name "Ann" --email ann@example.com --password secret1
//!
//! # Shop
//! shopshifter cart add 3 --quantity 2
//! shopshifter cart show
//! shopshifter logout
//! ```
//!
//! Each run restores the saved session, runs one command, and flushes any
//! pending cart save before exiting. See `shopshifter_storefront::config`
//! for environment variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tokio::runtime::Handle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopshifter_core::ProductId;
use shopshifter_storefront::config::StorefrontConfig;
use shopshifter_storefront::error::AppError;
use shopshifter_storefront::state::Storefront;

mod commands;

#[derive(Parser)]
#[command(name = "shopshifter")]
#[command(author, version, about = "Shopshifter demo storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product and related products
    Product {
        /// Product ID
        id: ProductId,
    },
    /// List product categories
    Categories,
    /// Show the featured products
    Featured,
    /// Create a demo account and log in
    Signup {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log in to a demo account
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log out, saving the cart
    Logout,
    /// Show who is logged in
    Whoami,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Delete the logged-in demo account
    DeleteProfile,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Change a line's quantity (0 removes it)
    Update {
        /// Product ID
        id: ProductId,

        quantity: u32,
    },
    /// Empty the cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Errors become Sentry events, info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopshifter=info,shopshifter_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            return fail(&AppError::from(e));
        }
    };

    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let mut shop = match Storefront::new(config, Handle::current()) {
        Ok(shop) => shop,
        Err(e) => return fail(&e),
    };

    shop.start();
    let result = run(&mut shop, cli.command).await;
    shop.shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

/// Report an error and print its user-facing message.
#[allow(clippy::print_stderr)]
fn fail(err: &AppError) -> ExitCode {
    let message = err.report();
    eprintln!("{message}");
    ExitCode::FAILURE
}

async fn run(shop: &mut Storefront, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Products { category } => {
            commands::catalog::products(shop, category.as_deref()).await?;
        }
        Commands::Product { id } => commands::catalog::product(shop, id).await?,
        Commands::Categories => commands::catalog::categories(shop).await?,
        Commands::Featured => commands::catalog::featured(),
        Commands::Signup {
            name,
            email,
            password,
        } => commands::account::signup(shop, name, email, password)?,
        Commands::Login { email, password } => commands::account::login(shop, email, password)?,
        Commands::Logout => commands::account::logout(shop),
        Commands::Whoami => commands::account::whoami(shop),
        Commands::DeleteProfile => commands::account::delete_profile(shop)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(shop),
            CartAction::Add { id, quantity } => commands::cart::add(shop, id, quantity).await?,
            CartAction::Remove { id } => commands::cart::remove(shop, id),
            CartAction::Update { id, quantity } => commands::cart::update(shop, id, quantity),
            CartAction::Clear => commands::cart::clear(shop),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_add_defaults_quantity() {
        let cli = Cli::try_parse_from(["shopshifter", "cart", "add", "3"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Cart {
                action: CartAction::Add { quantity: 1, .. }
            })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_product_id() {
        assert!(Cli::try_parse_from(["shopshifter", "product", "abc"]).is_err());
    }
}

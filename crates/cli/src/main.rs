//! Feira Livre CLI - Multi-role client for the Feira Livre backend.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (persists the session)
//! fl-cli auth login -e ana@example.com -p 's3nh@F0rte!'
//!
//! # Browse and order
//! fl-cli catalog stores
//! fl-cli cart add --product 12 --quantity 2
//! fl-cli cart checkout --address 3
//!
//! # Track orders; hold a PIX code with a live countdown
//! fl-cli orders list
//! fl-cli orders pix 45 --watch
//!
//! # Store management
//! fl-cli store orders
//! fl-cli store set-status 45 ready_for_pickup
//!
//! # Platform administration
//! fl-cli admin companies list
//! fl-cli admin banners add --title "Promo" --image-url https://...
//! ```
//!
//! # Commands
//!
//! - `auth` - login, register, logout, profile
//! - `catalog` - stores, categories, banners, CEP lookup
//! - `cart` - cart mutations, delivery quote, checkout
//! - `orders` - order tracking and PIX payment codes
//! - `store` - store orders, products, drivers, profile
//! - `admin` - companies and banners

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fl-cli")]
#[command(author, version, about = "Feira Livre command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, sign up, and manage the session
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Browse stores, categories, and banners
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Manage the cart and check out
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Track orders and pay via PIX
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrdersAction,
    },
    /// Store management (store accounts)
    Store {
        #[command(subcommand)]
        action: commands::store::StoreAction,
    },
    /// Platform administration (admin accounts)
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Auth { action } => commands::auth::run(action).await?,
        Commands::Catalog { action } => commands::catalog::run(action).await?,
        Commands::Cart { action } => commands::cart::run(action).await?,
        Commands::Orders { action } => commands::orders::run(action).await?,
        Commands::Store { action } => commands::store::run(action).await?,
        Commands::Admin { action } => commands::admin::run(action).await?,
    }
    Ok(())
}

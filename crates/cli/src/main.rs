//! Bosa Noga CLI - headless shell over the storefront stores.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! bosanoga top-sales
//! bosanoga categories
//! bosanoga items --category 3 --search "кеды" --all
//! bosanoga item 22
//!
//! # Cart (persisted between runs, see BOSANOGA_CART_PATH)
//! bosanoga cart add 22 --size "37 US" --count 2
//! bosanoga cart list
//! bosanoga cart set-count 22 --size "37 US" --count 1
//! bosanoga cart remove 22 --size "37 US"
//! bosanoga cart clear
//!
//! # Checkout
//! bosanoga order --phone "+7 999 123 45 67" --address "Москва, ..." --agree
//! ```
//!
//! Configuration comes from the environment (`BOSANOGA_API_URL` is
//! required); a `.env` file is honoured.

#![cfg_attr(not(test), forbid(unsafe_code))]
// This is the terminal front-end; printing is its job.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bosanoga_core::ProductId;
use bosanoga_storefront::api::ShopClient;
use bosanoga_storefront::config::StorefrontConfig;
use bosanoga_storefront::storage::FileStorage;
use bosanoga_storefront::store::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "bosanoga")]
#[command(author, version, about = "Bosa Noga shoe shop, in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home page's top-sales strip
    TopSales,
    /// List the catalog categories
    Categories,
    /// Browse the item listing page by page
    Items {
        /// Filter by category id
        #[arg(short, long)]
        category: Option<i32>,

        /// Free-text search query
        #[arg(short, long)]
        search: Option<String>,

        /// Keep loading pages until the listing is exhausted
        #[arg(long)]
        all: bool,
    },
    /// Show the full product card
    Item {
        /// Product id
        id: i32,
    },
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Submit the cart as an order
    Order {
        /// Contact phone, +7 followed by 10 digits
        #[arg(short, long)]
        phone: String,

        /// Delivery address
        #[arg(short, long)]
        address: String,

        /// Accept the terms of service
        #[arg(long)]
        agree: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart lines and the total
    List,
    /// Add a product to the cart
    Add {
        /// Product id
        id: i32,

        /// Size to order (must be available on the card)
        #[arg(short, long)]
        size: String,

        /// Quantity, 1 to 10
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },
    /// Remove one line from the cart
    Remove {
        /// Product id
        id: i32,

        /// Size of the line to remove
        #[arg(short, long)]
        size: String,
    },
    /// Overwrite the count of one line (0 removes it)
    SetCount {
        /// Product id
        id: i32,

        /// Size of the line to change
        #[arg(short, long)]
        size: String,

        /// New count
        #[arg(short, long)]
        count: u32,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    tracing::debug!(
        api_url = %config.api_url,
        cart_path = %config.cart_path.display(),
        "configuration loaded"
    );

    let client = match ShopClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("client error: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let storage = FileStorage::new(config.cart_path.clone());
    let mut app = AppState::new(client, Box::new(storage));

    let ok = match cli.command {
        Commands::TopSales => commands::catalog::top_sales(&mut app).await,
        Commands::Categories => commands::catalog::categories(&mut app).await,
        Commands::Items {
            category,
            search,
            all,
        } => commands::catalog::items(&mut app, category.map(Into::into), search, all).await,
        Commands::Item { id } => commands::catalog::item(&mut app, ProductId::new(id)).await,
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&app),
            CartAction::Add { id, size, count } => {
                commands::cart::add(&mut app, ProductId::new(id), &size, count).await
            }
            CartAction::Remove { id, size } => {
                commands::cart::remove(&mut app, ProductId::new(id), &size)
            }
            CartAction::SetCount { id, size, count } => {
                commands::cart::set_count(&mut app, ProductId::new(id), &size, count)
            }
            CartAction::Clear => commands::cart::clear(&mut app),
        },
        Commands::Order {
            phone,
            address,
            agree,
        } => commands::cart::order(&mut app, phone, address, agree).await,
    };

    if ok {
        std::process::ExitCode::SUCCESS
    } else {
        std::process::ExitCode::FAILURE
    }
}

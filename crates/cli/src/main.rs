//! Pelussi CLI - Browse the gallery catalog and manage a persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, optionally filtered
//! pelussi catalog --category paintings --search harbor --lang en
//!
//! # Manage the cart
//! pelussi cart add harbor-at-dawn
//! pelussi cart update harbor-at-dawn -1
//! pelussi cart remove harbor-at-dawn
//! pelussi cart clear
//! pelussi cart show
//!
//! # Display preferences
//! pelussi prefs theme light
//! pelussi prefs language de
//! ```
//!
//! Configuration comes from `PELUSSI_*` environment variables (or `.env`);
//! see `pelussi_storefront::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use pelussi_core::{CategoryFilter, Language, ProductId, Theme};
use pelussi_storefront::{StorefrontConfig, StorefrontSession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pelussi")]
#[command(author, version, about = "Pelussi gallery catalog and cart")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// List catalog products
    Catalog {
        /// Category tab (`all`, `paintings`, `jewelry`, `digital`, `prints`)
        #[arg(short, long)]
        category: Option<CategoryFilter>,

        /// Case-insensitive text search over title, description and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Language for this listing (`fr`, `en`, `de`, `pt`)
        #[arg(short, long)]
        lang: Option<Language>,
    },
    /// Show or change display preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add { id: ProductId },
    /// Remove a product's line
    Remove { id: ProductId },
    /// Change a line's quantity by a signed delta (never below 1)
    Update {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove every line
    Clear,
    /// Print the cart
    Show,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print the current preferences
    Show,
    /// Set the color theme (`light`, `dark`, `system`)
    Theme { theme: Theme },
    /// Set the catalog language (`fr`, `en`, `de`, `pt`)
    Language { language: Language },
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pelussi_core=info,pelussi_storefront=info,pelussi=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let mut session = StorefrontSession::from_config(&config);
    let currency = config.currency;

    match cli.command {
        Commands::Cart { action } => {
            if matches!(action, CartAction::Add { .. }) {
                commands::load_catalog(&mut session, &config).await?;
            }
            match action {
                CartAction::Add { id } => commands::cart::add(&mut session, &id, currency)?,
                CartAction::Remove { id } => commands::cart::remove(&mut session, &id, currency),
                CartAction::Update { id, delta } => {
                    commands::cart::update(&mut session, &id, delta, currency);
                }
                CartAction::Clear => commands::cart::clear(&mut session, currency),
                CartAction::Show => commands::cart::show(&session, currency),
            }
        }
        Commands::Catalog {
            category,
            search,
            lang,
        } => {
            commands::load_catalog(&mut session, &config).await?;
            commands::catalog::list(
                &mut session,
                &commands::catalog::ListOptions {
                    category,
                    search,
                    language: lang,
                },
                currency,
            );
        }
        Commands::Prefs { action } => match action {
            PrefsAction::Show => commands::prefs::show(&session),
            PrefsAction::Theme { theme } => commands::prefs::set_theme(&mut session, theme),
            PrefsAction::Language { language } => {
                commands::prefs::set_language(&mut session, language);
            }
        },
    }
    Ok(())
}

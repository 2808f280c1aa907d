//! Farm Direct CLI - talk to the marketplace API from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Is the backend up?
//! fd-cli health
//!
//! # Log in (password may also come from FARM_DIRECT_PASSWORD)
//! fd-cli login -u alice --password hunter2
//! fd-cli whoami
//!
//! # Seller product management
//! fd-cli products mine --search tomato --sort-order asc
//! fd-cli products create --name "Heirloom tomatoes" --price 4.50 --category 2
//!
//! # Business bulk requests
//! fd-cli bulk-requests list --status open
//!
//! fd-cli logout
//! ```
//!
//! The session is kept in `FARM_DIRECT_SESSION_FILE` between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use farm_direct_client::{ClientConfig, FileStorage, Gateway, MarketplaceClient, SessionStore};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::auth::RegisterArgs;
use commands::bulk_requests::BulkRequestAction;
use commands::products::ProductAction;

#[derive(Parser)]
#[command(name = "fd-cli")]
#[command(author, version, about = "Farm Direct marketplace CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend answers
    Health,
    /// Log in and keep the session
    Login {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long, env = "FARM_DIRECT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create a new account
    Register(RegisterArgs),
    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// List product categories
    Categories,
    /// Browse and manage bulk requests
    BulkRequests {
        #[command(subcommand)]
        action: BulkRequestAction,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
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

    Some(guard)
}

/// Errors and warnings become Sentry events; info and debug are breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "farm_direct_client=info,fd_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = Gateway::from_config(config);
    let store = SessionStore::new(
        gateway.clone(),
        Arc::new(FileStorage::new(&config.session_file)),
    );
    let api = MarketplaceClient::new(gateway);

    match cli.command {
        Commands::Health => commands::health(&api).await?,
        Commands::Login { username, password } => {
            commands::auth::login(&store, &username, password).await?;
        }
        Commands::Logout => commands::auth::logout(&store),
        Commands::Whoami => commands::auth::whoami(&store),
        Commands::Register(args) => commands::auth::register(&store, args).await?,
        Commands::Products { action } => commands::products::run(&api, &store, action).await?,
        Commands::Categories => commands::categories(&api).await?,
        Commands::BulkRequests { action } => {
            commands::bulk_requests::run(&api, &store, action).await?;
        }
    }
    Ok(())
}

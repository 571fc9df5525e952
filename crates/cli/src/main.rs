//! ServeRest CLI - Reset and seed a shared deployment.
//!
//! # Usage
//!
//! ```bash
//! # Remove default and fixture data
//! serverest reset all
//!
//! # Cancel every fixture cart only
//! serverest reset carts
//!
//! # Recreate the fixture products
//! serverest seed products
//!
//! # Count users, products and carts
//! serverest status
//! ```
//!
//! # Environment Variables
//!
//! - `SERVEREST_BASE_URL` - Root URL of the API (overridden by `--base-url`)
//! - `SERVEREST_FIXTURES_DIR` - Fixture directory instead of the bundled set
//! - `SERVEREST_LOG_JSON` - Emit JSON log lines when set
//! - `RUST_LOG` - Log filter (default: `serverest=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use serverest_client::{ApiClient, ClientConfig, config::parse_base_url};
use serverest_harness::Fixtures;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "serverest")]
#[command(author, version, about = "ServeRest E2E harness tools")]
struct Cli {
    /// API root URL, e.g. `https://serverest.dev`
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove default and fixture data
    Reset {
        #[command(subcommand)]
        target: ResetTarget,
    },
    /// Recreate fixture data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Count the entities of every collection
    Status,
}

#[derive(Subcommand)]
enum ResetTarget {
    /// Cancel the open cart of every fixture user
    Carts,
    /// Delete every fixture user
    Users,
    /// Delete every fixture product
    Products,
    /// Delete the user the API ships with and release its cart
    Defaults,
    /// All of the above, in dependency order
    All,
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Recreate every fixture user
    Users,
    /// Recreate every fixture product
    Products,
    /// Recreate the products and carts of the cart listing
    Carts,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "serverest=info,serverest_harness=info".into());

    let json = std::env::var("SERVEREST_LOG_JSON").is_ok();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(raw) = &cli.base_url {
        config.base_url = parse_base_url(raw)?;
    }
    tracing::info!(base_url = %config.base_url, "Using API");

    let client = ApiClient::new(&config)?;

    match cli.command {
        Commands::Reset { target } => {
            let fixtures = Fixtures::from_config(&config)?;
            let report = match target {
                ResetTarget::Carts => commands::reset::carts(&client, &fixtures).await?,
                ResetTarget::Users => commands::reset::users(&client, &fixtures).await?,
                ResetTarget::Products => commands::reset::products(&client, &fixtures).await?,
                ResetTarget::Defaults => commands::reset::defaults(&client).await?,
                ResetTarget::All => commands::reset::all(&client, &fixtures).await?,
            };
            commands::reset::conclude(&report)?;
        }
        Commands::Seed { target } => {
            let fixtures = Fixtures::from_config(&config)?;
            match target {
                SeedTarget::Users => commands::seed::users(&client, &fixtures).await?,
                SeedTarget::Products => commands::seed::products(&client, &fixtures).await?,
                SeedTarget::Carts => commands::seed::carts(&client, &fixtures).await?,
            }
        }
        Commands::Status => commands::status::show(&client).await?,
    }
    Ok(())
}

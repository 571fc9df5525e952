//! End-to-end scenarios for the ServeRest API.
//!
//! # Running Tests
//!
//! ```bash
//! # Against the in-process fake (default)
//! cargo test -p serverest-integration-tests
//!
//! # Against a running deployment
//! SERVEREST_BASE_URL=http://localhost:3000 cargo test -p serverest-integration-tests
//! ```
//!
//! Scenarios share server state, so every test is `#[serial]`.
//!
//! # Test Categories
//!
//! - `login` - Authentication
//! - `usuarios` - User registration, listing, update and deletion
//! - `produtos` - Product management and admin restrictions
//! - `carrinhos` - Carts, stock bookkeeping and closing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fake;

use serverest_client::{ApiClient, ClientConfig, ClientError, ConfigError};
use serverest_harness::{FixtureError, Fixtures};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::fake::FakeServer;

/// Errors preparing a [`TestContext`].
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    #[error("Fake API error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fake API URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Client, fixtures and (unless a deployment is configured) a fake API.
pub struct TestContext {
    pub client: ApiClient,
    pub fixtures: Fixtures,
    server: Option<FakeServer>,
}

impl TestContext {
    /// Point at `SERVEREST_BASE_URL` when set, else at a fresh fake API
    /// holding only the default data.
    ///
    /// # Errors
    ///
    /// Returns error if configuration, fixtures or the fake API fail.
    pub async fn start() -> Result<Self, ContextError> {
        init_tracing();
        let _ = dotenvy::dotenv();

        let remote = std::env::var("SERVEREST_BASE_URL").is_ok();
        let (config, server) = if remote {
            (ClientConfig::from_env()?, None)
        } else {
            let server = FakeServer::spawn().await?;
            let mut config = ClientConfig::new(server.base_url()?);
            config.fixtures_dir = ClientConfig::from_env()?.fixtures_dir;
            (config, Some(server))
        };

        Ok(Self {
            client: ApiClient::new(&config)?,
            fixtures: Fixtures::from_config(&config)?,
            server,
        })
    }

    /// Whether scenarios run against a real deployment.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.server.is_none()
    }
}

/// Route scenario logs through the test harness' captured output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

//! ServeRest client - HTTP request helper and resource commands.
//!
//! Every command returns an [`ApiResponse`] for any HTTP status the server
//! answers with: `400`, `401` and `403` are data for the caller to assert
//! on, not errors. Only transport failures (refused connection, timeout)
//! surface as [`ClientError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use serverest_client::{ApiClient, ClientConfig, Filter};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(&ClientConfig::from_env()?)?;
//!
//! let response = client
//!     .products()
//!     .list(&Filter::new().with("nome", "Logitech MX Vertical"))
//!     .await?;
//! assert_eq!(response.count(), Some(1));
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carts;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod login;
pub mod lookup;
pub mod products;
pub mod token;
pub mod users;

pub use carts::{CartSubmission, Carts, ResolutionPolicy, UnresolvedItem, UnresolvedReason};
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use filter::Filter;
pub use http::{ApiClient, ApiRequest, ApiResponse};
pub use login::Login;
pub use lookup::Lookup;
pub use products::Products;
pub use token::AuthToken;
pub use users::Users;

pub use reqwest::StatusCode;

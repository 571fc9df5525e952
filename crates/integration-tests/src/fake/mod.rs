//! In-process stand-in for the ServeRest API.
//!
//! Serves the same routes, payloads and messages the scenarios exercise,
//! backed by an in-memory store seeded with the API's default data.
//!
//! # Route Structure
//!
//! ```text
//! POST   /login
//!
//! GET    /usuarios                     - List, filtered by query
//! POST   /usuarios                     - Register
//! GET    /usuarios/{id}
//! PUT    /usuarios/{id}                - Update, or register when unknown
//! DELETE /usuarios/{id}
//!
//! GET    /produtos
//! POST   /produtos                     - Admin only
//! GET    /produtos/{id}
//! PUT    /produtos/{id}                - Admin only
//! DELETE /produtos/{id}                - Admin only
//!
//! GET    /carrinhos
//! POST   /carrinhos                    - Token owner's cart
//! GET    /carrinhos/{id}
//! DELETE /carrinhos/concluir-compra    - Close, keeping stock out
//! DELETE /carrinhos/cancelar-compra    - Close, restocking items
//! ```

pub mod carts;
pub mod error;
pub mod login;
pub mod products;
pub mod query;
pub mod state;
pub mod users;
pub mod validate;

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{delete, get, post};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use url::Url;

pub use state::{FakeState, Store};

/// Build the router over `state`.
pub fn router(state: FakeState) -> Router {
    Router::new()
        .route("/login", post(login::login))
        .route("/usuarios", get(users::list).post(users::create))
        .route(
            "/usuarios/{id}",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route("/produtos", get(products::list).post(products::create))
        .route(
            "/produtos/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/carrinhos", get(carts::list).post(carts::create))
        .route("/carrinhos/concluir-compra", delete(carts::finish))
        .route("/carrinhos/cancelar-compra", delete(carts::cancel))
        .route("/carrinhos/{id}", get(carts::get))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A fake API listening on a local port until dropped.
pub struct FakeServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl FakeServer {
    /// Serve the default data on an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns error if the port cannot be bound.
    pub async fn spawn() -> std::io::Result<Self> {
        Self::spawn_with(FakeState::with_defaults()).await
    }

    /// Serve `state` on an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns error if the port cannot be bound.
    pub async fn spawn_with(state: FakeState) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(state);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Fake API stopped: {e}");
            }
        });

        info!(%addr, "Fake API listening");
        Ok(Self { addr, handle })
    }

    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL to point a client at.
    ///
    /// # Errors
    ///
    /// Returns error only if the socket address does not form a URL.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("http://{}/", self.addr))
    }
}

impl Drop for FakeServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

//! Client error types.

use thiserror::Error;

use crate::carts::UnresolvedItem;

/// Errors raised by the request helper and resource commands.
///
/// HTTP error statuses are not represented here: they come back as an
/// [`ApiResponse`](crate::ApiResponse) like any other status.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: refused connection, timeout, broken body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A path or query could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A token contains characters not allowed in a header value.
    #[error("Invalid authorization header value")]
    InvalidHeader,

    /// The body did not have the shape the caller asked for.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Strict cart resolution found items it could not map to a product.
    #[error("{} cart item(s) could not be resolved", .0.len())]
    UnresolvedItems(Vec<UnresolvedItem>),

    /// A convenience command needed a success status and got another one.
    #[error("Unexpected response: {status} - {message}")]
    Unexpected { status: u16, message: String },
}

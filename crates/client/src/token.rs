//! Authorization token returned by `POST /login`.

use secrecy::{ExposeSecret, SecretString};

/// Opaque bearer token sent in the raw `authorization` header.
///
/// The server returns the full header value (`Bearer eyJ...`), so the
/// token is forwarded verbatim. `Debug` never prints the value.
#[derive(Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    /// Wrap a header value as returned by the login route.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Header value to send.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AuthToken").field(&"[REDACTED]").finish()
    }
}

//! `POST /login` commands.

use serde::Serialize;
use serverest_core::{Credentials, LoginResponse};
use tracing::instrument;

use crate::error::ClientError;
use crate::http::{ApiClient, ApiRequest, ApiResponse};
use crate::token::AuthToken;

const PATH: &str = "/login";

/// Login commands.
#[derive(Clone, Copy)]
pub struct Login<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Login commands bound to this client.
    #[must_use]
    pub const fn login(&self) -> Login<'_> {
        Login { client: self }
    }
}

impl Login<'_> {
    /// Submit a login body as-is; malformed bodies are allowed so the
    /// suite can assert on validation errors.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip_all)]
    pub async fn submit<T: Serialize + ?Sized>(&self, body: &T) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::post(PATH).with_body(body)?)
            .await
    }

    /// Log in and return the token, or `None` when the server refuses.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a 200 without a token.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn try_token(&self, credentials: &Credentials) -> Result<Option<AuthToken>, ClientError> {
        let response = self.submit(credentials).await?;
        if !response.is_success() {
            return Ok(None);
        }

        let login: LoginResponse = response.decode()?;
        Ok(Some(AuthToken::new(login.authorization)))
    }

    /// Log in and return the token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unexpected` if the server refuses the
    /// credentials, or a transport/decode error.
    pub async fn token(&self, credentials: &Credentials) -> Result<AuthToken, ClientError> {
        let response = self.submit(credentials).await?;
        if !response.is_success() {
            return Err(ClientError::Unexpected {
                status: response.status_code(),
                message: response.message().unwrap_or_default().to_owned(),
            });
        }

        let login: LoginResponse = response.decode()?;
        Ok(AuthToken::new(login.authorization))
    }
}

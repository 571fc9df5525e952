//! HTTP request helper.
//!
//! Issues one request per call and normalizes the answer into an
//! [`ApiResponse`] carrying the status and the parsed JSON body. Failing on
//! error statuses is disabled: scenarios inspect `400`/`401`/`403` bodies
//! the same way they inspect `200` ones.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::filter::Filter;
use crate::token::AuthToken;

/// Client for one API deployment.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Root URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve `path` (with or without a leading `/`) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Url` if the joined URL is invalid.
    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Send a request and normalize the response.
    ///
    /// # Errors
    ///
    /// Only transport-level failures are errors. Every HTTP status,
    /// including 4xx and 5xx, is returned as `Ok(ApiResponse)`.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut url = self.url(&request.path)?;
        request.query.apply(&mut url);

        let mut builder = self.inner.client.request(request.method.clone(), url);

        if let Some(token) = &request.token {
            let value =
                HeaderValue::from_str(token.expose()).map_err(|_| ClientError::InvalidHeader)?;
            builder = builder.header("authorization", value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(&text);

        debug!(status = status.as_u16(), "Request completed");

        Ok(ApiResponse { status, body })
    }
}

/// Parse a response body, keeping non-JSON text as a string value.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

/// One request to the API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. `/usuarios/{id}`.
    pub path: String,
    pub query: Filter,
    /// Sent verbatim as the `authorization` header.
    pub token: Option<AuthToken>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// A request with no query, token, or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Filter::new(),
            token: None,
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Replace the query filter.
    #[must_use]
    pub fn with_query(mut self, query: Filter) -> Self {
        self.query = query;
        self
    }

    /// Attach an optional token; `None` sends no header at all.
    #[must_use]
    pub fn with_token(mut self, token: Option<&AuthToken>) -> Self {
        self.token = token.cloned();
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Decode` if `body` does not serialize to JSON.
    pub fn with_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Normalized response: status code plus parsed body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Status as a number, for terse assertions.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The `message` narration, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// A top-level string field. Validation errors are keyed by field
    /// path, e.g. `field("produtos[0].idProduto")`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }

    /// The `quantidade` count of a list response (or the stock of a
    /// product returned by id).
    #[must_use]
    pub fn count(&self) -> Option<u64> {
        self.body.get("quantidade").and_then(Value::as_u64)
    }

    /// The server-assigned `_id` of a created or fetched entity.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.field("_id")
    }

    /// Raw elements of the collection stored under `key`.
    #[must_use]
    pub fn items(&self, key: &str) -> &[Value] {
        self.body
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Decode the whole body into `T`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Decode` when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        T::deserialize(&self.body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Decode the collection stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Decode` when an element does not match `T`.
    pub fn decode_items<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, ClientError> {
        self.items(key)
            .iter()
            .map(|item| T::deserialize(item).map_err(|e| ClientError::Decode(e.to_string())))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use serverest_core::Product;

    use super::*;

    fn response(status: u16, body: Value) -> ApiResponse {
        ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }
    }

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("{\"a\":1}"), json!({"a": 1}));
        assert_eq!(parse_body("Not Found"), json!("Not Found"));
    }

    #[test]
    fn test_validation_fields_by_path() {
        let resp = response(
            400,
            json!({
                "produtos[0].idProduto": "produtos[0].idProduto não pode ficar em branco",
                "produtos": "produtos não contém 1 valor obrigatório"
            }),
        );
        assert!(!resp.is_success());
        assert_eq!(resp.message(), None);
        assert_eq!(
            resp.field("produtos[0].idProduto"),
            Some("produtos[0].idProduto não pode ficar em branco")
        );
    }

    #[test]
    fn test_list_envelope() {
        let resp = response(
            200,
            json!({
                "quantidade": 1,
                "produtos": [{
                    "nome": "Logitech MX Vertical",
                    "preco": 470,
                    "descricao": "Mouse",
                    "quantidade": 382,
                    "_id": "BeeJh5lz3k6kSIzA"
                }]
            }),
        );
        assert_eq!(resp.count(), Some(1));
        assert_eq!(resp.items("usuarios").len(), 0);

        let products: Vec<Product> = resp.decode_items("produtos").unwrap();
        assert_eq!(products[0].quantity, 382);
    }

    #[test]
    fn test_request_builders() {
        let token = AuthToken::new("Bearer t");
        let req = ApiRequest::delete("/carrinhos/cancelar-compra").with_token(Some(&token));
        assert_eq!(req.method, Method::DELETE);
        assert!(req.token.is_some());
        assert!(ApiRequest::get("/produtos").with_token(None).token.is_none());
    }

    #[test]
    fn test_url_joins_under_base_path() {
        let config = ClientConfig::new(Url::parse("https://serverest.dev/api/").unwrap());
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.url("/usuarios/abc").unwrap().as_str(),
            "https://serverest.dev/api/usuarios/abc"
        );
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let config = ClientConfig::new(Url::parse("http://127.0.0.1:9/").unwrap())
            .with_timeout(std::time::Duration::from_secs(2));
        let client = ApiClient::new(&config).unwrap();

        let result = client.send(ApiRequest::get("/usuarios")).await;
        assert!(matches!(result, Err(ClientError::Http(_))));
    }
}

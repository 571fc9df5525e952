//! Error answers of the fake API.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};
use serverest_core::messages;

/// A refused request, rendered the way the real API renders it.
#[derive(Debug)]
pub enum ApiError {
    /// Body or query failed validation: one message per field path.
    Validation(BTreeMap<String, String>),
    /// Business rule refusal with a `message`.
    BadRequest(&'static str),
    /// Business rule refusal carrying one extra field.
    BadRequestWith {
        message: &'static str,
        key: &'static str,
        value: Value,
    },
    /// Missing, unknown or orphaned token.
    Unauthorized,
    /// Wrong email or password on login.
    LoginFailed,
    /// Regular user on an administrator route.
    Forbidden,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(fields) => (StatusCode::BAD_REQUEST, json!(fields)),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            Self::BadRequestWith {
                message,
                key,
                value,
            } => {
                let mut body = Map::new();
                body.insert("message".to_string(), Value::from(message));
                body.insert(key.to_string(), value);
                (StatusCode::BAD_REQUEST, Value::Object(body))
            }
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": messages::TOKEN_INVALID }),
            ),
            Self::LoginFailed => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": messages::LOGIN_FAILED }),
            ),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "message": messages::ADMIN_ONLY }),
            ),
        };

        tracing::debug!(status = status.as_u16(), "Request refused");
        (status, Json(body)).into_response()
    }
}

/// Handler result: a status plus JSON body, or a refusal.
pub type ApiResult = Result<(StatusCode, Json<Value>), ApiError>;

/// `200` with `body`.
pub fn ok(body: Value) -> ApiResult {
    Ok((StatusCode::OK, Json(body)))
}

/// `200` with a `message`.
pub fn ok_message(message: impl Into<String>) -> ApiResult {
    ok(json!({ "message": message.into() }))
}

/// `201` for a created entity.
pub fn created(id: &str) -> ApiResult {
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": messages::CREATED, "_id": id })),
    ))
}

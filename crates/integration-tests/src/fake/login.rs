//! `POST /login`.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::json;
use serverest_core::{User, messages};

use super::error::{ApiError, ApiResult, ok};
use super::state::{FakeState, Store};
use super::validate::{Validator, body_object};

pub async fn login(State(state): State<FakeState>, body: Bytes) -> ApiResult {
    let body = body_object(&body);

    let mut v = Validator::new();
    v.only(&body, &["email", "password"]);
    let email = v.email(body.get("email"), "email");
    let password = v.string(body.get("password"), "password");
    v.finish()?;

    let (Some(email), Some(password)) = (email, password) else {
        return Err(ApiError::LoginFailed);
    };

    let mut store = state.lock().await;
    let Some(id) = store
        .user_by_email(email)
        .filter(|user| user.password == password)
        .map(|user| user.id.clone())
    else {
        return Err(ApiError::LoginFailed);
    };

    let token = store.issue_token(&id);
    ok(json!({ "message": messages::LOGIN_OK, "authorization": token }))
}

/// The user behind the `authorization` header.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` when the header is missing, unknown, or
/// names a user that was deleted.
pub fn authenticate<'a>(store: &'a Store, headers: &HeaderMap) -> Result<&'a User, ApiError> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|token| store.token_user(token))
        .ok_or(ApiError::Unauthorized)
}

/// Like [`authenticate`], additionally requiring an administrator.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` for a regular user.
pub fn authenticate_admin<'a>(
    store: &'a Store,
    headers: &HeaderMap,
) -> Result<&'a User, ApiError> {
    let user = authenticate(store, headers)?;
    if user.admin.is_admin() {
        Ok(user)
    } else {
        Err(ApiError::Forbidden)
    }
}

//! `/usuarios` handlers.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use serde_json::{Map, Value, json};
use serverest_core::messages::{self, field};
use serverest_core::{AdminFlag, NewUser, User, UserId};

use super::error::{ApiError, ApiResult, created, ok, ok_message};
use super::query::{Params, select};
use super::state::{FakeState, new_id};
use super::validate::{Validator, body_object};

const FIELDS: [&str; 4] = ["nome", "email", "password", "administrador"];

pub async fn list(State(state): State<FakeState>, Query(params): Query<Params>) -> ApiResult {
    let mut v = Validator::new();
    for (key, value) in &params {
        match key.as_str() {
            "email" => v.email_param(value, key),
            "administrador" => v.admin_flag_param(value, key),
            "_id" | "nome" | "password" => {}
            _ => v.fail(key, field::not_allowed(key)),
        }
    }
    v.finish()?;

    let store = state.lock().await;
    let users = select(&store.users, &params);
    ok(json!({ "quantidade": users.len(), "usuarios": users }))
}

pub async fn create(State(state): State<FakeState>, body: Bytes) -> ApiResult {
    let user = parse(&body_object(&body))?;

    let mut store = state.lock().await;
    if store.user_by_email(&user.email).is_some() {
        return Err(ApiError::BadRequest(messages::EMAIL_TAKEN));
    }

    let id = UserId::new(new_id());
    store.users.push(User::from_new(id.clone(), user));
    created(id.as_str())
}

pub async fn get(State(state): State<FakeState>, Path(id): Path<String>) -> ApiResult {
    let store = state.lock().await;
    match store.user(&UserId::new(id)) {
        Some(user) => ok(json!(user)),
        None => Err(ApiError::BadRequest(messages::USER_NOT_FOUND)),
    }
}

/// Updates the user, or registers it under a new id when `id` is unknown.
pub async fn update(
    State(state): State<FakeState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult {
    let user = parse(&body_object(&body))?;
    let id = UserId::new(id);

    let mut store = state.lock().await;
    if store
        .user_by_email(&user.email)
        .is_some_and(|other| other.id != id)
    {
        return Err(ApiError::BadRequest(messages::EMAIL_TAKEN));
    }

    if let Some(existing) = store.users.iter_mut().find(|user| user.id == id) {
        *existing = User::from_new(id, user);
        return ok_message(messages::UPDATED);
    }

    let id = UserId::new(new_id());
    store.users.push(User::from_new(id.clone(), user));
    created(id.as_str())
}

pub async fn delete(State(state): State<FakeState>, Path(id): Path<String>) -> ApiResult {
    let id = UserId::new(id);

    let mut store = state.lock().await;
    if let Some(cart) = store.cart_of(&id) {
        return Err(ApiError::BadRequestWith {
            message: messages::USER_HAS_CART,
            key: "idCarrinho",
            value: Value::from(cart.id.as_str()),
        });
    }

    let before = store.users.len();
    store.users.retain(|user| user.id != id);
    if store.users.len() < before {
        ok_message(messages::DELETED)
    } else {
        ok_message(messages::NOTHING_DELETED)
    }
}

fn parse(body: &Map<String, Value>) -> Result<NewUser, ApiError> {
    let mut v = Validator::new();
    v.only(body, &FIELDS);
    let name = v.string(body.get("nome"), "nome");
    let email = v.email(body.get("email"), "email");
    let password = v.string(body.get("password"), "password");
    let admin = v.admin_flag(body.get("administrador"), "administrador");
    v.finish()?;

    match (name, email, password, admin.map(str::parse::<AdminFlag>)) {
        (Some(name), Some(email), Some(password), Some(Ok(admin))) => Ok(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            admin,
        }),
        _ => Err(ApiError::Validation(BTreeMap::new())),
    }
}

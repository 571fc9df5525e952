//! `/produtos` handlers. Mutations are reserved to administrators.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use serde_json::{Map, Value, json};
use serverest_core::messages::{self, field};
use serverest_core::{NewProduct, Price, Product, ProductId};

use super::error::{ApiError, ApiResult, created, ok, ok_message};
use super::login::authenticate_admin;
use super::query::{Params, select};
use super::state::{FakeState, new_id};
use super::validate::{Validator, body_object};

const FIELDS: [&str; 4] = ["nome", "preco", "descricao", "quantidade"];

pub async fn list(State(state): State<FakeState>, Query(params): Query<Params>) -> ApiResult {
    let mut v = Validator::new();
    for (key, value) in &params {
        match key.as_str() {
            "preco" | "quantidade" => v.numeric_param(value, key),
            "_id" | "nome" | "descricao" => {}
            _ => v.fail(key, field::not_allowed(key)),
        }
    }
    v.finish()?;

    let store = state.lock().await;
    let products = select(&store.products, &params);
    ok(json!({ "quantidade": products.len(), "produtos": products }))
}

pub async fn create(
    State(state): State<FakeState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult {
    let mut store = state.lock().await;
    authenticate_admin(&store, &headers)?;

    let product = parse(&body_object(&body))?;
    if store.product_by_name(&product.name).is_some() {
        return Err(ApiError::BadRequest(messages::PRODUCT_NAME_TAKEN));
    }

    let id = ProductId::new(new_id());
    store.products.push(Product::from_new(id.clone(), product));
    created(id.as_str())
}

pub async fn get(State(state): State<FakeState>, Path(id): Path<String>) -> ApiResult {
    let store = state.lock().await;
    match store.product(&ProductId::new(id)) {
        Some(product) => ok(json!(product)),
        None => Err(ApiError::BadRequest(messages::PRODUCT_NOT_FOUND)),
    }
}

/// Updates the product, or registers it under a new id when `id` is
/// unknown.
pub async fn update(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult {
    let mut store = state.lock().await;
    authenticate_admin(&store, &headers)?;

    let product = parse(&body_object(&body))?;
    let id = ProductId::new(id);
    if store
        .product_by_name(&product.name)
        .is_some_and(|other| other.id != id)
    {
        return Err(ApiError::BadRequest(messages::PRODUCT_NAME_TAKEN));
    }

    if let Some(existing) = store.products.iter_mut().find(|product| product.id == id) {
        *existing = Product::from_new(id, product);
        return ok_message(messages::UPDATED);
    }

    let id = ProductId::new(new_id());
    store.products.push(Product::from_new(id.clone(), product));
    created(id.as_str())
}

pub async fn delete(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let mut store = state.lock().await;
    authenticate_admin(&store, &headers)?;

    let id = ProductId::new(id);
    let carts = store.carts_with(&id);
    if !carts.is_empty() {
        return Err(ApiError::BadRequestWith {
            message: messages::PRODUCT_IN_CART,
            key: "idCarrinhos",
            value: json!(carts),
        });
    }

    let before = store.products.len();
    store.products.retain(|product| product.id != id);
    if store.products.len() < before {
        ok_message(messages::DELETED)
    } else {
        ok_message(messages::NOTHING_DELETED)
    }
}

fn parse(body: &Map<String, Value>) -> Result<NewProduct, ApiError> {
    let mut v = Validator::new();
    v.only(body, &FIELDS);
    let name = v.string(body.get("nome"), "nome");
    let price = v.integer(body.get("preco"), "preco", 1);
    let description = v.string(body.get("descricao"), "descricao");
    let quantity = v.integer(body.get("quantidade"), "quantidade", 0);
    v.finish()?;

    match (name, price, description, quantity) {
        (Some(name), Some(price), Some(description), Some(quantity)) => Ok(NewProduct {
            name: name.to_string(),
            price: Price::new(price),
            description: description.to_string(),
            quantity,
        }),
        _ => Err(ApiError::Validation(BTreeMap::new())),
    }
}

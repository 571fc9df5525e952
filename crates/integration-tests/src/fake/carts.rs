//! `/carrinhos` handlers.
//!
//! A user holds at most one cart. Creating it takes the items out of
//! stock; cancelling puts them back, finishing keeps them out.

use std::collections::{BTreeMap, HashSet};

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use serde_json::{Map, Value, json};
use serverest_core::messages::{self, field};
use serverest_core::{Cart, CartId, CartItem, CartStatus, ProductId};

use super::error::{ApiError, ApiResult, created, ok, ok_message};
use super::login::authenticate;
use super::query::{Params, select};
use super::state::{FakeState, line, new_id, total_price, total_quantity};
use super::validate::{Validator, body_object};

pub async fn list(State(state): State<FakeState>, Query(params): Query<Params>) -> ApiResult {
    let mut v = Validator::new();
    for (key, value) in &params {
        match key.as_str() {
            "precoTotal" | "quantidadeTotal" => v.numeric_param(value, key),
            "_id" | "idUsuario" => {}
            _ => v.fail(key, field::not_allowed(key)),
        }
    }
    v.finish()?;

    let store = state.lock().await;
    let carts = select(&store.carts, &params);
    ok(json!({ "quantidade": carts.len(), "carrinhos": carts }))
}

pub async fn get(State(state): State<FakeState>, Path(id): Path<String>) -> ApiResult {
    let store = state.lock().await;
    match store.cart(&CartId::new(id)) {
        Some(cart) => ok(json!(cart)),
        None => Err(ApiError::BadRequest(messages::CART_NOT_FOUND)),
    }
}

pub async fn create(
    State(state): State<FakeState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult {
    let mut store = state.lock().await;
    let user_id = authenticate(&store, &headers)?.id.clone();
    let requested = parse(&body_object(&body))?;

    if store.cart_of(&user_id).is_some() {
        return Err(ApiError::BadRequest(messages::CART_ALREADY_OPEN));
    }

    let mut seen = HashSet::new();
    if !requested.iter().all(|item| seen.insert(&item.product_id)) {
        return Err(ApiError::BadRequest(messages::CART_DUPLICATED_PRODUCT));
    }

    let mut items = Vec::with_capacity(requested.len());
    for (index, item) in requested.iter().enumerate() {
        let Some(product) = store.product(&item.product_id) else {
            return Err(item_error(messages::PRODUCT_NOT_FOUND, item, index));
        };
        if product.quantity < item.quantity {
            return Err(item_error(messages::CART_INSUFFICIENT_STOCK, item, index));
        }
        items.push(line(product, item.quantity));
    }

    for item in &items {
        if let Some(product) = store
            .products
            .iter_mut()
            .find(|product| product.id == item.product_id)
        {
            product.quantity -= item.quantity;
        }
    }

    let id = CartId::new(new_id());
    store.carts.push(Cart {
        id: id.clone(),
        total_price: total_price(&items),
        total_quantity: total_quantity(&items),
        products: items,
        user_id,
    });
    created(id.as_str())
}

pub async fn finish(State(state): State<FakeState>, headers: HeaderMap) -> ApiResult {
    close(&state, &headers, CartStatus::Finished).await
}

pub async fn cancel(State(state): State<FakeState>, headers: HeaderMap) -> ApiResult {
    close(&state, &headers, CartStatus::Canceled).await
}

async fn close(state: &FakeState, headers: &HeaderMap, status: CartStatus) -> ApiResult {
    let mut store = state.lock().await;
    let user_id = authenticate(&store, headers)?.id.clone();

    let Some(cart) = store.take_cart_of(&user_id) else {
        return ok_message(messages::NO_CART_FOR_USER);
    };

    if status.restores_stock() {
        store.restock(&cart);
        ok_message(messages::cart_canceled())
    } else {
        ok_message(messages::DELETED)
    }
}

fn item_error(message: &'static str, item: &CartItem, index: usize) -> ApiError {
    ApiError::BadRequestWith {
        message,
        key: "item",
        value: json!({
            "idProduto": item.product_id,
            "quantidade": item.quantity,
            "index": index,
        }),
    }
}

fn parse(body: &Map<String, Value>) -> Result<Vec<CartItem>, ApiError> {
    let mut v = Validator::new();
    v.only(body, &["produtos"]);

    let lines = match body.get("produtos") {
        None => {
            v.fail("produtos", field::required("produtos"));
            Vec::new()
        }
        Some(Value::Array(lines)) => parse_lines(&mut v, lines),
        Some(_) => {
            v.fail("produtos", field::not_array("produtos"));
            Vec::new()
        }
    };
    v.finish()?;

    if lines.is_empty() {
        return Err(ApiError::Validation(BTreeMap::new()));
    }
    Ok(lines)
}

fn parse_lines(v: &mut Validator, lines: &[Value]) -> Vec<CartItem> {
    let mut items = Vec::with_capacity(lines.len());
    for (index, entry) in lines.iter().enumerate() {
        let id_path = format!("produtos[{index}].idProduto");
        let quantity_path = format!("produtos[{index}].quantidade");

        let empty = Map::new();
        let entry = entry.as_object().unwrap_or(&empty);
        for key in entry.keys() {
            if key != "idProduto" && key != "quantidade" {
                let path = format!("produtos[{index}].{key}");
                v.fail(&path, field::not_allowed(&path));
            }
        }

        let id = v.string(entry.get("idProduto"), &id_path);
        let quantity = v.integer(entry.get("quantidade"), &quantity_path, 1);
        if let (Some(id), Some(quantity)) = (id, quantity) {
            items.push(CartItem::new(ProductId::new(id), quantity));
        }
    }

    if items.len() < lines.len() || lines.is_empty() {
        v.fail("produtos", field::missing_required_value("produtos"));
    }
    items
}

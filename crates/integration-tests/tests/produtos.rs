//! `/produtos` scenarios.

#![allow(clippy::unwrap_used)]

use serial_test::serial;
use serverest_client::{AuthToken, Filter};
use serverest_core::{Product, ProductId, messages};
use serverest_harness::{reset, seed};
use serverest_integration_tests::TestContext;

/// Products the API ships with.
const DEFAULT_PRODUCTS_COUNT: u64 = 2;

struct Sessions {
    ctx: TestContext,
    admin: AuthToken,
    user: AuthToken,
}

/// Context with the product fixture users logged in and fixture products
/// removed.
async fn sessions() -> Sessions {
    let ctx = TestContext::start().await.unwrap();
    let data = &ctx.fixtures.products;
    seed::ensure_users(&ctx.client, &data.users).await.unwrap();

    let admin = ctx.client.login().token(&data.login.admin).await.unwrap();
    let user = ctx.client.login().token(&data.login.not_admin).await.unwrap();

    reset::clear_cart_data(&ctx.client, &ctx.fixtures).await.unwrap();
    reset::clear_product_data(&ctx.client, &ctx.fixtures, &admin)
        .await
        .unwrap();

    Sessions { ctx, admin, user }
}

async fn insert(s: &Sessions, product: &serverest_core::NewProduct) -> ProductId {
    let response = s
        .ctx
        .client
        .products()
        .create(product, Some(&s.admin))
        .await
        .unwrap();
    assert_eq!(response.status_code(), 201);
    ProductId::new(response.id().unwrap())
}

// ============================================================================
// GET /produtos
// ============================================================================

#[tokio::test]
#[serial]
async fn test_lists_products() {
    let s = sessions().await;
    let list = &s.ctx.fixtures.products.list;
    s.ctx
        .client
        .products()
        .create_all(list, Some(&s.admin))
        .await
        .unwrap();

    let response = s.ctx.client.products().list(&Filter::new()).await.unwrap();

    let expected = list.len() as u64 + DEFAULT_PRODUCTS_COUNT;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.count(), Some(expected));
    assert_eq!(response.items("produtos").len() as u64, expected);
}

#[tokio::test]
#[serial]
async fn test_lists_products_filtered_by_every_field() {
    let s = sessions().await;
    let list = &s.ctx.fixtures.products.list;
    s.ctx
        .client
        .products()
        .create_all(list, Some(&s.admin))
        .await
        .unwrap();

    let filter = Filter::from_entity(&list[0]).unwrap();
    let response = s.ctx.client.products().list(&filter).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.count(), Some(1));
    let listed: Vec<Product> = response.decode_items("produtos").unwrap();
    assert!(listed[0].matches(&list[0]));
}

#[tokio::test]
#[serial]
async fn test_gets_product_by_id() {
    let s = sessions().await;
    let product = &s.ctx.fixtures.products.list[0];
    let id = insert(&s, product).await;

    let response = s.ctx.client.products().get(&id).await.unwrap();

    assert_eq!(response.status_code(), 200);
    let stored: Product = response.decode().unwrap();
    assert!(stored.matches(product));
}

#[tokio::test]
#[serial]
async fn test_get_unknown_id_is_rejected() {
    let ctx = TestContext::start().await.unwrap();

    let response = ctx
        .client
        .products()
        .get(&ProductId::new("inexistent_id"))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.message(), Some(messages::PRODUCT_NOT_FOUND));
}

#[tokio::test]
#[serial]
async fn test_rejects_non_numeric_price_filter() {
    let ctx = TestContext::start().await.unwrap();

    let response = ctx
        .client
        .products()
        .list(&Filter::new().with("preco", "caro"))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.field("preco"), Some("preco deve ser um número"));
}

// ============================================================================
// POST /produtos
// ============================================================================

#[tokio::test]
#[serial]
async fn test_admin_creates_product() {
    let s = sessions().await;

    let response = s
        .ctx
        .client
        .products()
        .create(&s.ctx.fixtures.products.create.success, Some(&s.admin))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.message(), Some(messages::CREATED));
}

#[tokio::test]
#[serial]
async fn test_rejects_invalid_products() {
    let s = sessions().await;

    for body in &s.ctx.fixtures.products.create.invalid {
        let response = s
            .ctx
            .client
            .products()
            .create(body, Some(&s.admin))
            .await
            .unwrap();
        assert_eq!(response.status_code(), 400, "accepted {body}");
    }
}

#[tokio::test]
#[serial]
async fn test_rejects_duplicated_name() {
    let s = sessions().await;
    let product = &s.ctx.fixtures.products.create.duplicated;
    insert(&s, product).await;

    let response = s
        .ctx
        .client
        .products()
        .create(product, Some(&s.admin))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.message(), Some(messages::PRODUCT_NAME_TAKEN));
}

#[tokio::test]
#[serial]
async fn test_create_requires_token() {
    let s = sessions().await;

    let response = s
        .ctx
        .client
        .products()
        .create(&s.ctx.fixtures.products.create.success, None)
        .await
        .unwrap();

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.message(), Some(messages::TOKEN_INVALID));
}

#[tokio::test]
#[serial]
async fn test_create_requires_admin() {
    let s = sessions().await;

    let response = s
        .ctx
        .client
        .products()
        .create(&s.ctx.fixtures.products.create.success, Some(&s.user))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 403);
    assert_eq!(response.message(), Some(messages::ADMIN_ONLY));
}

// ============================================================================
// PUT /produtos/{id}
// ============================================================================

#[tokio::test]
#[serial]
async fn test_admin_updates_product() {
    let s = sessions().await;
    let edit = &s.ctx.fixtures.products.edit.success;
    let id = insert(&s, &edit.original).await;

    let response = s
        .ctx
        .client
        .products()
        .update(&id, &edit.updated, Some(&s.admin))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.message(), Some(messages::UPDATED));

    let stored: Product = s.ctx.client.products().get(&id).await.unwrap().decode().unwrap();
    assert!(stored.matches(&edit.updated));
}

#[tokio::test]
#[serial]
async fn test_update_of_unknown_id_creates_product() {
    let s = sessions().await;

    let response = s
        .ctx
        .client
        .products()
        .update(
            &ProductId::new("inexistent_id"),
            &s.ctx.fixtures.products.edit.not_found.created,
            Some(&s.admin),
        )
        .await
        .unwrap();

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.message(), Some(messages::CREATED));
}

#[tokio::test]
#[serial]
async fn test_update_of_unknown_id_rejects_taken_name() {
    let s = sessions().await;
    let product = &s.ctx.fixtures.products.edit.not_found.duplicated;
    insert(&s, product).await;

    let response = s
        .ctx
        .client
        .products()
        .update(&ProductId::new("inexistent_id"), product, Some(&s.admin))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.message(), Some(messages::PRODUCT_NAME_TAKEN));
}

#[tokio::test]
#[serial]
async fn test_rejects_invalid_updates() {
    let s = sessions().await;
    let fail = &s.ctx.fixtures.products.edit.fail;
    let id = insert(&s, &fail.original).await;

    for body in &fail.invalid {
        let response = s
            .ctx
            .client
            .products()
            .update(&id, body, Some(&s.admin))
            .await
            .unwrap();
        assert_eq!(response.status_code(), 400, "accepted {body}");
    }
}

#[tokio::test]
#[serial]
async fn test_update_requires_token() {
    let s = sessions().await;
    let edit = &s.ctx.fixtures.products.edit.success;
    let id = insert(&s, &edit.original).await;

    let response = s
        .ctx
        .client
        .products()
        .update(&id, &edit.updated, None)
        .await
        .unwrap();

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.message(), Some(messages::TOKEN_INVALID));
}

#[tokio::test]
#[serial]
async fn test_update_requires_admin() {
    let s = sessions().await;
    let edit = &s.ctx.fixtures.products.edit.success;
    let id = insert(&s, &edit.original).await;

    let response = s
        .ctx
        .client
        .products()
        .update(&id, &edit.updated, Some(&s.user))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 403);
    assert_eq!(response.message(), Some(messages::ADMIN_ONLY));
}

// ============================================================================
// DELETE /produtos/{id}
// ============================================================================

#[tokio::test]
#[serial]
async fn test_admin_deletes_product() {
    let s = sessions().await;
    let id = insert(&s, &s.ctx.fixtures.products.delete).await;

    let response = s
        .ctx
        .client
        .products()
        .delete(&id, Some(&s.admin))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.message(), Some(messages::DELETED));
}

#[tokio::test]
#[serial]
async fn test_delete_of_unknown_id_deletes_nothing() {
    let s = sessions().await;

    let response = s
        .ctx
        .client
        .products()
        .delete(&ProductId::new("inexistent_id"), Some(&s.admin))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.message(), Some(messages::NOTHING_DELETED));
}

#[tokio::test]
#[serial]
async fn test_refuses_to_delete_product_in_cart() {
    let s = sessions().await;
    let in_cart = &s.ctx.fixtures.products.in_cart;
    let id = insert(&s, &in_cart.product).await;

    let (_, submission) = seed::open_cart(&s.ctx.client, &in_cart.user, &in_cart.items)
        .await
        .unwrap();
    assert_eq!(submission.response.status_code(), 201);

    let response = s
        .ctx
        .client
        .products()
        .delete(&id, Some(&s.admin))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.message(), Some(messages::PRODUCT_IN_CART));
    let carts = response.body.get("idCarrinhos").and_then(|v| v.as_array());
    assert_eq!(carts.map(Vec::len), Some(1));

    reset::cancel_cart_of(&s.ctx.client, &in_cart.user.credentials())
        .await
        .unwrap();
}

#[tokio::test]
#[serial]
async fn test_delete_requires_token() {
    let s = sessions().await;
    let id = insert(&s, &s.ctx.fixtures.products.delete).await;

    let response = s.ctx.client.products().delete(&id, None).await.unwrap();

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.message(), Some(messages::TOKEN_INVALID));
}

#[tokio::test]
#[serial]
async fn test_delete_requires_admin() {
    let s = sessions().await;
    let id = insert(&s, &s.ctx.fixtures.products.delete).await;

    let response = s
        .ctx
        .client
        .products()
        .delete(&id, Some(&s.user))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 403);
    assert_eq!(response.message(), Some(messages::ADMIN_ONLY));
}

//! `/usuarios` scenarios.

#![allow(clippy::unwrap_used)]

use serial_test::serial;
use serverest_client::Filter;
use serverest_core::{User, UserId, messages};
use serverest_harness::{reset, seed};
use serverest_integration_tests::TestContext;

/// Context with neither default data nor fixture users left.
async fn empty_context() -> TestContext {
    let ctx = TestContext::start().await.unwrap();
    reset::clear_default_data(&ctx.client).await.unwrap();
    reset::clear_cart_data(&ctx.client, &ctx.fixtures).await.unwrap();
    reset::clear_user_data(&ctx.client, &ctx.fixtures).await.unwrap();
    ctx
}

// ============================================================================
// GET /usuarios
// ============================================================================

#[tokio::test]
#[serial]
async fn test_lists_no_users() {
    let ctx = empty_context().await;

    let response = ctx.client.users().list(&Filter::new()).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.count(), Some(0));
    assert!(response.items("usuarios").is_empty());
}

#[tokio::test]
#[serial]
async fn test_lists_all_users() {
    let ctx = empty_context().await;
    let users = &ctx.fixtures.users.list.data;
    ctx.client.users().create_all(users).await.unwrap();

    let response = ctx.client.users().list(&Filter::new()).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.count(), Some(users.len() as u64));
}

#[tokio::test]
#[serial]
async fn test_lists_users_filtered_by_every_field() {
    let ctx = empty_context().await;
    let users = &ctx.fixtures.users.list.data;
    ctx.client.users().create_all(users).await.unwrap();

    let filter = Filter::from_entity(&users[0]).unwrap();
    let response = ctx.client.users().list(&filter).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.count(), Some(1));
    let listed: Vec<User> = response.decode_items("usuarios").unwrap();
    assert!(listed[0].matches(&users[0]));
}

#[tokio::test]
#[serial]
async fn test_gets_user_by_id() {
    let ctx = empty_context().await;
    let users = &ctx.fixtures.users.list.data;
    ctx.client.users().create_all(users).await.unwrap();

    let listed = ctx
        .client
        .users()
        .find_by_email(&users[0].email)
        .await
        .unwrap()
        .found()
        .unwrap();

    let response = ctx.client.users().get(&listed.id).await.unwrap();
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.id(), Some(listed.id.as_str()));
    let user: User = response.decode().unwrap();
    assert!(user.matches(&users[0]));
}

#[tokio::test]
#[serial]
async fn test_get_unknown_id_is_rejected() {
    let ctx = TestContext::start().await.unwrap();

    let response = ctx.client.users().get(&UserId::new("123")).await.unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.message(), Some(messages::USER_NOT_FOUND));
}

#[tokio::test]
#[serial]
async fn test_rejects_unknown_filter() {
    let ctx = TestContext::start().await.unwrap();

    let response = ctx
        .client
        .users()
        .list(&Filter::new().with("idade", 30))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.field("idade"), Some("idade não é permitido"));
}

// ============================================================================
// POST /usuarios
// ============================================================================

#[tokio::test]
#[serial]
async fn test_creates_admin_user() {
    let ctx = TestContext::start().await.unwrap();
    let user = &ctx.fixtures.users.create.success.admin;
    ctx.client.users().delete_by_email(&user.email).await.unwrap();

    let response = ctx.client.users().create(user).await.unwrap();

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.message(), Some(messages::CREATED));
    assert!(response.id().is_some());
}

#[tokio::test]
#[serial]
async fn test_creates_regular_user() {
    let ctx = TestContext::start().await.unwrap();
    let user = &ctx.fixtures.users.create.success.not_admin;
    ctx.client.users().delete_by_email(&user.email).await.unwrap();

    let response = ctx.client.users().create(user).await.unwrap();

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.message(), Some(messages::CREATED));
}

#[tokio::test]
#[serial]
async fn test_rejects_duplicated_email() {
    let ctx = TestContext::start().await.unwrap();
    let user = &ctx.fixtures.users.create.duplicated;
    ctx.client.users().delete_by_email(&user.email).await.unwrap();
    ctx.client.users().create(user).await.unwrap();

    let response = ctx.client.users().create(user).await.unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.message(), Some(messages::EMAIL_TAKEN));
}

#[tokio::test]
#[serial]
async fn test_rejects_invalid_users() {
    let ctx = TestContext::start().await.unwrap();

    for body in &ctx.fixtures.users.create.invalid {
        let response = ctx.client.users().create(body).await.unwrap();
        assert_eq!(response.status_code(), 400, "accepted {body}");
    }
}

// ============================================================================
// PUT /usuarios/{id}
// ============================================================================

#[tokio::test]
#[serial]
async fn test_updates_user() {
    let ctx = TestContext::start().await.unwrap();
    let edit = &ctx.fixtures.users.edit.success;
    ctx.client.users().delete_by_email(&edit.updated.email).await.unwrap();
    let created = seed::ensure_user(&ctx.client, &edit.original).await.unwrap();
    let id = UserId::new(created.id().unwrap());

    let response = ctx.client.users().update(&id, &edit.updated).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.message(), Some(messages::UPDATED));

    let stored: User = ctx.client.users().get(&id).await.unwrap().decode().unwrap();
    assert!(stored.matches(&edit.updated));
}

#[tokio::test]
#[serial]
async fn test_update_of_unknown_id_creates_user() {
    let ctx = TestContext::start().await.unwrap();
    let user = &ctx.fixtures.users.edit.not_found.created;
    ctx.client.users().delete_by_email(&user.email).await.unwrap();

    let response = ctx
        .client
        .users()
        .update(&UserId::new("123"), user)
        .await
        .unwrap();

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.message(), Some(messages::CREATED));
}

#[tokio::test]
#[serial]
async fn test_update_of_unknown_id_rejects_taken_email() {
    let ctx = TestContext::start().await.unwrap();
    let user = &ctx.fixtures.users.edit.not_found.duplicated;
    seed::ensure_user(&ctx.client, user).await.unwrap();

    let response = ctx
        .client
        .users()
        .update(&UserId::new("123"), user)
        .await
        .unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.message(), Some(messages::EMAIL_TAKEN));
}

#[tokio::test]
#[serial]
async fn test_rejects_invalid_updates() {
    let ctx = TestContext::start().await.unwrap();
    let fail = &ctx.fixtures.users.edit.fail;
    let created = seed::ensure_user(&ctx.client, &fail.original).await.unwrap();
    let id = UserId::new(created.id().unwrap());

    for body in &fail.invalid {
        let response = ctx.client.users().update(&id, body).await.unwrap();
        assert_eq!(response.status_code(), 400, "accepted {body}");
    }
}

// ============================================================================
// DELETE /usuarios/{id}
// ============================================================================

#[tokio::test]
#[serial]
async fn test_deletes_user() {
    let ctx = TestContext::start().await.unwrap();
    let user = &ctx.fixtures.users.delete.success;
    let created = seed::ensure_user(&ctx.client, user).await.unwrap();
    let id = UserId::new(created.id().unwrap());

    let response = ctx.client.users().delete(&id).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.message(), Some(messages::DELETED));
    assert!(!ctx.client.users().find_by_email(&user.email).await.unwrap().is_found());
}

#[tokio::test]
#[serial]
async fn test_delete_of_unknown_id_deletes_nothing() {
    let ctx = TestContext::start().await.unwrap();

    let response = ctx.client.users().delete(&UserId::new("123")).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.message(), Some(messages::NOTHING_DELETED));
}

#[tokio::test]
#[serial]
async fn test_refuses_to_delete_user_with_cart() {
    let ctx = TestContext::start().await.unwrap();
    let data = &ctx.fixtures.users.delete.fail.has_cart;

    let session = seed::session(&ctx.client, &data.user).await.unwrap();
    reset::cancel_cart_of(&ctx.client, &data.user.credentials())
        .await
        .unwrap();
    seed::ensure_product(&ctx.client, &data.product, &session.token)
        .await
        .unwrap();
    let submission = ctx
        .client
        .carts()
        .create_with_items(&data.items, Some(&session.token))
        .await
        .unwrap();
    assert_eq!(submission.response.status_code(), 201);

    let response = ctx
        .client
        .users()
        .delete_by_email(&data.user.email)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.message(), Some(messages::USER_HAS_CART));
    assert!(response.field("idCarrinho").is_some());

    let still_there = ctx
        .client
        .users()
        .find_by_email(&data.user.email)
        .await
        .unwrap();
    assert!(still_there.found().is_some());

    reset::cancel_cart_of(&ctx.client, &data.user.credentials())
        .await
        .unwrap();
}

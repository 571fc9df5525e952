//! `POST /login` scenarios.

#![allow(clippy::unwrap_used)]

use serial_test::serial;
use serverest_core::messages;
use serverest_harness::seed;
use serverest_integration_tests::TestContext;

async fn context() -> TestContext {
    let ctx = TestContext::start().await.unwrap();
    let data = &ctx.fixtures.login.data;
    seed::ensure_user(&ctx.client, &data.not_admin).await.unwrap();
    seed::ensure_user(&ctx.client, &data.admin).await.unwrap();
    ctx
}

#[tokio::test]
#[serial]
async fn test_authenticates_regular_user() {
    let ctx = context().await;

    let response = ctx
        .client
        .login()
        .submit(&ctx.fixtures.login.success.not_admin)
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.message(), Some(messages::LOGIN_OK));
    assert!(response.field("authorization").unwrap().starts_with("Bearer "));
}

#[tokio::test]
#[serial]
async fn test_authenticates_admin_user() {
    let ctx = context().await;

    let token = ctx
        .client
        .login()
        .try_token(&ctx.fixtures.login.success.admin)
        .await
        .unwrap();

    assert!(token.is_some());
}

#[tokio::test]
#[serial]
async fn test_rejects_wrong_password() {
    let ctx = context().await;

    let response = ctx
        .client
        .login()
        .submit(&ctx.fixtures.login.fail)
        .await
        .unwrap();

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.message(), Some(messages::LOGIN_FAILED));
}

#[tokio::test]
#[serial]
async fn test_rejects_invalid_payloads() {
    let ctx = context().await;

    for body in &ctx.fixtures.login.invalid {
        let response = ctx.client.login().submit(body).await.unwrap();
        assert_eq!(response.status_code(), 400, "accepted {body}");
    }
}

#[tokio::test]
#[serial]
async fn test_token_helper_reports_refusal() {
    let ctx = context().await;

    let err = ctx
        .client
        .login()
        .token(&ctx.fixtures.login.fail)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("401"));
}

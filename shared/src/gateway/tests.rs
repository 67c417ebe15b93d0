use super::testing::{TEST_BASE, TestContext};
use super::*;
use crate::error::PortalErrorStatus;
use crate::protocol::{ListStudents, LoginRequest, ReviewDecision, UpdateSubmissionStatus};
use crate::{Role, STORAGE_ROLE_KEY, STORAGE_TOKEN_KEY, STORAGE_USER_ID_KEY};
use serde_json::json;

// =========================================================
// Bearer 注入
// =========================================================

#[tokio::test]
async fn attaches_bearer_token_when_signed_in() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http()
        .mock_response(HttpMethod::Get, "/api/admin/students", 200, json!([]));

    let students = ctx.api.call(&ListStudents).await.unwrap();
    assert!(students.is_empty());

    let req = ctx.http().last_request().unwrap();
    assert_eq!(req.url, format!("{}/api/admin/students", TEST_BASE));
    assert_eq!(
        req.headers.get(HEADER_AUTHORIZATION).map(String::as_str),
        Some("Bearer test-token")
    );
    assert!(req.body.is_none());
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let ctx = TestContext::new();
    ctx.http().mock_response(
        HttpMethod::Post,
        "/api/auth/login",
        200,
        json!({ "token": "t", "role": "admin" }),
    );

    let resp = ctx
        .api
        .call(&LoginRequest {
            email: "a@b.c".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();
    assert_eq!(resp.token, "t");

    let req = ctx.http().last_request().unwrap();
    assert!(!req.headers.contains_key(HEADER_AUTHORIZATION));
    assert_eq!(
        req.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "email": "a@b.c", "password": "pw" }));
}

#[tokio::test]
async fn request_carries_configured_timeout() {
    let ctx = TestContext::new();
    ctx.http()
        .mock_response(HttpMethod::Get, "/api/admin/students", 200, json!([]));
    ctx.api.call(&ListStudents).await.unwrap();
    assert_eq!(
        ctx.http().last_request().unwrap().timeout,
        Duration::from_secs(10)
    );
}

// =========================================================
// 401 处理
// =========================================================

#[tokio::test]
async fn unauthorized_clears_session_before_redirect() {
    let ctx = TestContext::new().signed_in(Role::Student, Some("u-1"));
    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/admin/students",
        401,
        json!({ "message": "jwt expired" }),
    );

    let err = ctx.api.call(&ListStudents).await.unwrap_err();
    assert!(err.is_unauthorized());

    for key in [STORAGE_TOKEN_KEY, STORAGE_ROLE_KEY, STORAGE_USER_ID_KEY] {
        assert_eq!(ctx.memory.get(key), None, "{} should be cleared", key);
    }
    // 跳转时 token 已不存在
    assert_eq!(*ctx.navigator().redirects.borrow(), vec![false]);
}

#[tokio::test]
async fn other_failures_leave_session_alone() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/admin/students",
        500,
        json!({ "error": "database down" }),
    );

    let err = ctx.api.call(&ListStudents).await.unwrap_err();
    assert_eq!(err.status, PortalErrorStatus::Rejected);
    assert_eq!(err.backend_message(), Some("database down"));
    assert!(ctx.api.session().has_token());
    assert_eq!(ctx.navigator().redirect_count(), 0);
}

#[tokio::test]
async fn transport_errors_propagate_without_redirect() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http().mock_failure(
        HttpMethod::Get,
        "/api/admin/students",
        PortalError::timeout("request exceeded 10000 ms"),
    );

    let err = ctx.api.call(&ListStudents).await.unwrap_err();
    assert_eq!(err.status, PortalErrorStatus::Timeout);
    assert!(ctx.api.session().has_token());
    assert_eq!(ctx.navigator().redirect_count(), 0);
}

// =========================================================
// 响应解析
// =========================================================

#[tokio::test]
async fn empty_success_body_is_acknowledged() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http()
        .mock_raw(HttpMethod::Put, "/api/submissions/s1", 204, "");

    let req = UpdateSubmissionStatus {
        id: "s1".into(),
        status: ReviewDecision::Approved,
    };
    ctx.api.call(&req).await.unwrap();

    let sent = ctx.http().last_request().unwrap();
    assert_eq!(sent.body.as_deref(), Some(r#"{"status":"Approved"}"#));
}

#[tokio::test]
async fn malformed_json_is_a_serialization_error() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http()
        .mock_raw(HttpMethod::Get, "/api/admin/students", 200, "{not json");

    let err = ctx.api.call(&ListStudents).await.unwrap_err();
    assert_eq!(err.status, PortalErrorStatus::Serialization);
}

#[test]
fn base_url_trailing_slash_is_normalized() {
    let config = ClientConfig::new(
        "https://portal.example/",
        DEFAULT_REQUEST_TIMEOUT,
        Default::default(),
    );
    assert_eq!(
        config.url("/api/courses"),
        "https://portal.example/api/courses"
    );
}

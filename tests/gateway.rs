use std::sync::atomic::Ordering;
use httpmock::prelude::*;
use serde_json::json;
use gpulab_portal::errors::PortalError;
use gpulab_portal::traits::portal_api::PortalApi;
use crate::common::{Harness, ACCESS_TOKEN};

#[tokio::test]
async fn attaches_bearer_token_and_request_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/images")
                .header("Authorization", format!("Bearer {}", ACCESS_TOKEN))
                .header_exists("X-Request-Id");
            then.status(200)
                .json_body(json!([{"imageId": 1, "imageName": "pytorch", "imageVersion": "2.3"}]));
        })
        .await;

    let harness = Harness::new(server.base_url(), true);
    let images = harness.client.images().await.unwrap();

    mock.assert_async().await;
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].display_name(), "pytorch:2.3");
}

#[tokio::test]
async fn accepts_bare_and_wrapped_lists() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/resource-groups");
            then.status(200)
                .json_body(json!({"data": [{"resourceGroupId": 3, "description": "A100 x4"}]}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/groups");
            then.status(200).json_body(json!([{"groupId": 9, "groupName": "vision"}]));
        })
        .await;

    let harness = Harness::new(server.base_url(), true);
    let resource_groups = harness.client.resource_groups().await.unwrap();
    let groups = harness.client.groups().await.unwrap();

    assert_eq!(resource_groups[0].resource_group_id, 3);
    assert_eq!(groups[0].group_name, "vision");
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!([]));
        })
        .await;

    let harness = Harness::new(server.base_url(), false);
    let err = harness.client.images().await.unwrap_err();

    assert!(matches!(err, PortalError::Authentication { .. }));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn unauthorized_broadcasts_once_per_failing_call() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/images");
            then.status(401);
        })
        .await;

    let harness = Harness::new(server.base_url(), true);
    let (seen, _subscription) = harness.count_expiries();

    let err = harness.client.images().await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    harness.client.images().await.unwrap_err();
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn login_rejection_does_not_broadcast() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(401).json_body(json!({"message": "bad credentials"}));
        })
        .await;

    let harness = Harness::new(server.base_url(), false);
    let (seen, _subscription) = harness.count_expiries();
    let credentials = gpulab_portal::structs::credentials::Credentials::new("alice", "wrong");

    let err = harness.client.login(&credentials).await.unwrap_err();
    assert!(matches!(err, PortalError::LoginFailed));
    assert_eq!(seen.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/requests/my");
            then.status(503).json_body(json!({"message": "maintenance"}));
        })
        .await;

    let harness = Harness::new(server.base_url(), true);
    match harness.client.my_requests().await.unwrap_err() {
        PortalError::Api { status, message, .. } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/auth/me");
            then.status(200).body("<html>oops</html>");
        })
        .await;

    let harness = Harness::new(server.base_url(), true);
    let err = harness.client.current_user().await.unwrap_err();
    assert!(matches!(err, PortalError::Parse { .. }));
}

#[tokio::test]
async fn unauthorized_with_garbage_body_still_broadcasts() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/groups");
            then.status(401).body("<html>gateway timeout page</html>");
        })
        .await;

    let harness = Harness::new(server.base_url(), true);
    let (seen, _subscription) = harness.count_expiries();

    let err = harness.client.groups().await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_health_reports_ok_without_calling_webhook() {
    let (app, mock) = common::test_app(common::WebhookReply::ok(serde_json::json!({}))).await;

    let (status, response) = common::get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["workflow_host"], "127.0.0.1");
    assert!(response["version"].is_string());
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_docs_are_served() {
    let app = common::app_for(common::unreachable_url());

    let (status, _) = common::get(&app, "/docs").await;

    assert_eq!(status, StatusCode::OK);
}

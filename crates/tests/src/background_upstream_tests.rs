use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, WebhookReply};

#[tokio::test]
async fn test_non_json_reply_is_upstream_error() {
    let (app, mock) = common::test_app(WebhookReply::Raw(
        StatusCode::OK,
        "<html><body>Workflow was started</body></html>",
    ))
    .await;

    let (status, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("sunset")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response["kind"], "UpstreamError");
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn test_empty_reply_is_upstream_error() {
    let (app, _mock) = common::test_app(WebhookReply::Raw(StatusCode::OK, "")).await;

    let (status, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("sunset")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response["kind"], "UpstreamError");
}

#[tokio::test]
async fn test_non_success_status_with_json_body_is_still_decoded() {
    let (app, _mock) = common::test_app(WebhookReply::Json(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "code": "<div>late</div>", "style": "div{color:red}" }),
    ))
    .await;

    let (status, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("late")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["code"], "<div>late</div>");
    assert_eq!(response["style"], "div{color:red}");
}

#[tokio::test]
async fn test_non_success_status_with_text_body_is_upstream_error() {
    let (app, _mock) =
        common::test_app(WebhookReply::Raw(StatusCode::NOT_FOUND, "webhook not registered")).await;

    let (status, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("x")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response["kind"], "UpstreamError");
}

#[tokio::test]
async fn test_unreachable_webhook_is_upstream_error() {
    let app = common::app_for(common::unreachable_url());

    let (status, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("x")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response["kind"], "UpstreamError");
}

#[tokio::test]
async fn test_array_reply_renders_as_empty_background() {
    let (app, _mock) = common::test_app(WebhookReply::ok(json!([
        { "code": "<div>x</div>", "style": "div{}" }
    ])))
    .await;

    let (status, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("x")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response["code"].is_null());
    assert!(response["style"].is_null());
}

#[tokio::test]
async fn test_null_reply_is_upstream_error() {
    let (app, _mock) = common::test_app(WebhookReply::ok(serde_json::Value::Null)).await;

    let (status, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("x")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response["kind"], "UpstreamError");
}

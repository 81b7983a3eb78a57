use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, WebhookReply};

#[tokio::test]
async fn test_generate_returns_code_and_style() {
    let (app, _mock) = common::test_app(WebhookReply::ok(json!({
        "code": "<div class=\"aurora\"></div>",
        "style": ".aurora{background:linear-gradient(#203,#406)}"
    })))
    .await;

    let (status, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("aurora")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["code"], "<div class=\"aurora\"></div>");
    assert_eq!(response["style"], ".aurora{background:linear-gradient(#203,#406)}");
}

#[tokio::test]
async fn test_generate_forwards_trimmed_description_as_json() {
    let (app, mock) = common::test_app(WebhookReply::ok(json!({ "code": "", "style": "" }))).await;

    let (status, _) = common::post_json(
        &app,
        "/api/backgrounds",
        &common::description_body("   purple waves \n"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let calls = mock.calls();
    assert_eq!(calls.len(), 1, "Exactly one webhook call per generation");
    assert_eq!(calls[0].body, json!({ "description": "purple waves" }));
    let content_type = calls[0].content_type.as_deref().unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Unexpected content type: {content_type}"
    );
}

#[tokio::test]
async fn test_generate_missing_style_is_absent() {
    let (app, _mock) =
        common::test_app(WebhookReply::ok(json!({ "code": "<p>stars</p>" }))).await;

    let (status, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("stars")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["code"], "<p>stars</p>");
    assert!(response["style"].is_null());
}

#[tokio::test]
async fn test_generate_ignores_unknown_fields() {
    let (app, _mock) = common::test_app(WebhookReply::ok(json!({
        "code": "<p>x</p>",
        "style": "p{}",
        "model": "whatever",
        "tokens": 42
    })))
    .await;

    let (status, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("x")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({ "code": "<p>x</p>", "style": "p{}" }));
}

#[tokio::test]
async fn test_generate_passes_markup_through_unchanged() {
    let markup = "<div onclick=\"alert(1)\">&amp;</div><script>1</script>";
    let (app, _mock) = common::test_app(WebhookReply::ok(json!({ "code": markup }))).await;

    let (_, response) =
        common::post_json(&app, "/api/backgrounds", &common::description_body("raw")).await;

    assert_eq!(response["code"], markup);
}

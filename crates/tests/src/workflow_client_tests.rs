use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use server::workflow::WorkflowClient;
use shared_types::{AppErrorKind, Description, GeneratedBackground};

use crate::common::{MockWebhook, WebhookReply};

#[tokio::test]
async fn test_client_decodes_reply() {
    let mock = MockWebhook::start(WebhookReply::ok(json!({
        "code": "<section></section>",
        "style": "section{height:100vh}"
    })))
    .await;
    let client = WorkflowClient::new(mock.url.clone());

    let description = Description::parse("full height").unwrap();
    let background = client.generate(&description).await.unwrap();

    assert_eq!(
        background,
        GeneratedBackground {
            code: Some("<section></section>".into()),
            style: Some("section{height:100vh}".into()),
        }
    );
    assert_eq!(background.stylesheet(), Some("section{height:100vh}"));
}

#[tokio::test]
async fn test_client_empty_object_decodes_to_empty_background() {
    let mock = MockWebhook::start(WebhookReply::ok(json!({}))).await;
    let client = WorkflowClient::new(mock.url.clone());

    let description = Description::parse("nothing").unwrap();
    let background = client.generate(&description).await.unwrap();

    assert_eq!(background, GeneratedBackground::default());
    assert_eq!(background.code_or_empty(), "");
    assert_eq!(background.stylesheet(), None);
}

#[tokio::test]
async fn test_client_sends_one_request_per_call() {
    let mock = MockWebhook::start(WebhookReply::ok(json!({ "code": "a" }))).await;
    let client = WorkflowClient::new(mock.url.clone());

    for text in ["first", "second"] {
        let description = Description::parse(text).unwrap();
        client.generate(&description).await.unwrap();
    }

    let bodies: Vec<_> = mock.calls().into_iter().map(|c| c.body).collect();
    assert_eq!(
        bodies,
        vec![json!({ "description": "first" }), json!({ "description": "second" })]
    );
}

#[tokio::test]
async fn test_client_non_object_reply_is_empty_background() {
    for reply in [
        json!([{ "code": "<div>x</div>", "style": "div{}" }]),
        json!(["<a>", "b{}"]),
        json!("done"),
        json!(42),
    ] {
        let mock = MockWebhook::start(WebhookReply::Json(StatusCode::OK, reply.clone())).await;
        let client = WorkflowClient::new(mock.url.clone());

        let description = Description::parse("x").unwrap();
        let background = client.generate(&description).await.unwrap();

        assert_eq!(background, GeneratedBackground::default(), "reply: {reply}");
    }
}

#[tokio::test]
async fn test_client_stringifies_non_string_fields() {
    let mock = MockWebhook::start(WebhookReply::ok(json!({ "code": 5, "style": true }))).await;
    let client = WorkflowClient::new(mock.url.clone());

    let description = Description::parse("x").unwrap();
    let background = client.generate(&description).await.unwrap();

    assert_eq!(background.code_or_empty(), "5");
    assert_eq!(background.style_or_empty(), "true");
}

#[tokio::test]
async fn test_client_null_reply_is_upstream_error() {
    let mock = MockWebhook::start(WebhookReply::Json(StatusCode::OK, serde_json::Value::Null)).await;
    let client = WorkflowClient::new(mock.url.clone());

    let description = Description::parse("x").unwrap();
    let err = client.generate(&description).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::UpstreamError);
}

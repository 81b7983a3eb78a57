use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_rate_limit_returns_429_when_exceeded() {
    // Allow only 2 requests per 60s window
    let (app, mock) = common::test_app_rate_limited(2, false).await;
    let body = common::description_body("night sky");

    let (s1, _) = common::post_json(&app, "/api/backgrounds", &body).await;
    assert_eq!(s1, StatusCode::OK, "First request should pass");

    let (s2, _) = common::post_json(&app, "/api/backgrounds", &body).await;
    assert_eq!(s2, StatusCode::OK, "Second request should pass");

    let (s3, response) = common::post_json(&app, "/api/backgrounds", &body).await;
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS, "Third request should be rate limited");
    assert_eq!(response["kind"], "RateLimited");

    assert_eq!(mock.calls().len(), 2, "Limited requests must not reach the webhook");
}

#[tokio::test]
async fn test_rate_limit_separate_clients_behind_trusted_proxy() {
    // Allow only 1 request per client
    let (app, _mock) = common::test_app_rate_limited(1, true).await;
    let body = common::description_body("night sky");

    let (s1, _) = common::post_json_from(&app, "/api/backgrounds", &body, "203.0.113.1").await;
    assert_eq!(s1, StatusCode::OK);

    let (s2, _) = common::post_json_from(&app, "/api/backgrounds", &body, "203.0.113.2").await;
    assert_eq!(s2, StatusCode::OK);

    let (s3, _) = common::post_json_from(&app, "/api/backgrounds", &body, "203.0.113.1").await;
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_rate_limit_ignores_forwarded_header_by_default() {
    let (app, mock) = common::test_app_rate_limited(1, false).await;
    let body = common::description_body("night sky");

    let (s1, _) = common::post_json_from(&app, "/api/backgrounds", &body, "203.0.113.1").await;
    assert_eq!(s1, StatusCode::OK);

    // A fresh header value does not buy a fresh window
    let (s2, _) = common::post_json_from(&app, "/api/backgrounds", &body, "203.0.113.2").await;
    assert_eq!(s2, StatusCode::TOO_MANY_REQUESTS);

    assert_eq!(mock.calls().len(), 1);
}

//! Health routes driven through `tower::ServiceExt::oneshot`.
//!
//! Tests that mutate the environment use variable names no other test reads.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use palaver_core::test_support::EnvGuard;
use palaver_extras::server::axum::{
    HealthCheck, MissingBody, default_health_checks, health_router, mock_router,
};
use serde_json::Value;
use tower::ServiceExt;

async fn get(router: axum::Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn text_check(var: &'static str) -> HealthCheck {
    HealthCheck::new(
        "deepseek",
        "/health",
        [var],
        MissingBody::Text(format!("key is not configured. Set {var} on the server.")),
    )
}

#[tokio::test]
async fn missing_secret_is_500_naming_the_variable() {
    let _env = EnvGuard::remove("PALAVER_TEST_HEALTH_TEXT_MISSING");
    let router = health_router(vec![text_check("PALAVER_TEST_HEALTH_TEXT_MISSING")]);

    let (status, headers, body) = get(router, "/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(headers["content-type"], "text/plain");
    assert!(body.contains("PALAVER_TEST_HEALTH_TEXT_MISSING"));
}

#[tokio::test]
async fn present_secret_is_204_with_empty_body() {
    let _env = EnvGuard::set("PALAVER_TEST_HEALTH_TEXT_PRESENT", "sk-live");
    let router = health_router(vec![text_check("PALAVER_TEST_HEALTH_TEXT_PRESENT")]);

    let (status, headers, body) = get(router, "/health").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(headers["cache-control"], "no-store");
    assert!(body.is_empty());
}

#[tokio::test]
async fn blank_secret_counts_as_missing() {
    let _env = EnvGuard::set("PALAVER_TEST_HEALTH_BLANK", "   ");
    let router = health_router(vec![text_check("PALAVER_TEST_HEALTH_BLANK")]);

    let (status, _, _) = get(router, "/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn json_body_and_fallback_variable() {
    let _primary = EnvGuard::remove("PALAVER_TEST_HEALTH_JSON_PRIMARY");
    let _public = EnvGuard::remove("PALAVER_TEST_HEALTH_JSON_PUBLIC");
    let check = HealthCheck::new(
        "elevenlabs",
        "/voice/health",
        [
            "PALAVER_TEST_HEALTH_JSON_PRIMARY",
            "PALAVER_TEST_HEALTH_JSON_PUBLIC",
        ],
        MissingBody::Json,
    );

    let (status, _, body) = get(health_router(vec![check.clone()]), "/voice/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Missing PALAVER_TEST_HEALTH_JSON_PRIMARY");

    let _set = EnvGuard::set("PALAVER_TEST_HEALTH_JSON_PUBLIC", "pk");
    let (status, _, _) = get(health_router(vec![check]), "/voice/health").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn key_rotation_needs_no_rebuild() {
    let router = health_router(vec![text_check("PALAVER_TEST_HEALTH_ROTATE")]);
    {
        let _env = EnvGuard::remove("PALAVER_TEST_HEALTH_ROTATE");
        let (status, _, _) = get(router.clone(), "/health").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
    let _env = EnvGuard::set("PALAVER_TEST_HEALTH_ROTATE", "new");
    let (status, _, _) = get(router, "/health").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn default_router_serves_every_vendor() {
    // The only test touching the real vendor variable names.
    let _ds = EnvGuard::remove("DEEPSEEK_API_KEY");
    let _an = EnvGuard::set("ANTHROPIC_API_KEY", "sk-ant");
    let _oa = EnvGuard::remove("OPENAI_API_KEY");
    let _el = EnvGuard::remove("ELEVENLABS_API_KEY");
    let _elp = EnvGuard::set("NEXT_PUBLIC_ELEVENLABS_API_KEY", "pub");
    let _hg = EnvGuard::remove("HEYGEN_API_KEY");
    let _or = EnvGuard::remove("OPENROUTER_API_KEY");
    let router = health_router(default_health_checks());

    let (status, _, body) = get(router.clone(), "/api/deep-seek/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("DEEPSEEK_API_KEY"));

    let (status, _, _) = get(router.clone(), "/api/anthropic/health").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, body) = get(router.clone(), "/api/open-ai/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("OPENAI_API_KEY"));

    let (status, _, _) = get(router.clone(), "/api/elevenlabs/health").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, body) = get(router.clone(), "/api/streaming/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Missing HEYGEN_API_KEY"));

    let (status, _, body) = get(router.clone(), "/api/openrouter/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("OPENROUTER_API_KEY"));

    let (status, _, _) = get(router, "/api/unknown/health").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mock_fixtures_are_stable_json() {
    let (status, headers, body) = get(mock_router(), "/api/mock/stats/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        headers["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );
    let stats: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(stats["usersOnline"], 42);
    assert_eq!(stats["sessionsToday"], 1234);

    let (_, _, body) = get(mock_router(), "/api/mock/bookmarks").await;
    let bookmarks: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(bookmarks.as_array().unwrap().len(), 2);
    assert_eq!(bookmarks[0]["id"], "t1");
    assert_eq!(bookmarks[1]["tags"][0], "design");
}

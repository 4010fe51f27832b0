use palaver_core::auth::ApiKeyProvider;
use palaver_providers::error::ChatError;
use palaver_providers::traits::{ChatProvider, SendRequest};
use palaver_providers::types::{Message, MessageSender, SendOptions};
use palaver_providers::{ChatCompletionsAdapter, ChatCompletionsConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter(server: &MockServer, id: &str, model: &str) -> ChatCompletionsAdapter {
    let config = ChatCompletionsConfig::new(id, id, server.uri(), model)
        .with_api_key(ApiKeyProvider::new().with_api_key("test-key"));
    ChatCompletionsAdapter::new(config).unwrap()
}

#[tokio::test]
async fn maps_history_and_reads_string_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"},
                {"role": "user", "content": "how are you?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "fine"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let history = vec![
        Message::new("m1", MessageSender::Client, "hi"),
        Message::new("m2", MessageSender::Avatar, "hello"),
    ];
    let msg = adapter(&server, "openai", "gpt-4o-mini")
        .send_message(SendRequest::new(&history, "how are you?"))
        .await
        .unwrap();

    assert_eq!(msg.content, "fine");
    assert_eq!(msg.sender, MessageSender::Avatar);
    assert_eq!(msg.provider.as_ref().unwrap(), "openai");
}

#[tokio::test]
async fn options_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(json!({
            "model": "openrouter/auto",
            "messages": [
                {"role": "system", "content": "reply in json"},
                {"role": "user", "content": "stats"}
            ],
            "seed": 7,
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": [
                {"type": "text", "text": "{\"ok\":"},
                {"type": "text", "text": "true}"}
            ]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = SendOptions::default()
        .json_mode(true)
        .seed(7)
        .system_prompt("reply in json");
    let msg = adapter(&server, "openrouter", "openrouter/auto")
        .send_message(SendRequest::new(&[], "stats").with_options(options))
        .await
        .unwrap();

    assert_eq!(msg.content, "{\"ok\":true}");
}

#[tokio::test]
async fn error_status_carries_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = adapter(&server, "openai", "gpt-4o-mini")
        .send_message(SendRequest::new(&[], "hi"))
        .await
        .unwrap_err();

    assert_eq!(err, ChatError::api_error(429, "rate limited"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = ChatCompletionsConfig::new("openrouter", "OpenRouter", server.uri(), "m")
        .with_api_key(ApiKeyProvider::new().with_api_key("k"));
    let err = ChatCompletionsAdapter::new(config)
        .unwrap()
        .send_message(SendRequest::new(&[], "hi"))
        .await
        .unwrap_err();

    assert_eq!(err, ChatError::api_error(500, "OpenRouter error: 500"));
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = adapter(&server, "openai", "gpt-4o-mini")
        .send_message(SendRequest::new(&[], "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, ChatError::JsonError(_)));
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ChatCompletionsConfig::new("openai", "OpenAI", server.uri(), "m")
        .with_api_key(ApiKeyProvider::from_env("PALAVER_TEST_UNSET_CHAT_KEY"));
    let err = ChatCompletionsAdapter::new(config)
        .unwrap()
        .send_message(SendRequest::new(&[], "hi"))
        .await
        .unwrap_err();

    let ChatError::MissingApiKey(var) = &err else {
        panic!("expected MissingApiKey, got {err:?}");
    };
    assert!(var.contains("PALAVER_TEST_UNSET_CHAT_KEY"));
}

#[tokio::test]
async fn torn_down_adapter_rejects_sends() {
    let server = MockServer::start().await;
    let adapter = adapter(&server, "openai", "gpt-4o-mini");
    adapter.teardown().await.unwrap();
    adapter.teardown().await.unwrap();

    let err = adapter
        .send_message(SendRequest::new(&[], "hi"))
        .await
        .unwrap_err();
    assert_eq!(err, ChatError::AdapterTornDown("openai".into()));
}

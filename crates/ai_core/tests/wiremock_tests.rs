//! Integration tests for the translation gateway using WireMock
//!
//! These tests mock the OpenAI and OpenRouter chat completions endpoints to
//! verify request shape, routing and strict decoding without network access.

use ai_core::{
    BackendKind, OpenAiConfig, OpenRouterConfig, TranslationConfig, TranslationError,
    TranslationGateway,
};
use domain::Register;
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn config_for_mock(openai_url: &str, openrouter_url: &str, openai_key: bool) -> TranslationConfig {
    TranslationConfig {
        default_provider: "openrouter".to_string(),
        openai: OpenAiConfig {
            api_key: openai_key.then(|| SecretString::from("sk-openai-test")),
            base_url: openai_url.to_string(),
            model: "gpt-3.5-turbo".to_string(),
        },
        openrouter: OpenRouterConfig {
            api_key: Some(SecretString::from("or-test")),
            base_url: openrouter_url.to_string(),
            model: "mistralai/mistral-7b-instruct:free".to_string(),
            referer: "http://localhost:3000".to_string(),
        },
        temperature: 0.4,
        max_tokens: 1000,
        timeout_ms: 5000,
    }
}

fn lesson_content() -> String {
    serde_json::json!({
        "english": "Have you ever been to Japan?",
        "japanese": [
            {"word": "日本", "reading": "にほん"},
            {"word": "に"},
            {"word": "行った", "reading": "いった"},
            {"word": "こと"},
            {"word": "が"},
            {"word": "あります"},
            {"word": "か"},
            {"word": "?"}
        ],
        "grammarBreakdown": [{
            "english": "Have you ever been to Japan?",
            "japanese": [
                {"word": "日本", "reading": "にほん"},
                {"word": "に"},
                {"word": "行った", "reading": "いった"},
                {"word": "こと"},
                {"word": "が"},
                {"word": "あります"},
                {"word": "か"},
                {"word": "?"}
            ],
            "chunks": [
                {"japanese": [{"word": "日本", "reading": "にほん"}], "meaning": "Japan", "grammar": "Noun"},
                {"japanese": [{"word": "に"}], "meaning": "to", "grammar": "Particle"},
                {"japanese": [{"word": "行った", "reading": "いった"}, {"word": "こと"}, {"word": "が"}, {"word": "あります"}], "meaning": "have been", "grammar": "Verb + たことがある"},
                {"japanese": [{"word": "か"}], "meaning": "question", "grammar": "Particle"},
                {"japanese": [{"word": "?"}], "meaning": "question", "grammar": "Punctuation"}
            ]
        }]
    })
    .to_string()
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn openrouter_receives_referer_and_bearer() {
    let openai = MockServer::start().await;
    let openrouter = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer or-test"))
        .and(header("http-referer", "http://localhost:3000"))
        .and(body_partial_json(serde_json::json!({
            "model": "mistralai/mistral-7b-instruct:free",
            "max_tokens": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&lesson_content())))
        .expect(1)
        .mount(&openrouter)
        .await;

    let gateway =
        TranslationGateway::from_config(&config_for_mock(&openai.uri(), &openrouter.uri(), false))
            .unwrap();

    let result = gateway
        .translate("Have you ever been to Japan?", Register::Formal, None)
        .await
        .unwrap();

    assert_eq!(result.japanese.len(), 8);
    assert!(result.is_consistent());
    assert_eq!(result.japanese[0].reading.as_deref(), Some("にほん"));
}

#[tokio::test]
async fn openai_hint_with_key_calls_openai() {
    let openai = MockServer::start().await;
    let openrouter = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-openai-test"))
        .and(body_partial_json(serde_json::json!({"model": "gpt-3.5-turbo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&lesson_content())))
        .expect(1)
        .mount(&openai)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&lesson_content())))
        .expect(0)
        .mount(&openrouter)
        .await;

    let gateway =
        TranslationGateway::from_config(&config_for_mock(&openai.uri(), &openrouter.uri(), true))
            .unwrap();

    assert_eq!(gateway.select(Some("openai")), BackendKind::OpenAi);
    gateway
        .translate("Have you ever been to Japan?", Register::Formal, Some("openai"))
        .await
        .unwrap();
}

#[tokio::test]
async fn prompt_is_sent_as_three_messages() {
    let openai = MockServer::start().await;
    let openrouter = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "messages": [
                {"role": "system"},
                {"role": "system"},
                {"role": "user", "content": "How to say I am a student in Japanese in casual speech?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&lesson_content())))
        .expect(1)
        .mount(&openrouter)
        .await;

    let gateway =
        TranslationGateway::from_config(&config_for_mock(&openai.uri(), &openrouter.uri(), false))
            .unwrap();

    gateway
        .translate("I am a student", Register::Casual, Some("openrouter"))
        .await
        .unwrap();
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn unauthorized_is_provider_error() {
    let openai = MockServer::start().await;
    let openrouter = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&openrouter)
        .await;

    let gateway =
        TranslationGateway::from_config(&config_for_mock(&openai.uri(), &openrouter.uri(), false))
            .unwrap();

    let err = gateway
        .translate("Hello", Register::Formal, None)
        .await
        .unwrap_err();

    match err {
        TranslationError::Provider(msg) => assert!(msg.contains("401")),
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn prose_content_is_parse_error() {
    let openai = MockServer::start().await;
    let openrouter = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("I'm sorry, I can only answer in prose today.")),
        )
        .mount(&openrouter)
        .await;

    let gateway =
        TranslationGateway::from_config(&config_for_mock(&openai.uri(), &openrouter.uri(), false))
            .unwrap();

    let err = gateway
        .translate("Hello", Register::Formal, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TranslationError::Parse(_)));
}

#[tokio::test]
async fn empty_choices_is_parse_error() {
    let openai = MockServer::start().await;
    let openrouter = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&openrouter)
        .await;

    let gateway =
        TranslationGateway::from_config(&config_for_mock(&openai.uri(), &openrouter.uri(), false))
            .unwrap();

    let err = gateway
        .translate("Hello", Register::Formal, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TranslationError::Parse(_)));
}

#[tokio::test]
async fn unreachable_server_is_provider_error() {
    let config = config_for_mock("http://127.0.0.1:1", "http://127.0.0.1:1", false);
    let gateway = TranslationGateway::from_config(&config).unwrap();

    let err = gateway
        .translate("Hello", Register::Formal, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TranslationError::Provider(_)));
}

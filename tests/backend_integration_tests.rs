use namesprout::core::config::BackendSettings;
use namesprout::core::request::{NameKind, NameRequest, NamingStyle};
use namesprout::inference::providers::{ChatCompletionsBackend, Flavor, GeminiBackend};
use namesprout::inference::registry::BackendRegistry;
use namesprout::inference::task::{WARMUP_TIMEOUT, warm_up};
use namesprout::inference::{BackendInitError, FallbackPolicy, GenerationError, NameBackend};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const GEMINI_PATH: &str = "/v1beta/models/test-model:generateContent";

fn test_request() -> NameRequest {
    NameRequest {
        description: "fetch a user record by id".to_string(),
        kind: NameKind::Function,
        count: 3,
        kind_label: "Function".to_string(),
        kind_prompt: "Start with a verb.".to_string(),
        style: NamingStyle::LowerCamel,
        style_label: "lowerCamelCase".to_string(),
        style_prompt: "Use lowerCamelCase.".to_string(),
    }
}

fn gemini(server: &MockServer, fallback: FallbackPolicy) -> GeminiBackend {
    GeminiBackend::from_settings(
        "gemini",
        &BackendSettings {
            api_key: Some("test-key".to_string()),
            endpoint: Some(server.uri()),
            model: Some("test-model".to_string()),
            fallback: Some(fallback),
            ..Default::default()
        },
    )
    .unwrap()
}

fn gemini_text(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn chat(server: &MockServer, flavor: Flavor) -> ChatCompletionsBackend {
    ChatCompletionsBackend::from_settings(
        "chat",
        flavor,
        &BackendSettings {
            api_key: (flavor == Flavor::OpenRouter).then(|| "sk-test".to_string()),
            endpoint: Some(server.uri()),
            model: Some("test-model".to_string()),
            ..Default::default()
        },
    )
    .unwrap()
}

fn chat_text(text: &str) -> serde_json::Value {
    json!({
        "choices": [{
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }]
    })
}

// ============================================================================
// Gemini Backend Tests
// ============================================================================

#[tokio::test]
async fn test_gemini_returns_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text(
            r#"{"names": ["fetchUser", "getUser", "loadUser", "readUser"]}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let names = gemini(&server, FallbackPolicy::Lines)
        .generate_names(&test_request())
        .await
        .unwrap();

    // Truncated to the requested count.
    assert_eq!(names, vec!["fetchUser", "getUser", "loadUser"]);
}

#[tokio::test]
async fn test_gemini_accepts_fenced_array() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_text("```json\n[\"fetchUser\", \"fetchUser\"]\n```")),
        )
        .mount(&server)
        .await;

    let names = gemini(&server, FallbackPolicy::Strict)
        .generate_names(&test_request())
        .await
        .unwrap();
    assert_eq!(names, vec!["fetchUser"]);
}

#[tokio::test]
async fn test_gemini_block_reason_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let result = gemini(&server, FallbackPolicy::Lines)
        .generate_names(&test_request())
        .await;
    assert_eq!(result, Err(GenerationError::Rejected("SAFETY".to_string())));
}

#[tokio::test]
async fn test_gemini_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let result = gemini(&server, FallbackPolicy::Lines)
        .generate_names(&test_request())
        .await;
    assert!(matches!(result, Err(GenerationError::Api { status: 401, .. })));
}

#[tokio::test]
async fn test_gemini_no_candidates_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let result = gemini(&server, FallbackPolicy::Lines)
        .generate_names(&test_request())
        .await;
    assert_eq!(result, Err(GenerationError::EmptyResponse));
}

#[tokio::test]
async fn test_gemini_plain_text_follows_fallback_policy() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_text("1. fetchUser\n2. loadUser")),
        )
        .mount(&server)
        .await;

    let lines = gemini(&server, FallbackPolicy::Lines)
        .generate_names(&test_request())
        .await;
    assert_eq!(lines, Ok(vec!["fetchUser".to_string(), "loadUser".to_string()]));

    let strict = gemini(&server, FallbackPolicy::Strict)
        .generate_names(&test_request())
        .await;
    assert!(matches!(strict, Err(GenerationError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_gemini_unparseable_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = gemini(&server, FallbackPolicy::Lines)
        .generate_names(&test_request())
        .await;
    assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_gemini_warmup_succeeds_without_network() {
    let registry = BackendRegistry::builtin();
    let descriptor = registry
        .construct(
            "gemini",
            &BackendSettings {
                api_key: Some("test-key".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(descriptor.model_identifier.as_deref(), Some("models/gemini-1.5-pro"));
    assert!(warm_up(&descriptor, WARMUP_TIMEOUT).await.is_ok());
}

// ============================================================================
// Chat Completions Backend Tests
// ============================================================================

#[tokio::test]
async fn test_openrouter_returns_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "stream": false,
            "response_format": { "type": "json_object" }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_text(r#"{"names": ["fetchUser", "getUser"]}"#)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let names = chat(&server, Flavor::OpenRouter)
        .generate_names(&test_request())
        .await
        .unwrap();
    assert_eq!(names, vec!["fetchUser", "getUser"]);
}

#[tokio::test]
async fn test_openrouter_refusal_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": null, "refusal": "Not allowed" },
                "finish_reason": "stop"
            }]
        })))
        .mount(&server)
        .await;

    let result = chat(&server, Flavor::OpenRouter)
        .generate_names(&test_request())
        .await;
    assert_eq!(result, Err(GenerationError::Rejected("Not allowed".to_string())));
}

#[tokio::test]
async fn test_openrouter_content_filter_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": "" },
                "finish_reason": "content_filter"
            }]
        })))
        .mount(&server)
        .await;

    let result = chat(&server, Flavor::OpenRouter)
        .generate_names(&test_request())
        .await;
    assert!(matches!(result, Err(GenerationError::Rejected(_))));
}

#[tokio::test]
async fn test_openrouter_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let result = chat(&server, Flavor::OpenRouter)
        .generate_names(&test_request())
        .await;
    assert_eq!(
        result,
        Err(GenerationError::Api {
            status: 429,
            message: "rate limited".to_string()
        })
    );
}

#[tokio::test]
async fn test_openrouter_requires_api_key() {
    // Only meaningful when the variable is not set in the test environment.
    if std::env::var("OPENROUTER_API_KEY").is_ok() {
        return;
    }
    let result = ChatCompletionsBackend::from_settings(
        "openrouter",
        Flavor::OpenRouter,
        &BackendSettings::default(),
    );
    assert!(matches!(result, Err(BackendInitError::Config { .. })));
}

#[tokio::test]
async fn test_lmstudio_line_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_text("- fetchUser\n- getUser\n- fetchUser")),
        )
        .mount(&server)
        .await;

    let names = chat(&server, Flavor::LmStudio)
        .generate_names(&test_request())
        .await
        .unwrap();
    assert_eq!(names, vec!["fetchUser", "getUser"]);
}

#[tokio::test]
async fn test_lmstudio_empty_content_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_text("   ")))
        .mount(&server)
        .await;

    let result = chat(&server, Flavor::LmStudio)
        .generate_names(&test_request())
        .await;
    assert_eq!(result, Err(GenerationError::EmptyResponse));
}

#[tokio::test]
async fn test_lmstudio_warmup_probes_models() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let descriptor = BackendRegistry::builtin()
        .construct(
            "local",
            &BackendSettings {
                backend_type: Some("lmstudio".to_string()),
                endpoint: Some(server.uri()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(descriptor.name, "local");
    assert!(descriptor.model_identifier.is_none());
    assert!(warm_up(&descriptor, WARMUP_TIMEOUT).await.is_ok());
}

#[tokio::test]
async fn test_lmstudio_warmup_failure_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let descriptor = BackendRegistry::builtin()
        .construct(
            "local",
            &BackendSettings {
                backend_type: Some("lmstudio".to_string()),
                endpoint: Some(server.uri()),
                ..Default::default()
            },
        )
        .unwrap();
    let err = warm_up(&descriptor, WARMUP_TIMEOUT).await.unwrap_err();
    assert!(matches!(err, BackendInitError::Warmup { ref backend, .. } if backend == "local"));
}

//! OpenAI-compatible chat completions backends: OpenRouter and LM Studio.
//!
//! Both speak the same `/chat/completions` wire format and differ only in
//! defaults and authentication:
//! - OpenRouter needs a bearer token (`api_key` or `OPENROUTER_API_KEY`)
//! - LM Studio runs locally, needs no key, and can report its loaded models

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::config::BackendSettings;
use crate::core::request::NameRequest;
use crate::inference::parse::{FallbackPolicy, clamp_count, parse_names};
use crate::inference::prompt::build_prompt;
use crate::inference::{BackendDescriptor, BackendInitError, GenerationError, NameBackend};

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const OPENROUTER_DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";
pub const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

// ============================================================================
// Chat Completions API Types
// ============================================================================

#[derive(Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

#[derive(Serialize, Debug)]
struct ChatMessage {
    role: Role,
    content: String,
}

#[derive(Serialize, Debug)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Serialize, Debug)]
struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

#[derive(Deserialize, Debug, Default)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: Option<ResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

const SYSTEM_PROMPT: &str = "You generate names for software. Answer with JSON only.";

/// Extracts the first choice's text, mapping refusals to `Rejected`.
fn choice_text(response: ChatResponse) -> Result<String, GenerationError> {
    let Some(choice) = response.choices.into_iter().next() else {
        return Err(GenerationError::EmptyResponse);
    };
    if choice.finish_reason.as_deref() == Some("content_filter") {
        return Err(GenerationError::Rejected("content_filter".to_string()));
    }
    let Some(message) = choice.message else {
        return Err(GenerationError::EmptyResponse);
    };
    if let Some(refusal) = message.refusal.filter(|r| !r.trim().is_empty()) {
        return Err(GenerationError::Rejected(refusal));
    }
    Ok(message.content.unwrap_or_default())
}

// ============================================================================
// Backend Implementation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    OpenRouter,
    LmStudio,
}

pub struct ChatCompletionsBackend {
    name: String,
    flavor: Flavor,
    api_key: Option<String>,
    base_url: String,
    model: Option<String>,
    temperature: Option<f32>,
    top_k: Option<f32>,
    json_mode: bool,
    fallback: FallbackPolicy,
    client: reqwest::Client,
}

impl ChatCompletionsBackend {
    pub fn from_settings(
        name: &str,
        flavor: Flavor,
        settings: &BackendSettings,
    ) -> Result<Self, BackendInitError> {
        let config_error = |message: String| BackendInitError::Config {
            backend: name.to_string(),
            message,
        };

        let (api_key, base_url, model) = match flavor {
            Flavor::OpenRouter => {
                let key = settings
                    .api_key
                    .clone()
                    .or_else(|| std::env::var("OPENROUTER_API_KEY").ok())
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| config_error("missing api_key (or OPENROUTER_API_KEY)".into()))?;
                let model = settings
                    .model
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| OPENROUTER_DEFAULT_MODEL.to_string());
                (
                    Some(key),
                    settings.endpoint.clone().unwrap_or_else(|| OPENROUTER_BASE_URL.to_string()),
                    Some(model),
                )
            }
            Flavor::LmStudio => (
                settings.api_key.clone().filter(|key| !key.trim().is_empty()),
                settings
                    .endpoint
                    .clone()
                    .or_else(|| std::env::var("LM_STUDIO_BASE_URL").ok())
                    .unwrap_or_else(|| LMSTUDIO_BASE_URL.to_string()),
                settings.model.clone().filter(|m| !m.trim().is_empty()),
            ),
        };

        if let Some(k) = settings.top_k
            && k <= 0.0
        {
            return Err(config_error("top_k must be greater than 0".into()));
        }

        let json_mode = match settings.options.get("json_mode").map(String::as_str) {
            None => flavor == Flavor::OpenRouter,
            Some("true") => true,
            Some("false") => false,
            Some(other) => {
                return Err(config_error(format!(
                    "options.json_mode must be \"true\" or \"false\", got {other:?}"
                )));
            }
        };

        Ok(Self {
            name: name.to_string(),
            flavor,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            temperature: settings.temperature,
            top_k: settings.top_k,
            json_mode,
            fallback: settings.fallback.unwrap_or_default(),
            client: reqwest::Client::new(),
        })
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Authorization", format!("Bearer {key}")),
            None => builder,
        }
    }

    /// Sends a request to the chat completions endpoint and decodes the body.
    async fn send_request(&self, request: &ChatRequest) -> Result<ChatResponse, GenerationError> {
        let json_body = serde_json::to_string(request)
            .map_err(|e| GenerationError::Transport(format!("request serialization failed: {e}")))?;
        debug!("Raw {:?} request: {}", self.flavor, json_body);

        let response = self
            .authorize(self.client.post(format!("{}/chat/completions", self.base_url)))
            .header("Content-Type", "application/json")
            .body(json_body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        debug!("{:?} response status: {}", self.flavor, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("{:?} API error: {} - {}", self.flavor, status, message);
            return Err(GenerationError::Api { status, message });
        }

        let raw = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        debug!("Raw {:?} response: {}", self.flavor, raw);
        serde_json::from_str(&raw).map_err(|e| GenerationError::MalformedResponse(e.to_string()))
    }

    /// Checks that the server answers `GET /models`.
    async fn probe(&self) -> Result<(), String> {
        let response = self
            .authorize(self.client.get(format!("{}/models", self.base_url)))
            .send()
            .await
            .map_err(|e| format!("server at {} is not reachable: {e}", self.base_url))?;
        if !response.status().is_success() {
            return Err(format!("GET /models returned HTTP {}", response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl NameBackend for ChatCompletionsBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_names(&self, request: &NameRequest) -> Result<Vec<String>, GenerationError> {
        let count = clamp_count(request.count);
        let chat_request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: build_prompt(request, count),
                },
            ],
            temperature: self.temperature,
            top_k: self.top_k,
            response_format: self.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
            stream: false,
        };

        info!(
            "{:?} chat request: model={:?}, kind={}, style={}, count={}",
            self.flavor, self.model, request.kind, request.style, count
        );

        let response = self.send_request(&chat_request).await?;
        let text = choice_text(response)?;
        parse_names(&text, count, self.fallback)
    }
}

fn describe(backend: ChatCompletionsBackend) -> BackendDescriptor {
    let model = backend.model().map(str::to_string);
    let flavor = backend.flavor;
    let backend = Arc::new(backend);
    let mut descriptor = BackendDescriptor::new(backend.clone());
    if let Some(model) = model {
        descriptor = descriptor.with_model(model);
    }
    if flavor == Flavor::LmStudio {
        descriptor = descriptor.with_warmup(Arc::new(move || -> BoxFuture<'static, Result<(), String>> {
            let backend = Arc::clone(&backend);
            Box::pin(async move { backend.probe().await })
        }));
    }
    descriptor
}

/// Registry constructor for `type = "openrouter"`.
pub fn construct_openrouter(
    name: &str,
    settings: &BackendSettings,
) -> Result<BackendDescriptor, BackendInitError> {
    ChatCompletionsBackend::from_settings(name, Flavor::OpenRouter, settings).map(describe)
}

/// Registry constructor for `type = "lmstudio"`.
pub fn construct_lmstudio(
    name: &str,
    settings: &BackendSettings,
) -> Result<BackendDescriptor, BackendInitError> {
    ChatCompletionsBackend::from_settings(name, Flavor::LmStudio, settings).map(describe)
}

//! Google Gemini backend using the Generative Language REST API.
//!
//! One `generateContent` call per generation. The HTTP client is built lazily
//! on first use (or by warmup) and reused afterwards.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::core::config::BackendSettings;
use crate::core::request::NameRequest;
use crate::inference::parse::{FallbackPolicy, clamp_count, parse_names};
use crate::inference::prompt::build_prompt;
use crate::inference::{BackendDescriptor, BackendInitError, GenerationError, NameBackend};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "models/gemini-1.5-pro";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Finish reasons that mean the model refused to answer.
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

// ============================================================================
// Gemini API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    thought: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<f32>,
    response_mime_type: &'static str,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Checks for a refusal, then joins the non-thought text parts.
fn collect_text(response: &GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
        .filter(|reason| !reason.is_empty())
    {
        return Err(GenerationError::Rejected(reason.to_string()));
    }

    let mut text = String::new();
    for candidate in &response.candidates {
        if let Some(reason) = candidate.finish_reason.as_deref()
            && BLOCKING_FINISH_REASONS.contains(&reason)
        {
            return Err(GenerationError::Rejected(reason.to_string()));
        }
        let Some(content) = &candidate.content else {
            continue;
        };
        for part in content.parts.iter().filter(|p| !p.thought) {
            if let Some(part_text) = part.text.as_deref().filter(|t| !t.is_empty()) {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(part_text);
            }
        }
    }
    Ok(text.trim().to_string())
}

/// `gemini-1.5-pro` and `models/gemini-1.5-pro` address the same model.
fn model_path(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

// ============================================================================
// Backend Implementation
// ============================================================================

pub struct GeminiBackend {
    name: String,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    top_k: Option<f32>,
    fallback: FallbackPolicy,
    client: OnceCell<reqwest::Client>,
}

impl GeminiBackend {
    pub fn from_settings(name: &str, settings: &BackendSettings) -> Result<Self, BackendInitError> {
        let config_error = |message: &str| BackendInitError::Config {
            backend: name.to_string(),
            message: message.to_string(),
        };

        let api_key = settings
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| config_error("missing api_key (or GEMINI_API_KEY)"))?;

        let top_k = match settings.top_k {
            Some(k) if k <= 0.0 => return Err(config_error("top_k must be greater than 0")),
            other => other,
        };

        Ok(Self {
            name: name.to_string(),
            api_key,
            endpoint: settings
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: settings
                .model
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: settings.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_k,
            fallback: settings.fallback.unwrap_or_default(),
            client: OnceCell::new(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the shared HTTP client, building it on first use.
    async fn client(&self) -> Result<&reqwest::Client, String> {
        self.client
            .get_or_try_init(|| async {
                debug!("Building Gemini HTTP client for '{}'", self.name);
                reqwest::Client::builder()
                    .user_agent(concat!("namesprout/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .map_err(|e| format!("failed to build HTTP client: {e}"))
            })
            .await
    }

    async fn send_request(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let client = self.client().await.map_err(GenerationError::Transport)?;
        let url = format!("{}/v1beta/{}:generateContent", self.endpoint, model_path(&self.model));

        let response = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, message);
            return Err(GenerationError::Api { status, message });
        }

        let raw = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        debug!("Raw Gemini response: {}", raw);
        serde_json::from_str(&raw).map_err(|e| GenerationError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl NameBackend for GeminiBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_names(&self, request: &NameRequest) -> Result<Vec<String>, GenerationError> {
        let count = clamp_count(request.count);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(request, count)),
                    thought: false,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_k: self.top_k,
                response_mime_type: "application/json",
            },
        };

        info!(
            "Gemini request: model={}, kind={}, style={}, count={}",
            self.model, request.kind, request.style, count
        );

        let response = self.send_request(&body).await?;
        let text = collect_text(&response)?;
        parse_names(&text, count, self.fallback)
    }
}

/// Registry constructor for `type = "gemini"`.
pub fn construct(name: &str, settings: &BackendSettings) -> Result<BackendDescriptor, BackendInitError> {
    let backend = Arc::new(GeminiBackend::from_settings(name, settings)?);
    let model = backend.model().to_string();
    let warm = Arc::clone(&backend);
    Ok(BackendDescriptor::new(backend)
        .with_model(model)
        .with_warmup(Arc::new(move || -> BoxFuture<'static, Result<(), String>> {
            let backend = Arc::clone(&warm);
            Box::pin(async move { backend.client().await.map(|_| ()) })
        })))
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::clipboard::ClipboardBackend;
use crate::core::config::{BackendSettings, DEFAULT_MAX_SUGGESTIONS, ResolvedConfig};
use crate::core::request::{NameKind, NameRequest, NamingStyle};
use crate::core::state::App;
use crate::inference::{BackendDescriptor, GenerationError, NameBackend};

/// A backend that returns a canned outcome, optionally after a delay.
pub struct FakeBackend {
    outcome: Result<Vec<String>, GenerationError>,
    delay: Option<Duration>,
}

impl FakeBackend {
    pub fn ok(names: &[&str]) -> Self {
        Self {
            outcome: Ok(names.iter().map(|s| s.to_string()).collect()),
            delay: None,
        }
    }

    pub fn err(error: GenerationError) -> Self {
        Self {
            outcome: Err(error),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl NameBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate_names(&self, _request: &NameRequest) -> Result<Vec<String>, GenerationError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

pub fn test_request() -> NameRequest {
    NameRequest {
        description: "fetch a user record by id".to_string(),
        kind: NameKind::Function,
        count: DEFAULT_MAX_SUGGESTIONS,
        kind_label: "Function".to_string(),
        kind_prompt: "Start with a verb.".to_string(),
        style: NamingStyle::LowerCamel,
        style_label: "lowerCamelCase".to_string(),
        style_prompt: "Use lowerCamelCase.".to_string(),
    }
}

/// A resolved config with a single `fake` backend selected.
pub fn test_config() -> ResolvedConfig {
    let mut backends = BTreeMap::new();
    backends.insert(
        "fake".to_string(),
        BackendSettings {
            backend_type: Some("fake".to_string()),
            ..Default::default()
        },
    );
    ResolvedConfig {
        backend: "fake".to_string(),
        backends,
        max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        default_naming_style: NamingStyle::LowerCamel,
        naming_prompt_file: None,
        clipboard: ClipboardBackend::Auto,
        source: None,
    }
}

/// Creates a test App backed by a FakeBackend.
pub fn test_app() -> App {
    let backend = BackendDescriptor::new(Arc::new(FakeBackend::ok(&["fetchUser"])))
        .with_model("fake-model");
    App::new(backend, Arc::new(test_request()))
}

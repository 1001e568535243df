use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::core::request::NameRequest;

/// Errors that can occur while generating names. All are recoverable: they are
/// shown in the UI and the user may retry.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The backend explicitly refused the request (safety block, refusal).
    Rejected(String),
    /// The backend answered with no usable text.
    EmptyResponse,
    /// The backend answered with text that could not be turned into names.
    MalformedResponse(String),
    /// The call did not finish before the deadline.
    Timeout(Duration),
    /// Network-level failure (DNS, connection refused, broken body).
    Transport(String),
    /// The API returned a non-success status.
    Api { status: u16, message: String },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Rejected(reason) => write!(f, "backend rejected the request: {reason}"),
            GenerationError::EmptyResponse => write!(f, "backend returned an empty response"),
            GenerationError::MalformedResponse(msg) => {
                write!(f, "could not read names from the response: {msg}")
            }
            GenerationError::Timeout(after) => {
                write!(f, "no response within {}s", after.as_secs())
            }
            GenerationError::Transport(msg) => write!(f, "network error: {msg}"),
            GenerationError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Result of one generation task.
pub type GenerationOutcome = Result<Vec<String>, GenerationError>;

/// Errors raised while constructing or warming up a backend. Fatal at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendInitError {
    /// No constructor is registered for this backend type.
    UnknownType {
        backend_type: String,
        known: Vec<String>,
    },
    /// No `[backends.<name>]` table exists.
    UnknownBackend(String),
    /// Backend misconfigured (missing API key, bad sampling value).
    Config { backend: String, message: String },
    /// Warmup failed.
    Warmup { backend: String, message: String },
    /// Warmup did not finish before its deadline.
    WarmupTimeout { backend: String, after: Duration },
}

impl fmt::Display for BackendInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendInitError::UnknownType {
                backend_type,
                known,
            } => write!(
                f,
                "no backend type {backend_type:?} is registered (known types: {})",
                known.join(", ")
            ),
            BackendInitError::UnknownBackend(name) => write!(f, "unknown backend {name:?}"),
            BackendInitError::Config { backend, message } => {
                write!(f, "backend {backend:?} is misconfigured: {message}")
            }
            BackendInitError::Warmup { backend, message } => {
                write!(f, "backend {backend:?} failed to start: {message}")
            }
            BackendInitError::WarmupTimeout { backend, after } => {
                write!(f, "backend {backend:?} did not start within {}s", after.as_secs())
            }
        }
    }
}

impl std::error::Error for BackendInitError {}

#[async_trait]
pub trait NameBackend: Send + Sync {
    /// Returns the configured name of the backend.
    fn name(&self) -> &str;

    /// Asks the backend for candidate names. The caller enforces the deadline.
    async fn generate_names(&self, request: &NameRequest) -> Result<Vec<String>, GenerationError>;
}

/// Optional startup check for a backend.
pub type WarmupFn = Arc<dyn Fn() -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

/// A constructed backend plus its optional capabilities.
#[derive(Clone)]
pub struct BackendDescriptor {
    pub name: String,
    pub backend: Arc<dyn NameBackend>,
    pub model_identifier: Option<String>,
    pub warmup: Option<WarmupFn>,
}

impl BackendDescriptor {
    pub fn new(backend: Arc<dyn NameBackend>) -> Self {
        Self {
            name: backend.name().to_string(),
            backend,
            model_identifier: None,
            warmup: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_identifier = Some(model.into());
        self
    }

    pub fn with_warmup(mut self, warmup: WarmupFn) -> Self {
        self.warmup = Some(warmup);
        self
    }
}

impl fmt::Debug for BackendDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("name", &self.name)
            .field("model_identifier", &self.model_identifier)
            .field("warmup", &self.warmup.is_some())
            .finish()
    }
}

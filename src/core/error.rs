//! Fatal errors that can stop namesprout before the interactive loop starts.

use std::fmt;

use crate::core::config::ConfigError;
use crate::core::prompts::PromptError;
use crate::core::request::RequestError;
use crate::inference::BackendInitError;

#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    Prompts(PromptError),
    Request(RequestError),
    Backend(BackendInitError),
    Terminal(std::io::Error),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "failed to load config: {e}"),
            StartupError::Prompts(e) => write!(f, "failed to load naming prompts: {e}"),
            StartupError::Request(e) => write!(f, "{e}"),
            StartupError::Backend(e) => write!(f, "failed to initialize backend: {e}"),
            StartupError::Terminal(e) => write!(f, "terminal error: {e}"),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        StartupError::Config(e)
    }
}

impl From<PromptError> for StartupError {
    fn from(e: PromptError) -> Self {
        StartupError::Prompts(e)
    }
}

impl From<RequestError> for StartupError {
    fn from(e: RequestError) -> Self {
        StartupError::Request(e)
    }
}

impl From<BackendInitError> for StartupError {
    fn from(e: BackendInitError) -> Self {
        StartupError::Backend(e)
    }
}

impl From<std::io::Error> for StartupError {
    fn from(e: std::io::Error) -> Self {
        StartupError::Terminal(e)
    }
}

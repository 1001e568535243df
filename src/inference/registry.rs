//! # Backend Registry
//!
//! Maps a backend `type` string from the config to the function that builds it.
//! The registry is an ordinary value built once in `main`; nothing is global.
//!
//! `BackendPool` sits on top and hands out one instance per configured backend
//! name, constructing it on first request.

use std::collections::{BTreeMap, HashMap};

use log::{debug, info};

use super::provider::{BackendDescriptor, BackendInitError};
use super::providers::{chat_completions, gemini};
use crate::core::config::{BackendSettings, ResolvedConfig};

/// Builds a backend from its table name and settings.
pub type BackendConstructor =
    fn(&str, &BackendSettings) -> Result<BackendDescriptor, BackendInitError>;

struct Registration {
    display_name: &'static str,
    construct: BackendConstructor,
}

#[derive(Default)]
pub struct BackendRegistry {
    entries: BTreeMap<String, Registration>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every backend shipped in this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("gemini", "Google Gemini", gemini::construct);
        registry.register("openrouter", "OpenRouter", chat_completions::construct_openrouter);
        registry.register("lmstudio", "LM Studio", chat_completions::construct_lmstudio);
        registry
    }

    /// Registers `construct` under `backend_type`, replacing any earlier entry.
    pub fn register(
        &mut self,
        backend_type: &str,
        display_name: &'static str,
        construct: BackendConstructor,
    ) {
        let key = backend_type.trim().to_lowercase();
        debug!("Registering backend type '{}'", key);
        self.entries.insert(
            key,
            Registration {
                display_name,
                construct,
            },
        );
    }

    /// Builds the backend named `name`. The type comes from `settings.backend_type`,
    /// falling back to `name`.
    pub fn construct(
        &self,
        name: &str,
        settings: &BackendSettings,
    ) -> Result<BackendDescriptor, BackendInitError> {
        let backend_type = settings
            .backend_type
            .as_deref()
            .unwrap_or(name)
            .trim()
            .to_lowercase();
        let entry = self
            .entries
            .get(&backend_type)
            .ok_or_else(|| BackendInitError::UnknownType {
                backend_type: backend_type.clone(),
                known: self.types().into_iter().map(str::to_string).collect(),
            })?;
        info!("Constructing backend '{}' ({})", name, entry.display_name);
        let mut descriptor = (entry.construct)(name, settings)?;
        descriptor.name = name.to_string();
        Ok(descriptor)
    }

    /// Registered type strings, sorted.
    pub fn types(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn display_name(&self, backend_type: &str) -> Option<&'static str> {
        self.entries
            .get(&backend_type.trim().to_lowercase())
            .map(|entry| entry.display_name)
    }
}

/// Lazily constructed, memoized backends keyed by configured name.
pub struct BackendPool<'a> {
    registry: &'a BackendRegistry,
    config: &'a ResolvedConfig,
    instances: HashMap<String, BackendDescriptor>,
}

impl<'a> BackendPool<'a> {
    pub fn new(registry: &'a BackendRegistry, config: &'a ResolvedConfig) -> Self {
        Self {
            registry,
            config,
            instances: HashMap::new(),
        }
    }

    /// Returns the backend named `name`, constructing it on first use.
    pub fn get(&mut self, name: &str) -> Result<BackendDescriptor, BackendInitError> {
        if let Some(descriptor) = self.instances.get(name) {
            return Ok(descriptor.clone());
        }
        let settings = self
            .config
            .backend_settings(name)
            .ok_or_else(|| BackendInitError::UnknownBackend(name.to_string()))?;
        let descriptor = self.registry.construct(name, settings)?;
        self.instances.insert(name.to_string(), descriptor.clone());
        Ok(descriptor)
    }

    /// The backend selected for this run.
    pub fn selected(&mut self) -> Result<BackendDescriptor, BackendInitError> {
        let name = self.config.backend.clone();
        self.get(&name)
    }
}

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! The config file is looked up in this order: `--config`, `./config.toml`,
//! next to the executable, then `~/.namesprout/config.toml`. If none exists, a
//! commented-out template is generated in the home location so users can
//! discover all options, and startup stops with a pointer to it.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::clipboard::ClipboardBackend;
use crate::core::request::NamingStyle;
use crate::inference::FallbackPolicy;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SproutConfig {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub backends: BTreeMap<String, BackendSettings>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub default_backend: Option<String>,
    pub max_suggestions: Option<usize>,
    pub default_naming_style: Option<String>,
    pub naming_prompt_file: Option<String>,
    pub clipboard: Option<ClipboardBackend>,
}

/// Per-backend settings. `type` selects the constructor in the backend
/// registry and defaults to the table key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(rename = "type")]
    pub backend_type: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub temperature: Option<f32>,
    pub top_k: Option<f32>,
    pub fallback: Option<FallbackPolicy>,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;
pub const DEFAULT_NAMING_STYLE: NamingStyle = NamingStyle::LowerCamel;
pub const CONFIG_FILE_NAME: &str = "config.toml";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Name of the backend table to use for this run.
    pub backend: String,
    /// Every configured backend, with `backend_type` filled in.
    pub backends: BTreeMap<String, BackendSettings>,
    pub max_suggestions: usize,
    pub default_naming_style: NamingStyle,
    /// Absolute (or config-relative resolved) prompt file; `None` = built-in set.
    pub naming_prompt_file: Option<PathBuf>,
    pub clipboard: ClipboardBackend,
    pub source: Option<PathBuf>,
}

impl ResolvedConfig {
    pub fn backend_settings(&self, name: &str) -> Option<&BackendSettings> {
        self.backends.get(name)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    NotFound(PathBuf),
    MissingDefaultBackend,
    UnknownBackend(String),
    InvalidNamingStyle(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "config I/O error ({}): {e}", path.display()),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::NotFound(path) => write!(
                f,
                "no config file found; fill in the template at {}",
                path.display()
            ),
            ConfigError::MissingDefaultBackend => {
                write!(f, "config is missing app.default_backend")
            }
            ConfigError::UnknownBackend(name) => {
                write!(f, "backend {name:?} has no [backends.{name}] table")
            }
            ConfigError::InvalidNamingStyle(raw) => {
                write!(f, "app.default_naming_style is invalid: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.namesprout/config.toml`.
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".namesprout").join(CONFIG_FILE_NAME))
}

/// Finds the config file to load.
///
/// An explicit path is returned as-is (a missing file surfaces later as
/// `ConfigError::Io`). Otherwise the working directory, the executable's
/// directory and the home location are tried in order.
pub fn locate_config(cli_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = cli_path {
        return Ok(path.to_path_buf());
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(local);
    }

    if let Some(candidate) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        && candidate.is_file()
    {
        return Ok(candidate);
    }

    let Some(home) = home_config_path() else {
        warn!("Could not determine home directory");
        return Err(ConfigError::NotFound(local));
    };
    if home.is_file() {
        return Ok(home);
    }

    info!("No config file found, generating template at {}", home.display());
    generate_default_config(&home);
    Err(ConfigError::NotFound(home))
}

/// Load and parse the config file at `path`.
pub fn load_config(path: &Path) -> Result<SproutConfig, ConfigError> {
    let contents =
        fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let config: SproutConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config backends: {:?}", config.backends.keys().collect::<Vec<_>>());
    Ok(config)
}

/// Generates a commented-out template config at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# namesprout configuration
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

[app]
# Backend table used when --backend / NAMESPROUT_BACKEND are not set.
default_backend = "gemini"
# max_suggestions = 5
# default_naming_style = "lower_camel"   # lower_camel, pascal_case, snake_case, kebab_case
# naming_prompt_file = "prompts/naming.toml"   # relative to this file; built-in set if unset
# clipboard = "auto"                     # "auto", "system" or "osc52"

[backends.gemini]
type = "gemini"
# api_key = "..."                        # Or set GEMINI_API_KEY
# model = "models/gemini-1.5-pro"
# temperature = 0.7
# top_k = 40
# fallback = "lines"                     # "lines" or "strict" for non-JSON replies

# [backends.openrouter]
# type = "openrouter"
# api_key = "sk-or-..."                  # Or set OPENROUTER_API_KEY
# model = "google/gemini-2.0-flash-001"

# [backends.local]
# type = "lmstudio"
# endpoint = "http://localhost:1234/v1"
# model = "qwen2.5-7b-instruct"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `source` is the file the config was read from; relative prompt paths are
/// resolved against its directory.
pub fn resolve(
    config: &SproutConfig,
    source: Option<&Path>,
    cli_backend: Option<&str>,
) -> Result<ResolvedConfig, ConfigError> {
    // Backend: CLI → env → config
    let backend = cli_backend
        .map(|s| s.to_string())
        .or_else(|| std::env::var("NAMESPROUT_BACKEND").ok())
        .or_else(|| config.app.default_backend.clone())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::MissingDefaultBackend)?;

    let backends: BTreeMap<String, BackendSettings> = config
        .backends
        .iter()
        .map(|(name, settings)| {
            let mut settings = settings.clone();
            if settings.backend_type.as_deref().is_none_or(|t| t.trim().is_empty()) {
                settings.backend_type = Some(name.clone());
            }
            (name.clone(), settings)
        })
        .collect();

    if !backends.contains_key(&backend) {
        return Err(ConfigError::UnknownBackend(backend));
    }

    let default_naming_style = match config.app.default_naming_style.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_NAMING_STYLE,
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidNamingStyle(raw.to_string()))?,
    };

    let naming_prompt_file = config
        .app
        .naming_prompt_file
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|file| resolve_relative(file, source));

    Ok(ResolvedConfig {
        backend,
        backends,
        max_suggestions: config
            .app
            .max_suggestions
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_SUGGESTIONS),
        default_naming_style,
        naming_prompt_file,
        clipboard: config.app.clipboard.unwrap_or_default(),
        source: source.map(Path::to_path_buf),
    })
}

/// Resolves `file` against the directory of `source` unless it is absolute.
fn resolve_relative(file: &str, source: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match source.and_then(Path::parent) {
        Some(dir) => dir.join(path),
        None => path,
    }
}

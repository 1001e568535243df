//! # Name Requests
//!
//! The immutable description of one naming job: what is being named, how many
//! candidates to ask for, and which formatting convention to follow.
//!
//! A `NameRequest` is built once at startup from CLI flags, the resolved config
//! and the prompt definitions, then shared (`Arc`) with every generation task.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::config::ResolvedConfig;
use crate::core::prompts::NamingPrompts;

/// The semantic category of the name being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameKind {
    Function,
    Variable,
    Project,
}

impl NameKind {
    pub const ALL: [NameKind; 3] = [NameKind::Function, NameKind::Variable, NameKind::Project];

    pub fn as_str(self) -> &'static str {
        match self {
            NameKind::Function => "function",
            NameKind::Variable => "variable",
            NameKind::Project => "project",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NameKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unsupported name kind: {s}"))
    }
}

/// Formatting convention requested for generated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingStyle {
    #[serde(rename = "lower_camel")]
    LowerCamel,
    #[serde(rename = "pascal_case")]
    Pascal,
    #[serde(rename = "snake_case")]
    Snake,
    #[serde(rename = "kebab_case")]
    Kebab,
}

impl NamingStyle {
    pub const ALL: [NamingStyle; 4] = [
        NamingStyle::LowerCamel,
        NamingStyle::Pascal,
        NamingStyle::Snake,
        NamingStyle::Kebab,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NamingStyle::LowerCamel => "lower_camel",
            NamingStyle::Pascal => "pascal_case",
            NamingStyle::Snake => "snake_case",
            NamingStyle::Kebab => "kebab_case",
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamingStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unsupported naming style: {s}"))
    }
}

/// Everything a backend needs to produce a batch of names.
#[derive(Debug, Clone, PartialEq)]
pub struct NameRequest {
    pub description: String,
    pub kind: NameKind,
    pub count: usize,
    pub kind_label: String,
    pub kind_prompt: String,
    pub style: NamingStyle,
    pub style_label: String,
    pub style_prompt: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, PartialEq)]
pub enum RequestError {
    EmptyDescription,
    UnsupportedStyle(String),
    MissingStyleDefinition(NamingStyle),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::EmptyDescription => write!(
                f,
                "a description is required, e.g. namesprout -f \"parse a config file\""
            ),
            RequestError::UnsupportedStyle(raw) => write!(f, "unsupported naming style: {raw}"),
            RequestError::MissingStyleDefinition(style) => {
                write!(f, "prompt definitions have no entry for naming style {style}")
            }
        }
    }
}

impl std::error::Error for RequestError {}

// ============================================================================
// Building
// ============================================================================

/// Builds the request for this run.
///
/// Style resolution order: `--style` (alias lookup) → the kind's default style
/// → the configured default style.
pub fn build_request(
    config: &ResolvedConfig,
    prompts: &NamingPrompts,
    kind: NameKind,
    style_flag: Option<&str>,
    description: &str,
) -> Result<NameRequest, RequestError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(RequestError::EmptyDescription);
    }

    let kind_definition = prompts.kind(kind);

    let (style, definition) = match style_flag.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => prompts
            .lookup(raw)
            .ok_or_else(|| RequestError::UnsupportedStyle(raw.to_string()))?,
        None => {
            let style = kind_definition
                .and_then(|def| def.default_style)
                .unwrap_or(config.default_naming_style);
            let definition = prompts
                .style(style)
                .ok_or(RequestError::MissingStyleDefinition(style))?;
            (style, definition)
        }
    };

    let style_label = non_blank(&definition.label).unwrap_or(style.as_str()).to_string();
    let kind_label = kind_definition
        .and_then(|def| non_blank(&def.label))
        .unwrap_or(kind.as_str())
        .to_string();

    debug!("Resolved request: kind={kind}, style={style}, count={}", config.max_suggestions);

    Ok(NameRequest {
        description: description.to_string(),
        kind,
        count: config.max_suggestions,
        kind_label,
        kind_prompt: kind_definition
            .map(|def| def.prompt.trim().to_string())
            .unwrap_or_default(),
        style,
        style_label,
        style_prompt: definition.prompt.trim().to_string(),
    })
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

//! # Naming Prompts
//!
//! Prompt definitions keyed by naming style and by name kind, loaded from a
//! TOML file:
//!
//! ```toml
//! [styles.lower_camel]
//! label = "lowerCamelCase"
//! prompt = "..."
//! aliases = ["camel", "camelCase"]
//!
//! [kinds.project]
//! label = "Project"
//! prompt = "..."
//! default_style = "kebab_case"
//! ```
//!
//! Styles are reachable from the command line by identifier, label or any
//! alias. Lookup is forgiving: case and punctuation are ignored, so
//! `--style camel-case` and `--style CamelCase` both hit an alias `camelCase`.

use log::{debug, info};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::request::{NameKind, NamingStyle};

/// Prompt set compiled into the binary, used when no file is configured.
const BUILTIN_PROMPTS: &str = include_str!("../../prompts/naming.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct StyleDefinition {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct KindDefinition {
    pub label: String,
    pub prompt: String,
    pub default_style: Option<NamingStyle>,
}

#[derive(Debug, Deserialize)]
struct RawKindDefinition {
    #[serde(default)]
    label: String,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    default_style: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PromptFile {
    #[serde(default)]
    styles: BTreeMap<String, StyleDefinition>,
    #[serde(default)]
    kinds: BTreeMap<String, RawKindDefinition>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum PromptError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    NoStyles,
    UnknownStyle(String),
    UnknownKind(String),
    EmptyPrompt { section: &'static str, key: String },
    InvalidDefaultStyle { kind: String, style: String },
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Io(path, e) => {
                write!(f, "cannot read prompt definitions {}: {e}", path.display())
            }
            PromptError::Parse(e) => write!(f, "prompt definitions parse error: {e}"),
            PromptError::NoStyles => write!(f, "prompt definitions contain no naming styles"),
            PromptError::UnknownStyle(key) => write!(f, "unsupported naming style {key:?}"),
            PromptError::UnknownKind(key) => write!(f, "unsupported name kind {key:?}"),
            PromptError::EmptyPrompt { section, key } => {
                write!(f, "{section} {key:?} has an empty prompt")
            }
            PromptError::InvalidDefaultStyle { kind, style } => {
                write!(f, "name kind {kind:?} has an invalid default_style {style:?}")
            }
        }
    }
}

impl std::error::Error for PromptError {}

// ============================================================================
// Library
// ============================================================================

#[derive(Debug)]
pub struct NamingPrompts {
    styles: HashMap<NamingStyle, StyleDefinition>,
    aliases: HashMap<String, NamingStyle>,
    kinds: HashMap<NameKind, KindDefinition>,
}

impl NamingPrompts {
    pub fn style(&self, style: NamingStyle) -> Option<&StyleDefinition> {
        self.styles.get(&style)
    }

    pub fn kind(&self, kind: NameKind) -> Option<&KindDefinition> {
        self.kinds.get(&kind)
    }

    /// Finds a style by identifier, label or alias.
    pub fn lookup(&self, raw: &str) -> Option<(NamingStyle, &StyleDefinition)> {
        let style = *self.aliases.get(&normalize_alias(raw))?;
        self.styles.get(&style).map(|def| (style, def))
    }

    fn add_alias(&mut self, style: NamingStyle, alias: &str) {
        let normalized = normalize_alias(alias);
        if !normalized.is_empty() {
            self.aliases.insert(normalized, style);
        }
    }
}

/// Loads prompt definitions from `path`, or the built-in set when `None`.
pub fn load_naming_prompts(path: Option<&Path>) -> Result<NamingPrompts, PromptError> {
    let Some(path) = path else {
        debug!("Using built-in naming prompts");
        return parse_naming_prompts(BUILTIN_PROMPTS);
    };

    let contents =
        fs::read_to_string(path).map_err(|e| PromptError::Io(path.to_path_buf(), e))?;
    let prompts = parse_naming_prompts(&contents)?;
    info!(
        "Loaded {} naming styles and {} kinds from {}",
        prompts.styles.len(),
        prompts.kinds.len(),
        path.display()
    );
    Ok(prompts)
}

/// Parses and validates a prompt definition document.
pub fn parse_naming_prompts(contents: &str) -> Result<NamingPrompts, PromptError> {
    let file: PromptFile = toml::from_str(contents).map_err(PromptError::Parse)?;

    if file.styles.is_empty() {
        return Err(PromptError::NoStyles);
    }

    let mut prompts = NamingPrompts {
        styles: HashMap::new(),
        aliases: HashMap::new(),
        kinds: HashMap::new(),
    };

    for (key, definition) in file.styles {
        let style: NamingStyle = key
            .parse()
            .map_err(|_| PromptError::UnknownStyle(key.clone()))?;
        if definition.prompt.trim().is_empty() {
            return Err(PromptError::EmptyPrompt { section: "naming style", key });
        }

        prompts.add_alias(style, style.as_str());
        prompts.add_alias(style, &definition.label);
        for alias in &definition.aliases {
            prompts.add_alias(style, alias);
        }
        prompts.styles.insert(style, definition);
    }

    for (key, raw) in file.kinds {
        let kind: NameKind = key
            .parse()
            .map_err(|_| PromptError::UnknownKind(key.clone()))?;
        if raw.prompt.trim().is_empty() {
            return Err(PromptError::EmptyPrompt { section: "name kind", key });
        }
        let default_style = match raw.default_style.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(style) => Some(style.parse().map_err(|_| PromptError::InvalidDefaultStyle {
                kind: key.clone(),
                style: style.to_string(),
            })?),
        };
        prompts.kinds.insert(
            kind,
            KindDefinition {
                label: raw.label,
                prompt: raw.prompt,
                default_style,
            },
        );
    }

    Ok(prompts)
}

/// Lowercases and keeps only letters and digits.
pub fn normalize_alias(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_prompts_cover_every_style_and_kind() {
        let prompts = load_naming_prompts(None).unwrap();
        for style in NamingStyle::ALL {
            assert!(prompts.style(style).is_some(), "missing style {style}");
        }
        for kind in NameKind::ALL {
            assert!(prompts.kind(kind).is_some(), "missing kind {kind}");
        }
    }

    #[test]
    fn test_lookup_by_identifier_label_and_alias() {
        let prompts = parse_naming_prompts(
            r#"
[styles.pascal_case]
label = "PascalCase"
prompt = "Capitalize every word."
aliases = ["upper camel", "大驼峰"]
"#,
        )
        .unwrap();

        for raw in ["pascal_case", "PascalCase", "pascal-case", "Upper Camel", "大驼峰"] {
            let (style, def) = prompts.lookup(raw).unwrap_or_else(|| panic!("no match for {raw}"));
            assert_eq!(style, NamingStyle::Pascal);
            assert_eq!(def.label, "PascalCase");
        }
        assert!(prompts.lookup("snake").is_none());
        assert!(prompts.lookup("   ").is_none());
    }

    #[test]
    fn test_normalize_alias() {
        assert_eq!(normalize_alias("  Kebab-Case "), "kebabcase");
        assert_eq!(normalize_alias("snake_case"), "snakecase");
        assert_eq!(normalize_alias("--"), "");
    }

    #[test]
    fn test_empty_style_prompt_is_rejected() {
        let err = parse_naming_prompts(
            r#"
[styles.snake_case]
label = "snake_case"
prompt = "   "
"#,
        )
        .unwrap_err();
        assert!(matches!(err, PromptError::EmptyPrompt { section: "naming style", .. }));
    }

    #[test]
    fn test_empty_kind_prompt_is_rejected() {
        let err = parse_naming_prompts(
            r#"
[styles.snake_case]
prompt = "Use snake_case."

[kinds.variable]
label = "Variable"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, PromptError::EmptyPrompt { section: "name kind", .. }));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = parse_naming_prompts("[styles.title_case]\nprompt = \"x\"\n").unwrap_err();
        assert!(matches!(err, PromptError::UnknownStyle(ref k) if k == "title_case"));

        let err = parse_naming_prompts(
            "[styles.snake_case]\nprompt = \"x\"\n[kinds.class]\nprompt = \"y\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, PromptError::UnknownKind(ref k) if k == "class"));
    }

    #[test]
    fn test_invalid_default_style_is_rejected() {
        let err = parse_naming_prompts(
            "[styles.snake_case]\nprompt = \"x\"\n[kinds.function]\nprompt = \"y\"\ndefault_style = \"camel\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, PromptError::InvalidDefaultStyle { .. }));
    }

    #[test]
    fn test_no_styles_is_rejected() {
        let err = parse_naming_prompts("[kinds.function]\nprompt = \"y\"\n").unwrap_err();
        assert!(matches!(err, PromptError::NoStyles));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_naming_prompts(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}

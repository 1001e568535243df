//! Turning raw model text into a list of names.
//!
//! Models are asked for `{"names": [...]}`. A bare JSON array is accepted too.
//! Anything else is handled by the backend's [`FallbackPolicy`].

use log::debug;
use serde::{Deserialize, Serialize};

use super::provider::GenerationError;
use crate::core::state::sanitize_names;

/// Default and upper bound for the number of names requested per call.
pub const DEFAULT_NAME_COUNT: usize = 5;
pub const MAX_NAME_COUNT: usize = 12;

/// What to do with a response that is not JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Read one name per line, stripping list markers.
    #[default]
    Lines,
    /// Report `MalformedResponse`.
    Strict,
}

#[derive(Deserialize)]
struct NamesEnvelope {
    names: Vec<String>,
}

/// Clamps a requested count into `1..=MAX_NAME_COUNT`, treating 0 as the default.
pub fn clamp_count(count: usize) -> usize {
    match count {
        0 => DEFAULT_NAME_COUNT,
        n => n.min(MAX_NAME_COUNT),
    }
}

/// Parses `raw` into at most `count` distinct names.
pub fn parse_names(
    raw: &str,
    count: usize,
    policy: FallbackPolicy,
) -> Result<Vec<String>, GenerationError> {
    let text = strip_code_fence(raw.trim());
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let parsed = if text.starts_with('[') {
        serde_json::from_str::<Vec<String>>(text)
    } else {
        serde_json::from_str::<NamesEnvelope>(text).map(|envelope| envelope.names)
    };

    match parsed {
        Ok(names) => {
            let mut names = sanitize_names(names);
            if names.is_empty() {
                return Err(GenerationError::EmptyResponse);
            }
            names.truncate(count);
            Ok(names)
        }
        Err(e) => match policy {
            FallbackPolicy::Strict => Err(GenerationError::MalformedResponse(e.to_string())),
            FallbackPolicy::Lines => {
                debug!("Response is not JSON ({}), splitting lines", e);
                let names = fallback_names(text, count);
                if names.is_empty() {
                    Err(GenerationError::MalformedResponse(e.to_string()))
                } else {
                    Ok(names)
                }
            }
        },
    }
}

/// One name per line, with bullets and numbering removed.
fn fallback_names(text: &str, count: usize) -> Vec<String> {
    let lines = text.lines().map(|line| {
        strip_list_marker(line.trim()).trim_matches(|c| matches!(c, '"' | '\'' | '`' | ','))
    });
    let mut names = sanitize_names(lines);
    names.truncate(count);
    names
}

/// Removes a leading `-`/`*` bullet or `1.`/`2)` numbering. Digits not
/// followed by `.` or `)` are part of the name.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim_start_matches(|c: char| matches!(c, '-' | '*') || c.is_whitespace());
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0
        && let Some(rest) = line[digits..]
            .strip_prefix('.')
            .or_else(|| line[digits..].strip_prefix(')'))
    {
        return rest.trim_start();
    }
    line
}

/// Removes a surrounding Markdown code fence (```json ... ```), if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line.
    match body.find('\n') {
        Some(pos) => body[pos + 1..].trim(),
        None => body.trim(),
    }
}

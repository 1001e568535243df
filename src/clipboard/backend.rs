//! Clipboard backend selection and error types

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{osc52, system};

/// Which clipboard mechanism to use (`[app].clipboard` in the config).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    /// System clipboard, falling back to OSC 52.
    #[default]
    Auto,
    System,
    Osc52,
}

pub type ClipboardResult = Result<(), ClipboardError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// System clipboard is not available (headless, no display server)
    SystemUnavailable,
    /// Error writing to clipboard
    WriteError,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::SystemUnavailable => write!(f, "system clipboard is unavailable"),
            ClipboardError::WriteError => write!(f, "could not write to the clipboard"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Copy text to clipboard using the specified backend
///
/// - `System`: only the OS clipboard API (via arboard)
/// - `Osc52`: only the OSC 52 escape sequence
/// - `Auto`: system clipboard first, OSC 52 if that fails
pub fn copy_to_clipboard(text: &str, backend: ClipboardBackend) -> ClipboardResult {
    match backend {
        ClipboardBackend::System => system::copy(text),
        ClipboardBackend::Osc52 => osc52::copy(text),
        ClipboardBackend::Auto => system::copy(text).or_else(|e| {
            log::debug!("System clipboard failed ({}), using OSC 52", e);
            osc52::copy(text)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        clipboard: ClipboardBackend,
    }

    #[test]
    fn test_backend_parses_lowercase() {
        for (raw, expected) in [
            ("auto", ClipboardBackend::Auto),
            ("system", ClipboardBackend::System),
            ("osc52", ClipboardBackend::Osc52),
        ] {
            let parsed: Wrapper = toml::from_str(&format!("clipboard = \"{raw}\"")).unwrap();
            assert_eq!(parsed.clipboard, expected);
        }
        assert!(toml::from_str::<Wrapper>("clipboard = \"xclip\"").is_err());
    }

    #[test]
    fn test_osc52_backend_succeeds() {
        assert!(copy_to_clipboard("fetchUser", ClipboardBackend::Osc52).is_ok());
    }

    #[test]
    fn test_auto_backend_falls_back() {
        // Succeeds with or without a display server.
        assert!(copy_to_clipboard("fetchUser", ClipboardBackend::Auto).is_ok());
    }

    #[test]
    fn test_system_backend_result() {
        let result = copy_to_clipboard("fetchUser", ClipboardBackend::System);
        assert!(
            result.is_ok()
                || matches!(
                    result,
                    Err(ClipboardError::SystemUnavailable | ClipboardError::WriteError)
                )
        );
    }
}

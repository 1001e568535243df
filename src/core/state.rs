//! # Application State
//!
//! Core business state for namesprout. Domain logic only, no TUI types.
//!
//! ```text
//! App
//! ├── backend: BackendDescriptor      // name, model, Arc<dyn NameBackend>
//! ├── request: Arc<NameRequest>       // built once, never mutated
//! ├── generation: u64                 // id of the latest issued task
//! └── selection: SelectionState
//!     ├── suggestions: Vec<String>
//!     ├── cursor: usize               // valid whenever suggestions is non-empty
//!     ├── phase: Phase                // Loading | Ready | Failed
//!     ├── status_message: String
//!     ├── last_error: Option<UiError>
//!     └── details_visible: bool
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::clipboard::ClipboardError;
use crate::core::request::NameRequest;
use crate::inference::{BackendDescriptor, GenerationError};

/// Longest suggestion (in chars) that is shown to the user.
pub const MAX_NAME_CHARS: usize = 64;

pub const STATUS_WAITING: &str = "Waiting for the model to respond...";
pub const STATUS_FAILED: &str = "Generation failed. Check the configuration or press R to retry.";
pub const STATUS_NO_CANDIDATES: &str = "No candidates returned.";

/// Coarse lifecycle of the current generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed,
}

/// A recoverable error shown inline.
#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    Generation(GenerationError),
    Clipboard(ClipboardError),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::Generation(e) => write!(f, "{e}"),
            UiError::Clipboard(e) => write!(f, "copy failed: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub suggestions: Vec<String>,
    pub cursor: usize,
    pub phase: Phase,
    pub status_message: String,
    pub last_error: Option<UiError>,
    pub details_visible: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            suggestions: Vec::new(),
            cursor: 0,
            phase: Phase::Loading,
            status_message: STATUS_WAITING.to_string(),
            last_error: None,
            details_visible: false,
        }
    }
}

impl SelectionState {
    /// The suggestion under the cursor, if the list is showing.
    pub fn selected(&self) -> Option<&str> {
        if self.phase != Phase::Ready {
            return None;
        }
        self.suggestions.get(self.cursor).map(String::as_str)
    }

    /// Moves the cursor by `delta`, wrapping at both ends.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.suggestions.len();
        if self.phase != Phase::Ready || len == 0 {
            return;
        }
        let len = len as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }
}

pub struct App {
    pub backend: BackendDescriptor,
    pub request: Arc<NameRequest>,
    /// Id of the most recently issued generation task. Outcomes carrying any
    /// other id are stale.
    pub generation: u64,
    pub selection: SelectionState,
}

impl App {
    pub fn new(backend: BackendDescriptor, request: Arc<NameRequest>) -> Self {
        Self {
            backend,
            request,
            generation: 0,
            selection: SelectionState::default(),
        }
    }

    pub fn backend_name(&self) -> &str {
        &self.backend.name
    }

    pub fn model_name(&self) -> Option<&str> {
        self.backend.model_identifier.as_deref()
    }
}

/// Trims, drops empty or overlong entries, and removes duplicates while
/// keeping first-seen order.
pub fn sanitize_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref().trim();
            if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
                return None;
            }
            seen.insert(name.to_string()).then(|| name.to_string())
        })
        .collect()
}

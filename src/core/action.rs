//! # Actions
//!
//! Everything that can happen in namesprout becomes an `Action`.
//! User presses Down? That's `Action::CursorDown`.
//! The backend answers? That's `Action::GenerationFinished { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an `Effect` describing the I/O the event loop should perform next.
//! No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Phases
//!
//! ```text
//!            init / Retry
//!     ┌────────────────────────┐
//!     ▼                        │
//!  Loading ──Ok(names)──▶ Ready ┤
//!     │                        │
//!     └────Err(e)─────▶ Failed ┘
//! ```
//!
//! While `Loading`, only `Quit`, `ToggleDetails` and outcomes of the current
//! task are accepted. Outcomes tagged with an older generation are dropped.

use log::{debug, info, warn};

use crate::clipboard::ClipboardError;
use crate::core::state::{
    App, Phase, STATUS_FAILED, STATUS_NO_CANDIDATES, STATUS_WAITING, UiError, sanitize_names,
};
use crate::inference::GenerationOutcome;

#[derive(Debug)]
pub enum Action {
    Quit,
    Retry,
    CursorUp,
    CursorDown,
    Copy,
    ToggleDetails,
    /// A generation task finished. `generation` identifies the task.
    GenerationFinished {
        generation: u64,
        outcome: GenerationOutcome,
    },
    /// The event loop performed a clipboard write; carries the copied text.
    CopyFinished(Result<String, ClipboardError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    SpawnGeneration { generation: u64 },
    CopyToClipboard(String),
}

/// Enters `Loading` for the first time and asks for the initial task.
pub fn init(app: &mut App) -> Effect {
    begin_generation(app)
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => {
            info!("Quit requested");
            Effect::Quit
        }
        Action::ToggleDetails => {
            app.selection.details_visible = !app.selection.details_visible;
            Effect::None
        }
        Action::GenerationFinished {
            generation,
            outcome,
        } => {
            if generation != app.generation {
                debug!(
                    "Discarding stale outcome from generation {} (current {})",
                    generation, app.generation
                );
                return Effect::None;
            }
            if app.selection.phase != Phase::Loading {
                warn!("Outcome for generation {} arrived twice", generation);
                return Effect::None;
            }
            apply_outcome(app, outcome);
            Effect::None
        }
        Action::CopyFinished(result) => {
            match result {
                Ok(text) => {
                    info!("Copied suggestion to clipboard");
                    app.selection.last_error = None;
                    app.selection.status_message = format!("Copied: {text}");
                }
                Err(e) => {
                    warn!("Clipboard write failed: {}", e);
                    app.selection.last_error = Some(UiError::Clipboard(e));
                }
            }
            Effect::None
        }
        action if app.selection.phase == Phase::Loading => {
            debug!("Ignoring {:?} while loading", action);
            Effect::None
        }
        Action::Retry => {
            info!("Retry requested from {:?}", app.selection.phase);
            begin_generation(app)
        }
        Action::CursorUp => {
            app.selection.move_cursor(-1);
            Effect::None
        }
        Action::CursorDown => {
            app.selection.move_cursor(1);
            Effect::None
        }
        Action::Copy => match app.selection.selected() {
            Some(name) => Effect::CopyToClipboard(name.to_string()),
            None => Effect::None,
        },
    }
}

/// Clears the previous result and issues a new generation id.
fn begin_generation(app: &mut App) -> Effect {
    app.generation += 1;
    let selection = &mut app.selection;
    selection.phase = Phase::Loading;
    selection.suggestions.clear();
    selection.cursor = 0;
    selection.last_error = None;
    selection.status_message = STATUS_WAITING.to_string();
    Effect::SpawnGeneration {
        generation: app.generation,
    }
}

fn apply_outcome(app: &mut App, outcome: GenerationOutcome) {
    let selection = &mut app.selection;
    match outcome {
        Ok(names) => {
            let names = sanitize_names(names);
            info!("Generation {} produced {} candidates", app.generation, names.len());
            selection.status_message = if names.is_empty() {
                STATUS_NO_CANDIDATES.to_string()
            } else {
                format!(
                    "Generated {} candidates. ↑↓ to select, Enter/C to copy.",
                    names.len()
                )
            };
            selection.suggestions = names;
            selection.cursor = 0;
            selection.last_error = None;
            selection.phase = Phase::Ready;
        }
        Err(e) => {
            warn!("Generation {} failed: {}", app.generation, e);
            selection.suggestions.clear();
            selection.cursor = 0;
            selection.last_error = Some(UiError::Generation(e));
            selection.status_message = STATUS_FAILED.to_string();
            selection.phase = Phase::Failed;
        }
    }
}

//! Terminal input: key mapping and the reader thread.
//!
//! Crossterm events are read on a dedicated thread and forwarded into the same
//! channel generation tasks report into, so the event loop sees input and task
//! outcomes strictly in arrival order.

use std::sync::mpsc::Sender;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

use crate::core::action::Action;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Retry,
    CursorUp,
    CursorDown,
    Copy,
    ToggleDetails,
    /// Terminal size changed; only needs a redraw.
    Resize,
}

impl TuiEvent {
    /// The core action for this event, if any.
    pub fn into_action(self) -> Option<Action> {
        match self {
            TuiEvent::Quit => Some(Action::Quit),
            TuiEvent::Retry => Some(Action::Retry),
            TuiEvent::CursorUp => Some(Action::CursorUp),
            TuiEvent::CursorDown => Some(Action::CursorDown),
            TuiEvent::Copy => Some(Action::Copy),
            TuiEvent::ToggleDetails => Some(Action::ToggleDetails),
            TuiEvent::Resize => None,
        }
    }
}

/// Everything the event loop receives.
#[derive(Debug)]
pub enum LoopEvent {
    Input(TuiEvent),
    Task(Action),
}

impl From<Action> for LoopEvent {
    fn from(action: Action) -> Self {
        LoopEvent::Task(action)
    }
}

pub fn map_key(key: KeyEvent) -> Option<TuiEvent> {
    // Release/repeat events would double every keystroke on some terminals.
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (_, KeyCode::Char('q' | 'Q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        (_, KeyCode::Char('r' | 'R')) => Some(TuiEvent::Retry),
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Enter) | (_, KeyCode::Char('c' | 'C')) => Some(TuiEvent::Copy),
        (_, KeyCode::Char('i' | 'I')) => Some(TuiEvent::ToggleDetails),
        _ => None,
    }
}

pub fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key) => {
            debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
            map_key(key)
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Starts the input reader thread. It exits when the channel closes or the
/// terminal stops delivering events.
pub fn spawn_input_reader(tx: Sender<LoopEvent>) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            loop {
                let event = match event::read() {
                    Ok(event) => event,
                    Err(e) => {
                        warn!("Terminal input failed: {}", e);
                        return;
                    }
                };
                if let Some(tui_event) = map_event(event)
                    && tx.send(LoopEvent::Input(tui_event)).is_err()
                {
                    debug!("Input reader stopping: receiver dropped");
                    return;
                }
            }
        })
}

//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, renders the UI, turns
//! keyboard events into `core::Action` values, and performs the `Effect`s
//! returned by `update()`.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! input thread ──┐
//!                ├──▶ mpsc::Receiver<LoopEvent> ──▶ update() ──▶ Effect
//! tokio tasks ───┘                                     │
//!                                                      ▼
//!                                                   draw_ui()
//! ```
//!
//! One event is handled at a time, in arrival order. The loop blocks on the
//! channel with a short timeout while loading (so the spinner animates) and
//! a long one when idle.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use ratatui::{TerminalOptions, Viewport};

use crate::clipboard::{ClipboardBackend, ClipboardResult, copy_to_clipboard};
use crate::core::action::{Action, Effect, init, update};
use crate::core::state::{App, Phase};
use crate::inference::parse::MAX_NAME_COUNT;
use crate::inference::task;

pub use event::{LoopEvent, TuiEvent, map_event, map_key};
pub use ui::draw_ui;

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// How the loop talks to the outside world.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Draw below the prompt instead of switching to the alternate screen.
    pub inline: bool,
    pub clipboard: ClipboardBackend,
    pub generation_timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            inline: false,
            clipboard: ClipboardBackend::Auto,
            generation_timeout: task::GENERATION_TIMEOUT,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Rows needed for the whole UI with the details panel open.
fn inline_height(app: &App) -> u16 {
    let rows = app.request.count.clamp(1, MAX_NAME_COUNT) as u16;
    // title + details + status + list border + help
    rows + 1 + 7 + 2 + 2 + 1
}

pub fn run(mut app: App, options: RunOptions) -> std::io::Result<()> {
    let mut terminal = if options.inline {
        ratatui::try_init_with_options(TerminalOptions {
            viewport: Viewport::Inline(inline_height(&app)),
        })?
    } else {
        ratatui::try_init()?
    };
    let _terminal_mode_guard = TerminalModeGuard::new();
    info!("Terminal initialized (inline={})", options.inline);

    let (tx, rx) = mpsc::channel::<LoopEvent>();
    if let Err(e) = event::spawn_input_reader(tx.clone()) {
        ratatui::restore();
        return Err(e);
    }

    let start_time = Instant::now();
    let mut effect = init(&mut app);

    let result = loop {
        match perform(&mut app, effect, &options, &tx, &copy_to_clipboard) {
            Flow::Quit => break Ok(()),
            Flow::Continue => {}
        }

        let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
        if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, spinner_frame)) {
            break Err(e);
        }

        let timeout = if app.selection.phase == Phase::Loading {
            ANIMATION_TICK
        } else {
            IDLE_TICK
        };
        effect = match rx.recv_timeout(timeout) {
            Ok(LoopEvent::Input(tui_event)) => match tui_event.into_action() {
                Some(action) => update(&mut app, action),
                None => Effect::None,
            },
            Ok(LoopEvent::Task(action)) => {
                debug!("Event loop received: {:?}", action);
                update(&mut app, action)
            }
            Err(mpsc::RecvTimeoutError::Timeout) => Effect::None,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                warn!("Event channel disconnected");
                break Ok(());
            }
        };
    };

    ratatui::restore();
    info!("Terminal restored");
    result
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Carries out one effect. Clipboard results are fed straight back through
/// `update()` so the next frame shows them.
fn perform<C>(
    app: &mut App,
    effect: Effect,
    options: &RunOptions,
    tx: &mpsc::Sender<LoopEvent>,
    copy: &C,
) -> Flow
where
    C: Fn(&str, ClipboardBackend) -> ClipboardResult,
{
    match effect {
        Effect::None => Flow::Continue,
        Effect::Quit => Flow::Quit,
        Effect::SpawnGeneration { generation } => {
            task::spawn(
                app.backend.backend.clone(),
                app.request.clone(),
                generation,
                options.generation_timeout,
                tx.clone(),
            );
            Flow::Continue
        }
        Effect::CopyToClipboard(text) => {
            let result = copy(&text, options.clipboard).map(|()| text);
            let next = update(app, Action::CopyFinished(result));
            perform(app, next, options, tx, copy)
        }
    }
}

//! # StatusLine Component
//!
//! Two rows under the details panel. The first row is the status message,
//! prefixed by a spinner while loading. The second row is the last error, if any.
//! Each row is cut at the panel edge rather than wrapped, so a long status can
//! never push the error out of view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::Phase;
use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusLine {
    pub phase: Phase,
    pub status_message: String,
    pub error: Option<String>,
    pub spinner_frame: usize,
}

impl StatusLine {
    pub const HEIGHT: u16 = 2;

    pub fn spinner_symbol(frame: usize) -> &'static str {
        SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
    }
}

impl Component for StatusLine {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let status = match self.phase {
            Phase::Loading => Line::from(vec![
                Span::styled(
                    format!("{} ", Self::spinner_symbol(self.spinner_frame)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(self.status_message.as_str()),
            ]),
            Phase::Failed => Line::styled(
                self.status_message.as_str(),
                Style::default().fg(Color::Yellow),
            ),
            Phase::Ready => Line::raw(self.status_message.as_str()),
        };

        let [status_area, error_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
        frame.render_widget(Paragraph::new(status), status_area);

        if let Some(error) = &self.error {
            let error = Line::styled(format!("Error: {error}"), Style::default().fg(Color::Red));
            frame.render_widget(Paragraph::new(error), error_area);
        }
    }
}

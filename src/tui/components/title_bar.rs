//! # TitleBar Component
//!
//! Top line: the application title on the left, the details toggle on the
//! right.
//!
//! ```text
//! namesprout · Function names                          ▶ Details (I)
//! ```
//!
//! Stateless: all data arrives as props, so it is trivial to test.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct TitleBar {
    /// Display label of the requested kind (e.g. "Function")
    pub kind_label: String,
    /// Whether the details panel is expanded
    pub details_visible: bool,
}

impl TitleBar {
    pub fn new(kind_label: String, details_visible: bool) -> Self {
        Self {
            kind_label,
            details_visible,
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.details_visible {
            "▼ Details (I)"
        } else {
            "▶ Details (I)"
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                "namesprout",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" · {} names", self.kind_label)),
        ]);
        frame.render_widget(Paragraph::new(title), area);

        let toggle = Paragraph::new(Span::styled(
            self.toggle_label(),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right);
        frame.render_widget(toggle, area);
    }
}

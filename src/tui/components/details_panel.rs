//! # DetailsPanel Component
//!
//! Bordered block describing the current request, toggled with `I`:
//!
//! ```text
//! ┌Details──────────────────────────────┐
//! │Backend:     gemini                  │
//! │Model:       models/gemini-1.5-pro   │
//! │Kind:        Function                │
//! │Style:       lowerCamelCase (lower_… │
//! │Description: fetch a user record by…│
//! └─────────────────────────────────────┘
//! ```
//!
//! Values wider than the panel are cut at a character boundary by display
//! width and end in `…`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::Component;

pub const MODEL_NOT_CONFIGURED: &str = "not configured";

const LABEL_WIDTH: usize = 13;

pub struct DetailsPanel {
    pub backend: String,
    pub model: Option<String>,
    pub kind_label: String,
    pub style_label: String,
    pub style_id: String,
    pub description: String,
}

impl DetailsPanel {
    /// Border plus one row per field.
    pub const HEIGHT: u16 = 7;

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Backend:", self.backend.clone()),
            (
                "Model:",
                self.model
                    .clone()
                    .unwrap_or_else(|| MODEL_NOT_CONFIGURED.to_string()),
            ),
            ("Kind:", self.kind_label.clone()),
            ("Style:", format!("{} ({})", self.style_label, self.style_id)),
            ("Description:", self.description.clone()),
        ]
    }
}

impl Component for DetailsPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title("Details")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH);

        let label_style = Style::default().add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = self
            .rows()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label:<LABEL_WIDTH$}"), label_style),
                    Span::raw(truncate_to_width(&value, value_width)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Cuts `text` so it occupies at most `width` terminal columns.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        // Keep one column for the ellipsis.
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

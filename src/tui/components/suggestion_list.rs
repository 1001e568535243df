//! # SuggestionList Component
//!
//! The candidate names, with the cursor row marked by `▶ ` and a highlight.
//! Nothing is listed while loading or after a failure; `Ready` with no names
//! shows an explicit "no candidates" line instead of an empty box.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};

use crate::core::state::{Phase, STATUS_NO_CANDIDATES};
use crate::tui::component::Component;

pub const CURSOR_SYMBOL: &str = "▶ ";

pub struct SuggestionList<'a> {
    pub suggestions: &'a [String],
    pub cursor: usize,
    pub phase: Phase,
}

impl Component for SuggestionList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title("Candidates")
            .border_style(Style::default().fg(Color::DarkGray));

        if self.phase != Phase::Ready {
            frame.render_widget(block, area);
            return;
        }

        if self.suggestions.is_empty() {
            let empty = Paragraph::new(STATUS_NO_CANDIDATES)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .suggestions
            .iter()
            .map(|name| ListItem::new(name.as_str()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_symbol(CURSOR_SYMBOL)
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

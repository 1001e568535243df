//! # HelpBar Component
//!
//! Static key binding reference on the bottom line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const HELP_TEXT: &str = "↑↓ select  Enter/C copy  R retry  I details  Q quit";

pub struct HelpBar;

impl Component for HelpBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help = Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, area);
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive their data as props (struct fields) and render to a
/// `Frame` within a given `Rect`. They hold no state between frames, so
/// drawing the same props twice produces the same buffer.
pub trait Component {
    /// Render the component into the given area.
    ///
    /// Takes `&mut self` so a component can build per-frame widget state
    /// (e.g. a `ListState`) while rendering.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

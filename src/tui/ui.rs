use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{DetailsPanel, HelpBar, StatusLine, SuggestionList, TitleBar};

/// Draws one frame from `app`. Pure: the same state and spinner frame always
/// produce the same buffer.
pub fn draw_ui(frame: &mut Frame, app: &App, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let selection = &app.selection;
    let request = &app.request;
    let details_height = if selection.details_visible {
        DetailsPanel::HEIGHT
    } else {
        0
    };
    let layout = Layout::vertical([
        Length(1),
        Length(details_height),
        Length(StatusLine::HEIGHT),
        Min(3),
        Length(1),
    ]);
    let [title_area, details_area, status_area, list_area, help_area] =
        layout.areas(frame.area());

    TitleBar::new(request.kind_label.clone(), selection.details_visible).render(frame, title_area);

    if selection.details_visible {
        DetailsPanel {
            backend: app.backend_name().to_string(),
            model: app.model_name().map(str::to_string),
            kind_label: request.kind_label.clone(),
            style_label: request.style_label.clone(),
            style_id: request.style.to_string(),
            description: request.description.clone(),
        }
        .render(frame, details_area);
    }

    StatusLine {
        phase: selection.phase,
        status_message: selection.status_message.clone(),
        error: selection.last_error.as_ref().map(ToString::to_string),
        spinner_frame,
    }
    .render(frame, status_area);

    SuggestionList {
        suggestions: &selection.suggestions,
        cursor: selection.cursor,
        phase: selection.phase,
    }
    .render(frame, list_area);

    HelpBar.render(frame, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, init, update};
    use crate::inference::GenerationError;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use std::time::Duration;

    fn render(app: &App, spinner_frame: usize) -> Buffer {
        render_at(app, spinner_frame, 70)
    }

    fn render_at(app: &App, spinner_frame: usize, width: u16) -> Buffer {
        let backend = TestBackend::new(width, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, spinner_frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn finish(app: &mut App, outcome: Result<Vec<String>, GenerationError>) {
        let generation = app.generation;
        update(app, Action::GenerationFinished { generation, outcome });
    }

    #[test]
    fn test_loading_frame() {
        let mut app = test_app();
        init(&mut app);
        let screen = text(&render(&app, 0));
        assert!(screen.contains("namesprout"));
        assert!(screen.contains("▶ Details (I)"));
        assert!(screen.contains("Waiting for the model to respond..."));
        assert!(screen.contains("Q quit"));
        assert!(!screen.contains("Backend:"));
    }

    #[test]
    fn test_ready_frame_marks_cursor() {
        let mut app = test_app();
        init(&mut app);
        finish(&mut app, Ok(vec!["fetchUser".into(), "getUser".into(), "loadUser".into()]));
        update(&mut app, Action::CursorDown);
        let screen = text(&render(&app, 0));
        assert!(screen.contains("Generated 3 candidates."));
        assert!(screen.contains("▶ getUser"));
        assert!(screen.contains("fetchUser"));
    }

    #[test]
    fn test_ready_empty_frame() {
        let mut app = test_app();
        init(&mut app);
        finish(&mut app, Ok(vec![]));
        let screen = text(&render(&app, 0));
        assert!(screen.contains("No candidates returned."));
        assert!(!screen.contains("Error:"));
    }

    #[test]
    fn test_failed_frame_shows_error() {
        let mut app = test_app();
        init(&mut app);
        finish(&mut app, Err(GenerationError::Rejected("SAFETY".into())));
        let screen = text(&render(&app, 0));
        assert!(screen.contains("Generation failed."));
        assert!(screen.contains("Error: backend rejected the request: SAFETY"));
    }

    #[test]
    fn test_timeout_error_visible_on_narrow_terminal() {
        let mut app = test_app();
        init(&mut app);
        finish(&mut app, Err(GenerationError::Timeout(Duration::from_secs(45))));
        for width in [80, 60, 50] {
            let screen = text(&render_at(&app, 0, width));
            assert!(
                screen.contains("Error: no response within 45s"),
                "error row hidden at width {width}"
            );
        }
    }

    #[test]
    fn test_details_panel_toggle() {
        let mut app = test_app();
        init(&mut app);
        update(&mut app, Action::ToggleDetails);
        let screen = text(&render(&app, 0));
        assert!(screen.contains("▼ Details (I)"));
        assert!(screen.contains("Backend:"));
        assert!(screen.contains("fake-model"));
        assert!(screen.contains("lowerCamelCase (lower_camel)"));
    }

    #[test]
    fn test_details_without_model() {
        let mut app = test_app();
        app.backend.model_identifier = None;
        app.selection.details_visible = true;
        let screen = text(&render(&app, 0));
        assert!(screen.contains("not configured"));
    }

    #[test]
    fn test_identical_state_renders_identically() {
        let mut app = test_app();
        init(&mut app);
        finish(&mut app, Ok(vec!["fetchUser".into(), "getUser".into()]));
        update(&mut app, Action::ToggleDetails);
        assert_eq!(render(&app, 5), render(&app, 5));
    }
}

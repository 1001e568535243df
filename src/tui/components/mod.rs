//! # TUI Components
//!
//! Stateless, props-based components. Each receives its data as struct
//! fields and renders into the area it is given:
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (title + details toggle)
//! ├── details_panel.rs   (backend, model, kind, style, description)
//! ├── status_line.rs     (spinner, status message, last error)
//! ├── suggestion_list.rs (candidates with cursor marker)
//! └── help_bar.rs        (key bindings)
//! ```

mod details_panel;
mod help_bar;
mod status_line;
mod suggestion_list;
mod title_bar;

pub use details_panel::DetailsPanel;
pub use help_bar::HelpBar;
pub use status_line::StatusLine;
pub use suggestion_list::SuggestionList;
pub use title_bar::TitleBar;

//! # Core Application Logic
//!
//! This module contains namesprout's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Generation │      │ Clipboard  │
//!     │  Adapter   │      │   tasks    │      │   writes   │
//!     │ (ratatui)  │      │  (tokio)   │      │ (arboard)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App` and `SelectionState`, all runtime state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`config`], [`prompts`], [`request`]: startup inputs, resolved once
//! - [`error`]: fatal startup errors

pub mod action;
pub mod config;
pub mod error;
pub mod prompts;
pub mod request;
pub mod state;

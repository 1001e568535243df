//! Clipboard writes for the selected suggestion.

mod backend;
mod osc52;
mod system;

pub use backend::{ClipboardBackend, ClipboardError, ClipboardResult, copy_to_clipboard};
pub use osc52::encode_osc52;

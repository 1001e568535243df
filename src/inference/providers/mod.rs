pub mod chat_completions;
pub mod gemini;

pub use chat_completions::{ChatCompletionsBackend, Flavor};
pub use gemini::GeminiBackend;

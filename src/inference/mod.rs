pub mod parse;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod task;

pub use parse::{FallbackPolicy, parse_names};
pub use prompt::build_prompt;
pub use provider::{
    BackendDescriptor, BackendInitError, GenerationError, GenerationOutcome, NameBackend, WarmupFn,
};
pub use registry::{BackendPool, BackendRegistry};
pub use task::{GENERATION_TIMEOUT, WARMUP_TIMEOUT};

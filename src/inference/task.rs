//! # Generation Tasks
//!
//! One backend call, bounded by a hard deadline, reported back to the event
//! loop as exactly one `Action::GenerationFinished`.
//!
//! The deadline is enforced with `tokio::time::timeout`. On expiry the backend
//! future is dropped (cancelling any in-flight HTTP request), so a task can
//! never produce a late second outcome after reporting `Timeout`.

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use log::{debug, info, warn};

use super::provider::{BackendDescriptor, BackendInitError, GenerationError, GenerationOutcome, NameBackend};
use crate::core::action::Action;
use crate::core::request::NameRequest;
use crate::core::state::sanitize_names;

/// Deadline for one generation call.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(45);
/// Deadline for backend warmup at startup.
pub const WARMUP_TIMEOUT: Duration = Duration::from_secs(8);

/// Runs one generation call under `timeout`.
pub async fn run(
    backend: &dyn NameBackend,
    request: &NameRequest,
    timeout: Duration,
) -> GenerationOutcome {
    match tokio::time::timeout(timeout, backend.generate_names(request)).await {
        Ok(Ok(names)) => {
            let names = sanitize_names(names);
            if names.is_empty() {
                Err(GenerationError::EmptyResponse)
            } else {
                Ok(names)
            }
        }
        Ok(Err(e)) => Err(e),
        Err(_) => {
            warn!("Backend '{}' timed out after {:?}", backend.name(), timeout);
            Err(GenerationError::Timeout(timeout))
        }
    }
}

/// Spawns a generation task that reports into `tx`.
pub fn spawn<E>(
    backend: Arc<dyn NameBackend>,
    request: Arc<NameRequest>,
    generation: u64,
    timeout: Duration,
    tx: mpsc::Sender<E>,
) -> tokio::task::JoinHandle<()>
where
    E: From<Action> + Send + 'static,
{
    info!("Spawning generation {} on backend '{}'", generation, backend.name());
    tokio::spawn(async move {
        let started = std::time::Instant::now();
        let outcome = run(backend.as_ref(), &request, timeout).await;
        debug!(
            "Generation {} finished in {}ms (ok={})",
            generation,
            started.elapsed().as_millis(),
            outcome.is_ok()
        );
        if tx
            .send(E::from(Action::GenerationFinished {
                generation,
                outcome,
            }))
            .is_err()
        {
            warn!("Failed to deliver generation {}: receiver dropped", generation);
        }
    })
}

/// Runs the backend's warmup, if it has one, under `timeout`.
pub async fn warm_up(descriptor: &BackendDescriptor, timeout: Duration) -> Result<(), BackendInitError> {
    let Some(warmup) = descriptor.warmup.as_ref() else {
        return Ok(());
    };
    info!("Warming up backend '{}'", descriptor.name);
    match tokio::time::timeout(timeout, warmup()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(message)) => Err(BackendInitError::Warmup {
            backend: descriptor.name.clone(),
            message,
        }),
        Err(_) => Err(BackendInitError::WarmupTimeout {
            backend: descriptor.name.clone(),
            after: timeout,
        }),
    }
}

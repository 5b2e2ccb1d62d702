//! Waiting for a production request to finish rendering.
//!
//! Polls with exponential backoff until the request reaches a terminal
//! state, the overall deadline passes, or the [`CancellationToken`] fires.

use std::future::Future;
use std::time::Duration;

use musicspace_takeone::sdk::models::ProductionRequest;
use musicspace_takeone::TakeOneApiError;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::UploadError;

/// Tunable parameters for the polling backoff.
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Wait before the first status check.
    pub initial_interval: Duration,
    /// Upper bound on the wait between checks.
    pub max_interval: Duration,
    /// Factor by which the wait grows after each non-terminal check.
    pub multiplier: f64,
    /// Give up once this much time has passed since polling started.
    pub max_duration: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(30),
            max_interval: Duration::from_secs(5 * 60),
            multiplier: 2.0,
            max_duration: Duration::from_secs(2 * 60 * 60),
        }
    }
}

/// Calculate the next wait from the current one.
///
/// The result is clamped to [`PollConfig::max_interval`].
pub fn next_delay(current: Duration, config: &PollConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_interval)
}

/// Call `fetch` until it returns a terminal production request.
///
/// Each check is preceded by a wait, so a request that was just created is
/// not queried immediately. Fetch errors are fatal.
pub async fn poll_until_terminal<F, Fut>(
    production_request_id: &str,
    config: &PollConfig,
    cancel: &CancellationToken,
    mut fetch: F,
) -> Result<ProductionRequest, UploadError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ProductionRequest, TakeOneApiError>>,
{
    let started = Instant::now();
    let mut delay = config.initial_interval;
    let mut attempt = 0u32;

    loop {
        let remaining = config.max_duration.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            tracing::warn!(
                production_request_id,
                attempt,
                "Gave up waiting for production request",
            );
            return Err(UploadError::PollTimeout {
                production_request_id: production_request_id.to_string(),
                waited: started.elapsed(),
            });
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(UploadError::Cancelled),
            _ = tokio::time::sleep(delay.min(remaining)) => {}
        }

        attempt += 1;
        let request = tokio::select! {
            _ = cancel.cancelled() => return Err(UploadError::Cancelled),
            result = fetch() => result?,
        };

        tracing::info!(
            production_request_id,
            attempt,
            state = %request.state,
            coloring_progress = request.coloring_progress,
            editing_progress = request.editing_progress,
            post_processing_progress = request.post_processing_progress,
            "Production request status",
        );

        if request.is_terminal() {
            return Ok(request);
        }
        delay = next_delay(delay, config);
    }
}

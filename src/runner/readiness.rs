//! Target readiness probing
//!
//! The target server is an external collaborator; it may still be booting
//! when the run starts. Instead of a fixed warm-up sleep, the runner polls
//! the target URL with bounded retries and only then launches the browser.

use std::time::Duration;

use crate::common::config::ReadinessConfig;
use crate::common::{Error, Result};

/// Per-probe HTTP timeout
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Wait until the target URL answers HTTP, or give up
///
/// Any HTTP response counts as "listening": even a 404 means the server is
/// up and the page routing is the scenario's problem, not the probe's.
pub async fn wait_for_target(url: &str, config: &ReadinessConfig) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

    for attempt in 1..=config.max_attempts {
        match client.get(url).send().await {
            Ok(response) => {
                tracing::debug!(url, attempt, status = %response.status(), "target is listening");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(url, attempt, error = %e, "target not reachable yet");
            }
        }
        if attempt < config.max_attempts {
            tokio::time::sleep(Duration::from_millis(config.interval_ms)).await;
        }
    }

    Err(Error::TargetUnreachable {
        url: url.to_string(),
        attempts: config.max_attempts,
    })
}

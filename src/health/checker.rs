//! On-demand health checking.
//!
//! # Responsibilities
//! - Run one UDP probe per health request
//! - Hold DOWN answers for the configured caller timeout
//! - Record probe metrics

use std::sync::Arc;
use std::time::Instant;

use tokio::time;

use crate::config::ProbeConfig;
use crate::health::state::HealthResult;
use crate::observability::metrics;
use crate::probe::{self, Payload, ProbeError, ProbeOutcome};

/// Runs health checks against a single UDP target.
///
/// Cheap to clone; the config and encoded payload are shared.
#[derive(Debug, Clone)]
pub struct HealthChecker {
    config: Arc<ProbeConfig>,
    payload: Arc<Payload>,
}

impl HealthChecker {
    /// Build a checker, encoding the payload once up front.
    pub fn new(config: ProbeConfig) -> Self {
        let payload = Payload::from_spec(&config.payload);
        Self {
            config: Arc::new(config),
            payload: Arc::new(payload),
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Probe the target once.
    ///
    /// The blocking socket runs on the blocking pool. If the caller goes away
    /// mid-probe the task still finishes at the socket timeout and closes the
    /// socket.
    pub async fn probe(&self) -> Result<ProbeOutcome, ProbeError> {
        let config = Arc::clone(&self.config);
        let payload = Arc::clone(&self.payload);
        let start = Instant::now();

        let outcome =
            tokio::task::spawn_blocking(move || probe::probe(&config, payload.as_bytes())).await??;

        metrics::record_probe(outcome, start);
        Ok(outcome)
    }

    /// Probe the target and map the outcome to a [`HealthResult`].
    ///
    /// For a held DOWN result this only returns once the caller timeout has
    /// elapsed. The wait is per request and does not delay other checks.
    pub async fn check_health(&self) -> Result<HealthResult, ProbeError> {
        let outcome = self.probe().await?;
        let result = HealthResult::from_outcome(outcome, self.config.caller_timeout());

        if !result.is_up() {
            tracing::warn!(
                host = %self.config.host,
                port = self.config.port,
                outcome = %outcome,
                "UDP target is DOWN"
            );
        }

        let hold = result.hold();
        if !hold.is_zero() {
            tracing::debug!(hold_ms = hold.as_millis() as u64, "Holding response for caller timeout");
            time::sleep(hold).await;
        }

        Ok(result)
    }
}

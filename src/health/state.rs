//! Health result derived from a probe.
//!
//! # Mapping
//! ```text
//! Responded                      → Up
//! OpenNoResponse | Unreachable   → Down                    (caller timeout = 0)
//!                                → DownAfterDelay(timeout) (caller timeout > 0)
//! ```
//!
//! The delayed variant lets a load balancer's own client timeout fire before
//! an answer arrives.

use std::time::Duration;

use crate::probe::ProbeOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthResult {
    /// The target answered the probe.
    Up,
    /// The target is down; respond right away.
    Down,
    /// The target is down; the response is held for the given duration first.
    DownAfterDelay(Duration),
}

impl HealthResult {
    pub fn from_outcome(outcome: ProbeOutcome, caller_timeout: Duration) -> Self {
        if outcome.is_up() {
            HealthResult::Up
        } else if caller_timeout.is_zero() {
            HealthResult::Down
        } else {
            HealthResult::DownAfterDelay(caller_timeout)
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, HealthResult::Up)
    }

    /// How long the response must be held before it is sent.
    pub fn hold(&self) -> Duration {
        match self {
            HealthResult::DownAfterDelay(delay) => *delay,
            _ => Duration::ZERO,
        }
    }
}

//! UDP probing subsystem.
//!
//! # Data Flow
//! ```text
//! probe.payload (config string)
//!     → payload.rs (encode once at startup)
//!     → udp.rs (one socket per probe: send, wait, classify)
//!     → ProbeOutcome
//! ```
//!
//! # Design Decisions
//! - A probe never retries; callers repeat the HTTP request instead
//! - Reply content is ignored, arrival alone means the service is up
//! - Timeouts and unreachable targets are outcomes, not errors

pub mod payload;
pub mod udp;

use std::fmt;

pub use payload::Payload;
pub use udp::probe;

/// Classification of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A reply datagram arrived before the timeout.
    Responded,
    /// Nothing came back before the socket timeout. The port may be open with
    /// nobody answering, or the packet was dropped silently.
    OpenNoResponse,
    /// Resolution, send or receive failed outright (e.g. ICMP port unreachable).
    Unreachable,
}

impl ProbeOutcome {
    pub fn is_up(&self) -> bool {
        matches!(self, ProbeOutcome::Responded)
    }

    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeOutcome::Responded => "responded",
            ProbeOutcome::OpenNoResponse => "open_no_response",
            ProbeOutcome::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unexpected probe failures. These need operator attention, unlike a down
/// target which is reported through [`ProbeOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The local socket could not be created or configured.
    #[error("failed to allocate UDP socket: {0}")]
    SocketAllocation(#[source] std::io::Error),

    /// The blocking probe task panicked or was cancelled.
    #[error("probe task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP health request
//!     → checker.rs (one UDP probe on the blocking pool)
//!     → state.rs (outcome + caller timeout → HealthResult)
//!     → optional hold for the caller timeout
//!     → http layer renders the response
//! ```
//!
//! # Design Decisions
//! - Every request probes; no cached or historical state
//! - Probe timeout resolves before the caller-timeout hold begins

pub mod checker;
pub mod state;

pub use checker::HealthChecker;
pub use state::HealthResult;

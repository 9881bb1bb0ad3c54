//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming health request:
//!     → rate_limit.rs (global token bucket)
//!     → health handler
//! ```

pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, RateLimiter};

//! UDP health check service library.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod security;

pub use config::AppConfig;
pub use health::{HealthChecker, HealthResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use probe::{Payload, ProbeOutcome};

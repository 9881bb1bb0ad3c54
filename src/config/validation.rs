//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports set)
//! - Check that the request timeout leaves room for probe + caller hold
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("probe.port must be between 1 and 65535")]
    MissingPort,

    #[error("probe.host must not be empty")]
    EmptyHost,

    #[error("probe.timeout_ms must be greater than zero")]
    ZeroProbeTimeout,

    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error(
        "listener.request_timeout_secs ({request_secs}s) must exceed probe timeout plus caller timeout ({needed_ms}ms)"
    )]
    RequestTimeoutTooShort { request_secs: u64, needed_ms: u64 },

    #[error("rate_limit.{0} must be greater than zero")]
    ZeroRateLimit(&'static str),
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let probe = &config.probe;

    if probe.port == 0 {
        errors.push(ValidationError::MissingPort);
    }
    if probe.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if probe.timeout_ms == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    // Widened so extreme values cannot overflow.
    let needed_ms = u128::from(probe.timeout_ms) + u128::from(probe.caller_timeout_secs) * 1000;
    let request_secs = config.listener.request_timeout_secs;
    if u128::from(request_secs) * 1000 <= needed_ms {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs,
            needed_ms: u64::try_from(needed_ms).unwrap_or(u64::MAX),
        });
    }

    if config.rate_limit.enabled {
        if config.rate_limit.requests_per_second == 0 {
            errors.push(ValidationError::ZeroRateLimit("requests_per_second"));
        }
        if config.rate_limit.burst_size == 0 {
            errors.push(ValidationError::ZeroRateLimit("burst_size"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

//! Startup orchestration.
//!
//! Builds the final [`AppConfig`]: file (or defaults), then command-line
//! overrides, then validation. Any error here is fatal.

use std::path::Path;

use crate::config::loader::{load_config, validate};
use crate::config::{AppConfig, ConfigError};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub payload: Option<String>,
    pub bind_address: Option<String>,
}

impl Overrides {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.probe.host = host.clone();
        }
        if let Some(port) = self.port {
            config.probe.port = port;
        }
        if let Some(payload) = &self.payload {
            config.probe.payload = payload.clone();
        }
        if let Some(bind_address) = &self.bind_address {
            config.listener.bind_address = bind_address.clone();
        }
    }
}

/// Load, override and validate the configuration.
pub fn prepare(path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    overrides.apply(&mut config);
    validate(&config)?;
    Ok(config)
}

//! Service endpoint configuration, read from `./.phishguard.ron`.

use std::fs;
use std::time::Duration;

use context_logging::ctx_warn;
use phishguard_client::ClientSettings;
use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = ".phishguard.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServiceConfig {
    base_url: String,
    connect_timeout_ms: u64,
    request_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let defaults = ClientSettings::default();
        Self {
            base_url: defaults.base_url,
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            request_timeout_ms: defaults.request_timeout.as_millis() as u64,
        }
    }
}

/// Loads the client settings; a missing or malformed config file falls back
/// to the defaults (local service on port 5000).
pub fn load_client_settings() -> ClientSettings {
    let config = load_config();
    ClientSettings {
        base_url: config.base_url,
        connect_timeout: Duration::from_millis(config.connect_timeout_ms),
        request_timeout: Duration::from_millis(config.request_timeout_ms),
    }
}

fn load_config() -> ServiceConfig {
    let content = match fs::read_to_string(CONFIG_FILENAME) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ServiceConfig::default();
        }
        Err(err) => {
            ctx_warn!("failed to read {CONFIG_FILENAME}: {err}");
            return ServiceConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            ctx_warn!("failed to parse {CONFIG_FILENAME}: {err}");
            ServiceConfig::default()
        }
    }
}

//! Configuration schema definitions.
//!
//! All types derive Serde traits so a host can embed `ProberConfig` in its
//! own config file or load it standalone through `loader.rs`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{CheckServer, CATALOG};
use crate::proxy::ProxySetting;

/// Root configuration for a prober.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProberConfig {
    /// Connect and request deadlines.
    pub timeouts: TimeoutConfig,

    /// Forward proxy used for every probe until changed.
    pub proxy: ProxySetting,

    /// User-Agent header sent with each probe.
    pub user_agent: String,

    /// Beacon servers overriding the built-in catalog (empty = built-in).
    pub servers: Vec<ServerConfig>,
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self {
            timeouts: TimeoutConfig::default(),
            proxy: ProxySetting::None,
            user_agent: default_user_agent(),
            servers: Vec::new(),
        }
    }
}

fn default_user_agent() -> String {
    format!("net-connectivity/{}", env!("CARGO_PKG_VERSION"))
}

impl ProberConfig {
    /// The rotation catalog this config resolves to.
    pub fn catalog(&self) -> Vec<CheckServer> {
        if self.servers.is_empty() {
            CATALOG.to_vec()
        } else {
            self.servers
                .iter()
                .map(|s| CheckServer::new(s.name.clone(), s.url.clone()))
                .collect()
        }
    }
}

/// A configured beacon server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Display name reported back in `NetworkReport`.
    pub name: String,

    /// URL to GET (http or https).
    pub url: String,
}

/// Timeout configuration, in milliseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// TCP (and proxy) connection establishment timeout.
    pub connect_ms: u64,

    /// Whole request timeout, from connect through response headers.
    pub request_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: 5_000,
            request_ms: 10_000,
        }
    }
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_millis(self.connect_ms)
    }

    pub fn request(&self) -> Duration {
        Duration::from_millis(self.request_ms)
    }
}

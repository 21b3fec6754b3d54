//! Connectivity probers.
//!
//! # Data Flow
//! ```text
//! network_report()
//!     → lease next server from the rotation queue
//!     → load current transport (client + proxy) from the ArcSwap
//!     → GET server url, redirects disabled
//!     → observe(): classify, log, record metrics
//!     → lease dropped, server back at the tail
//! ```
//!
//! # Design Decisions
//! - `Prober` blocks the calling thread; `AsyncProber` is for tokio hosts
//! - `set_proxy` builds a new client and swaps it atomically (last writer wins)
//! - In-flight probes keep the transport they loaded
//! - No connection reuse, so every probe exercises a fresh connect

/// Apply the probe client settings to a blocking or async reqwest builder.
///
/// Both client flavours share this so their request behaviour cannot drift.
macro_rules! configure_client {
    ($builder:expr, $settings:expr, $proxy:expr) => {{
        let builder = $builder
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout($settings.connect_timeout)
            .timeout($settings.request_timeout)
            .user_agent($settings.user_agent.as_str())
            .pool_max_idle_per_host(0);

        match $proxy.to_reqwest()? {
            Some(p) => builder.proxy(p),
            None => builder.no_proxy(),
        }
    }};
}

mod asynchronous;
mod blocking;

pub use asynchronous::AsyncProber;
pub use blocking::Prober;

use std::time::{Duration, Instant};

use hyper::ext::ReasonPhrase;
use reqwest::StatusCode;

use crate::catalog::CheckServer;
use crate::config::{validate_config, ProberConfig};
use crate::error::ProberError;
use crate::observability::metrics;
use crate::proxy::ProxySetting;
use crate::status::{NetworkReport, NetworkStatus};

/// Client settings that survive proxy swaps.
#[derive(Debug, Clone)]
struct ClientSettings {
    connect_timeout: Duration,
    request_timeout: Duration,
    user_agent: String,
}

impl ClientSettings {
    /// Validate the config and split it into settings, catalog, and initial proxy.
    fn from_config(config: ProberConfig) -> Result<(Self, Vec<CheckServer>, ProxySetting), ProberError> {
        validate_config(&config).map_err(ProberError::InvalidConfig)?;
        let catalog = config.catalog();
        let settings = Self {
            connect_timeout: config.timeouts.connect(),
            request_timeout: config.timeouts.request(),
            user_agent: config.user_agent,
        };
        Ok((settings, catalog, config.proxy))
    }
}

/// The client in use together with the proxy it was built for.
#[derive(Debug)]
struct Transport<C> {
    proxy: ProxySetting,
    client: C,
}

/// What came back from the wire, before classification.
enum Exchange {
    Response {
        status: StatusCode,
        reason: Option<String>,
        location: Option<String>,
    },
    Failed(String),
}

/// Classify an exchange, log it, and record metrics.
fn observe(server: &CheckServer, exchange: Exchange, started: Instant) -> NetworkReport {
    let report = match exchange {
        Exchange::Response {
            status,
            reason,
            location,
        } => {
            let report = NetworkReport::from_response(server.name(), status, reason.as_deref());
            match report.status() {
                NetworkStatus::Redirected => tracing::info!(
                    status = status.as_u16(),
                    location = location.as_deref().unwrap_or("-"),
                    "Probe redirected, possible captive portal"
                ),
                _ => tracing::debug!(status = status.as_u16(), "Probe connected"),
            }
            report
        }
        Exchange::Failed(detail) => {
            tracing::warn!(error = %detail, "Probe failed: transport error");
            NetworkReport::from_failure(server.name(), detail)
        }
    };
    metrics::record_probe(server.name(), report.status(), started);
    report
}

fn location_of(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Reason phrase the server sent. hyper only records it when it differs
/// from the canonical phrase for the code.
fn reason_of(phrase: Option<&ReasonPhrase>) -> Option<String> {
    phrase.map(|p| String::from_utf8_lossy(p.as_bytes()).into_owned())
}

//! Outcome classification.
//!
//! # States
//! - Connected: a non-redirect response came back from the beacon
//! - Redirected: the request was answered with a 3xx (captive portal, ISP interception)
//! - Disconnected: no HTTP response at all (DNS, refused, timeout, TLS, malformed)
//!
//! # Design Decisions
//! - Only redirect-ness is checked; 404 or 500 still prove the network works
//! - Report detail text is advisory and not meant to be parsed

use std::fmt;

use serde::Serialize;

/// Tri-state connectivity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NetworkStatus {
    Connected,
    Redirected,
    Disconnected,
}

impl NetworkStatus {
    /// Classify a received HTTP status code.
    pub fn classify(code: u16) -> Self {
        if is_redirect(code) {
            NetworkStatus::Redirected
        } else {
            NetworkStatus::Connected
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, NetworkStatus::Connected)
    }

    /// Stable lowercase label, used for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkStatus::Connected => "connected",
            NetworkStatus::Redirected => "redirected",
            NetworkStatus::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NetworkStatus::Connected => "Connected",
            NetworkStatus::Redirected => "Redirected",
            NetworkStatus::Disconnected => "Disconnected",
        };
        f.write_str(s)
    }
}

/// Redirect codes that signal interception when redirects are not followed.
pub fn is_redirect(code: u16) -> bool {
    matches!(code, 300 | 301 | 302 | 303 | 307 | 308)
}

/// Result of a single probe, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkReport {
    status: NetworkStatus,
    server_name: String,
    detail: String,
}

impl NetworkReport {
    pub fn new(status: NetworkStatus, server_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            server_name: server_name.into(),
            detail: detail.into(),
        }
    }

    /// Report for a completed exchange: `"<code> <reason>"`.
    ///
    /// `reason` is the phrase the server sent, when it differs from the
    /// canonical one; otherwise the canonical phrase is used.
    pub fn from_response(
        server_name: impl Into<String>,
        status: reqwest::StatusCode,
        reason: Option<&str>,
    ) -> Self {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .or_else(|| status.canonical_reason());
        let detail = match reason {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };
        Self::new(NetworkStatus::classify(status.as_u16()), server_name, detail)
    }

    /// Report for a transport failure.
    pub fn from_failure(server_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(NetworkStatus::Disconnected, server_name, detail)
    }

    pub fn status(&self) -> NetworkStatus {
        self.status
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn is_online(&self) -> bool {
        self.status.is_connected()
    }
}

impl fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {}: {}", self.status, self.server_name, self.detail)
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, proxy port valid)
//! - Check beacon servers are unique, named, and reachable over http(s)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProberConfig → Result<(), Vec<ValidationError>>
//! - Runs before a prober is built from the config

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::ProberConfig;

/// A single semantic problem in a `ProberConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.request_ms ({request_ms}) is shorter than timeouts.connect_ms ({connect_ms})")]
    RequestShorterThanConnect { connect_ms: u64, request_ms: u64 },

    #[error("server at index {0} has an empty name")]
    EmptyServerName(usize),

    #[error("duplicate server name '{0}'")]
    DuplicateServerName(String),

    #[error("server '{name}' has invalid url '{url}': {reason}")]
    InvalidServerUrl { name: String, url: String, reason: String },

    #[error("proxy {proxy}: {reason}")]
    InvalidProxy { proxy: String, reason: &'static str },
}

/// Check a config, collecting every problem found.
pub fn validate_config(config: &ProberConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let timeouts = &config.timeouts;
    if timeouts.connect_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_ms"));
    }
    if timeouts.request_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("request_ms"));
    }
    if timeouts.request_ms != 0 && timeouts.request_ms < timeouts.connect_ms {
        errors.push(ValidationError::RequestShorterThanConnect {
            connect_ms: timeouts.connect_ms,
            request_ms: timeouts.request_ms,
        });
    }

    let mut names = HashSet::new();
    for (index, server) in config.servers.iter().enumerate() {
        if server.name.trim().is_empty() {
            errors.push(ValidationError::EmptyServerName(index));
        } else if !names.insert(server.name.as_str()) {
            errors.push(ValidationError::DuplicateServerName(server.name.clone()));
        }

        let invalid = |reason: String| ValidationError::InvalidServerUrl {
            name: server.name.clone(),
            url: server.url.clone(),
            reason,
        };
        match url::Url::parse(&server.url) {
            Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
                errors.push(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
            }
            Ok(parsed) if parsed.host_str().is_none() => {
                errors.push(invalid("missing host".to_string()));
            }
            Ok(_) => {}
            Err(e) => errors.push(invalid(e.to_string())),
        }
    }

    if let Some(reason) = config.proxy.problem() {
        errors.push(ValidationError::InvalidProxy {
            proxy: config.proxy.to_string(),
            reason,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

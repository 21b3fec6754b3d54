//! Construction-time errors.
//!
//! Probing itself never fails; these only surface while building a prober
//! or swapping its proxy.

use thiserror::Error;

use crate::config::validation::ValidationError;

/// Errors that can occur while setting up a prober.
#[derive(Debug, Error)]
pub enum ProberError {
    /// The rotation queue needs at least one server.
    #[error("no check servers configured")]
    EmptyCatalog,

    /// Proxy descriptor could not be turned into a client proxy.
    #[error("invalid proxy {proxy}: {reason}")]
    InvalidProxy { proxy: String, reason: String },

    /// Configuration failed semantic validation.
    #[error("invalid configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render an error and its source chain as one line.
///
/// Used for the advisory detail text of a `Disconnected` report.
pub(crate) fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // hyper and reqwest frequently repeat the inner message verbatim
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every probe produces:
//!     → tracing span `probe` (server, url) with one outcome event
//!     → metrics.rs (outcome counter, duration histogram)
//!
//! Consumers (installed by the host, never by this crate):
//!     → tracing subscriber (stdout, file, remote)
//!     → metrics recorder/exporter (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Library only emits; subscriber and recorder setup belong to the host
//! - Without a recorder the metrics calls are no-ops

pub mod metrics;

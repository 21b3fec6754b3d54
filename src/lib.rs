//! Internet connectivity probe.
//!
//! # Data Flow
//! ```text
//! caller
//!     → prober (is_online / network_status / network_report)
//!     → rotation.rs (lease next beacon server)
//!     → one HTTP GET, redirects disabled, through optional proxy
//!     → status.rs (classify response code or transport failure)
//!     → lease dropped: server re-enqueued at the tail
//!     → NetworkStatus / NetworkReport returned to caller
//! ```
//!
//! # Design Decisions
//! - Exactly one request per call: no retries, no fan-out
//! - Probe operations never fail; transport errors become `Disconnected`
//! - 3xx codes are observed raw so captive portals classify as `Redirected`
//! - The hosting application owns scheduling and the tracing subscriber

pub mod catalog;
pub mod config;
pub mod error;
pub mod observability;
pub mod prober;
pub mod proxy;
pub mod rotation;
pub mod status;

pub use catalog::{CheckServer, CATALOG};
pub use config::ProberConfig;
pub use error::ProberError;
pub use prober::{AsyncProber, Prober};
pub use proxy::ProxySetting;
pub use rotation::ServerQueue;
pub use status::{NetworkReport, NetworkStatus};

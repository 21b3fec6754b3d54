//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! TOML document (file or embedded in host config)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProberConfig (validated)
//!     → Prober::new / AsyncProber::new
//!
//! Runtime proxy change:
//!     Prober::set_proxy → client rebuilt → atomic swap
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only the proxy is mutable after construction; the catalog is fixed

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ProberConfig, ServerConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};

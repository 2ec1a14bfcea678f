//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → JoinConfig (validated, immutable)
//!     → CLI overrides applied in main.rs, then re-validated
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_str, ConfigError};
pub use schema::{DemoConfig, FetchConfig, JoinConfig, ObservabilityConfig, SourcesConfig};
pub use validation::{validate_config, ValidationError};

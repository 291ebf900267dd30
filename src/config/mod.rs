//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, then environment overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → InertiaConfig handed to `Inertia::new`, the rest to the server
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Environment overrides: `INERTIA_ROOT_VIEW`, `INERTIA_PUBLIC_PATH`,
//!   `INERTIA_RESOURCES_PATH` and `SCHEME`
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, InertiaConfig, ObservabilityConfig, ServerConfig};

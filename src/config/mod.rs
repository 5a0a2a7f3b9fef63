//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, path from CROWDFUND_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PortalConfig (validated, immutable)
//!     → shared via Arc with the portal and HTTP layer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets (the wallet key) are referenced by env var name only

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    AdminAuthority, AdminConfig, DataConfig, DataSourceKind, FeeConfig, ObservabilityConfig,
    PortalConfig, WalletConfig,
};

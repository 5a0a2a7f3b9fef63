//! Crowdfunding portal library.

// Domain
pub mod campaign;
pub mod contract;
pub mod wallet;

// Presentation
pub mod error;
pub mod http;
pub mod portal;
pub mod views;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::PortalConfig;
pub use error::{PortalError, PortalResult};
pub use http::PortalServer;
pub use lifecycle::Shutdown;
pub use portal::Portal;

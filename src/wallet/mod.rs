//! Wallet subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable (private key) + [wallet] config
//!     → provider.rs (injected provider: accounts, signer)
//!     → store.rs (connect / disconnect / restore, owns WalletState)
//!     → state.rs snapshots borrowed by views
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - No reaction to external account or network switches

pub mod provider;
pub mod state;
pub mod store;
pub mod types;

pub use provider::InjectedProvider;
pub use state::{SignerHandle, WalletState, WalletSummary};
pub use store::WalletStore;
pub use types::{WalletError, WalletResult};

//! Crowdfunding contract integration.
//!
//! # Data Flow
//! ```text
//! view (decimal ETH strings, campaign id strings)
//!     → units.rs (wei / uint256 conversion)
//!     → service.rs (one call, one confirmation)
//!     → abi.rs (sol! bindings, ABI encoding by alloy)
//!     → signer provider (JSON-RPC)
//! ```

pub mod abi;
pub mod service;
pub mod types;
pub mod units;

pub use service::ContractService;
pub use types::{ContractError, ContractResult};

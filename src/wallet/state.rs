//! Wallet state shared read-only with the views.

use alloy::primitives::Address;
use alloy::providers::DynProvider;
use serde::Serialize;

/// A signing handle: the account address plus a provider that signs with it.
#[derive(Clone)]
pub struct SignerHandle {
    address: Address,
    provider: DynProvider,
}

impl SignerHandle {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self { address, provider }
    }

    /// The signing account.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Provider with the wallet filler attached.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }
}

impl std::fmt::Debug for SignerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerHandle")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Connection state of the injected wallet.
///
/// Either fully populated (connected) or fully empty; the store never holds a
/// partial state.
#[derive(Clone, Default)]
pub struct WalletState {
    pub connected: bool,
    pub address: Option<Address>,
    pub signer: Option<SignerHandle>,
    /// Read-only handle to the connected network.
    pub provider: Option<DynProvider>,
}

impl WalletState {
    /// Populated state for a freshly connected account.
    pub fn connected(signer: SignerHandle, provider: DynProvider) -> Self {
        Self {
            connected: true,
            address: Some(signer.address()),
            signer: Some(signer),
            provider: Some(provider),
        }
    }

    /// Case-insensitive comparison of the connected address against `other`.
    /// Always false when disconnected.
    pub fn is_address(&self, other: &str) -> bool {
        match (self.connected, self.address) {
            (true, Some(address)) => address.to_string().eq_ignore_ascii_case(other.trim()),
            _ => false,
        }
    }

    pub fn summary(&self) -> WalletSummary {
        WalletSummary {
            connected: self.connected,
            address: self.address.map(|a| a.to_string()),
        }
    }
}

impl std::fmt::Debug for WalletState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletState")
            .field("connected", &self.connected)
            .field("address", &self.address)
            .field("has_signer", &self.signer.is_some())
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}

/// Serializable view of the wallet for the header widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletSummary {
    pub connected: bool,
    pub address: Option<String>,
}

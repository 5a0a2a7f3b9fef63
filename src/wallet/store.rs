//! Wallet state holder.
//!
//! The store exclusively owns the [`WalletState`]; views read immutable
//! snapshots and go through `connect_wallet` / `disconnect_wallet` to change
//! it. State is swapped atomically, so readers see either the empty state or
//! a fully populated one.

use std::sync::Arc;

use alloy::primitives::Address;
use arc_swap::ArcSwap;

use crate::observability::metrics;
use crate::wallet::provider::InjectedProvider;
use crate::wallet::state::{WalletState, WalletSummary};
use crate::wallet::types::{WalletError, WalletResult};

/// Holder of the portal's single wallet session.
pub struct WalletStore {
    provider: Option<InjectedProvider>,
    state: ArcSwap<WalletState>,
}

impl WalletStore {
    /// Create an empty store over an optional injected provider.
    pub fn new(provider: Option<InjectedProvider>) -> Self {
        Self {
            provider,
            state: ArcSwap::from_pointee(WalletState::default()),
        }
    }

    /// Read-only snapshot of the current state.
    pub fn snapshot(&self) -> Arc<WalletState> {
        self.state.load_full()
    }

    pub fn connected(&self) -> bool {
        self.state.load().connected
    }

    pub fn address(&self) -> Option<Address> {
        self.state.load().address
    }

    pub fn summary(&self) -> WalletSummary {
        self.state.load().summary()
    }

    /// Whether an injected provider exists at all.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Request account access and populate the state.
    ///
    /// On failure the state is left untouched.
    pub fn connect_wallet(&self) -> WalletResult<WalletSummary> {
        let Some(provider) = &self.provider else {
            tracing::warn!("Connect requested without a wallet provider");
            return Err(WalletError::Unavailable);
        };

        let result = provider.request_accounts().and_then(|_| provider.connect());
        match result {
            Ok((signer, read_only)) => {
                let state = WalletState::connected(signer, read_only);
                let summary = state.summary();
                self.state.store(Arc::new(state));
                metrics::record_wallet_connected(true);
                tracing::info!(address = ?summary.address, "Wallet connected");
                Ok(summary)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error connecting wallet");
                Err(e)
            }
        }
    }

    /// Reset to the empty state, unconditionally.
    pub fn disconnect_wallet(&self) {
        self.state.store(Arc::new(WalletState::default()));
        metrics::record_wallet_connected(false);
        tracing::info!("Wallet disconnected");
    }

    /// Silently re-derive the connected state when the provider already has
    /// an authorized account. Errors are logged and swallowed.
    pub fn restore(&self) {
        let Some(provider) = &self.provider else {
            return;
        };

        let accounts = match provider.list_accounts() {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::error!(error = %e, "Error checking wallet connection");
                return;
            }
        };
        if accounts.is_empty() {
            return;
        }

        match provider.connect() {
            Ok((signer, read_only)) => {
                let address = signer.address();
                self.state.store(Arc::new(WalletState::connected(signer, read_only)));
                metrics::record_wallet_connected(true);
                tracing::info!(address = %address, "Restored wallet connection");
            }
            Err(e) => tracing::error!(error = %e, "Error checking wallet connection"),
        }
    }
}

impl std::fmt::Debug for WalletStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletStore")
            .field("provider", &self.provider)
            .field("state", &self.state.load())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn provider(key: &str, pre_authorized: bool) -> InjectedProvider {
        InjectedProvider::new(
            "http://localhost:8545".parse().unwrap(),
            31337,
            key.to_string(),
            pre_authorized,
        )
    }

    #[test]
    fn test_connect_without_provider_leaves_state() {
        let store = WalletStore::new(None);
        assert!(!store.has_provider());
        assert!(matches!(store.connect_wallet(), Err(WalletError::Unavailable)));
        assert!(!store.connected());
        assert!(store.address().is_none());
    }

    #[tokio::test]
    async fn test_connect_then_disconnect() {
        let store = WalletStore::new(Some(provider(TEST_PRIVATE_KEY, false)));

        let summary = store.connect_wallet().unwrap();
        assert!(summary.connected);

        let state = store.snapshot();
        assert!(state.connected);
        assert!(state.signer.is_some());
        assert!(state.provider.is_some());
        assert_eq!(state.address, state.signer.as_ref().map(|s| s.address()));

        store.disconnect_wallet();
        let state = store.snapshot();
        assert!(!state.connected);
        assert!(state.address.is_none());
        assert!(state.signer.is_none());
        assert!(state.provider.is_none());
    }

    #[test]
    fn test_failed_connect_leaves_state() {
        let store = WalletStore::new(Some(provider("not-a-key", false)));
        assert!(matches!(store.connect_wallet(), Err(WalletError::InvalidKey(_))));
        assert!(!store.connected());
    }

    #[test]
    fn test_disconnect_is_unconditional() {
        let store = WalletStore::new(None);
        store.disconnect_wallet();
        assert!(!store.connected());
    }

    #[tokio::test]
    async fn test_restore_only_when_authorized() {
        let store = WalletStore::new(Some(provider(TEST_PRIVATE_KEY, false)));
        store.restore();
        assert!(!store.connected());

        let store = WalletStore::new(Some(provider(TEST_PRIVATE_KEY, true)));
        store.restore();
        assert!(store.connected());
    }

    #[test]
    fn test_restore_swallows_errors() {
        let store = WalletStore::new(Some(provider("bad", true)));
        store.restore();
        assert!(!store.connected());
    }
}

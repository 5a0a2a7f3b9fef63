//! Injected wallet provider.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized
//!
//! The provider behaves like a browser wallet: it exists or it does not, it
//! exposes accounts only after the user granted access (`request_accounts`),
//! and it hands out a signing provider for the granted account.

use std::sync::atomic::{AtomicBool, Ordering};

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use url::Url;

use crate::config::WalletConfig;
use crate::wallet::state::SignerHandle;
use crate::wallet::types::{WalletError, WalletResult};

/// A locally configured signer standing in for a browser-injected wallet.
pub struct InjectedProvider {
    rpc_url: Url,
    chain_id: u64,
    private_key: String,
    authorized: AtomicBool,
}

impl InjectedProvider {
    /// Create a provider from a hex key (with or without `0x`).
    ///
    /// The key is validated lazily, on the first account request.
    pub fn new(rpc_url: Url, chain_id: u64, private_key: String, pre_authorized: bool) -> Self {
        Self {
            rpc_url,
            chain_id,
            private_key,
            authorized: AtomicBool::new(pre_authorized),
        }
    }

    /// Detect the provider from config and environment.
    ///
    /// Returns `None` when the wallet is disabled, the key variable is unset,
    /// or the RPC URL is unusable.
    pub fn detect(config: &WalletConfig) -> Option<Self> {
        if !config.enabled {
            tracing::info!("Wallet provider disabled");
            return None;
        }

        let private_key = match std::env::var(&config.private_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::info!(
                    env_var = %config.private_key_env,
                    "No wallet key in environment, running without a wallet provider"
                );
                return None;
            }
        };

        let rpc_url: Url = match config.rpc_url.parse() {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(rpc_url = %config.rpc_url, error = %e, "Ignoring wallet with invalid RPC URL");
                return None;
            }
        };

        tracing::info!(
            rpc_url = %rpc_url,
            chain_id = config.chain_id,
            pre_authorized = config.pre_authorized,
            "Wallet provider detected"
        );
        Some(Self::new(rpc_url, config.chain_id, private_key, config.pre_authorized))
    }

    fn signer(&self) -> WalletResult<PrivateKeySigner> {
        let key_hex = self.private_key.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);
        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| WalletError::InvalidKey(format!("Invalid private key format: {}", e)))?;
        Ok(signer.with_chain_id(Some(self.chain_id)))
    }

    /// Grant this portal access to the account (`eth_requestAccounts`).
    pub fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        let address = self.signer()?.address();
        self.authorized.store(true, Ordering::SeqCst);
        Ok(vec![address])
    }

    /// Accounts already granted to this portal, without prompting.
    pub fn list_accounts(&self) -> WalletResult<Vec<Address>> {
        if !self.authorized.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        Ok(vec![self.signer()?.address()])
    }

    /// Signing handle for the granted account plus a read-only provider.
    pub fn connect(&self) -> WalletResult<(SignerHandle, DynProvider)> {
        if !self.authorized.load(Ordering::SeqCst) {
            return Err(WalletError::NotAuthorized);
        }

        let signer = self.signer()?;
        let address = signer.address();

        let signing = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(self.rpc_url.clone())
            .erased();
        let read_only = ProviderBuilder::new()
            .connect_http(self.rpc_url.clone())
            .erased();

        Ok((SignerHandle::new(address, signing), read_only))
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl std::fmt::Debug for InjectedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectedProvider")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("chain_id", &self.chain_id)
            .field("authorized", &self.authorized.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    fn provider(key: &str, pre_authorized: bool) -> InjectedProvider {
        InjectedProvider::new(
            "http://localhost:8545".parse().unwrap(),
            31337,
            key.to_string(),
            pre_authorized,
        )
    }

    #[test]
    fn test_accounts_hidden_until_requested() {
        let provider = provider(TEST_PRIVATE_KEY, false);
        assert!(provider.list_accounts().unwrap().is_empty());
        assert!(matches!(provider.connect(), Err(WalletError::NotAuthorized)));

        let accounts = provider.request_accounts().unwrap();
        assert_eq!(accounts[0].to_string().to_lowercase(), TEST_ADDRESS);
        assert_eq!(provider.list_accounts().unwrap(), accounts);
    }

    #[tokio::test]
    async fn test_pre_authorized_lists_account() {
        let provider = provider(&format!("0x{}", TEST_PRIVATE_KEY), true);
        let accounts = provider.list_accounts().unwrap();
        assert_eq!(accounts.len(), 1);

        let (signer, _read_only) = provider.connect().unwrap();
        assert_eq!(signer.address(), accounts[0]);
    }

    #[test]
    fn test_invalid_key() {
        let provider = provider("invalid_key", false);
        let err = provider.request_accounts().unwrap_err();
        assert!(err.to_string().contains("Invalid private key"));
    }

    #[test]
    fn test_debug_hides_key() {
        let provider = provider(TEST_PRIVATE_KEY, false);
        assert!(!format!("{:?}", provider).contains(TEST_PRIVATE_KEY));
    }

    #[test]
    fn test_detect_disabled() {
        let config = WalletConfig {
            enabled: false,
            ..WalletConfig::default()
        };
        assert!(InjectedProvider::detect(&config).is_none());
    }

    #[test]
    fn test_detect_without_env_key() {
        let config = WalletConfig {
            private_key_env: "CROWDFUND_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..WalletConfig::default()
        };
        assert!(InjectedProvider::detect(&config).is_none());
    }
}

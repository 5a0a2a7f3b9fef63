//! Header wallet widget: connect, disconnect and current state.

use crate::error::PortalResult;
use crate::portal::Portal;
use crate::wallet::WalletSummary;

pub fn wallet_summary(portal: &Portal) -> WalletSummary {
    portal.wallet.summary()
}

/// `POST /wallet/connect`
pub fn connect(portal: &Portal) -> PortalResult<WalletSummary> {
    Ok(portal.wallet.connect_wallet()?)
}

/// `POST /wallet/disconnect`
pub fn disconnect(portal: &Portal) -> WalletSummary {
    portal.wallet.disconnect_wallet();
    portal.wallet.summary()
}

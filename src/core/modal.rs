//! Wallet chooser abstraction.

use crate::core::error::WalletError;
use crate::core::provider::Eip1193;

/// Wallet connection methods the chooser can offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Extension-injected `window.ethereum` (MetaMask and friends).
    Injected,
    /// WalletConnect relay, paired via QR code.
    WalletConnect,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Injected, ProviderKind::WalletConnect];

    /// Stable id persisted as the cached choice.
    pub fn id(self) -> &'static str {
        match self {
            Self::Injected => "injected",
            Self::WalletConnect => "walletconnect",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Injected => "Browser Wallet",
            Self::WalletConnect => "WalletConnect",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Injected => "Connect with your browser extension",
            Self::WalletConnect => "Scan with a WalletConnect-compatible wallet",
        }
    }
}

/// UI component that lets the user pick a wallet and remembers the choice.
#[allow(async_fn_in_trait)]
pub trait ModalChooser: 'static {
    type Provider: Eip1193;

    /// Obtain a raw provider.
    ///
    /// `Ok(None)` means the user dismissed the chooser or declined the
    /// wallet prompt.
    async fn connect(&self) -> Result<Option<Self::Provider>, WalletError>;

    /// Re-enable a remembered choice without showing the chooser.
    async fn reconnect(&self, kind: ProviderKind) -> Result<Option<Self::Provider>, WalletError>;

    /// Forget the remembered choice so the next page load does not reconnect.
    fn clear_cached_provider(&self);

    /// The remembered choice from a previous session, if any.
    fn cached_provider(&self) -> Option<ProviderKind>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for kind in ProviderKind::ALL {
            assert_eq!(ProviderKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ProviderKind::from_id("coinbasewallet"), None);
    }
}

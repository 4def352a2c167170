//! Error types for the wallet layer.
//!
//! User cancellation is not an error at the bridge level: the chooser maps
//! [`WalletError::UserRejected`] to `Ok(None)` and the bridge returns
//! `Ok(())` without touching state.

use thiserror::Error;

/// Wallet-related errors for EIP-1193 / WalletConnect integration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// No injected wallet (window.ethereum) found
    #[error("No injected wallet found. Please install MetaMask or a compatible extension.")]
    NotInstalled,
    /// WalletConnect script not loaded on the page
    #[error("Provider package `{0}` is not loaded")]
    ProviderUnavailable(String),
    /// Failed to build or invoke a JS request
    #[error("Failed to create wallet request")]
    RequestCreationFailed,
    /// The wallet rejected or failed the request
    #[error("Wallet request rejected: {0}")]
    RequestRejected(String),
    /// User declined the wallet prompt (EIP-1193 code 4001)
    #[error("User rejected the request")]
    UserRejected,
    /// Signer has no account to expose
    #[error("No account returned from wallet")]
    NoAccount,
    /// Account string is not a 20-byte hex address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    /// Chain id is neither a hex string nor a number
    #[error("Invalid chain id: {0}")]
    InvalidChainId(String),
    /// A previous connect() has not finished yet
    #[error("A wallet connection is already in progress")]
    ConnectInFlight,
    /// The chooser went away while a selection was pending
    #[error("Wallet chooser closed unexpectedly")]
    ModalClosed,
}

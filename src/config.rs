//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Build-time settings are read with `option_env!` so a missing variable
//! never breaks the build.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the page title and heading.
pub const APP_NAME: &str = "walletdock";

/// Heading shown above the connect button.
pub const APP_TITLE: &str = "Web3Modal Example";

// =============================================================================
// Wallet Configuration
// =============================================================================

/// localStorage key holding the cached provider choice.
///
/// Same key the JS modal libraries use, so an existing choice is honored.
pub const CACHED_PROVIDER_KEY: &str = "WEB3_CONNECT_CACHED_PROVIDER";

/// Global injected by the `@walletconnect/web3-provider` UMD bundle.
pub const WALLETCONNECT_GLOBAL: &str = "WalletConnectProvider";

/// Infura project id handed to the WalletConnect provider.
///
/// Supplied at build time through `WALLETCONNECT_INFURA_ID`. Not validated;
/// a bad key only shows up as a connection failure.
pub const WALLETCONNECT_INFURA_ID: &str = match option_env!("WALLETCONNECT_INFURA_ID") {
    Some(id) => id,
    None => "",
};

/// Ethereum address display widths.
pub mod eth_address {
    /// Length of a full `0x`-prefixed address.
    pub const FULL_LEN: usize = 42;
    /// Characters kept at the front (`0x` plus four hex digits).
    pub const PREFIX_LEN: usize = 6;
    /// Start of the kept suffix (last four hex digits).
    pub const SUFFIX_START: usize = FULL_LEN - 4;
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

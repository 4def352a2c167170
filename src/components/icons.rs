//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuGlobe as Network, LuQrCode as QrCode, LuUser as User, LuWallet as Wallet, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsGlobe as Network, BsPerson as User, BsQrCode as QrCode, BsWallet2 as Wallet,
        BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(WALLET, Wallet);
themed_icon!(QR_CODE, QrCode);
themed_icon!(CLOSE, Close);
themed_icon!(USER, User);
themed_icon!(NETWORK, Network);

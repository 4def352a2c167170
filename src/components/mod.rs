//! UI components built with Leptos.
//!
//! - [`home`] - Landing page layout
//! - [`status`] - Address and network display
//! - [`connect`] - Connect / disconnect button
//! - [`wallet_modal`] - Wallet chooser dialog
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod connect;
pub mod home;
pub mod icons;
pub mod status;
pub mod wallet_modal;

pub use home::Home;

//! Core wallet logic.
//!
//! This module provides:
//! - [`WalletBridge`] connect/disconnect orchestration and event handling
//! - [`provider::Eip1193`] / [`Web3Provider`] provider abstraction
//! - [`modal::ModalChooser`] wallet chooser abstraction
//! - [`BrowserProvider`] / [`WebModal`] browser implementations
//! - [`chains`] static chain metadata

mod bridge;
pub mod browser;
pub mod chains;
pub mod error;
pub mod modal;
pub mod provider;
#[cfg(test)]
pub mod testing;

pub use bridge::{BridgeAction, WalletBridge};
pub use browser::{BrowserProvider, WebModal};
pub use modal::ProviderKind;
pub use provider::Web3Provider;

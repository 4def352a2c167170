//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`ConnectionState`] - Wallet connection state and its reducer
//! - [`Action`] - State transitions
//! - [`Dispatch`] - Sink the wallet bridge sends transitions to

mod connection;

pub use connection::{Action, ConnectionState, Dispatch};

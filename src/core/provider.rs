//! EIP-1193 provider abstraction.
//!
//! [`Eip1193`] is the raw transport a wallet hands out (injected extension
//! or WalletConnect). [`Web3Provider`] wraps it with the two conveniences
//! the app needs: the signer's address and the active network.

use std::rc::Rc;

use alloy_primitives::Address;
use serde::Deserialize;
use serde_json::Value;

use crate::core::chains::{chain_data, parse_chain_id};
use crate::core::error::WalletError;

/// Wallet lifecycle events, decoded from the provider's `on(...)` payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum WalletEvent {
    /// New account list; empty means the wallet revoked access.
    AccountsChanged(Vec<String>),
    /// Raw chain id as sent by the wallet (usually a hex string).
    ChainChanged(Value),
    /// Provider lost its connection.
    Disconnect(ProviderRpcError),
}

/// Error payload of the `disconnect` event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderRpcError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

impl WalletEvent {
    /// Event names the bridge subscribes to.
    pub const NAMES: [&'static str; 3] = ["accountsChanged", "chainChanged", "disconnect"];

    /// Decode a raw event payload.
    ///
    /// Returns `None` for unknown event names or payloads of the wrong shape.
    pub fn decode(name: &str, payload: Value) -> Option<Self> {
        match name {
            "accountsChanged" => {
                let accounts = payload
                    .as_array()?
                    .iter()
                    .filter_map(|a| a.as_str().map(str::to_string))
                    .collect();
                Some(Self::AccountsChanged(accounts))
            }
            "chainChanged" => Some(Self::ChainChanged(payload)),
            "disconnect" => Some(Self::Disconnect(
                serde_json::from_value(payload).unwrap_or_default(),
            )),
            _ => None,
        }
    }
}

/// Callback receiving decoded wallet events.
pub type EventHandler = Rc<dyn Fn(WalletEvent)>;

/// Raw EIP-1193 provider.
#[allow(async_fn_in_trait)]
pub trait Eip1193: Clone + 'static {
    /// Guard for registered listeners; dropping it unsubscribes.
    type Subscription;

    /// Send a JSON-RPC request (`provider.request({ method, params })`).
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;

    /// Register `handler` for every name in [`WalletEvent::NAMES`].
    ///
    /// Returns `None` when the provider has no event capability.
    fn subscribe(&self, handler: EventHandler) -> Option<Self::Subscription>;

    /// End the wallet session, if the transport has one.
    fn close(&self) {}
}

/// Active network as reported by the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Network {
    pub chain_id: u64,
    pub name: String,
}

/// Parse a hex account string into an [`Address`].
///
/// Case-insensitive; the EIP-55 checksum is not enforced.
pub fn parse_address(raw: &str) -> Result<Address, WalletError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|_| WalletError::InvalidAddress(raw.to_string()))
}

/// Higher-level provider over a raw EIP-1193 transport.
#[derive(Clone, Debug, PartialEq)]
pub struct Web3Provider<P> {
    provider: P,
}

impl<P: Eip1193> Web3Provider<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Signer for the first exposed account.
    pub fn signer(&self) -> Signer<'_, P> {
        Signer { provider: &self.provider }
    }

    /// Resolve the active network via `eth_chainId`.
    pub async fn network(&self) -> Result<Network, WalletError> {
        let raw = self
            .provider
            .request("eth_chainId", Value::Array(vec![]))
            .await?;
        let chain_id =
            parse_chain_id(&raw).ok_or_else(|| WalletError::InvalidChainId(raw.to_string()))?;
        let name = chain_data(Some(chain_id))
            .map(|c| c.network)
            .unwrap_or("unknown")
            .to_string();
        Ok(Network { chain_id, name })
    }
}

/// Account handle on a [`Web3Provider`].
pub struct Signer<'a, P> {
    provider: &'a P,
}

impl<P: Eip1193> Signer<'_, P> {
    /// Resolve the signer's address via `eth_accounts`.
    pub async fn address(&self) -> Result<Address, WalletError> {
        let accounts = self
            .provider
            .request("eth_accounts", Value::Array(vec![]))
            .await?;
        let account = accounts
            .as_array()
            .and_then(|a| a.first())
            .and_then(Value::as_str)
            .ok_or(WalletError::NoAccount)?;
        parse_address(account)
    }
}

use alloy_primitives::Address;

use crate::utils::format::shorten_address;

/// Wallet connection state.
///
/// `R` is the raw provider handle handed out by the wallet side and `W` the
/// RPC provider wrapped around it. Both are cheap handles; the state never
/// owns the underlying transport.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionState<R, W> {
    pub provider: Option<R>,
    pub web3_provider: Option<W>,
    pub address: Option<Address>,
    pub chain_id: Option<u64>,
}

impl<R, W> Default for ConnectionState<R, W> {
    fn default() -> Self {
        Self {
            provider: None,
            web3_provider: None,
            address: None,
            chain_id: None,
        }
    }
}

/// State transitions.
#[derive(Clone, Debug, PartialEq)]
pub enum Action<R, W> {
    /// Initial connect: all four fields in one step.
    SetProvider {
        provider: R,
        web3_provider: W,
        address: Address,
        chain_id: u64,
    },
    SetAddress(Option<Address>),
    SetChainId(Option<u64>),
    Reset,
}

impl<R, W> ConnectionState<R, W> {
    /// Apply an action, producing the next state.
    ///
    /// Address and chain updates arriving while disconnected are dropped so
    /// that `address`/`chain_id` are only ever set alongside a provider.
    pub fn reduce(self, action: Action<R, W>) -> Self {
        match action {
            Action::SetProvider {
                provider,
                web3_provider,
                address,
                chain_id,
            } => Self {
                provider: Some(provider),
                web3_provider: Some(web3_provider),
                address: Some(address),
                chain_id: Some(chain_id),
            },
            Action::SetAddress(address) if self.is_connected() => Self { address, ..self },
            Action::SetChainId(chain_id) if self.is_connected() => Self { chain_id, ..self },
            Action::SetAddress(_) | Action::SetChainId(_) => self,
            Action::Reset => Self::default(),
        }
    }

    /// Check if a wallet is connected
    pub fn is_connected(&self) -> bool {
        self.web3_provider.is_some()
    }

    /// Checksummed address shortened for display (`0x1234...5678`).
    pub fn display_address(&self) -> String {
        let checksummed = self.address.map(|a| a.to_checksum(None));
        shorten_address(checksummed.as_deref())
    }
}

/// Receiver of state transitions.
///
/// Implemented by the app's reactive store; the wallet bridge only ever
/// talks to this trait.
pub trait Dispatch<R, W> {
    fn dispatch(&self, action: Action<R, W>);
}

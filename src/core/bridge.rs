//! Wallet bridge.
//!
//! Runs the connect handshake against a [`ModalChooser`] and keeps the
//! connection store in sync with the wallet's `accountsChanged`,
//! `chainChanged` and `disconnect` events.
//!
//! The bridge is built once at startup and shared by cloning; clones point
//! at the same session.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::logging::{log, warn};

use crate::core::chains::parse_chain_id;
use crate::core::error::WalletError;
use crate::core::modal::{ModalChooser, ProviderKind};
use crate::core::provider::{Eip1193, EventHandler, WalletEvent, Web3Provider, parse_address};
use crate::models::{Action, Dispatch};

/// Store action specialised to a raw provider type.
pub type BridgeAction<P> = Action<P, Web3Provider<P>>;

/// Live wallet session: the raw provider plus its event listeners.
struct Session<P: Eip1193> {
    provider: P,
    _subscription: Option<P::Subscription>,
}

struct Inner<M: ModalChooser, D> {
    modal: M,
    store: D,
    connecting: Cell<bool>,
    /// Id of the live session; listeners carrying any other id are ignored.
    epoch: Cell<u64>,
    /// Last id handed out by `next_epoch`.
    issued: Cell<u64>,
    session: RefCell<Option<Session<M::Provider>>>,
}

/// Marks a connect as in flight until dropped.
struct PendingConnect<'a>(&'a Cell<bool>);

impl<'a> PendingConnect<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Result<Self, WalletError> {
        if flag.replace(true) {
            return Err(WalletError::ConnectInFlight);
        }
        Ok(Self(flag))
    }
}

impl Drop for PendingConnect<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Connects a wallet chooser to the connection store.
pub struct WalletBridge<M: ModalChooser, D> {
    inner: Rc<Inner<M, D>>,
}

impl<M: ModalChooser, D> Clone for WalletBridge<M, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M, D> WalletBridge<M, D>
where
    M: ModalChooser,
    D: Dispatch<M::Provider, Web3Provider<M::Provider>> + 'static,
{
    pub fn new(modal: M, store: D) -> Self {
        Self {
            inner: Rc::new(Inner {
                modal,
                store,
                connecting: Cell::new(false),
                epoch: Cell::new(0),
                issued: Cell::new(0),
                session: RefCell::new(None),
            }),
        }
    }

    pub fn modal(&self) -> &M {
        &self.inner.modal
    }

    /// Whether a `connect()` is currently pending.
    pub fn is_connecting(&self) -> bool {
        self.inner.connecting.get()
    }

    /// Run the connect handshake.
    ///
    /// Cancelling the chooser returns `Ok(())` without touching the store.
    /// On success exactly one [`Action::SetProvider`] is dispatched; any
    /// failure while resolving the account or network propagates and
    /// nothing is dispatched.
    pub async fn connect(&self) -> Result<(), WalletError> {
        self.handshake(None).await.map(|_| ())
    }

    /// Tear down the session and reset the store.
    ///
    /// Safe to call repeatedly. A pending `connect()` is abandoned.
    pub fn disconnect(&self) {
        self.inner.modal.clear_cached_provider();
        self.inner.epoch.set(self.next_epoch());
        if let Some(session) = self.inner.session.take() {
            session.provider.close();
        }
        self.inner.store.dispatch(Action::Reset);
    }

    /// Whether the chooser remembers a wallet for `restore()` to reconnect.
    pub fn can_restore(&self) -> bool {
        self.inner.modal.cached_provider().is_some()
    }

    /// Reconnect once if the chooser remembers a previous choice.
    ///
    /// A remembered wallet that fails or is declined is forgotten, so the
    /// next `connect()` shows the chooser again.
    pub async fn restore(&self) {
        let Some(kind) = self.inner.modal.cached_provider() else {
            return;
        };
        log!("wallet: restoring cached {} session", kind.id());
        match self.handshake(Some(kind)).await {
            Ok(true) => {}
            Ok(false) => {
                log!("wallet: cached {} session not restored", kind.id());
                self.inner.modal.clear_cached_provider();
            }
            Err(e) => {
                warn!("wallet: failed to restore session: {}", e);
                self.inner.modal.clear_cached_provider();
            }
        }
    }

    /// Returns whether a session was established.
    async fn handshake(&self, cached: Option<ProviderKind>) -> Result<bool, WalletError> {
        let _pending = PendingConnect::acquire(&self.inner.connecting)?;
        let start = self.inner.epoch.get();

        let chosen = match cached {
            Some(kind) => self.inner.modal.reconnect(kind).await?,
            None => self.inner.modal.connect().await?,
        };
        let Some(provider) = chosen else {
            log!("wallet: selection cancelled");
            return Ok(false);
        };

        let epoch = self.next_epoch();
        let subscription = provider.subscribe(self.event_handler(epoch));
        if subscription.is_none() {
            log!("wallet: provider has no event support, live updates disabled");
        }

        let web3_provider = Web3Provider::new(provider.clone());
        let address = web3_provider.signer().address().await?;
        let network = web3_provider.network().await?;

        if self.inner.epoch.get() != start {
            log!("wallet: disconnected during handshake, dropping {}", address);
            // The chooser may have remembered the wallet after disconnect cleared it.
            self.inner.modal.clear_cached_provider();
            provider.close();
            return Ok(false);
        }

        self.inner.epoch.set(epoch);
        // Replacing a previous session drops its listeners.
        *self.inner.session.borrow_mut() = Some(Session {
            provider: provider.clone(),
            _subscription: subscription,
        });

        log!(
            "wallet: connected {} on chain {} ({})",
            address,
            network.chain_id,
            network.name
        );
        self.inner.store.dispatch(Action::SetProvider {
            provider,
            web3_provider,
            address,
            chain_id: network.chain_id,
        });
        Ok(true)
    }

    /// Hand out a session id no listener has seen yet.
    fn next_epoch(&self) -> u64 {
        let next = self.inner.issued.get().wrapping_add(1);
        self.inner.issued.set(next);
        next
    }

    fn event_handler(&self, epoch: u64) -> EventHandler {
        let inner = Rc::downgrade(&self.inner);
        Rc::new(move |event: WalletEvent| {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            if inner.epoch.get() != epoch {
                log!("wallet: ignoring {:?} from a closed session", event);
                return;
            }
            Self { inner }.handle_event(event);
        })
    }

    fn handle_event(&self, event: WalletEvent) {
        match event {
            WalletEvent::AccountsChanged(accounts) => {
                log!("wallet: accountsChanged {:?}", accounts);
                let Some(account) = accounts.first() else {
                    // Empty list: the wallet revoked access.
                    self.disconnect();
                    return;
                };
                match parse_address(account) {
                    Ok(address) => self.inner.store.dispatch(Action::SetAddress(Some(address))),
                    Err(e) => warn!("wallet: {}", e),
                }
            }
            WalletEvent::ChainChanged(raw) => {
                log!("wallet: chainChanged {}", raw);
                match parse_chain_id(&raw) {
                    Some(chain_id) => self.inner.store.dispatch(Action::SetChainId(Some(chain_id))),
                    None => warn!("wallet: {}", WalletError::InvalidChainId(raw.to_string())),
                }
            }
            WalletEvent::Disconnect(error) => {
                log!(
                    "wallet: disconnect (code {:?}) {}",
                    error.code,
                    error.message
                );
                self.disconnect();
            }
        }
    }
}

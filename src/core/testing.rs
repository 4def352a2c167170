//! In-memory wallet doubles for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use futures::channel::oneshot;
use serde_json::{Value, json};

use crate::core::error::WalletError;
use crate::core::modal::{ModalChooser, ProviderKind};
use crate::core::provider::{Eip1193, EventHandler, WalletEvent, Web3Provider};
use crate::models::{Action, ConnectionState, Dispatch};

#[derive(Default)]
struct ProviderShared {
    responses: RefCell<HashMap<String, Result<Value, WalletError>>>,
    requests: RefCell<Vec<String>>,
    handler: RefCell<Option<EventHandler>>,
    closed: Cell<bool>,
}

/// Scripted EIP-1193 provider.
#[derive(Clone)]
pub struct MockProvider {
    shared: Rc<ProviderShared>,
    events: bool,
}

impl MockProvider {
    pub fn new(account: &str, chain_id: &str) -> Self {
        let provider = Self {
            shared: Rc::default(),
            events: true,
        };
        provider.set_response("eth_accounts", Ok(json!([account])));
        provider.set_response("eth_chainId", Ok(json!(chain_id)));
        provider
    }

    /// Provider lacking `on(...)`.
    pub fn without_events(account: &str, chain_id: &str) -> Self {
        Self {
            events: false,
            ..Self::new(account, chain_id)
        }
    }

    pub fn set_response(&self, method: &str, response: Result<Value, WalletError>) {
        self.shared
            .responses
            .borrow_mut()
            .insert(method.to_string(), response);
    }

    pub fn request_count(&self, method: &str) -> usize {
        self.shared
            .requests
            .borrow()
            .iter()
            .filter(|m| *m == method)
            .count()
    }

    pub fn handler(&self) -> Option<EventHandler> {
        self.shared.handler.borrow().clone()
    }

    pub fn is_subscribed(&self) -> bool {
        self.shared.handler.borrow().is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.get()
    }

    /// Deliver a raw event the way a wallet would.
    pub fn emit(&self, name: &str, payload: Value) {
        let event = WalletEvent::decode(name, payload).expect("known event");
        if let Some(handler) = self.handler() {
            handler(event);
        }
    }
}

impl PartialEq for MockProvider {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockProvider")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

/// Clears the provider's handler on drop.
pub struct MockSubscription(Rc<ProviderShared>);

impl Drop for MockSubscription {
    fn drop(&mut self) {
        self.0.handler.borrow_mut().take();
    }
}

impl Eip1193 for MockProvider {
    type Subscription = MockSubscription;

    async fn request(&self, method: &str, _params: Value) -> Result<Value, WalletError> {
        self.shared.requests.borrow_mut().push(method.to_string());
        self.shared
            .responses
            .borrow()
            .get(method)
            .cloned()
            .unwrap_or_else(|| Err(WalletError::RequestRejected(format!("{} unsupported", method))))
    }

    fn subscribe(&self, handler: EventHandler) -> Option<MockSubscription> {
        if !self.events {
            return None;
        }
        self.shared.handler.replace(Some(handler));
        Some(MockSubscription(Rc::clone(&self.shared)))
    }

    fn close(&self) {
        self.shared.closed.set(true);
    }
}

/// Chooser returning queued outcomes.
#[derive(Default)]
pub struct MockModal {
    outcomes: RefCell<VecDeque<Result<Option<MockProvider>, WalletError>>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    cached: Cell<Option<ProviderKind>>,
    connect_calls: Cell<usize>,
    reconnects: RefCell<Vec<ProviderKind>>,
    clear_calls: Cell<usize>,
}

impl MockModal {
    pub fn push(&self, outcome: Result<Option<MockProvider>, WalletError>) {
        self.outcomes.borrow_mut().push_back(outcome);
    }

    /// Make the next `connect()` wait until `gate` fires.
    pub fn hold(&self, gate: oneshot::Receiver<()>) {
        self.gate.replace(Some(gate));
    }

    pub fn set_cached(&self, kind: Option<ProviderKind>) {
        self.cached.set(kind);
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.get()
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.get()
    }

    /// Kinds passed to `reconnect()`, in call order.
    pub fn reconnects(&self) -> Vec<ProviderKind> {
        self.reconnects.borrow().clone()
    }

    async fn next_outcome(&self) -> Result<Option<MockProvider>, WalletError> {
        let gate = self.gate.take();
        if let Some(gate) = gate {
            gate.await.map_err(|_| WalletError::ModalClosed)?;
        }
        self.outcomes.borrow_mut().pop_front().unwrap_or(Ok(None))
    }
}

impl ModalChooser for MockModal {
    type Provider = MockProvider;

    async fn connect(&self) -> Result<Option<MockProvider>, WalletError> {
        self.connect_calls.set(self.connect_calls.get() + 1);
        self.next_outcome().await
    }

    async fn reconnect(&self, kind: ProviderKind) -> Result<Option<MockProvider>, WalletError> {
        self.reconnects.borrow_mut().push(kind);
        self.next_outcome().await
    }

    fn clear_cached_provider(&self) {
        self.clear_calls.set(self.clear_calls.get() + 1);
        self.cached.set(None);
    }

    fn cached_provider(&self) -> Option<ProviderKind> {
        self.cached.get()
    }
}

pub type MockState = ConnectionState<MockProvider, Web3Provider<MockProvider>>;
pub type MockAction = Action<MockProvider, Web3Provider<MockProvider>>;

/// Store that applies and records every dispatched action.
#[derive(Clone, Default)]
pub struct RecordingStore {
    state: Rc<RefCell<MockState>>,
    actions: Rc<RefCell<Vec<MockAction>>>,
}

impl RecordingStore {
    pub fn state(&self) -> MockState {
        self.state.borrow().clone()
    }

    pub fn actions(&self) -> Vec<MockAction> {
        self.actions.borrow().clone()
    }
}

impl Dispatch<MockProvider, Web3Provider<MockProvider>> for RecordingStore {
    fn dispatch(&self, action: MockAction) {
        self.actions.borrow_mut().push(action.clone());
        let current = self.state.take();
        self.state.replace(current.reduce(action));
    }
}

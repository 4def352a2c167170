//! Root application module.
//!
//! Contains the main App component, the AppContext definition, the reactive
//! connection store, and application-level setup logic following Leptos
//! conventions.

use leptos::logging::error;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::Home;
use crate::config::APP_NAME;
use crate::core::{BridgeAction, BrowserProvider, WalletBridge, WebModal, Web3Provider};
use crate::models::{ConnectionState, Dispatch};
use crate::utils::dom;

/// Connection state as held by the page.
pub type BrowserState = ConnectionState<BrowserProvider, Web3Provider<BrowserProvider>>;

/// Bridge wired to the browser chooser and the reactive store.
pub type Bridge = WalletBridge<WebModal, ConnectionStore>;

// ============================================================================
// ConnectionStore
// ============================================================================

/// Reactive home of the single [`BrowserState`].
///
/// JS provider handles are not `Send`, so the signal uses local storage.
/// Every dispatch replaces the state with the reducer's output.
#[derive(Clone, Copy)]
pub struct ConnectionStore {
    pub state: RwSignal<BrowserState, LocalStorage>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new_local(BrowserState::default()),
        }
    }
}

impl Default for ConnectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatch<BrowserProvider, Web3Provider<BrowserProvider>> for ConnectionStore {
    fn dispatch(&self, action: BridgeAction<BrowserProvider>) {
        self.state
            .update(|state| *state = std::mem::take(state).reduce(action));
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed from children
/// with `use_context::<AppContext>()`. The bridge holds `Rc`s, so it sits
/// in a local stored value to keep the context `Copy`.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Wallet connection state.
    pub store: ConnectionStore,
    /// Connect/disconnect orchestration.
    pub bridge: StoredValue<Bridge, LocalStorage>,
    /// A connect is in flight.
    pub connecting: RwSignal<bool>,
    /// Message from the last failed connect.
    pub last_error: RwSignal<Option<String>>,
}

impl AppContext {
    /// Creates the context with a disconnected store.
    ///
    /// The bridge is constructed here, once, and shared by every component.
    pub fn new() -> Self {
        let store = ConnectionStore::new();
        let bridge = WalletBridge::new(WebModal::new(), store);
        Self {
            store,
            bridge: StoredValue::new_local(bridge),
            connecting: RwSignal::new(false),
            last_error: RwSignal::new(None),
        }
    }

    /// Start the connect handshake in the background.
    ///
    /// Clicks while a handshake is pending are ignored.
    pub fn connect(&self) {
        let ctx = *self;
        let bridge = ctx.bridge.get_value();
        if bridge.is_connecting() {
            return;
        }
        spawn_local(async move {
            ctx.last_error.set(None);
            ctx.connecting.set(true);
            if let Err(e) = bridge.connect().await {
                error!("wallet: connection failed: {}", e);
                ctx.last_error.set(Some(e.to_string()));
            }
            ctx.connecting.set(false);
        });
    }

    pub fn disconnect(&self) {
        self.last_error.set(None);
        self.bridge.with_value(|bridge| bridge.disconnect());
    }

    /// Reconnect a remembered wallet once at startup.
    ///
    /// Nothing is spawned when no wallet is remembered.
    pub fn restore(&self) {
        let ctx = *self;
        let bridge = ctx.bridge.get_value();
        if !bridge.can_restore() {
            return;
        }
        spawn_local(async move {
            ctx.connecting.set(true);
            bridge.restore().await;
            ctx.connecting.set(false);
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Restores a cached wallet session
/// - Renders the Home page inside an ErrorBoundary
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    dom::set_title(APP_NAME);
    ctx.restore();

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    min-height: 100vh;
                    padding: 2rem;
                ">
                    <h1 style="color: #d33; margin-bottom: 1rem;">"Something went wrong"</h1>
                    <ul style="color: #d33;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }
                    >
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <Home />
        </ErrorBoundary>
    }
}


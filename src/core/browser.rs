//! Browser wallet adapters using web-sys.
//!
//! [`BrowserProvider`] talks EIP-1193 to either the extension-injected
//! `window.ethereum` or a WalletConnect provider built from the
//! `WalletConnectProvider` UMD global, through the Reflect API.
//! [`WebModal`] is the chooser behind the wallet modal component; it
//! remembers the last choice in localStorage.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use js_sys::{Array, Function, Object, Promise, Reflect};
use leptos::logging::warn;
use leptos::prelude::*;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use crate::config::{CACHED_PROVIDER_KEY, WALLETCONNECT_GLOBAL, WALLETCONNECT_INFURA_ID};
use crate::core::error::WalletError;
use crate::core::modal::{ModalChooser, ProviderKind};
use crate::core::provider::{Eip1193, EventHandler, WalletEvent};
use crate::utils::dom;

/// EIP-1193 code for "user rejected the request".
const USER_REJECTED: f64 = 4001.0;

// ============================================================================
// JS helpers
// ============================================================================

/// Look up `target[name]` as a callable function.
fn method(target: &Object, name: &str) -> Result<Function, WalletError> {
    Reflect::get(target, &name.into())
        .map_err(|_| WalletError::RequestCreationFailed)?
        .dyn_into::<Function>()
        .map_err(|_| WalletError::RequestCreationFailed)
}

/// Best-effort human readable message from a thrown JS value.
fn js_error_message(error: &JsValue) -> String {
    Reflect::get(error, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| error.as_string())
        .unwrap_or_else(|| format!("{:?}", error))
}

/// Map a rejected wallet promise to a [`WalletError`].
fn rejection(error: JsValue) -> WalletError {
    let code = Reflect::get(&error, &"code".into())
        .ok()
        .and_then(|c| c.as_f64());
    let message = js_error_message(&error);
    // WalletConnect reports a dismissed QR modal as a plain Error.
    if code == Some(USER_REJECTED) || message.contains("User closed modal") {
        WalletError::UserRejected
    } else {
        WalletError::RequestRejected(message)
    }
}

fn to_js(value: &impl Serialize) -> Result<JsValue, WalletError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|_| WalletError::RequestCreationFailed)
}

async fn await_promise(value: JsValue) -> Result<JsValue, WalletError> {
    let promise = value
        .dyn_into::<Promise>()
        .map_err(|_| WalletError::RequestCreationFailed)?;
    JsFuture::from(promise).await.map_err(rejection)
}

// ============================================================================
// BrowserProvider
// ============================================================================

/// Raw EIP-1193 provider living in the page.
#[derive(Clone, Debug)]
pub struct BrowserProvider {
    inner: Object,
    kind: ProviderKind,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WalletConnectOptions<'a> {
    infura_id: &'a str,
}

impl BrowserProvider {
    /// The extension-injected `window.ethereum`.
    pub fn injected() -> Result<Self, WalletError> {
        dom::window().ok_or(WalletError::NoWindow)?;
        let inner = dom::global_object("ethereum").ok_or(WalletError::NotInstalled)?;
        Ok(Self {
            inner,
            kind: ProviderKind::Injected,
        })
    }

    /// Build a WalletConnect provider and run its pairing flow.
    pub async fn wallet_connect(infura_id: &str) -> Result<Self, WalletError> {
        let global = dom::global_object(WALLETCONNECT_GLOBAL)
            .ok_or_else(|| WalletError::ProviderUnavailable(WALLETCONNECT_GLOBAL.to_string()))?;
        // UMD bundles export the class as `default`.
        let constructor = Reflect::get(&global, &"default".into())
            .ok()
            .and_then(|d| d.dyn_into::<Function>().ok())
            .or_else(|| global.dyn_ref::<Function>().cloned())
            .ok_or_else(|| WalletError::ProviderUnavailable(WALLETCONNECT_GLOBAL.to_string()))?;

        let options = to_js(&WalletConnectOptions { infura_id })?;
        let instance = Reflect::construct(&constructor, &Array::of1(&options))
            .map_err(|e| WalletError::RequestRejected(js_error_message(&e)))?;
        let provider = Self {
            inner: instance.unchecked_into(),
            kind: ProviderKind::WalletConnect,
        };

        let enable = method(&provider.inner, "enable")?;
        let pending = enable
            .call0(&provider.inner)
            .map_err(|_| WalletError::RequestCreationFailed)?;
        await_promise(pending).await?;
        Ok(provider)
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Ask the wallet to expose accounts (shows the extension popup).
    pub async fn request_accounts(&self) -> Result<(), WalletError> {
        self.request("eth_requestAccounts", Value::Array(vec![]))
            .await
            .map(|_| ())
    }
}

/// JS listeners registered through `on(...)`; removed again on drop.
pub struct Listeners {
    target: Object,
    entries: Vec<(&'static str, Closure<dyn Fn(JsValue)>)>,
}

impl Drop for Listeners {
    fn drop(&mut self) {
        let Ok(remove) = method(&self.target, "removeListener") else {
            return;
        };
        for (name, closure) in &self.entries {
            let _ = remove.call2(&self.target, &(*name).into(), closure.as_ref());
        }
    }
}

impl Eip1193 for BrowserProvider {
    type Subscription = Listeners;

    async fn request(&self, method_name: &str, params: Value) -> Result<Value, WalletError> {
        // Create { method: "...", params: [...] } object
        let args = Object::new();
        Reflect::set(&args, &"method".into(), &method_name.into())
            .map_err(|_| WalletError::RequestCreationFailed)?;
        if !params.as_array().is_some_and(Vec::is_empty) {
            Reflect::set(&args, &"params".into(), &to_js(&params)?)
                .map_err(|_| WalletError::RequestCreationFailed)?;
        }

        let request = method(&self.inner, "request")?;
        let pending = request
            .call1(&self.inner, &args)
            .map_err(|_| WalletError::RequestCreationFailed)?;
        let result = await_promise(pending).await?;

        serde_wasm_bindgen::from_value(result)
            .map_err(|e| WalletError::RequestRejected(e.to_string()))
    }

    fn subscribe(&self, handler: EventHandler) -> Option<Listeners> {
        let on = method(&self.inner, "on").ok()?;
        let mut listeners = Listeners {
            target: self.inner.clone(),
            entries: Vec::with_capacity(WalletEvent::NAMES.len()),
        };

        for name in WalletEvent::NAMES {
            let handler = handler.clone();
            let closure = Closure::wrap(Box::new(move |payload: JsValue| {
                let payload = serde_wasm_bindgen::from_value(payload).unwrap_or(Value::Null);
                match WalletEvent::decode(name, payload) {
                    Some(event) => handler(event),
                    None => warn!("wallet: malformed `{}` payload", name),
                }
            }) as Box<dyn Fn(JsValue)>);

            if on
                .call2(&self.inner, &name.into(), closure.as_ref())
                .is_err()
            {
                warn!("wallet: failed to subscribe to `{}`", name);
                return None;
            }
            listeners.entries.push((name, closure));
        }

        Some(listeners)
    }

    fn close(&self) {
        if self.kind != ProviderKind::WalletConnect {
            return;
        }
        let Ok(disconnect) = method(&self.inner, "disconnect") else {
            return;
        };
        match disconnect.call0(&self.inner) {
            Ok(pending) => spawn_local(async move {
                if let Err(e) = await_promise(pending).await {
                    warn!("wallet: WalletConnect session close failed: {}", e);
                }
            }),
            Err(e) => warn!(
                "wallet: WalletConnect session close failed: {}",
                js_error_message(&e)
            ),
        }
    }
}

// ============================================================================
// WebModal
// ============================================================================

struct ModalInner {
    pending: RefCell<Option<oneshot::Sender<Option<ProviderKind>>>>,
    open: RwSignal<bool>,
    infura_id: &'static str,
}

/// Browser wallet chooser.
///
/// `connect()` always opens the modal and waits for [`WebModal::select`];
/// only `reconnect()` uses the remembered choice.
#[derive(Clone)]
pub struct WebModal {
    inner: Rc<ModalInner>,
}

impl Default for WebModal {
    fn default() -> Self {
        Self::new()
    }
}

impl WebModal {
    /// Create the chooser. Must run inside the reactive owner of the app.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ModalInner {
                pending: RefCell::new(None),
                open: RwSignal::new(false),
                infura_id: WALLETCONNECT_INFURA_ID,
            }),
        }
    }

    /// Whether the chooser is showing.
    pub fn is_open(&self) -> ReadSignal<bool> {
        self.inner.open.read_only()
    }

    /// Connection methods usable on this page.
    pub fn options(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                ProviderKind::Injected => dom::global_object("ethereum").is_some(),
                ProviderKind::WalletConnect => dom::global_object(WALLETCONNECT_GLOBAL).is_some(),
            })
            .collect()
    }

    /// Resolve the pending selection; `None` dismisses the chooser.
    pub fn select(&self, kind: Option<ProviderKind>) {
        if let Some(sender) = self.inner.pending.take() {
            let _ = sender.send(kind);
        }
        self.inner.open.set(false);
    }

    async fn choose(&self) -> Result<Option<ProviderKind>, WalletError> {
        let (sender, receiver) = oneshot::channel();
        if let Some(previous) = self.inner.pending.replace(Some(sender)) {
            let _ = previous.send(None);
        }
        self.inner.open.set(true);
        let choice = receiver.await.map_err(|_| WalletError::ModalClosed);
        self.inner.open.set(false);
        choice
    }

    async fn enable(&self, kind: ProviderKind) -> Result<BrowserProvider, WalletError> {
        match kind {
            ProviderKind::Injected => {
                let provider = BrowserProvider::injected()?;
                provider.request_accounts().await?;
                Ok(provider)
            }
            ProviderKind::WalletConnect => BrowserProvider::wallet_connect(self.inner.infura_id).await,
        }
    }

    fn cache(&self, kind: ProviderKind) {
        if let Some(storage) = dom::local_storage()
            && let Ok(json) = serde_json::to_string(kind.id())
        {
            let _ = storage.set_item(CACHED_PROVIDER_KEY, &json);
        }
    }
}

/// Parse the stored choice; accepts both a JSON string and a bare id.
fn parse_cached(raw: &str) -> Option<ProviderKind> {
    let id = serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string());
    ProviderKind::from_id(&id)
}

impl ModalChooser for WebModal {
    type Provider = BrowserProvider;

    async fn connect(&self) -> Result<Option<BrowserProvider>, WalletError> {
        match self.choose().await? {
            Some(kind) => self.reconnect(kind).await,
            None => Ok(None),
        }
    }

    async fn reconnect(&self, kind: ProviderKind) -> Result<Option<BrowserProvider>, WalletError> {
        match self.enable(kind).await {
            Ok(provider) => {
                self.cache(kind);
                Ok(Some(provider))
            }
            Err(WalletError::UserRejected) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn clear_cached_provider(&self) {
        if let Some(storage) = dom::local_storage() {
            let _ = storage.remove_item(CACHED_PROVIDER_KEY);
        }
    }

    fn cached_provider(&self) -> Option<ProviderKind> {
        dom::local_storage()
            .and_then(|s| s.get_item(CACHED_PROVIDER_KEY).ok().flatten())
            .and_then(|raw| parse_cached(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cached_json_string() {
        assert_eq!(parse_cached("\"injected\""), Some(ProviderKind::Injected));
        assert_eq!(
            parse_cached("\"walletconnect\""),
            Some(ProviderKind::WalletConnect)
        );
    }

    #[test]
    fn test_parse_cached_bare_id() {
        assert_eq!(parse_cached("injected"), Some(ProviderKind::Injected));
    }

    #[test]
    fn test_parse_cached_unknown() {
        assert_eq!(parse_cached("\"torus\""), None);
        assert_eq!(parse_cached(""), None);
    }
}

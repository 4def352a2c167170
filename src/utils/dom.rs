//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Storage, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Read a global object property off `window` (e.g. `window.ethereum`).
///
/// Returns `None` when there is no window or the property is not an object.
pub fn global_object(name: &str) -> Option<Object> {
    let window = window()?;
    Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.dyn_into::<Object>().ok())
}

/// Set `document.title`.
pub fn set_title(title: &str) {
    if let Some(document) = window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

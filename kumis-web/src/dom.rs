//! Thin browser accessors.
use web_sys::{Storage, Window};

#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// `localStorage`, when the browser allows it.
#[must_use]
pub fn local_storage() -> Option<Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

/// Log an error to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&wasm_bindgen::JsValue::from(message));
}

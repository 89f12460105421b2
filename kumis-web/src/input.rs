//! Keyboard mapping from DOM events to game keys.
use kumis_game::InputKey;

/// Tags whose key presses belong to the element, not the game.
const TEXT_ENTRY_TAGS: [&str; 2] = ["INPUT", "TEXTAREA"];

#[must_use]
pub fn is_text_entry(tag_name: &str) -> bool {
    TEXT_ENTRY_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(tag_name))
}

/// Map a `KeyboardEvent.key` value, ignoring keys typed into form fields.
///
/// Enter and Space on a focused button are left to the button so its own
/// click handler runs.
#[must_use]
pub fn game_key(key: &str, target_tag: Option<&str>) -> Option<InputKey> {
    if target_tag.is_some_and(is_text_entry) {
        return None;
    }
    let key = InputKey::from_key_name(key)?;
    if key.advances() && target_tag.is_some_and(|tag| tag.eq_ignore_ascii_case("BUTTON")) {
        return None;
    }
    Some(key)
}

#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn from_keyboard_event(event: &web_sys::KeyboardEvent) -> Option<InputKey> {
    use wasm_bindgen::JsCast;

    let tag = event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .map(|el| el.tag_name());
    game_key(&event.key(), tag.as_deref())
}

/// Window-level `keydown` subscription, removed on drop.
#[cfg(target_arch = "wasm32")]
pub struct KeyListener {
    closure: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

#[cfg(target_arch = "wasm32")]
impl KeyListener {
    #[must_use]
    pub fn attach(on_key: yew::Callback<InputKey>) -> Option<Self> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let window = crate::dom::window()?;
        let closure = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |event: web_sys::KeyboardEvent| {
                if let Some(key) = from_keyboard_event(&event) {
                    // Space and arrows would otherwise scroll the page.
                    if !matches!(key, InputKey::Char(_)) {
                        event.prevent_default();
                    }
                    on_key.emit(key);
                }
            },
        );
        window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(|err| log::warn!("keydown listener rejected: {err:?}"))
            .ok()?;
        Some(Self { closure })
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for KeyListener {
    fn drop(&mut self) {
        use wasm_bindgen::JsCast;

        if let Some(window) = crate::dom::window() {
            let _ = window
                .remove_event_listener_with_callback("keydown", self.closure.as_ref().unchecked_ref());
        }
    }
}

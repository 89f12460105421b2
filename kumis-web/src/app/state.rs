//! Reducer-backed application model.
use kumis_game::{Content, ControllerEvent, GameConfig, GameController};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Game(ControllerEvent),
    SetLang(String),
}

/// Everything the root component renders from.
#[derive(Debug, Clone)]
pub struct AppModel {
    pub controller: Rc<GameController>,
    pub lang: String,
    /// Set when the bundled story failed to load and the game runs empty.
    pub load_error: Option<String>,
}

impl AppModel {
    #[must_use]
    pub fn boot(seed: u64) -> Self {
        let (content, load_error) = match Content::load_from_static() {
            Ok(content) => (content, None),
            Err(err) => {
                log::error!("story content failed to load: {err}");
                #[cfg(target_arch = "wasm32")]
                crate::dom::console_error(&format!("story content failed to load: {err}"));
                (Content::default(), Some(err.to_string()))
            }
        };
        let controller = GameController::new(content, GameConfig::load_from_static(), seed);
        Self {
            controller: Rc::new(controller),
            lang: crate::i18n::current_lang(),
            load_error,
        }
    }
}

impl PartialEq for AppModel {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
            && self.lang == other.lang
            && self.load_error == other.load_error
    }
}

impl Reducible for AppModel {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AppAction::Game(event) => {
                let mut controller = (*self.controller).clone();
                controller.handle(event);
                Rc::new(Self {
                    controller: Rc::new(controller),
                    lang: self.lang.clone(),
                    load_error: self.load_error.clone(),
                })
            }
            AppAction::SetLang(lang) => {
                crate::i18n::set_lang(&lang);
                Rc::new(Self {
                    controller: self.controller.clone(),
                    lang: crate::i18n::current_lang(),
                    load_error: self.load_error.clone(),
                })
            }
        }
    }
}

/// Seed for a fresh session: wall-clock based in the browser, fixed elsewhere.
#[must_use]
pub fn session_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let now = js_sys::Date::now() as u64;
        now ^ (js_sys::Math::random().to_bits())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0x4B55_4D49_53
    }
}

pub mod credits;
pub mod ending;
pub mod gallery;
pub mod menu;
pub mod player_form;
pub mod story;

pub use credits::CreditsPage;
pub use ending::EndingPage;
pub use gallery::GalleryPage;
pub use menu::MenuPage;
pub use player_form::PlayerFormPage;
pub use story::StoryPage;

use kumis_game::{ControllerEvent, GameController};
use std::rc::Rc;
use yew::prelude::*;

/// Shared props for every screen: a snapshot of the controller and the
/// channel back into it.
#[derive(Properties, Clone)]
pub struct ScreenProps {
    pub controller: Rc<GameController>,
    pub on_event: Callback<ControllerEvent>,
}

impl PartialEq for ScreenProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller) && self.on_event == other.on_event
    }
}

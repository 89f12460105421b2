mod state;
mod timer;

pub use state::{AppAction, AppModel, session_seed};
pub use timer::{TimerDriver, TimerDriverProps};

use crate::components::LangToggle;
use crate::pages::{
    CreditsPage, EndingPage, GalleryPage, MenuPage, PlayerFormPage, ScreenProps, StoryPage,
};
use kumis_game::{ControllerEvent, Screen};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let model = use_reducer(|| AppModel::boot(session_seed()));

    let on_event = {
        let model = model.clone();
        Callback::from(move |event: ControllerEvent| model.dispatch(AppAction::Game(event)))
    };
    let on_lang = {
        let model = model.clone();
        Callback::from(move |lang: String| model.dispatch(AppAction::SetLang(lang)))
    };

    #[cfg(target_arch = "wasm32")]
    {
        let on_key = on_event.reform(ControllerEvent::Key);
        use_effect_with((), move |()| {
            let listener = crate::input::KeyListener::attach(on_key);
            move || drop(listener)
        });
    }

    let on_tick = on_event.reform(ControllerEvent::Tick);
    let timers = model.controller.timers();
    let screen = model.controller.screen();
    let props = ScreenProps {
        controller: model.controller.clone(),
        on_event,
    };

    let body = match screen {
        Screen::Menu => html! { <MenuPage ..props /> },
        Screen::PlayerForm => html! { <PlayerFormPage ..props /> },
        Screen::Story(_) => html! { <StoryPage ..props /> },
        Screen::Ending => html! { <EndingPage ..props /> },
        Screen::Gallery => html! { <GalleryPage ..props /> },
        Screen::Credits => html! { <CreditsPage ..props /> },
    };

    html! {
        <div class="kumis-app" lang={model.lang.clone()} data-testid="app-root">
            { for timers.into_iter().map(|spec| html! {
                <TimerDriver key={spec.key()} {spec} on_tick={on_tick.clone()} />
            }) }
            if let Some(err) = model.load_error.as_ref() {
                <div class="alert alert-error" role="alert" data-testid="load-error">{ err.clone() }</div>
            }
            <LangToggle current={model.lang.clone()} on_change={on_lang} />
            <main class="kumis-main">{ body }</main>
        </div>
    }
}

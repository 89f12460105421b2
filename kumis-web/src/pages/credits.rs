use super::ScreenProps;
use crate::i18n::t;
use kumis_game::ControllerEvent;
use yew::prelude::*;

#[function_component(CreditsPage)]
pub fn credits_page(props: &ScreenProps) -> Html {
    let creators = props.controller.content().creators();
    let on_back = props
        .on_event
        .reform(|_: MouseEvent| ControllerEvent::BackToMenu);

    html! {
        <div class="min-h-screen flex items-center justify-center shell-screen" data-testid="credits-screen">
            <div class="card shell-card">
                <div class="card-body gap-4">
                    <h2 class="card-title">{ t("credits.title") }</h2>
                    <p>{ t("credits.body") }</p>
                    if !creators.is_empty() {
                        <h3 class="font-bold">{ t("credits.creators") }</h3>
                        <ul data-testid="credits-creators">
                            { for creators.iter().map(|name| html! { <li>{ name.clone() }</li> }) }
                        </ul>
                    }
                    <button type="button" class="btn" data-testid="credits-back" onclick={on_back}>{ t("ui.back") }</button>
                </div>
            </div>
        </div>
    }
}

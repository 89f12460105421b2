use super::ScreenProps;
use crate::i18n::t;
use kumis_game::ControllerEvent;
use web_sys::HtmlInputElement;
use yew::prelude::*;

fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

#[function_component(PlayerFormPage)]
pub fn player_form_page(props: &ScreenProps) -> Html {
    let form = props.controller.form();

    let on_name = props
        .on_event
        .reform(|e: InputEvent| ControllerEvent::PlayerName(input_value(&e)));
    let on_class = props
        .on_event
        .reform(|e: InputEvent| ControllerEvent::PlayerClass(input_value(&e)));
    let onsubmit = props.on_event.reform(|e: SubmitEvent| {
        e.prevent_default();
        ControllerEvent::SubmitPlayer
    });

    html! {
        <div class="min-h-screen flex items-center justify-center shell-screen" data-testid="player-form-screen">
            <form class="card shell-card player-form" {onsubmit} novalidate=true>
                <div class="card-body gap-4">
                    <h2 class="card-title">{ t("form.title") }</h2>
                    <label class="form-control">
                        <span class="label-text">{ t("form.name") }</span>
                        <input
                            type="text"
                            class="input input-bordered"
                            name="player-name"
                            data-testid="player-name"
                            placeholder={t("form.name_placeholder")}
                            value={form.name.clone()}
                            oninput={on_name}
                        />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ t("form.class") }</span>
                        <input
                            type="text"
                            class="input input-bordered"
                            name="player-class"
                            data-testid="player-class"
                            placeholder={t("form.class_placeholder")}
                            value={form.class.clone()}
                            oninput={on_class}
                        />
                    </label>
                    if let Some(err) = form.error {
                        <p class="text-error" role="alert" data-testid="player-form-error">{ err.to_string() }</p>
                    }
                    <div class="card-actions justify-end">
                        <button type="submit" class="btn btn-primary" data-testid="player-submit">{ t("form.submit") }</button>
                    </div>
                </div>
            </form>
        </div>
    }
}

use super::ScreenProps;
use crate::components::Modal;
use crate::i18n::t;
use kumis_game::{ControllerEvent, MenuOption};
use yew::prelude::*;

const INSTRUCTION_KEYS: [&str; 4] = [
    "instructions.read",
    "instructions.skip",
    "instructions.play",
    "instructions.ending",
];

#[function_component(MenuPage)]
pub fn menu_page(props: &ScreenProps) -> Html {
    let menu = props.controller.menu();
    let selected = menu.selected();

    let options = MenuOption::ALL.iter().copied().map(|option| {
        let is_selected = option == selected;
        let onclick = props
            .on_event
            .reform(move |_: MouseEvent| ControllerEvent::MenuSelect(option));
        let onmouseenter = props
            .on_event
            .reform(move |_: MouseEvent| ControllerEvent::MenuHover(option));
        html! {
            <li>
                <button
                    type="button"
                    class={classes!("btn", "menu-option", is_selected.then_some("btn-active"))}
                    aria-current={is_selected.then_some("true")}
                    data-testid={format!("menu-{}", option.as_str())}
                    {onclick}
                    {onmouseenter}
                >
                    <span class="menu-option__icon" aria-hidden="true">{ option.icon() }</span>
                    { t(&format!("menu.{}", option.as_str())) }
                </button>
            </li>
        }
    });

    let open_instructions = props
        .on_event
        .reform(|_: MouseEvent| ControllerEvent::OpenInstructions);
    let close_instructions = props.on_event.reform(|()| ControllerEvent::CloseInstructions);
    let close_button = close_instructions.reform(|_: MouseEvent| ());

    html! {
        <div class="min-h-screen flex items-center justify-center shell-screen menu-screen" data-testid="menu-screen">
            <div class="card shell-card">
                <div class="card-body items-center text-center gap-6">
                    <div class="space-y-1">
                        <h1 class="text-2xl font-bold tracking-tight">{ t("app.title") }</h1>
                        <p class="text-xs opacity-60">{ t("app.subtitle") }</p>
                    </div>
                    <ul class="menu" role="menu">{ for options }</ul>
                    <button type="button" class="btn btn-ghost btn-sm" data-testid="menu-instructions" onclick={open_instructions}>
                        { t("menu.instructions") }
                    </button>
                    <div class="text-xs opacity-50">{ t("menu.hint") }</div>
                </div>
            </div>
            <Modal
                open={menu.instructions_open()}
                title={t("instructions.title")}
                on_close={close_instructions}
                testid="instructions-modal"
            >
                <ol class="instructions">
                    { for INSTRUCTION_KEYS.iter().map(|key| html! { <li>{ t(key) }</li> }) }
                </ol>
                <button type="button" class="btn btn-primary" onclick={close_button}>
                    { t("instructions.close") }
                </button>
            </Modal>
        </div>
    }
}

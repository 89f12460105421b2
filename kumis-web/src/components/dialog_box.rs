use crate::components::{Modal, Portrait};
use crate::i18n::t;
use crate::pages::ScreenProps;
use kumis_game::{ControllerEvent, DialogState};
use yew::prelude::*;

/// Speaker box with typewriter text, choices and the skip prompt.
#[function_component(DialogBox)]
pub fn dialog_box(props: &ScreenProps) -> Html {
    let Some(scene) = props.controller.scene() else {
        return Html::default();
    };
    let dialog = scene.dialog();
    let Some(line) = dialog.current_line() else {
        return Html::default();
    };
    let state = dialog.state();
    let portrait = props
        .controller
        .content()
        .portrait(&line.speaker)
        .map(|src| AttrValue::from(src.to_string()));

    let on_advance = props
        .on_event
        .reform(|_: MouseEvent| ControllerEvent::AdvanceDialog);
    let on_skip = props.on_event.reform(|e: MouseEvent| {
        e.stop_propagation();
        ControllerEvent::RequestSkip
    });
    let on_cancel = props.on_event.reform(|()| ControllerEvent::CancelSkip);
    let cancel_button = on_cancel.reform(|_: MouseEvent| ());
    let on_confirm = props
        .on_event
        .reform(|_: MouseEvent| ControllerEvent::ConfirmSkip);

    let choices = (state == DialogState::Choices).then(|| {
        html! {
            <div class="dialog-choices" data-testid="dialog-choices">
                { for dialog.choices().iter().enumerate().map(|(idx, choice)| {
                    let onclick = props.on_event.reform(move |e: MouseEvent| {
                        e.stop_propagation();
                        ControllerEvent::Choose(idx)
                    });
                    html! {
                        <button type="button" class="btn dialog-choice" data-testid={format!("dialog-choice-{idx}")} {onclick}>
                            { choice.text.clone() }
                        </button>
                    }
                }) }
            </div>
        }
    });

    html! {
        <>
            <Portrait speaker={line.speaker.clone()} image={portrait} emotion={line.emotion()} />
            <div
                class={classes!("dialog-box", format!("emotion-{}", line.emotion().as_str()))}
                data-testid="dialog-box"
                onclick={on_advance}
            >
                <div class="dialog-box__speaker" data-testid="dialog-speaker">{ line.speaker.clone() }</div>
                <p class="dialog-box__text" data-testid="dialog-text">
                    { dialog.visible_text().to_string() }
                    if dialog.is_typing() {
                        <span class="dialog-box__cursor" aria-hidden="true">{"▌"}</span>
                    }
                </p>
                { choices.unwrap_or_default() }
                <div class="dialog-box__footer">
                    <span class="text-xs opacity-60">{ format!("{} / {}", dialog.index() + 1, dialog.len()) }</span>
                    if state == DialogState::Idle {
                        <span class="dialog-box__hint" data-testid="dialog-continue">{ t("story.continue_hint") }</span>
                    }
                    <button type="button" class="btn btn-ghost btn-xs" data-testid="dialog-skip" onclick={on_skip}>
                        { t("story.skip") }
                    </button>
                </div>
            </div>
            <Modal
                open={dialog.is_confirming_skip()}
                title={t("story.skip_title")}
                description={Some(AttrValue::from(t("story.skip_body")))}
                on_close={on_cancel}
                testid="skip-modal"
            >
                <div class="modal__actions">
                    <button type="button" class="btn" data-testid="skip-cancel" onclick={cancel_button}>{ t("story.skip_cancel") }</button>
                    <button type="button" class="btn btn-primary" data-testid="skip-confirm" onclick={on_confirm}>{ t("story.skip_confirm") }</button>
                </div>
            </Modal>
        </>
    }
}

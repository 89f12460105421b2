use crate::i18n::t;
use crate::pages::ScreenProps;
use kumis_game::ControllerEvent;
use yew::prelude::*;

/// Recap of every act, shown when the player skips an act's dialog.
#[function_component(SummaryPanel)]
pub fn summary_panel(props: &ScreenProps) -> Html {
    let summary = props.controller.content().summary();
    let on_continue = props
        .on_event
        .reform(|_: MouseEvent| ControllerEvent::ContinueSummary);

    html! {
        <section class="card shell-card summary-panel" data-testid="summary-panel">
            <div class="card-body gap-4">
                <h2 class="card-title">{ t("summary.title") }</h2>
                { for summary.entries.iter().map(|entry| html! {
                    <article class="summary-entry">
                        <span class="badge">{ entry.act.clone() }</span>
                        <h3 class="font-bold">{ entry.title.clone() }</h3>
                        if let Some(src) = entry.image.clone() {
                            <img class="summary-entry__image" {src} alt={entry.title.clone()} />
                        }
                        <p>{ entry.content.clone() }</p>
                    </article>
                }) }
                if !summary.key_learnings.is_empty() {
                    <h3 class="font-bold">{ t("summary.key_learnings") }</h3>
                    <ul class="key-learnings">
                        { for summary.key_learnings.iter().map(|k| html! {
                            <li><strong>{ k.label.clone() }</strong>{": "}{ k.desc.clone() }</li>
                        }) }
                    </ul>
                }
                <button type="button" class="btn btn-primary" data-testid="summary-continue" onclick={on_continue}>
                    { t("summary.continue") }
                </button>
            </div>
        </section>
    }
}

use super::ScreenProps;
use crate::i18n::{t, tr};
use kumis_game::ControllerEvent;
use std::collections::BTreeMap;
use yew::prelude::*;

#[function_component(EndingPage)]
pub fn ending_page(props: &ScreenProps) -> Html {
    let Some(summary) = props.controller.ending_summary() else {
        return Html::default();
    };
    let on_back = props
        .on_event
        .reform(|_: MouseEvent| ControllerEvent::ReturnFromEnding);
    let pct = summary.percentage.to_string();
    let mut args = BTreeMap::new();
    args.insert("pct", pct.as_str());

    html! {
        <div class="min-h-screen flex items-center justify-center shell-screen" data-testid="ending-screen" data-tier={summary.tier.as_str()}>
            <div class="card shell-card ending-card">
                <div class="card-body items-center text-center gap-4">
                    <h1 class="text-2xl font-bold" data-testid="ending-title">{ summary.text.title.clone() }</h1>
                    <p class="opacity-70">{ summary.text.subtitle.clone() }</p>
                    <dl class="ending-stats">
                        <dt>{ t("ending.player") }</dt>
                        <dd data-testid="ending-player">{ summary.player_name.clone() }</dd>
                        <dt>{ t("ending.class") }</dt>
                        <dd>{ summary.player_class.clone() }</dd>
                        <dt>{ t("ending.score") }</dt>
                        <dd data-testid="ending-score">{ format!("{} / {}", summary.total_score, summary.max_score) }</dd>
                    </dl>
                    <p class="font-bold" data-testid="ending-percentage">{ tr("ending.percentage", Some(&args)) }</p>
                    <p>{ summary.text.message.clone() }</p>
                    <blockquote class="ending-quote">{ summary.text.quote.clone() }</blockquote>
                    <button type="button" class="btn btn-primary" data-testid="ending-back" onclick={on_back}>
                        { t("ending.back") }
                    </button>
                </div>
            </div>
        </div>
    }
}

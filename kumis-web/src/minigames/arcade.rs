use crate::i18n::{t, tr};
use kumis_game::MiniGameAction;
use kumis_game::minigame::arcade::Hit;
use kumis_game::minigame::{ArcadeGame, Target};
use std::collections::BTreeMap;
use yew::prelude::*;

fn one_arg(key: &str, name: &str, value: &str) -> String {
    let mut args = BTreeMap::new();
    args.insert(name, value);
    tr(key, Some(&args))
}

#[must_use]
pub fn target_style(target: &Target) -> String {
    format!("left: {:.1}%; top: {:.1}%", target.x, target.y)
}

/// Short floating text for the last click.
#[must_use]
pub fn hit_label(hit: Hit) -> String {
    match hit {
        Hit::Progress { species, done, required } => format!("{} {done}/{required}", species.name()),
        Hit::Scored { species, points } => format!("{} +{points}", species.name()),
        Hit::Penalized { species, points } => format!("{} -{points}", species.name()),
        Hit::Missed { species } => species.name().to_string(),
    }
}

fn target_button(target: &Target, on_action: &Callback<MiniGameAction>) -> Html {
    let id = target.id;
    let onclick = on_action.reform(move |_: MouseEvent| MiniGameAction::Click(id));
    html! {
        <button
            type="button"
            class={classes!("arcade-target", target.good.then_some("arcade-target--good"))}
            style={target_style(target)}
            data-testid={format!("arcade-target-{id}")}
            aria-label={target.species.name()}
            {onclick}
        >
            <img src={target.species.image()} alt="" draggable="false" />
            if target.clicks_left > 1 {
                <span class="arcade-target__clicks">{ target.clicks_left.to_string() }</span>
            }
        </button>
    }
}

pub fn render(game: &ArcadeGame, on_action: &Callback<MiniGameAction>) -> Html {
    let kind = game.mode().kind();
    let secs = game.time_left().to_string();
    let cleared = game.cleared().to_string();
    let on_next = on_action.reform(|_: MouseEvent| MiniGameAction::Next);

    html! {
        <div class={classes!("arcade", format!("arcade--{}", kind.as_str()))} data-testid="arcade">
            <p class="text-sm opacity-70">{ t(&format!("minigame.help.{}", kind.as_str())) }</p>
            <div class="arcade__status">
                <span data-testid="arcade-time">{ one_arg("game.time", "secs", &secs) }</span>
                <span>{ one_arg("game.cleared", "count", &cleared) }</span>
                if let Some(hit) = game.last_hit() {
                    <span class="arcade__hit" role="status">{ hit_label(hit) }</span>
                }
            </div>
            if game.is_over() {
                <div class="arcade__result" data-testid="arcade-result">
                    <strong>{ t("game.result") }</strong>
                    <button type="button" class="btn btn-primary" data-testid="arcade-next" onclick={on_next}>
                        { t("game.finish") }
                    </button>
                </div>
            } else {
                <div class="arcade__field" data-testid="arcade-field">
                    { for game.targets().iter().map(|target| target_button(target, on_action)) }
                </div>
            }
        </div>
    }
}

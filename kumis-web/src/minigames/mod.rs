//! Views for the running mini-game. Each view reads the game out of the
//! controller snapshot and emits [`MiniGameAction`]s.
pub mod arcade;
pub mod quiz;
pub mod temperature;
pub mod typed;
pub mod word_guess;

use crate::i18n::{t, tr};
use crate::pages::ScreenProps;
use kumis_game::{ControllerEvent, MiniGame, MiniGameAction};
use std::collections::BTreeMap;
use yew::prelude::*;

pub(crate) fn action(on_event: &Callback<ControllerEvent>) -> Callback<MiniGameAction> {
    on_event.reform(ControllerEvent::MiniGame)
}

pub(crate) fn score_label(score: u32) -> String {
    let score = score.to_string();
    let mut args = BTreeMap::new();
    args.insert("score", score.as_str());
    tr("game.score", Some(&args))
}

pub(crate) fn question_label(index: usize, total: usize) -> String {
    let (current, total) = ((index + 1).min(total).to_string(), total.to_string());
    let mut args = BTreeMap::new();
    args.insert("current", current.as_str());
    args.insert("total", total.as_str());
    tr("game.question", Some(&args))
}

/// "NEXT", or "FINISH" on the last question.
pub(crate) fn next_label(index: usize, total: usize) -> String {
    if index + 1 >= total {
        t("game.finish")
    } else {
        t("game.next")
    }
}

#[function_component(MiniGamePanel)]
pub fn minigame_panel(props: &ScreenProps) -> Html {
    let Some(game) = props.controller.minigame() else {
        return Html::default();
    };
    let kind = game.kind();
    let on_action = action(&props.on_event);

    let body = match game {
        MiniGame::MultipleChoice(_)
        | MiniGame::TrueFalse(_)
        | MiniGame::PickWord(_)
        | MiniGame::Sorting(_) => quiz::QuizView::from_game(game, props.controller.content())
            .map(|view| quiz::render(&view, &on_action))
            .unwrap_or_default(),
        MiniGame::FillBlank(_) | MiniGame::WordScramble(_) => typed::TypedView::from_game(game)
            .map(|view| typed::render(&view, &on_action))
            .unwrap_or_default(),
        MiniGame::WordGuess(g) => word_guess::render(g, &on_action),
        MiniGame::Arcade(g) => arcade::render(g, &on_action),
        MiniGame::Temperature(g) => temperature::render(g, &on_action),
    };

    html! {
        <section class="card shell-card minigame-panel" data-testid="minigame-panel" data-kind={kind.as_str()}>
            <div class="card-body gap-4">
                <header class="minigame-panel__header">
                    <h2 class="card-title">{ t(&format!("minigame.{}", kind.as_str())) }</h2>
                    <span class="badge" data-testid="minigame-score">{ score_label(game.score()) }</span>
                </header>
                { body }
            </div>
        </section>
    }
}

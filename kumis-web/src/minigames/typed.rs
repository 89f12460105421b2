use super::{next_label, question_label};
use crate::i18n::{t, tr};
use kumis_game::minigame::{Attempt, TypedItem, TypedRound};
use kumis_game::{MiniGame, MiniGameAction};
use std::collections::BTreeMap;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Free-text answer games flattened for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedView {
    pub prompt: String,
    /// Scrambled letters, shown as tiles.
    pub tiles: Option<Vec<char>>,
    pub image: Option<String>,
    pub input: String,
    pub hint: Option<String>,
    pub last: Option<Attempt>,
    pub resolved: bool,
    pub answer: String,
    pub explanation: String,
    pub index: usize,
    pub total: usize,
}

impl TypedView {
    fn build<Q: TypedItem>(
        round: &TypedRound<Q>,
        describe: impl FnOnce(&Q) -> (String, Option<Vec<char>>, Option<String>),
    ) -> Option<Self> {
        let question = round.current()?;
        let (prompt, tiles, image) = describe(question);
        Some(Self {
            prompt,
            tiles,
            image,
            input: round.input().to_string(),
            hint: round.hint_visible().then(|| question.hint()),
            last: round.last_attempt(),
            resolved: round.is_resolved(),
            answer: question.answer().to_string(),
            explanation: question.explanation().to_string(),
            index: round.index(),
            total: round.len(),
        })
    }

    #[must_use]
    pub fn from_game(game: &MiniGame) -> Option<Self> {
        match game {
            MiniGame::FillBlank(round) => {
                Self::build(round, |q| (q.sentence.clone(), None, q.image.clone()))
            }
            MiniGame::WordScramble(round) => Self::build(round, |q| {
                let tiles = q.scrambled.chars().filter(|c| !c.is_whitespace()).collect();
                (q.hint.clone(), Some(tiles), q.image.clone())
            }),
            _ => None,
        }
    }

    /// Status line for the last submission.
    #[must_use]
    pub fn feedback(&self) -> Option<String> {
        match self.last? {
            Attempt::Correct { points } => {
                let points = points.to_string();
                let mut args = BTreeMap::new();
                args.insert("points", points.as_str());
                Some(format!("{} {}", t("game.correct"), tr("game.points", Some(&args))))
            }
            Attempt::Wrong { remaining } => {
                let count = remaining.to_string();
                let mut args = BTreeMap::new();
                args.insert("count", count.as_str());
                Some(format!("{} {}", t("game.wrong"), tr("game.attempts_left", Some(&args))))
            }
            Attempt::Revealed => {
                let mut args = BTreeMap::new();
                args.insert("answer", self.answer.as_str());
                Some(tr("game.answer_was", Some(&args)))
            }
        }
    }
}

pub fn render(view: &TypedView, on_action: &Callback<MiniGameAction>) -> Html {
    let oninput = on_action.reform(|e: InputEvent| {
        MiniGameAction::Input(e.target_unchecked_into::<HtmlInputElement>().value())
    });
    let onsubmit = on_action.reform(|e: SubmitEvent| {
        e.prevent_default();
        MiniGameAction::Submit
    });
    let on_hint = on_action.reform(|_: MouseEvent| MiniGameAction::ToggleHint);
    let on_next = on_action.reform(|_: MouseEvent| MiniGameAction::Next);
    let hint_label = if view.hint.is_some() {
        t("game.hint_hide")
    } else {
        t("game.hint")
    };

    html! {
        <div class="typed-game" data-testid="typed-game">
            <p class="text-xs opacity-60">{ question_label(view.index, view.total) }</p>
            if let Some(src) = view.image.clone() {
                <img class="typed-game__image" {src} alt="" />
            }
            <p class="typed-game__prompt" data-testid="typed-prompt">{ view.prompt.clone() }</p>
            if let Some(tiles) = view.tiles.as_ref() {
                <div class="scramble-tiles" data-testid="scramble-tiles">
                    { for tiles.iter().map(|c| html! { <span class="scramble-tile">{ c.to_string() }</span> }) }
                </div>
            }
            <form class="typed-game__form" {onsubmit}>
                <input
                    type="text"
                    class="input input-bordered"
                    data-testid="typed-input"
                    placeholder={t("game.answer_placeholder")}
                    value={view.input.clone()}
                    disabled={view.resolved}
                    autocomplete="off"
                    {oninput}
                />
                <button type="submit" class="btn btn-primary" disabled={view.resolved} data-testid="typed-submit">
                    { t("game.submit") }
                </button>
                <button type="button" class="btn btn-ghost" disabled={view.resolved} onclick={on_hint}>
                    { hint_label }
                </button>
            </form>
            if let Some(hint) = view.hint.clone() {
                <p class="typed-game__hint" data-testid="typed-hint">{ hint }</p>
            }
            if let Some(feedback) = view.feedback() {
                <p class="typed-game__feedback" role="status" data-testid="typed-feedback">{ feedback }</p>
            }
            if view.resolved {
                <p>{ view.explanation.clone() }</p>
                <button type="button" class="btn btn-primary" data-testid="typed-next" onclick={on_next}>
                    { next_label(view.index, view.total) }
                </button>
            }
        </div>
    }
}

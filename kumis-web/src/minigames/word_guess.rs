use super::{next_label, question_label};
use crate::i18n::tr;
use kumis_game::constants::WORD_GUESS_MAX_GUESSES;
use kumis_game::minigame::word_guess::KEYBOARD_ROWS;
use kumis_game::minigame::{LetterStatus, WordGuess, WordRound};
use kumis_game::{InputKey, MiniGameAction};
use std::collections::BTreeMap;
use yew::prelude::*;

#[must_use]
pub const fn status_class(status: Option<LetterStatus>) -> &'static str {
    match status {
        Some(LetterStatus::Correct) => "tile--correct",
        Some(LetterStatus::Present) => "tile--present",
        Some(LetterStatus::Absent) => "tile--absent",
        None => "tile--empty",
    }
}

/// One board row as `(letter, status)` cells, `word_len` wide.
#[must_use]
pub fn board_row(round: &WordRound, row: usize) -> Vec<(Option<char>, Option<LetterStatus>)> {
    let width = round.word_len();
    if let Some(guess) = round.rows().get(row) {
        return guess
            .word
            .chars()
            .zip(guess.feedback.iter().copied())
            .map(|(c, status)| (Some(c), Some(status)))
            .collect();
    }
    let typing = row == round.rows().len() && !round.is_over();
    let letters: Vec<char> = if typing {
        round.typing().chars().collect()
    } else {
        Vec::new()
    };
    (0..width).map(|i| (letters.get(i).copied(), None)).collect()
}

fn key_button(label: String, key: InputKey, class: &'static str, on_action: &Callback<MiniGameAction>) -> Html {
    let onclick = on_action.reform(move |_: MouseEvent| MiniGameAction::Key(key));
    html! {
        <button type="button" class={classes!("key", class)} data-testid={format!("key-{label}")} {onclick}>
            { label }
        </button>
    }
}

pub fn render(game: &WordGuess, on_action: &Callback<MiniGameAction>) -> Html {
    let round = game.round();
    let hint = game.current().map(|q| q.hint.clone()).unwrap_or_default();

    let board = (0..WORD_GUESS_MAX_GUESSES).map(|row| {
        html! {
            <div class="word-board__row">
                { for board_row(round, row).into_iter().map(|(letter, status)| html! {
                    <span class={classes!("tile", status_class(status))}>
                        { letter.map(String::from).unwrap_or_default() }
                    </span>
                }) }
            </div>
        }
    });

    let keyboard = KEYBOARD_ROWS.iter().enumerate().map(|(idx, row)| {
        let last = idx + 1 == KEYBOARD_ROWS.len();
        html! {
            <div class="keyboard__row">
                if last {
                    { key_button("ENTER".into(), InputKey::Enter, "key--wide", on_action) }
                }
                { for row.chars().map(|c| key_button(
                    c.to_string(),
                    InputKey::Char(c),
                    status_class(round.key_status(c)),
                    on_action,
                )) }
                if last {
                    { key_button("⌫".into(), InputKey::Backspace, "key--wide", on_action) }
                }
            </div>
        }
    });

    let result = round.is_over().then(|| {
        let message = if round.is_solved() {
            let points = round.points().to_string();
            let mut args = BTreeMap::new();
            args.insert("points", points.as_str());
            tr("game.solved", Some(&args))
        } else {
            let answer = game.current().map(|q| q.answer.clone()).unwrap_or_default();
            let mut args = BTreeMap::new();
            args.insert("answer", answer.as_str());
            tr("game.unsolved", Some(&args))
        };
        let explanation = game.current().map(|q| q.explanation.clone()).unwrap_or_default();
        let on_next = on_action.reform(|_: MouseEvent| MiniGameAction::Next);
        html! {
            <div class="word-guess__result" role="status" data-testid="word-guess-result">
                <strong>{ message }</strong>
                <p>{ explanation }</p>
                <button type="button" class="btn btn-primary" data-testid="word-guess-next" onclick={on_next}>
                    { next_label(game.index(), game.len()) }
                </button>
            </div>
        }
    });

    html! {
        <div class="word-guess" data-testid="word-guess">
            <p class="text-xs opacity-60">{ question_label(game.index(), game.len()) }</p>
            <p class="word-guess__hint">{ hint }</p>
            <div class="word-board" data-testid="word-board">{ for board }</div>
            { result.unwrap_or_default() }
            <div class="keyboard" data-testid="keyboard">{ for keyboard }</div>
        </div>
    }
}
